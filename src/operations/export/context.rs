use std::collections::HashSet;

use crate::config::{BuiltinDefaults, ParamStore};
use crate::math::Vector3;

/// State shared by every path emitted during one export call.
///
/// It records the `d` data already written so an identical path (a face
/// boundary repeated by a neighbouring face, say) is drawn once. Use one
/// context per export; it is not meant to be shared across threads.
pub struct ExportContext<'p> {
    params: &'p dyn ParamStore,
    view_normal: Vector3,
    emitted: HashSet<String>,
}

impl ExportContext<'static> {
    /// A context reading built-in parameter defaults, viewing along +Z.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(&BuiltinDefaults)
    }
}

impl Default for ExportContext<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p> ExportContext<'p> {
    /// A context reading parameters from `params`.
    #[must_use]
    pub fn with_params(params: &'p dyn ParamStore) -> Self {
        Self {
            params,
            view_normal: Vector3::z(),
            emitted: HashSet::new(),
        }
    }

    /// Viewing direction used when a translation has no drawing plane.
    #[must_use]
    pub fn with_view_normal(mut self, normal: Vector3) -> Self {
        self.view_normal = normal;
        self
    }

    #[must_use]
    pub fn params(&self) -> &dyn ParamStore {
        self.params
    }

    #[must_use]
    pub fn view_normal(&self) -> &Vector3 {
        &self.view_normal
    }

    /// Returns `true` if identical path data was already emitted.
    #[must_use]
    pub fn is_emitted(&self, d: &str) -> bool {
        self.emitted.contains(d)
    }

    /// Records path data; returns `false` if it was already present.
    pub fn register(&mut self, d: String) -> bool {
        self.emitted.insert(d)
    }

    /// Number of distinct path data strings emitted so far.
    #[must_use]
    pub fn emitted_count(&self) -> usize {
        self.emitted.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_each_path_once() {
        let mut ctx = ExportContext::new();
        assert!(ctx.register("M 0.0 0.0 L 1.0 1.0".into()));
        assert!(ctx.is_emitted("M 0.0 0.0 L 1.0 1.0"));
        assert!(!ctx.register("M 0.0 0.0 L 1.0 1.0".into()));
        assert_eq!(ctx.emitted_count(), 1);
    }

    #[test]
    fn default_view_is_along_z() {
        assert_eq!(ExportContext::default().view_normal(), &Vector3::z());
    }
}
