//! Draft parameters read by the exporter.
//!
//! Four parameters are consulted: the three named dash patterns and the
//! discretization step. Lookups go through [`ParamStore`] so callers can
//! back them with their own preference system; [`DraftParams`] is the
//! in-memory store, loadable from JSON.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The parameters the exporter knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftParam {
    DashedLine,
    DashdotLine,
    DottedLine,
    Discretization,
}

impl DraftParam {
    /// Key under which the parameter is stored.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::DashedLine => "svgDashedLine",
            Self::DashdotLine => "svgDashdotLine",
            Self::DottedLine => "svgDottedLine",
            Self::Discretization => "svgDiscretization",
        }
    }

    /// Built-in value used when the store has none.
    #[must_use]
    pub fn builtin_default(self) -> ParamValue {
        match self {
            Self::DashedLine => ParamValue::String("0.09,0.05".to_owned()),
            Self::DashdotLine => ParamValue::String("0.09,0.05,0.02,0.05".to_owned()),
            Self::DottedLine => ParamValue::String("0.02,0.02".to_owned()),
            Self::Discretization => ParamValue::Float(10.0),
        }
    }

    /// The dash parameter behind a named line style.
    #[must_use]
    pub fn for_line_style(name: &str) -> Option<Self> {
        match name {
            "Dashed" => Some(Self::DashedLine),
            "Dashdot" => Some(Self::DashdotLine),
            "Dotted" => Some(Self::DottedLine),
            _ => None,
        }
    }

    fn is_string(self) -> bool {
        !matches!(self, Self::Discretization)
    }
}

impl FromStr for DraftParam {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::DashedLine,
            Self::DashdotLine,
            Self::DottedLine,
            Self::Discretization,
        ]
        .into_iter()
        .find(|param| param.key() == s)
        .ok_or_else(|| ConfigError::UnknownParameter(s.to_owned()))
    }
}

/// A stored parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Float(f64),
    String(String),
}

/// Read access to a key-value parameter store.
pub trait ParamStore {
    /// The string stored under `name`, or `default`.
    fn get_string(&self, name: &str, default: &str) -> String;

    /// The float stored under `name`, or `default`.
    fn get_float(&self, name: &str, default: f64) -> f64;
}

/// A store that holds nothing, so every lookup yields its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDefaults;

impl ParamStore for BuiltinDefaults {
    fn get_string(&self, _name: &str, default: &str) -> String {
        default.to_owned()
    }

    fn get_float(&self, _name: &str, default: f64) -> f64 {
        default
    }
}

/// In-memory parameter store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftParams {
    values: HashMap<String, ParamValue>,
}

impl DraftParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object such as `{"svgDashedLine": "0.2,0.1"}`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the document is not an object of
    /// strings and numbers.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Stores `value` under `param`'s key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WrongType`] if the value kind does not match the parameter.
    pub fn set(&mut self, param: DraftParam, value: ParamValue) -> Result<(), ConfigError> {
        if param.is_string() != matches!(value, ParamValue::String(_)) {
            return Err(ConfigError::WrongType { name: param.key() });
        }
        self.values.insert(param.key().to_owned(), value);
        Ok(())
    }
}

impl ParamStore for DraftParams {
    fn get_string(&self, name: &str, default: &str) -> String {
        match self.values.get(name) {
            Some(ParamValue::String(s)) => s.clone(),
            _ => default.to_owned(),
        }
    }

    fn get_float(&self, name: &str, default: f64) -> f64 {
        match self.values.get(name) {
            Some(ParamValue::Float(v)) => *v,
            _ => default,
        }
    }
}

/// Looks up a parameter by name.
///
/// A stored discretization of `0` yields `default`.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownParameter`] for a name outside the four
/// known parameters and [`ConfigError::WrongType`] if `default` has the
/// wrong kind for it.
pub fn draft_param(
    store: &dyn ParamStore,
    name: &str,
    default: ParamValue,
) -> Result<ParamValue, ConfigError> {
    let param: DraftParam = name.parse()?;
    match (param.is_string(), default) {
        (true, ParamValue::String(default)) => {
            Ok(ParamValue::String(store.get_string(param.key(), &default)))
        }
        (false, ParamValue::Float(default)) => {
            let value = store.get_float(param.key(), default);
            Ok(ParamValue::Float(if value == 0.0 { default } else { value }))
        }
        _ => Err(ConfigError::WrongType { name: param.key() }),
    }
}

/// Dash pattern of a named style, falling back to the built-in pattern.
pub(crate) fn dash_pattern(store: &dyn ParamStore, param: DraftParam) -> String {
    match param.builtin_default() {
        ParamValue::String(default) => store.get_string(param.key(), &default),
        ParamValue::Float(_) => String::new(),
    }
}

/// Maximum segment length used when discretizing curves.
pub(crate) fn discretization(store: &dyn ParamStore) -> f64 {
    const DEFAULT: f64 = 10.0;
    let value = store.get_float(DraftParam::Discretization.key(), DEFAULT);
    if value == 0.0 || !value.is_finite() {
        DEFAULT
    } else {
        value.abs()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn string_params_fall_back_to_default() {
        let store = DraftParams::new();
        for name in ["svgDashedLine", "svgDottedLine", "svgDashdotLine"] {
            let value = draft_param(&store, name, ParamValue::String("1".into())).unwrap();
            assert_eq!(value, ParamValue::String("1".into()));
        }
    }

    #[test]
    fn discretization_falls_back_to_default() {
        let value = draft_param(&DraftParams::new(), "svgDiscretization", ParamValue::Float(1.0))
            .unwrap();
        assert_eq!(value, ParamValue::Float(1.0));
    }

    #[test]
    fn stored_zero_discretization_uses_default() {
        let store = DraftParams::from_json(r#"{"svgDiscretization": 0}"#).unwrap();
        let value = draft_param(&store, "svgDiscretization", ParamValue::Float(10.0)).unwrap();
        assert_eq!(value, ParamValue::Float(10.0));
        assert!((discretization(&store) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stored_values_win() {
        let store =
            DraftParams::from_json(r#"{"svgDashedLine": "0.2,0.1", "svgDiscretization": 2.5}"#)
                .unwrap();
        assert_eq!(dash_pattern(&store, DraftParam::DashedLine), "0.2,0.1");
        assert_eq!(dash_pattern(&store, DraftParam::DottedLine), "0.02,0.02");
        assert!((discretization(&store) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_name_fails() {
        let err = draft_param(&DraftParams::new(), "foobar", ParamValue::String("foobar".into()));
        assert!(matches!(err, Err(ConfigError::UnknownParameter(name)) if name == "foobar"));
    }

    #[test]
    fn wrong_default_kind_fails() {
        let err = draft_param(&DraftParams::new(), "svgDashedLine", ParamValue::Float(1.0));
        assert!(matches!(err, Err(ConfigError::WrongType { name: "svgDashedLine" })));
    }

    #[test]
    fn set_checks_value_kind() {
        let mut store = DraftParams::new();
        assert!(store
            .set(DraftParam::Discretization, ParamValue::String("5".into()))
            .is_err());
        store
            .set(DraftParam::DottedLine, ParamValue::String("0.1,0.1".into()))
            .unwrap();
        assert_eq!(store.get_string("svgDottedLine", ""), "0.1,0.1");
    }

    #[test]
    fn malformed_json_fails() {
        assert!(matches!(
            DraftParams::from_json("[1, 2]"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn builtin_defaults_store_is_empty() {
        assert_eq!(dash_pattern(&BuiltinDefaults, DraftParam::DashdotLine), "0.09,0.05,0.02,0.05");
        assert!((discretization(&BuiltinDefaults) - 10.0).abs() < f64::EPSILON);
    }
}
