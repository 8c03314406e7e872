//! Dash pattern resolution for stroke styles.
//!
//! Named styles (`Dashed`, `Dashdot`, `Dotted`) come from the parameter
//! store and are used as stored. Any other style is a literal list such as
//! `"5,2,0.1"` whose entries are divided by the drawing scale. Malformed
//! literals never abort an export: they log a warning and resolve to
//! `"none"`.

use serde_json::Value;
use tracing::warn;

use crate::config::{dash_pattern, DraftParam, ParamStore};
use crate::error::{Result, StyleError};

use super::format_number;

const NONE: &str = "none";

/// Resolves a line style to an SVG `stroke-dasharray` value.
///
/// A missing style resolves to `"none"`.
#[must_use]
pub fn resolve_line_style(name: Option<&str>, scale: f64, params: &dyn ParamStore) -> String {
    let Some(name) = name else {
        return NONE.to_owned();
    };
    if let Some(param) = DraftParam::for_line_style(name) {
        return dash_pattern(params, param);
    }
    scale_dashes(name, scale)
}

/// Resolves a loosely-typed line style, e.g. one read from a JSON document.
///
/// `null` behaves like a missing style and a non-numeric scale degrades to
/// `"none"`.
///
/// # Errors
///
/// Returns [`StyleError::NotAString`] if `name` is neither a string nor `null`.
pub fn resolve_line_style_value(
    name: &Value,
    scale: &Value,
    params: &dyn ParamStore,
) -> Result<String> {
    let name = match name {
        Value::Null => return Ok(NONE.to_owned()),
        Value::String(s) => s.as_str(),
        _ => return Err(StyleError::NotAString("line style").into()),
    };
    if DraftParam::for_line_style(name).is_some() {
        return Ok(resolve_line_style(Some(name), 1.0, params));
    }
    match scale.as_f64() {
        Some(scale) => Ok(scale_dashes(name, scale)),
        None => {
            warn!(line_style = name, %scale, "line style scale is not a number");
            Ok(NONE.to_owned())
        }
    }
}

fn scale_dashes(literal: &str, scale: f64) -> String {
    if !literal.contains(',') {
        warn!(line_style = literal, "line style is not a comma separated list");
        return NONE.to_owned();
    }

    let mut dashes = Vec::new();
    for part in literal.split(',') {
        match part.trim().parse::<f64>() {
            Ok(dash) => dashes.push(dash),
            Err(_) => {
                warn!(
                    line_style = literal,
                    "could not convert string to float: {:?}",
                    part
                );
                return NONE.to_owned();
            }
        }
    }
    if dashes.iter().any(|d| !d.is_finite()) {
        warn!(line_style = literal, "Not a number in line style");
        return NONE.to_owned();
    }
    if scale == 0.0 || scale.is_nan() {
        warn!(line_style = literal, scale, "division by zero");
        return NONE.to_owned();
    }

    dashes
        .iter()
        .map(|dash| format_number(dash / scale))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{BuiltinDefaults, DraftParams};
    use proptest::prelude::*;
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn resolve_logged(name: &str, scale: f64) -> (String, String) {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_ansi(false)
            .finish();
        let out = tracing::subscriber::with_default(subscriber, || {
            resolve_line_style(Some(name), scale, &BuiltinDefaults)
        });
        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        (out, logs)
    }

    fn resolve(name: &str, scale: f64) -> String {
        resolve_line_style(Some(name), scale, &BuiltinDefaults)
    }

    #[test]
    fn custom_styles_are_scaled() {
        assert_eq!(resolve("1,1,1", 1.0), "1.0,1.0,1.0");
        assert_eq!(resolve("5,2,0.1", 2.0), "2.5,1.0,0.05");
        assert_eq!(resolve("4.0,2.0,1.0", 2.0), "2.0,1.0,0.5");
        assert_eq!(resolve("-1,0,-0.5", 5.0), "-0.2,0.0,-0.1");
        assert_eq!(resolve("1.0,2.0", 1.0), "1.0,2.0");
        assert_eq!(resolve("0.1,0.01", 10.0), "0.01,0.001");
    }

    #[test]
    fn named_styles_are_not_scaled() {
        assert_eq!(resolve("Dashed", 1.0), "0.09,0.05");
        assert_eq!(resolve("Dashdot", 1.0), "0.09,0.05,0.02,0.05");
        assert_eq!(resolve("Dotted", 1.0), "0.02,0.02");
        assert_eq!(resolve("Dotted", 2.0), "0.02,0.02");
    }

    #[test]
    fn named_styles_read_the_store() {
        let params = DraftParams::from_json(r#"{"svgDashedLine": "3,1"}"#).unwrap();
        assert_eq!(resolve_line_style(Some("Dashed"), 4.0, &params), "3,1");
    }

    #[test]
    fn malformed_styles_resolve_to_none() {
        for bad in ["", "5", "something", "fobar", "NaN,NaN", "Inf,Inf", "One,Two"] {
            assert_eq!(resolve(bad, 1.0), "none", "input {bad:?}");
        }
        assert_eq!(resolve_line_style(None, 1.0, &BuiltinDefaults), "none");
    }

    #[test]
    fn zero_scale_logs_division_by_zero() {
        let (out, logs) = resolve_logged("1,1", 0.0);
        assert_eq!(out, "none");
        assert!(logs.contains("division by zero"));
    }

    #[test]
    fn non_finite_dash_logs_not_a_number() {
        let (out, logs) = resolve_logged("NaN,1", 1.0);
        assert_eq!(out, "none");
        assert!(logs.contains("Not a number"));

        let (out, logs) = resolve_logged("Inf,2", 1.0);
        assert_eq!(out, "none");
        assert!(logs.contains("Not a number"));
    }

    #[test]
    fn unparsable_dash_logs_conversion_failure() {
        let (out, logs) = resolve_logged("one, two", 1.0);
        assert_eq!(out, "none");
        assert!(logs.contains("could not convert string to float"));
    }

    #[test]
    fn dynamic_input_accepts_strings_and_null() {
        let params = BuiltinDefaults;
        assert_eq!(
            resolve_line_style_value(&json!("5,2,0.1"), &json!(2), &params).unwrap(),
            "2.5,1.0,0.05"
        );
        assert_eq!(
            resolve_line_style_value(&Value::Null, &json!(1), &params).unwrap(),
            "none"
        );
        assert_eq!(
            resolve_line_style_value(&json!("Dotted"), &Value::Null, &params).unwrap(),
            "0.02,0.02"
        );
    }

    #[test]
    fn dynamic_non_numeric_scale_degrades() {
        let out = resolve_line_style_value(&json!("1,2"), &Value::Null, &BuiltinDefaults).unwrap();
        assert_eq!(out, "none");
    }

    #[test]
    fn dynamic_non_string_style_is_an_error() {
        assert!(resolve_line_style_value(&json!({"dash": 1}), &json!(1), &BuiltinDefaults).is_err());
        assert!(resolve_line_style_value(&json!([1, 2]), &json!(1), &BuiltinDefaults).is_err());
    }

    proptest! {
        #[test]
        fn each_dash_is_divided_by_scale(
            dashes in prop::collection::vec(-1000.0..1000.0f64, 2..6),
            scale in 0.001..1000.0f64,
        ) {
            let literal = dashes.iter().map(|d| format!("{d:?}")).collect::<Vec<_>>().join(",");
            let expected = dashes
                .iter()
                .map(|d| format_number(d / scale))
                .collect::<Vec<_>>()
                .join(",");
            prop_assert_eq!(resolve(&literal, scale), expected);
        }

        #[test]
        fn unit_scale_keeps_values(dashes in prop::collection::vec(-1000.0..1000.0f64, 2..6)) {
            let literal = dashes.iter().map(|d| format_number(*d)).collect::<Vec<_>>().join(",");
            prop_assert_eq!(resolve(&literal, 1.0), literal);
        }

        #[test]
        fn named_styles_ignore_scale(scale in -1000.0..1000.0f64) {
            prop_assert_eq!(resolve("Dashed", scale), "0.09,0.05");
        }
    }
}
