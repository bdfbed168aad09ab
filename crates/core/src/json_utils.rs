//! JSON serialization helpers shared across crates.

/// Serialize an optional float, writing `null` for NaN and infinities.
///
/// Use with `#[serde(serialize_with = "finite_f64::serialize")]`.
pub mod finite_f64 {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) if v.is_finite() => serializer.serialize_f64(*v),
            _ => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Holder {
        #[serde(serialize_with = "super::finite_f64::serialize")]
        value: Option<f64>,
    }

    fn render(value: Option<f64>) -> String {
        serde_json::to_string(&Holder { value }).unwrap_or_default()
    }

    #[test]
    fn test_finite_value_kept() {
        assert_eq!(render(Some(20.5)), r#"{"value":20.5}"#);
    }

    #[test]
    fn test_nan_becomes_null() {
        assert_eq!(render(Some(f64::NAN)), r#"{"value":null}"#);
    }

    #[test]
    fn test_infinity_becomes_null() {
        assert_eq!(render(Some(f64::INFINITY)), r#"{"value":null}"#);
        assert_eq!(render(Some(f64::NEG_INFINITY)), r#"{"value":null}"#);
    }

    #[test]
    fn test_none_is_null() {
        assert_eq!(render(None), r#"{"value":null}"#);
    }
}
