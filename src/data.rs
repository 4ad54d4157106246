use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => {
                if f.fract() == 0.0 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            Value::Boolean(b) => b.to_string(),
        }
    }

    /// Lenient numeric coercion. Non-finite results count as unparseable.
    pub fn as_f64(&self) -> Option<f64> {
        let numeric = match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Boolean(_) => None,
        };
        numeric.filter(|f| f.is_finite())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

/// Infers a scalar from a raw CSV field. Empty fields become missing cells;
/// non-finite float literals are kept as strings so placeholder tokens like
/// "nan" survive for the normalizer.
pub fn infer_scalar(raw: &str) -> Option<Value> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = raw.parse::<i64>() {
        return Some(Value::Integer(parsed));
    }
    if let Ok(parsed) = raw.parse::<f64>() {
        if parsed.is_finite() {
            return Some(Value::Float(parsed));
        }
    }
    match raw.to_ascii_lowercase().as_str() {
        "true" => Some(Value::Boolean(true)),
        "false" => Some(Value::Boolean(false)),
        _ => Some(Value::String(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_scalar_recognizes_each_variant() {
        assert_eq!(infer_scalar(""), None);
        assert_eq!(infer_scalar("42"), Some(Value::Integer(42)));
        assert_eq!(infer_scalar("-7"), Some(Value::Integer(-7)));
        assert_eq!(infer_scalar("3.5"), Some(Value::Float(3.5)));
        assert_eq!(infer_scalar("TRUE"), Some(Value::Boolean(true)));
        assert_eq!(infer_scalar("false"), Some(Value::Boolean(false)));
        assert_eq!(
            infer_scalar("spaza shop"),
            Some(Value::String("spaza shop".to_string()))
        );
    }

    #[test]
    fn infer_scalar_keeps_non_finite_literals_as_strings() {
        assert_eq!(infer_scalar("nan"), Some(Value::String("nan".to_string())));
        assert_eq!(infer_scalar("inf"), Some(Value::String("inf".to_string())));
        assert_eq!(
            infer_scalar("-infinity"),
            Some(Value::String("-infinity".to_string()))
        );
    }

    #[test]
    fn as_display_renders_whole_floats_without_fraction() {
        assert_eq!(Value::Float(60.0).as_display(), "60");
        assert_eq!(Value::Float(2.5).as_display(), "2.5");
        assert_eq!(Value::Integer(14).as_display(), "14");
        assert_eq!(Value::Boolean(true).as_display(), "true");
    }

    #[test]
    fn as_f64_trims_and_rejects_non_numeric_strings() {
        assert_eq!(Value::String(" 5 ".to_string()).as_f64(), Some(5.0));
        assert_eq!(Value::String("missing".to_string()).as_f64(), None);
        assert_eq!(Value::String("nan".to_string()).as_f64(), None);
        assert_eq!(Value::Integer(12).as_f64(), Some(12.0));
        assert_eq!(Value::Boolean(false).as_f64(), None);
    }
}
