use std::fmt::Display;

/// A runtime value. All SLU-C values are scalars; `Unset` marks a declared
/// local that has not been assigned yet (and the result of calling a
/// function that never executes a `return`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Unset,
}

impl Value {
    /// Numeric view of the value, used when an operator mixes int and
    /// float operands.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(value) => Some(*value as f64),
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            // keep a trailing `.0` so a float never prints like an int
            Value::Float(value) => {
                if value.is_finite() && value.fract() == 0.0 {
                    write!(f, "{value:.1}")
                } else {
                    write!(f, "{value}")
                }
            }
            Value::Bool(value) => write!(f, "{value}"),
            Value::Str(value) => write!(f, "{value}"),
            Value::Unset => write!(f, "unset"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_float_keeps_decimal_point() {
        assert_eq!("150.0", Value::Float(150.0).to_string());
        assert_eq!("-2.0", Value::Float(-2.0).to_string());
    }

    #[test]
    fn test_fractional_float_prints_plainly() {
        assert_eq!("3.5", Value::Float(3.5).to_string());
    }

    #[test]
    fn test_bools_print_as_keywords() {
        assert_eq!("true", Value::Bool(true).to_string());
        assert_eq!("false", Value::Bool(false).to_string());
    }

    #[test]
    fn test_strings_print_without_quotes() {
        assert_eq!("hi", Value::Str("hi".to_string()).to_string());
    }
}
