use std::fmt::Display;

use crate::parser::ast::TypeName;

/// Canonical semantic type attached to every checked expression. `String`
/// never appears in a declaration; it exists only for string-literal print
/// arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Type {
    Integer,
    Float,
    Boolean,
    String,
}

impl Type {
    pub fn is_numeric(self) -> bool {
        matches!(self, Type::Integer | Type::Float)
    }

    /// Whether a value of type `self` may be stored in a slot declared as
    /// `declared`. Int and float mix freely; the bool boundary and strings
    /// do not.
    pub fn is_assignable_to(self, declared: Type) -> bool {
        self == declared || (self.is_numeric() && declared.is_numeric())
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Type::Integer => "int",
            Type::Float => "float",
            Type::Boolean => "bool",
            Type::String => "string",
        };

        f.write_str(name)
    }
}

impl From<TypeName> for Type {
    fn from(value: TypeName) -> Self {
        match value {
            TypeName::Int => Type::Integer,
            TypeName::Float => Type::Float,
            TypeName::Bool => Type::Boolean,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_types_mix() {
        assert!(Type::Integer.is_assignable_to(Type::Float));
        assert!(Type::Float.is_assignable_to(Type::Integer));
        assert!(Type::Boolean.is_assignable_to(Type::Boolean));
    }

    #[test]
    fn test_bool_boundary() {
        assert!(!Type::Boolean.is_assignable_to(Type::Integer));
        assert!(!Type::Integer.is_assignable_to(Type::Boolean));
        assert!(!Type::Float.is_assignable_to(Type::Boolean));
    }

    #[test]
    fn test_strings_are_not_assignable() {
        assert!(!Type::String.is_assignable_to(Type::Integer));
        assert!(!Type::String.is_assignable_to(Type::Boolean));
    }

    #[test]
    fn test_from_type_name() {
        assert_eq!(Type::Integer, TypeName::Int.into());
        assert_eq!(Type::Float, TypeName::Float.into());
        assert_eq!(Type::Boolean, TypeName::Bool.into());
    }
}
