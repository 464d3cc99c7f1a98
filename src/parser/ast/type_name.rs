use std::fmt::Display;

/// A type annotation as written in source. `int`, `float` and `bool` are
/// the only declarable types; strings exist solely as print arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TypeName {
    Int,
    Float,
    Bool,
}

impl TypeName {
    pub fn from_keyword(lexeme: &str) -> Option<TypeName> {
        match lexeme {
            "int" => Some(TypeName::Int),
            "float" => Some(TypeName::Float),
            "bool" => Some(TypeName::Bool),
            _ => None,
        }
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TypeName::Int => "int",
            TypeName::Float => "float",
            TypeName::Bool => "bool",
        };

        f.write_str(name)
    }
}
