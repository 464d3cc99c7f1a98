use super::{Statement, TypeName};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Param {
    pub type_name: TypeName,
    pub name: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Declaration {
    pub type_name: TypeName,
    pub name: String,
    pub line: usize,
}

/// A function definition: declared locals are listed separately from the
/// statements, exactly as the grammar keeps them apart.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FunctionDef<T> {
    pub return_type: TypeName,
    pub name: String,
    pub params: Vec<Param>,
    pub decls: Vec<Declaration>,
    pub statements: Vec<Statement<T>>,
    pub line: usize,
}

/// A whole source file. The parser reorders the functions so that the
/// entry function `main` (if present) sits at index 0.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Program<T> {
    pub functions: Vec<FunctionDef<T>>,
}
