use super::{scope::Scope, types::Type};

/// The function whose body is currently being checked, for validating
/// return statements.
#[derive(Debug, Clone)]
pub struct CurrentFunction {
    pub name: String,
    pub return_type: Type,
}

/// State threaded through the type check pass.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub scope: Scope,
    pub current_function: Option<CurrentFunction>,
}
