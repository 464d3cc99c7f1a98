use std::collections::HashMap;

use super::types::Type;

/// Parameter and return types of a function as seen by the checker.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Signature {
    pub params: Vec<Type>,
    pub return_type: Type,
}

/// Name resolution state. SLU-C blocks do not introduce nested scopes, so
/// a function frame is a single flat variable map; the function table is
/// global and survives across frames.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    variables: HashMap<String, Type>,
    functions: HashMap<String, Signature>,
}

impl Scope {
    /// Start a fresh variable frame for the next function; the function
    /// table is left untouched.
    pub fn enter_function(&mut self) {
        self.variables.clear();
    }

    pub fn add_variable(&mut self, name: &str, type_id: Type) {
        self.variables.insert(name.to_string(), type_id);
    }

    pub fn resolve_variable(&self, name: &str) -> Option<Type> {
        self.variables.get(name).copied()
    }

    pub fn add_function(&mut self, name: &str, signature: Signature) {
        self.functions.insert(name.to_string(), signature);
    }

    pub fn resolve_function(&self, name: &str) -> Option<&Signature> {
        self.functions.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variables_are_cleared_per_function() {
        let mut scope = Scope::default();
        scope.add_variable("x", Type::Integer);

        assert_eq!(Some(Type::Integer), scope.resolve_variable("x"));

        scope.enter_function();

        assert_eq!(None, scope.resolve_variable("x"));
    }

    #[test]
    fn test_functions_survive_frames() {
        let mut scope = Scope::default();
        scope.add_function(
            "add",
            Signature {
                params: vec![Type::Integer, Type::Integer],
                return_type: Type::Integer,
            },
        );

        scope.enter_function();

        assert!(scope.resolve_function("add").is_some());
    }
}
