use std::collections::HashMap;
use std::sync::OnceLock;

use crate::ast::Expr;

/// Definition of a reserved function: its canonical name and its symbolic
/// differentiation rule
#[derive(Clone)]
pub(crate) struct FunctionDefinition {
    /// Canonical name of the function (e.g., "sin", "ln")
    pub name: &'static str,

    /// Symbolic differentiation rule.
    /// Arguments: (argument of the call, derivative of the argument)
    /// Returns the chain-rule total d f(u)/dx = f'(u) * u'
    pub derivative: fn(&Expr, &Expr) -> Expr,
}

/// Static registry storing all reserved function definitions
static REGISTRY: OnceLock<HashMap<&'static str, FunctionDefinition>> = OnceLock::new();

fn init_registry() -> HashMap<&'static str, FunctionDefinition> {
    let mut map = HashMap::with_capacity(8);
    for def in crate::functions::definitions::all_definitions() {
        map.insert(def.name, def);
    }
    map
}

/// Central registry for getting function definitions
pub(crate) struct Registry;

impl Registry {
    /// Get a function definition by name - O(1) HashMap lookup
    pub(crate) fn get(name: &str) -> Option<&'static FunctionDefinition> {
        REGISTRY.get_or_init(init_registry).get(name)
    }
}
