//! Parser module — converts normalized definition strings to expression trees
//!
//! Pipeline: lex (longest-match against the declared symbol tables) → Pratt
//! parse with standard precedence (`^` right-associative over `×`/`÷` over
//! `+`/`-`, unary minus binding between `×` and `^`).

mod lexer;
mod pratt;
pub(crate) mod tokens;

use crate::ast::Expr;
use crate::error::CasError;
use crate::function::Function;
use crate::symbols;

/// Declared-symbol tables the lexer and parser resolve identifiers against
pub(crate) struct SymbolContext<'a> {
    pub input: &'a str,
    pub output: &'a str,
    /// Assumed constants (reserved constants are implied)
    pub constants: Vec<&'a str>,
    /// Reserved and assumed function names, longest first
    pub functions: Vec<&'a str>,
}

impl<'a> SymbolContext<'a> {
    pub(crate) fn of(function: &'a Function) -> Self {
        let mut functions: Vec<&str> = function
            .assumed_functions()
            .iter()
            .map(|p| p.output())
            .chain(symbols::RESERVED_FUNCTIONS.iter().copied())
            .collect();
        functions.sort_by_key(|name| std::cmp::Reverse(name.len()));
        SymbolContext {
            input: function.input(),
            output: function.output(),
            constants: function
                .assumed_constants()
                .iter()
                .map(String::as_str)
                .collect(),
            functions,
        }
    }

    pub(crate) fn is_function(&self, name: &str) -> bool {
        self.functions.contains(&name)
    }

    /// Longest declared name at the start of `rest`, if any
    pub(crate) fn name_prefix(&self, rest: &str) -> Option<&'a str> {
        let mut best: Option<&'a str> = None;
        let mut consider = |name: &'a str| {
            if rest.starts_with(name) && best.is_none_or(|b| name.len() > b.len()) {
                best = Some(name);
            }
        };
        for &name in &self.functions {
            consider(name);
        }
        consider(self.input);
        consider(self.output);
        for &name in &self.constants {
            consider(name);
        }
        for &name in symbols::RESERVED_CONSTANTS {
            consider(name);
        }
        best
    }
}

/// Parse a prepared function's normalized definition into an expression tree.
///
/// # Errors
/// - `UnpreparedFunction` if the function was never normalized
/// - `MalformedExpression` on unbalanced parentheses, dangling operators, or
///   empty operands
/// - `UnknownSymbol` on an identifier that is not the input, the output, a
///   declared constant, or a recognized function name
pub fn parse_definition(function: &Function) -> Result<Expr, CasError> {
    let normalized = function
        .normalized()
        .ok_or_else(|| CasError::UnpreparedFunction {
            output: function.output().to_string(),
        })?;
    let ctx = SymbolContext::of(function);
    parse(normalized, &ctx)
}

pub(crate) fn parse(input: &str, ctx: &SymbolContext<'_>) -> Result<Expr, CasError> {
    let tokens = lexer::lex(input, ctx)?;
    pratt::parse_expression(&tokens, ctx)
}
