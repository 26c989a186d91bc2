//! Reserved mathematical function registry
//!
//! Single source of truth for the reserved function names and their
//! derivative formulas. Differentiation looks formulas up here instead of
//! hard-coding them at the call sites.

use crate::ast::Expr;

pub(crate) mod definitions;
pub(crate) mod registry;

// ===== Helpers for building derivative expressions =====

/// Create a function call expression
pub(crate) fn func(name: &str, arg: Expr) -> Expr {
    Expr::call(name, arg)
}

/// Multiply, folding the 0 and 1 cases away
pub(crate) fn mul_opt(a: Expr, b: Expr) -> Expr {
    match (&a, &b) {
        (Expr::Number(x), _) if *x == 0.0 => Expr::number(0.0),
        (_, Expr::Number(x)) if *x == 0.0 => Expr::number(0.0),
        (Expr::Number(x), _) if *x == 1.0 => b,
        (_, Expr::Number(x)) if *x == 1.0 => a,
        _ => Expr::mul_expr(a, b),
    }
}

/// Add, folding the 0 cases away
pub(crate) fn add_opt(a: Expr, b: Expr) -> Expr {
    match (&a, &b) {
        (Expr::Number(x), _) if *x == 0.0 => b,
        (_, Expr::Number(x)) if *x == 0.0 => a,
        (Expr::Number(x), Expr::Number(y)) => Expr::number(x + y),
        _ => Expr::add_expr(a, b),
    }
}

/// Subtract, folding the trailing-0 and literal cases away
pub(crate) fn sub_opt(a: Expr, b: Expr) -> Expr {
    match (&a, &b) {
        (_, Expr::Number(x)) if *x == 0.0 => a,
        (Expr::Number(x), Expr::Number(y)) => Expr::number(x - y),
        _ => Expr::sub_expr(a, b),
    }
}

/// Raise to a power, folding the 0 and 1 exponent cases away
pub(crate) fn pow_opt(base: Expr, exponent: Expr) -> Expr {
    match &exponent {
        Expr::Number(x) if *x == 0.0 => Expr::number(1.0),
        Expr::Number(x) if *x == 1.0 => base,
        _ => Expr::pow(base, exponent),
    }
}

/// Negate an expression
pub(crate) fn neg(e: Expr) -> Expr {
    Expr::mul_expr(Expr::number(-1.0), e)
}
