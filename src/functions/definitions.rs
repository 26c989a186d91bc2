//! Derivative rules for the reserved functions
//!
//! `log` is the base-10 logarithm, `ln` the natural one.

use super::registry::FunctionDefinition;
use super::{func, mul_opt, neg};
use crate::ast::Expr;

/// Return all function definitions for populating the registry
pub(crate) fn all_definitions() -> Vec<FunctionDefinition> {
    vec![
        FunctionDefinition {
            name: "sin",
            derivative: |u, u_prime| {
                // d/dx sin(u) = cos(u) * u'
                mul_opt(func("cos", u.clone()), u_prime.clone())
            },
        },
        FunctionDefinition {
            name: "cos",
            derivative: |u, u_prime| {
                // d/dx cos(u) = -sin(u) * u'
                mul_opt(neg(func("sin", u.clone())), u_prime.clone())
            },
        },
        FunctionDefinition {
            name: "tan",
            derivative: |u, u_prime| {
                // d/dx tan(u) = u' / cos^2(u)
                Expr::div_expr(
                    u_prime.clone(),
                    Expr::pow(func("cos", u.clone()), Expr::number(2.0)),
                )
            },
        },
        FunctionDefinition {
            name: "ln",
            derivative: |u, u_prime| {
                // d/dx ln(u) = u' / u
                Expr::div_expr(u_prime.clone(), u.clone())
            },
        },
        FunctionDefinition {
            name: "log",
            derivative: |u, u_prime| {
                // d/dx log10(u) = u' / (u * ln(10))
                Expr::div_expr(
                    u_prime.clone(),
                    Expr::mul_expr(u.clone(), func("ln", Expr::number(10.0))),
                )
            },
        },
        FunctionDefinition {
            name: "sqrt",
            derivative: |u, u_prime| {
                // d/dx sqrt(u) = u' / (2 * sqrt(u))
                Expr::div_expr(
                    u_prime.clone(),
                    Expr::mul_expr(Expr::number(2.0), func("sqrt", u.clone())),
                )
            },
        },
        FunctionDefinition {
            name: "exp",
            derivative: |u, u_prime| {
                // d/dx exp(u) = exp(u) * u'
                mul_opt(func("exp", u.clone()), u_prime.clone())
            },
        },
    ]
}
