//! Canonical rendering for expression trees
//!
//! Renders the same explicit-operator form the normalizer produces: no
//! whitespace, `×` and `÷` glyphs, and only the parentheses that grouping
//! requires. Rendering the parse of a normalized definition reproduces that
//! definition, which is what the decomposition round-trip law checks.

use crate::ast::Expr;
use std::fmt;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }

            Expr::Symbol(s) => write!(f, "{}", s),

            Expr::Call { name, arg } => write!(f, "{}({})", name, arg),

            Expr::Prime { name, arg } => write!(f, "{}'({})", name, arg),

            Expr::Add(u, v) => {
                // Explicit grouping on the right survives as parentheses
                let right = match **v {
                    Expr::Add(_, _) | Expr::Sub(_, _) => format!("({})", v),
                    _ => format!("{}", v),
                };
                write!(f, "{}+{}", u, right)
            }

            Expr::Sub(u, v) => {
                let right = match **v {
                    Expr::Add(_, _) | Expr::Sub(_, _) => format!("({})", v),
                    _ => format!("{}", v),
                };
                write!(f, "{}-{}", u, right)
            }

            Expr::Mul(u, v) => {
                // A leading -1 factor is the unary-minus encoding
                if u.as_number() == Some(-1.0) {
                    let operand = match **v {
                        Expr::Add(_, _) | Expr::Sub(_, _) | Expr::Mul(_, _) | Expr::Div(_, _) => {
                            format!("({})", v)
                        }
                        _ => format!("{}", v),
                    };
                    return write!(f, "-{}", operand);
                }
                write!(f, "{}×{}", format_term(u), format_factor(v))
            }

            Expr::Div(u, v) => write!(f, "{}÷{}", format_term(u), format_factor(v)),

            Expr::Pow(u, v) => {
                let base = match **u {
                    Expr::Add(_, _)
                    | Expr::Sub(_, _)
                    | Expr::Mul(_, _)
                    | Expr::Div(_, _)
                    | Expr::Pow(_, _) => format!("({})", u),
                    _ => format!("{}", u),
                };
                // Right-associative: only looser-binding operators need parens
                let exponent = match **v {
                    Expr::Add(_, _) | Expr::Sub(_, _) | Expr::Mul(_, _) | Expr::Div(_, _) => {
                        format!("({})", v)
                    }
                    _ => format!("{}", v),
                };
                write!(f, "{}^{}", base, exponent)
            }
        }
    }
}

/// Left operand of `×`/`÷`: wrap looser-binding operators
fn format_term(expr: &Expr) -> String {
    match expr {
        Expr::Add(_, _) | Expr::Sub(_, _) => format!("({})", expr),
        _ => format!("{}", expr),
    }
}

/// Right operand of `×`/`÷`: also wrap same-precedence operators, since the
/// grammar is left-associative
fn format_factor(expr: &Expr) -> String {
    match expr {
        Expr::Add(_, _) | Expr::Sub(_, _) | Expr::Mul(_, _) | Expr::Div(_, _) => {
            format!("({})", expr)
        }
        _ => format!("{}", expr),
    }
}
