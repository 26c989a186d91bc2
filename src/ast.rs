//! Expression tree for normalized function definitions
//!
//! Each node is either a numeric literal, a symbol reference, a single-argument
//! function call, a binary operation, or an opaque derivative reference
//! (`g'(u)`) produced when differentiating an assumed function.

use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal (e.g., 3, 45, 5.3461)
    Number(f64),

    /// Symbol reference: input, output, constant, or a decomposition name
    Symbol(String),

    /// Function application `fn(arg)` — reserved or assumed, always one argument
    Call { name: String, arg: Arc<Expr> },

    /// Addition
    Add(Arc<Expr>, Arc<Expr>),

    /// Subtraction
    Sub(Arc<Expr>, Arc<Expr>),

    /// Multiplication
    Mul(Arc<Expr>, Arc<Expr>),

    /// Division
    Div(Arc<Expr>, Arc<Expr>),

    /// Exponentiation
    Pow(Arc<Expr>, Arc<Expr>),

    /// Opaque derivative reference `name'(arg)` for a function whose body
    /// is unknown
    Prime { name: String, arg: Arc<Expr> },
}

impl Expr {
    // Convenience constructors

    /// Create a number expression
    pub fn number(n: f64) -> Self {
        Expr::Number(n)
    }

    /// Create a symbol expression
    pub fn symbol(s: impl Into<String>) -> Self {
        Expr::Symbol(s.into())
    }

    /// Create a function call expression
    pub fn call(name: impl Into<String>, arg: Expr) -> Self {
        Expr::Call {
            name: name.into(),
            arg: Arc::new(arg),
        }
    }

    /// Create an addition expression
    pub fn add_expr(left: Expr, right: Expr) -> Self {
        Expr::Add(Arc::new(left), Arc::new(right))
    }

    /// Create a subtraction expression
    pub fn sub_expr(left: Expr, right: Expr) -> Self {
        Expr::Sub(Arc::new(left), Arc::new(right))
    }

    /// Create a multiplication expression
    pub fn mul_expr(left: Expr, right: Expr) -> Self {
        Expr::Mul(Arc::new(left), Arc::new(right))
    }

    /// Create a division expression
    pub fn div_expr(left: Expr, right: Expr) -> Self {
        Expr::Div(Arc::new(left), Arc::new(right))
    }

    /// Create a power expression
    pub fn pow(base: Expr, exponent: Expr) -> Self {
        Expr::Pow(Arc::new(base), Arc::new(exponent))
    }

    /// Create an opaque derivative reference `name'(arg)`
    pub fn prime(name: impl Into<String>, arg: Expr) -> Self {
        Expr::Prime {
            name: name.into(),
            arg: Arc::new(arg),
        }
    }

    // Accessor methods

    /// Return the numeric value if this expression is a literal
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expr::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Return the symbol name if this expression is a bare symbol
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expr::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Check if this expression is the literal zero
    #[inline]
    pub fn is_zero_num(&self) -> bool {
        self.as_number() == Some(0.0)
    }

    /// Check if this expression is a literal or a bare symbol.
    /// Atoms never receive their own decomposition entry.
    pub fn is_atom(&self) -> bool {
        matches!(self, Expr::Number(_) | Expr::Symbol(_))
    }

    /// Check if the expression references a specific symbol anywhere
    pub fn contains_symbol(&self, name: &str) -> bool {
        match self {
            Expr::Number(_) => false,
            Expr::Symbol(s) => s == name,
            Expr::Call { arg, .. } => arg.contains_symbol(name),
            Expr::Add(l, r)
            | Expr::Sub(l, r)
            | Expr::Mul(l, r)
            | Expr::Div(l, r)
            | Expr::Pow(l, r) => l.contains_symbol(name) || r.contains_symbol(name),
            Expr::Prime { name: n, arg } => n == name || arg.contains_symbol(name),
        }
    }

    /// Count the total number of nodes in the tree
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Symbol(_) => 1,
            Expr::Call { arg, .. } | Expr::Prime { arg, .. } => 1 + arg.node_count(),
            Expr::Add(l, r)
            | Expr::Sub(l, r)
            | Expr::Mul(l, r)
            | Expr::Div(l, r)
            | Expr::Pow(l, r) => 1 + l.node_count() + r.node_count(),
        }
    }
}
