//! Decomposition of a prepared function into elementary sub-functions
//!
//! The normalized definition is parsed and rewritten bottom-up into a DAG of
//! uniquely named entries, each holding exactly one operator application or
//! one function call over symbols, literals, and earlier entries:
//!
//! ```text
//! y(x) = 3×x+x^x   decomposes to   a = 3×x
//!                                  b = x^x
//!                                  y = a+b
//! ```
//!
//! Substituting every entry transitively back into the root reproduces the
//! normalized definition exactly.

use rustc_hash::FxHashMap;

use crate::ast::Expr;
use crate::error::CasError;
use crate::function::{Function, FunctionPrototype};
use crate::namer::NameAllocator;
use crate::parser;
use crate::symbols;

/// A named elementary sub-function: one operator application or one function
/// call over atoms
#[derive(Debug, Clone, PartialEq)]
pub struct Elementary {
    proto: FunctionPrototype,
    body: Expr,
}

impl Elementary {
    /// The entry's signature; its output symbol is the entry's name
    pub fn prototype(&self) -> &FunctionPrototype {
        &self.proto
    }

    /// The entry's name
    pub fn name(&self) -> &str {
        self.proto.output()
    }

    /// The elementary body
    pub fn body(&self) -> &Expr {
        &self.body
    }
}

impl std::fmt::Display for Elementary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.proto.output(), self.body)
    }
}

/// A decomposition entry: either an elementary body or a genuinely free
/// (assumed) function with no known body, resolved at lookup time
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBinding {
    Known(Elementary),
    Free(FunctionPrototype),
}

impl FunctionBinding {
    /// The bound name
    pub fn name(&self) -> &str {
        match self {
            FunctionBinding::Known(e) => e.name(),
            FunctionBinding::Free(p) => p.output(),
        }
    }

    /// The bound signature
    pub fn prototype(&self) -> &FunctionPrototype {
        match self {
            FunctionBinding::Known(e) => e.prototype(),
            FunctionBinding::Free(p) => p,
        }
    }

    /// The elementary body, absent for free bindings
    pub fn body(&self) -> Option<&Expr> {
        match self {
            FunctionBinding::Known(e) => Some(e.body()),
            FunctionBinding::Free(_) => None,
        }
    }
}

/// The result of decomposing a prepared function: an insertion-ordered,
/// acyclic mapping from names to elementary bodies. Every body references
/// only literals, the root's input and declared symbols, and names bound
/// earlier in the sequence; the root's own output name is bound last.
#[derive(Debug, Clone)]
pub struct Decomposition {
    root: FunctionPrototype,
    bindings: Vec<FunctionBinding>,
}

impl Decomposition {
    /// Signature of the decomposed function
    pub fn root(&self) -> &FunctionPrototype {
        &self.root
    }

    /// All bindings in introduction order (free bindings first, then
    /// synthetic entries, then the root)
    pub fn bindings(&self) -> &[FunctionBinding] {
        &self.bindings
    }

    /// Look up a binding by name
    pub fn get(&self, name: &str) -> Option<&FunctionBinding> {
        self.bindings.iter().find(|b| b.name() == name)
    }

    /// Substitute every entry transitively back into the root, reproducing
    /// the expression tree of the normalized definition
    pub fn reconstruct(&self) -> Expr {
        let map: FxHashMap<&str, &Expr> = self
            .bindings
            .iter()
            .filter(|b| b.name() != self.root.output())
            .filter_map(|b| b.body().map(|body| (b.name(), body)))
            .collect();

        let root_body = match self.get(self.root.output()).and_then(FunctionBinding::body) {
            Some(body) => body.clone(),
            None => Expr::symbol(self.root.output()),
        };
        expand(&root_body, &map)
    }
}

fn expand(expr: &Expr, map: &FxHashMap<&str, &Expr>) -> Expr {
    match expr {
        Expr::Number(_) => expr.clone(),
        Expr::Symbol(s) => match map.get(s.as_str()) {
            Some(body) => expand(body, map),
            None => expr.clone(),
        },
        Expr::Call { name, arg } => Expr::call(name.clone(), expand(arg, map)),
        Expr::Prime { name, arg } => Expr::prime(name.clone(), expand(arg, map)),
        Expr::Add(l, r) => Expr::add_expr(expand(l, map), expand(r, map)),
        Expr::Sub(l, r) => Expr::sub_expr(expand(l, map), expand(r, map)),
        Expr::Mul(l, r) => Expr::mul_expr(expand(l, map), expand(r, map)),
        Expr::Div(l, r) => Expr::div_expr(expand(l, map), expand(r, map)),
        Expr::Pow(l, r) => Expr::pow(expand(l, map), expand(r, map)),
    }
}

/// Decompose a prepared function into its elementary DAG.
///
/// # Errors
/// - `UnpreparedFunction` if the function was never normalized
/// - any parse error of the normalized definition
pub fn decompose(function: &Function) -> Result<Decomposition, CasError> {
    let tree = parser::parse_definition(function)?;

    let exclusions: Vec<String> = symbols::RESERVED_FUNCTIONS
        .iter()
        .chain(symbols::RESERVED_CONSTANTS)
        .map(|s| (*s).to_string())
        .chain([function.input().to_string(), function.output().to_string()])
        .chain(function.assumed_constants().iter().cloned())
        .chain(
            function
                .assumed_functions()
                .iter()
                .map(|p| p.output().to_string()),
        )
        .collect();

    let mut walker = Walker {
        input: function.input(),
        namer: NameAllocator::new(exclusions),
        bindings: function
            .assumed_functions()
            .iter()
            .cloned()
            .map(FunctionBinding::Free)
            .collect(),
    };

    let root_body = walker.rebuild(&tree);
    walker.bindings.push(FunctionBinding::Known(Elementary {
        proto: function.prototype(),
        body: root_body,
    }));

    Ok(Decomposition {
        root: function.prototype(),
        bindings: walker.bindings,
    })
}

struct Walker<'a> {
    input: &'a str,
    namer: NameAllocator,
    bindings: Vec<FunctionBinding>,
}

impl Walker<'_> {
    /// Rewrite one node so that all of its operands are atoms, binding
    /// compound children along the way
    fn rebuild(&mut self, expr: &Expr) -> Expr {
        match expr {
            Expr::Number(_) | Expr::Symbol(_) => expr.clone(),
            Expr::Call { name, arg } => Expr::call(name.clone(), self.reduce(arg)),
            Expr::Prime { name, arg } => Expr::prime(name.clone(), self.reduce(arg)),
            Expr::Add(l, r) => Expr::add_expr(self.reduce(l), self.reduce(r)),
            Expr::Sub(l, r) => Expr::sub_expr(self.reduce(l), self.reduce(r)),
            Expr::Mul(l, r) => Expr::mul_expr(self.reduce(l), self.reduce(r)),
            Expr::Div(l, r) => Expr::div_expr(self.reduce(l), self.reduce(r)),
            Expr::Pow(l, r) => Expr::pow(self.reduce(l), self.reduce(r)),
        }
    }

    /// Reduce a subtree to an atom, binding it under a fresh name if compound
    fn reduce(&mut self, expr: &Expr) -> Expr {
        if expr.is_atom() {
            return expr.clone();
        }
        let body = self.rebuild(expr);
        self.bind(body)
    }

    fn bind(&mut self, body: Expr) -> Expr {
        let name = self.namer.next();
        self.bindings.push(FunctionBinding::Known(Elementary {
            proto: FunctionPrototype::new(self.input, &name),
            body,
        }));
        Expr::symbol(name)
    }
}
