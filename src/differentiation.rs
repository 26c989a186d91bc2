//! Symbolic differentiation over a decomposed function
//!
//! Differentiation walks the elementary DAG instead of the raw expression
//! tree: each binding's derivative is computed once, memoized by name, and
//! inlined into declared symbols before it ever leaves this module. The
//! resulting definition references only the input, the output, the assumed
//! symbols, and the reserved names, so it stands alone as a new function.
//!
//! Rules applied per elementary body:
//! - literals, reserved constants, and assumed constants vanish
//! - the input differentiates to 1
//! - sums and differences differentiate term-wise
//! - products use the product rule, quotients the quotient rule
//! - powers require a constant exponent (the generalized `u^v` case is
//!   rejected as unsupported)
//! - reserved function calls apply the chain rule through the registry
//! - assumed functions and the output symbol stay opaque: their derivative
//!   is a prime node carrying the chain factor

use rustc_hash::FxHashMap;

use crate::ast::Expr;
use crate::decompose::{self, Decomposition, FunctionBinding};
use crate::error::CasError;
use crate::function::Function;
use crate::functions::registry::Registry;
use crate::functions::{add_opt, mul_opt, pow_opt, sub_opt};
use crate::symbols;

/// Differentiate a prepared function with respect to its input.
///
/// The result carries the same input and output symbols, the same assumed
/// symbols, and a definition that is already normalized.
///
/// # Errors
/// - `UnpreparedFunction` if the function was never normalized
/// - `UnsupportedDerivative` for constructs outside the rule set, such as a
///   power whose exponent depends on the input
pub fn derivative(function: &Function) -> Result<Function, CasError> {
    let mut differ = Differentiator::new(function)?;
    let expr = differ.derive()?;
    Ok(function.prepared_sibling(format!("{}", expr)))
}

/// Stateful differentiation pass over one function's decomposition.
///
/// Derivatives and inlined values are memoized per binding name, so shared
/// sub-functions are differentiated once no matter how often they occur.
pub struct Differentiator<'a> {
    function: &'a Function,
    decomp: Decomposition,
    derivatives: FxHashMap<String, Expr>,
    values: FxHashMap<String, Expr>,
}

impl<'a> Differentiator<'a> {
    /// Decompose the function and set up an empty memo.
    ///
    /// # Errors
    /// Propagates decomposition failures, including `UnpreparedFunction`.
    pub fn new(function: &'a Function) -> Result<Self, CasError> {
        let decomp = decompose::decompose(function)?;
        Ok(Differentiator {
            function,
            decomp,
            derivatives: FxHashMap::default(),
            values: FxHashMap::default(),
        })
    }

    /// The decomposition being differentiated
    pub fn decomposition(&self) -> &Decomposition {
        &self.decomp
    }

    /// Derivative of the whole function: the root binding's derivative,
    /// inlined into declared symbols
    pub fn derive(&mut self) -> Result<Expr, CasError> {
        let root = self.function.output().to_string();
        self.derive_binding(&root)
    }

    /// Derivative of one named binding with respect to the input.
    ///
    /// # Errors
    /// - `UnknownSymbol` if no binding carries the name
    /// - `UnsupportedDerivative` for constructs outside the rule set
    pub fn derive_binding(&mut self, name: &str) -> Result<Expr, CasError> {
        if let Some(cached) = self.derivatives.get(name) {
            return Ok(cached.clone());
        }
        let body = match self.decomp.get(name) {
            Some(FunctionBinding::Known(e)) => e.body().clone(),
            Some(FunctionBinding::Free(p)) => {
                // A free function has no body; its derivative stays symbolic
                let d = Expr::prime(p.output(), Expr::symbol(self.function.input()));
                self.derivatives.insert(name.to_string(), d.clone());
                return Ok(d);
            }
            None => return Err(CasError::unknown(name.to_string())),
        };
        let d = self.derive_body(&body)?;
        self.derivatives.insert(name.to_string(), d.clone());
        Ok(d)
    }

    fn derive_body(&mut self, body: &Expr) -> Result<Expr, CasError> {
        match body {
            Expr::Number(_) => Ok(Expr::number(0.0)),

            Expr::Symbol(s) => self.derive_symbol(s),

            Expr::Call { name, arg } => {
                let u = self.value_of(arg);
                let u_prime = self.derive_body(arg)?;
                if let Some(def) = Registry::get(name) {
                    return Ok((def.derivative)(&u, &u_prime));
                }
                // Assumed function: opaque chain rule g'(u) * u'
                if self.is_free_function(name) {
                    return Ok(mul_opt(Expr::prime(name.clone(), u), u_prime));
                }
                Err(CasError::unsupported(format!(
                    "no derivative rule for function '{}'",
                    name
                )))
            }

            Expr::Prime { .. } => Err(CasError::unsupported(
                "second-order derivatives of opaque functions".to_string(),
            )),

            Expr::Add(l, r) => Ok(add_opt(self.derive_body(l)?, self.derive_body(r)?)),

            Expr::Sub(l, r) => Ok(sub_opt(self.derive_body(l)?, self.derive_body(r)?)),

            Expr::Mul(l, r) => {
                // (u*v)' = u'*v + u*v'
                let u = self.value_of(l);
                let v = self.value_of(r);
                let u_prime = self.derive_body(l)?;
                let v_prime = self.derive_body(r)?;
                Ok(add_opt(mul_opt(u_prime, v), mul_opt(u, v_prime)))
            }

            Expr::Div(l, r) => {
                // (u/v)' = (u'*v - u*v') / (v*v)
                let u = self.value_of(l);
                let v = self.value_of(r);
                let u_prime = self.derive_body(l)?;
                let v_prime = self.derive_body(r)?;
                let numerator = sub_opt(mul_opt(u_prime, v.clone()), mul_opt(u, v_prime));
                if numerator.is_zero_num() {
                    return Ok(Expr::number(0.0));
                }
                Ok(Expr::div_expr(
                    numerator,
                    Expr::mul_expr(v.clone(), v),
                ))
            }

            Expr::Pow(base, exponent) => {
                let g = self.value_of(exponent);
                if self.depends_on_input(&g) {
                    return Err(CasError::unsupported(format!(
                        "power with non-constant exponent '{}'",
                        g
                    )));
                }
                // (u^g)' = g * u^(g-1) * u'  for constant g
                let u = self.value_of(base);
                let u_prime = self.derive_body(base)?;
                if u_prime.is_zero_num() {
                    return Ok(Expr::number(0.0));
                }
                let reduced = sub_opt(g.clone(), Expr::number(1.0));
                Ok(mul_opt(mul_opt(g, pow_opt(u, reduced)), u_prime))
            }
        }
    }

    fn derive_symbol(&mut self, name: &str) -> Result<Expr, CasError> {
        if name == self.function.input() {
            return Ok(Expr::number(1.0));
        }
        if name == self.function.output() {
            // The output is an implicit function of the input
            return Ok(Expr::prime(name, Expr::symbol(self.function.input())));
        }
        if symbols::is_reserved_constant(name) || self.is_assumed_constant(name) {
            return Ok(Expr::number(0.0));
        }
        self.derive_binding(name)
    }

    /// Inline an atom's value: binding names other than the root expand to
    /// their bodies, transitively
    fn value_of(&mut self, expr: &Expr) -> Expr {
        match expr {
            Expr::Symbol(s) if s != self.function.output() => {
                if let Some(cached) = self.values.get(s) {
                    return cached.clone();
                }
                let Some(FunctionBinding::Known(e)) = self.decomp.get(s) else {
                    return expr.clone();
                };
                let body = e.body().clone();
                let value = self.inline(&body);
                self.values.insert(s.clone(), value.clone());
                value
            }
            _ => expr.clone(),
        }
    }

    fn inline(&mut self, expr: &Expr) -> Expr {
        match expr {
            Expr::Number(_) | Expr::Symbol(_) => self.value_of(expr),
            Expr::Call { name, arg } => Expr::call(name.clone(), self.inline(arg)),
            Expr::Prime { name, arg } => Expr::prime(name.clone(), self.inline(arg)),
            Expr::Add(l, r) => Expr::add_expr(self.inline(l), self.inline(r)),
            Expr::Sub(l, r) => Expr::sub_expr(self.inline(l), self.inline(r)),
            Expr::Mul(l, r) => Expr::mul_expr(self.inline(l), self.inline(r)),
            Expr::Div(l, r) => Expr::div_expr(self.inline(l), self.inline(r)),
            Expr::Pow(l, r) => Expr::pow(self.inline(l), self.inline(r)),
        }
    }

    /// A value is constant when it mentions neither the input nor the output
    fn depends_on_input(&self, value: &Expr) -> bool {
        value.contains_symbol(self.function.input())
            || value.contains_symbol(self.function.output())
    }

    fn is_assumed_constant(&self, name: &str) -> bool {
        self.function
            .assumed_constants()
            .iter()
            .any(|c| c == name)
    }

    fn is_free_function(&self, name: &str) -> bool {
        self.function
            .assumed_functions()
            .iter()
            .any(|p| p.output() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::FunctionPrototype;

    fn derive_str(definition: &str) -> Result<String, CasError> {
        let f = Function::new("x", "y", definition).prepare()?;
        let d = derivative(&f)?;
        Ok(d.definition().to_string())
    }

    #[test]
    fn test_unprepared_function_rejected() {
        let raw = Function::new("x", "y", "3x");
        assert!(matches!(
            derivative(&raw).unwrap_err(),
            CasError::UnpreparedFunction { .. }
        ));
    }

    #[test]
    fn test_constant_derivative_is_zero() {
        assert_eq!(derive_str("45").unwrap(), "0");
        assert_eq!(derive_str("pi").unwrap(), "0");
    }

    #[test]
    fn test_input_derivative_is_one() {
        assert_eq!(derive_str("x").unwrap(), "1");
    }

    #[test]
    fn test_linear_term() {
        assert_eq!(derive_str("3x").unwrap(), "3");
    }

    #[test]
    fn test_product_rule() {
        assert_eq!(derive_str("x×x").unwrap(), "x+x");
    }

    #[test]
    fn test_quotient_rule() {
        assert_eq!(
            derive_str("x ÷ sinx").unwrap(),
            "(sin(x)-x×cos(x))÷(sin(x)×sin(x))"
        );
    }

    #[test]
    fn test_power_rule_with_constant_exponent() {
        assert_eq!(derive_str("x^3").unwrap(), "3×x^2");
    }

    #[test]
    fn test_power_of_constant_base_and_exponent() {
        assert_eq!(derive_str("2^3").unwrap(), "0");
    }

    #[test]
    fn test_variable_exponent_unsupported() {
        assert!(matches!(
            derive_str("x^x").unwrap_err(),
            CasError::UnsupportedDerivative { .. }
        ));
    }

    #[test]
    fn test_chain_rule_through_reserved_function() {
        assert_eq!(derive_str("sin(lnx)").unwrap(), "cos(ln(x))×(1÷x)");
    }

    #[test]
    fn test_output_symbol_stays_opaque() {
        // y inside the definition is an implicit function of x
        assert_eq!(
            derive_str("ysiny").unwrap(),
            "y'(x)×sin(y)+y×(cos(y)×y'(x))"
        );
    }

    #[test]
    fn test_assumed_constant_vanishes() {
        let f = Function::new("x", "y", "ax + a")
            .assume_constants(["a"])
            .prepare()
            .unwrap();
        assert_eq!(derivative(&f).unwrap().definition(), "a");
    }

    #[test]
    fn test_assumed_function_chain_rule() {
        let f = Function::new("x", "y", "g(x^2)")
            .assume_function(FunctionPrototype::new("u", "g"))
            .prepare()
            .unwrap();
        assert_eq!(derivative(&f).unwrap().definition(), "g'(x^2)×(2×x)");
    }

    #[test]
    fn test_derivative_is_born_prepared() {
        let f = Function::new("x", "y", "3x").prepare().unwrap();
        let d = derivative(&f).unwrap();
        assert!(d.is_prepared());
        assert_eq!(d.input(), "x");
        assert_eq!(d.output(), "y");
    }

    #[test]
    fn test_binding_derivatives_are_memoized() {
        let f = Function::new("x", "y", "sinx + sinx").prepare().unwrap();
        let mut differ = Differentiator::new(&f).unwrap();
        let whole = differ.derive().unwrap();
        assert_eq!(format!("{}", whole), "cos(x)+cos(x)");
        // Both occurrences decompose to distinct bindings, each derivable
        // on its own
        assert_eq!(
            format!("{}", differ.derive_binding("a").unwrap()),
            "cos(x)"
        );
    }

    #[test]
    fn test_worked_example() {
        assert_eq!(
            derive_str("3x + 4sin45 - ysiny + sin(lnx)").unwrap(),
            "3-(y'(x)×sin(y)+y×(cos(y)×y'(x)))+cos(ln(x))×(1÷x)"
        );
    }
}
