//! Decomposing Computer Algebra System
//!
//! A focused Rust library that turns loosely written infix math into exact
//! normalized definitions, breaks them into elementary sub-functions, and
//! differentiates them symbolically.
//!
//! # Features
//! - Normalization of ambiguous input: implicit multiplication (`3x`,
//!   `y(x+1)`) and juxtaposed function application (`sin45`, `lnx`) are made
//!   explicit without changing meaning
//! - Decomposition of a definition into a DAG of uniquely named elementary
//!   sub-functions, reversible by substitution
//! - Differentiation via the product, quotient, power, and chain rules, with
//!   assumed functions kept opaque (`g'(u)`)
//! - Declared free symbols: constants and bodyless function prototypes
//!
//! # Usage Examples
//!
//! ## String-based API
//! ```
//! use decas::derive;
//! let result = derive("3x + 4sin45", "x", "y", None, None).unwrap();
//! assert_eq!(result, "3");
//! ```
//!
//! ## Builder API
//! ```
//! use decas::{derivative, Function};
//! let f = Function::new("x", "y", "ax + sin(lnx)")
//!     .assume_constants(["a"])
//!     .prepare()
//!     .unwrap();
//! let d = derivative(&f).unwrap();
//! assert_eq!(d.definition(), "a+cos(ln(x))×(1÷x)");
//! ```

mod ast;
mod decompose;
mod differentiation;
mod display;
mod error;
mod function;
pub(crate) mod functions;
mod namer;
mod normalizer;
mod parser;
mod symbols;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use ast::Expr;
pub use decompose::{Decomposition, Elementary, FunctionBinding, decompose};
pub use differentiation::{Differentiator, derivative};
pub use error::{CasError, Span};
pub use function::{Function, FunctionPrototype};
pub use namer::NameAllocator;
pub use normalizer::normalize;
pub use parser::parse_definition;
pub use symbols::{RESERVED_CONSTANTS, RESERVED_FUNCTIONS};

/// Main API function for string-in, string-out differentiation
///
/// # Arguments
/// * `definition` - Definition to differentiate, loosely written (e.g., "3x + sin45")
/// * `input` - The input symbol to differentiate with respect to (e.g., "x")
/// * `output` - The output symbol naming the function (e.g., "y")
/// * `constants` - Symbols assumed constant (e.g., &["a", "b"])
/// * `functions` - Assumed function names kept opaque (e.g., &["g"])
///
/// # Returns
/// The normalized derivative as a string, or an error if preparation or
/// differentiation fails
///
/// # Example
/// ```
/// let result = decas::derive("a sin(x)", "x", "y", Some(&["a"]), None);
/// assert_eq!(result.unwrap(), "a×cos(x)");
/// ```
///
/// # Note
/// For access to the normalized definition, the decomposition, or the
/// derivative as a [`Function`], use the builder API instead:
/// ```
/// use decas::{derivative, Function};
/// let f = Function::new("x", "y", "a sin(x)")
///     .assume_constants(["a"])
///     .prepare()
///     .unwrap();
/// let d = derivative(&f).unwrap();
/// ```
pub fn derive(
    definition: &str,
    input: &str,
    output: &str,
    constants: Option<&[&str]>,
    functions: Option<&[&str]>,
) -> Result<String, CasError> {
    let mut function = Function::new(input, output, definition);

    if let Some(names) = constants {
        function = function.assume_constants(names.iter().copied());
    }

    if let Some(names) = functions {
        for name in names {
            function = function.assume_function(FunctionPrototype::new(input, *name));
        }
    }

    let d = derivative(&function.prepare()?)?;
    Ok(d.definition().to_string())
}
