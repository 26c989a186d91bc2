//! Function definitions and prototypes
//!
//! A [`FunctionPrototype`] is a bodyless `(input, output)` signature pair used
//! for assumed (free) functions and for the synthetic names a decomposition
//! introduces. A [`Function`] is an authored definition that transitions from
//! "raw" to "prepared" exactly once via [`Function::prepare`].

use crate::error::CasError;
use crate::normalizer;

/// Signature of a single-input, single-output function with no known body.
///
/// Think of these as mathematical versions of function prototypes in C: the
/// output symbol doubles as the function's name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionPrototype {
    input: String,
    output: String,
}

impl FunctionPrototype {
    /// Create a prototype. The output symbol is the function's name.
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        FunctionPrototype {
            input: input.into(),
            output: output.into(),
        }
    }

    /// The input symbol. There can be only one input.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The output symbol (function name). There can be only one output.
    pub fn output(&self) -> &str {
        &self.output
    }
}

impl std::fmt::Display for FunctionPrototype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.output, self.input)
    }
}

/// A named, single-input/single-output mathematical definition.
///
/// Built fluently, then prepared once before decomposition or differentiation:
///
/// ```
/// use decas::Function;
///
/// let f = Function::new("x", "y", "3x + 4sin45")
///     .assume_constants(["a"])
///     .prepare()
///     .unwrap();
/// assert_eq!(f.definition(), "3×x+4×sin(45)");
/// ```
#[derive(Debug, Clone)]
pub struct Function {
    input: String,
    output: String,
    definition: String,
    normalized: Option<String>,
    assumed_constants: Vec<String>,
    assumed_functions: Vec<FunctionPrototype>,
}

impl Function {
    /// Create a raw (unprepared) function definition
    pub fn new(
        input: impl Into<String>,
        output: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        Function {
            input: input.into(),
            output: output.into(),
            definition: definition.into(),
            normalized: None,
            assumed_constants: Vec::new(),
            assumed_functions: Vec::new(),
        }
    }

    /// Declare free constant symbols appearing in the definition
    pub fn assume_constants<I, S>(mut self, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assumed_constants
            .extend(constants.into_iter().map(Into::into));
        self
    }

    /// Declare a free function symbol appearing in the definition
    pub fn assume_function(mut self, prototype: FunctionPrototype) -> Self {
        self.assumed_functions.push(prototype);
        self
    }

    /// Normalize the definition, transitioning this function to the prepared
    /// state. Idempotent: preparing a prepared function returns it unchanged.
    ///
    /// # Errors
    /// `AmbiguousSymbol` if the input, output, an assumed constant, or an
    /// assumed function output collides with a reserved name or with each
    /// other — checked before any rewriting.
    pub fn prepare(mut self) -> Result<Self, CasError> {
        if self.normalized.is_some() {
            return Ok(self);
        }
        let function_names: Vec<String> = self
            .assumed_functions
            .iter()
            .map(|p| p.output().to_string())
            .collect();
        let normalized = normalizer::normalize(
            &self.definition,
            &self.input,
            &self.output,
            &self.assumed_constants,
            &function_names,
        )?;
        self.normalized = Some(normalized);
        Ok(self)
    }

    /// The input symbol
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The output symbol (function name)
    pub fn output(&self) -> &str {
        &self.output
    }

    /// The definition as authored
    pub fn raw_definition(&self) -> &str {
        &self.definition
    }

    /// The normalized definition if prepared, the raw definition otherwise
    pub fn definition(&self) -> &str {
        self.normalized.as_deref().unwrap_or(&self.definition)
    }

    /// The normalized definition, if this function has been prepared
    pub fn normalized(&self) -> Option<&str> {
        self.normalized.as_deref()
    }

    /// Whether this function has been prepared
    pub fn is_prepared(&self) -> bool {
        self.normalized.is_some()
    }

    /// Declared free constants, in declaration order
    pub fn assumed_constants(&self) -> &[String] {
        &self.assumed_constants
    }

    /// Declared free functions, in declaration order
    pub fn assumed_functions(&self) -> &[FunctionPrototype] {
        &self.assumed_functions
    }

    /// Signature of this function as a prototype
    pub fn prototype(&self) -> FunctionPrototype {
        FunctionPrototype::new(&self.input, &self.output)
    }

    /// Build a prepared sibling of this function holding an already-normalized
    /// definition, used for derivative results.
    pub(crate) fn prepared_sibling(&self, normalized: String) -> Function {
        Function {
            input: self.input.clone(),
            output: self.output.clone(),
            definition: normalized.clone(),
            normalized: Some(normalized),
            assumed_constants: self.assumed_constants.clone(),
            assumed_functions: self.assumed_functions.clone(),
        }
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})={}", self.output, self.input, self.definition())
    }
}
