use std::fmt;

/// Source location span for error reporting.
/// Represents a range of bytes in the definition string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start position (0-indexed byte offset)
    pub start: usize,
    /// End position (exclusive, 0-indexed byte offset)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Create a span for a single position
    pub fn at(pos: usize) -> Self {
        Span {
            start: pos,
            end: pos + 1,
        }
    }

    /// Format the span for display (1-indexed for users)
    pub fn display(&self) -> String {
        if self.end <= self.start {
            String::new()
        } else if self.end - self.start == 1 {
            format!(" at position {}", self.start + 1)
        } else {
            format!(" at positions {}-{}", self.start + 1, self.end)
        }
    }
}

/// Errors that can occur during normalization, decomposition and differentiation
#[derive(Debug, Clone, PartialEq)]
pub enum CasError {
    /// A declared symbol collides with a reserved name or another declared symbol.
    /// Raised before any parsing begins.
    AmbiguousSymbol { name: String, conflict: String },

    /// Unbalanced parentheses, dangling operator, empty operand
    MalformedExpression { msg: String, span: Option<Span> },

    /// A token that is neither a literal, a declared symbol, an operator,
    /// nor a recognized function name
    UnknownSymbol { token: String, span: Option<Span> },

    /// Decomposition or differentiation attempted on a function that was
    /// never prepared (normalized)
    UnpreparedFunction { output: String },

    /// A differentiation rule the engine does not implement, e.g. a power
    /// with a symbolic exponent
    UnsupportedDerivative { detail: String },
}

impl CasError {
    /// Create MalformedExpression without location info
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        CasError::MalformedExpression {
            msg: msg.into(),
            span: None,
        }
    }

    /// Create MalformedExpression with a span
    pub(crate) fn malformed_at(msg: impl Into<String>, span: Span) -> Self {
        CasError::MalformedExpression {
            msg: msg.into(),
            span: Some(span),
        }
    }

    /// Create UnknownSymbol with a span
    pub(crate) fn unknown_at(token: impl Into<String>, span: Span) -> Self {
        CasError::UnknownSymbol {
            token: token.into(),
            span: Some(span),
        }
    }

    /// Create UnknownSymbol without location info
    pub(crate) fn unknown(token: impl Into<String>) -> Self {
        CasError::UnknownSymbol {
            token: token.into(),
            span: None,
        }
    }

    /// Create UnsupportedDerivative
    pub(crate) fn unsupported(detail: impl Into<String>) -> Self {
        CasError::UnsupportedDerivative {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for CasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CasError::AmbiguousSymbol { name, conflict } => {
                write!(f, "Ambiguous symbol '{}': collides with {}", name, conflict)
            }
            CasError::MalformedExpression { msg, span } => {
                write!(
                    f,
                    "Malformed expression: {}{}",
                    msg,
                    span.map_or(String::new(), |s| s.display())
                )
            }
            CasError::UnknownSymbol { token, span } => {
                write!(
                    f,
                    "Unknown symbol '{}'{}",
                    token,
                    span.map_or(String::new(), |s| s.display())
                )
            }
            CasError::UnpreparedFunction { output } => {
                write!(
                    f,
                    "Function '{}' must be prepared before decomposition or differentiation",
                    output
                )
            }
            CasError::UnsupportedDerivative { detail } => {
                write!(f, "Unsupported derivative: {}", detail)
            }
        }
    }
}

impl std::error::Error for CasError {}
