//! Lexical normalizer
//!
//! Rewrites a human-written definition string into its explicit-operator form
//! in three ordered steps:
//!
//! 1. strip all whitespace and canonicalize ASCII operator aliases
//!    (`*` → `×`, `/` → `÷`);
//! 2. wrap single-token function arguments in parentheses (`sin45` → `sin(45)`,
//!    `fx` → `f(x)`);
//! 3. insert an explicit `×` wherever multiplication is implied by
//!    juxtaposition (`3x` → `3×x`, `)(` → `)×(`).
//!
//! Function names are matched before implicit multiplication is considered, so
//! `sinx` always reads as `sin(x)`, never as `s×i×n×x`. Normalization is
//! idempotent: re-normalizing an already-normalized string returns it
//! unchanged.

use crate::error::CasError;
use crate::symbols;

/// The explicit multiplication sign inserted by normalization
pub(crate) const TIMES: char = '×';

/// Symbol classes the implicit-multiplication scanner distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenClass {
    Number,
    Input,
    Output,
    Constant,
    Function,
    LeftParen,
    RightParen,
    Operator,
    Other,
}

/// Declared-name tables shared by the normalization passes
struct NameTable<'a> {
    input: &'a str,
    output: &'a str,
    constants: &'a [String],
    /// Reserved and assumed function names, longest first
    functions: Vec<&'a str>,
}

impl<'a> NameTable<'a> {
    fn new(input: &'a str, output: &'a str, constants: &'a [String], assumed: &'a [String]) -> Self {
        let mut functions: Vec<&str> = assumed
            .iter()
            .map(String::as_str)
            .chain(symbols::RESERVED_FUNCTIONS.iter().copied())
            .collect();
        // Longer names first so `sqrt` is never read as `s`, `q`, ...
        functions.sort_by_key(|name| std::cmp::Reverse(name.len()));
        NameTable {
            input,
            output,
            constants,
            functions,
        }
    }

    /// Longest declared-name prefix of `rest`, with function names taking
    /// precedence over symbols of the same length
    fn classify_prefix(&self, rest: &str) -> Option<(usize, TokenClass)> {
        let mut best: Option<(usize, TokenClass)> = None;
        let mut consider = |name: &str, class: TokenClass| {
            if rest.starts_with(name) {
                let beats = match best {
                    None => true,
                    // Functions win ties per the matching-precedence policy
                    Some((len, _)) => {
                        name.len() > len || (name.len() == len && class == TokenClass::Function)
                    }
                };
                if beats {
                    best = Some((name.len(), class));
                }
            }
        };
        for &name in &self.functions {
            consider(name, TokenClass::Function);
        }
        consider(self.input, TokenClass::Input);
        consider(self.output, TokenClass::Output);
        for name in self.constants {
            consider(name.as_str(), TokenClass::Constant);
        }
        for &name in symbols::RESERVED_CONSTANTS {
            consider(name, TokenClass::Constant);
        }
        best
    }

    /// Length of a single argument token at the start of `rest`: a numeric
    /// literal, the input symbol, the output symbol, or a declared constant
    fn argument_token_len(&self, rest: &str) -> Option<usize> {
        if let Some(len) = number_prefix_len(rest) {
            return Some(len);
        }
        match self.classify_prefix(rest) {
            Some((len, TokenClass::Input | TokenClass::Output | TokenClass::Constant)) => Some(len),
            _ => None,
        }
    }
}

/// Length of the numeric literal at the start of `rest`, if any
pub(crate) fn number_prefix_len(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut len = 0;
    while len < bytes.len() && bytes[len].is_ascii_digit() {
        len += 1;
    }
    if len == 0 {
        return None;
    }
    if len < bytes.len() && bytes[len] == b'.' {
        let mut frac = len + 1;
        while frac < bytes.len() && bytes[frac].is_ascii_digit() {
            frac += 1;
        }
        if frac > len + 1 {
            len = frac;
        }
    }
    Some(len)
}

/// Normalize a raw definition string into its explicit-operator form.
///
/// `constants` are the assumed (free) constant symbols and `functions` the
/// assumed (free) function output symbols; reserved names are implied.
///
/// # Errors
/// - `MalformedExpression` if a declared symbol is empty or contains a
///   non-alphabetic character
/// - `AmbiguousSymbol` if any declared symbol collides with a reserved name
///   or with another declared symbol
///
/// Both are detected before any rewriting.
pub fn normalize(
    raw: &str,
    input: &str,
    output: &str,
    constants: &[String],
    functions: &[String],
) -> Result<String, CasError> {
    check_symbols(input, output, constants, functions)?;

    let table = NameTable::new(input, output, constants, functions);
    let stripped: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '*' => TIMES,
            '/' => '÷',
            '−' => '-',
            _ => c,
        })
        .collect();
    let wrapped = wrap_function_arguments(&stripped, &table);
    Ok(insert_implicit_multiplication(&wrapped, &table))
}

/// Verify that declared symbols are well-formed (non-empty, alphabetic),
/// pairwise distinct, and disjoint from the reserved function and constant
/// sets. An empty name would match at every position without consuming
/// input, so it must be rejected before any scanning starts.
fn check_symbols(
    input: &str,
    output: &str,
    constants: &[String],
    functions: &[String],
) -> Result<(), CasError> {
    let declared: Vec<(&str, &str)> = std::iter::once((input, "the input symbol"))
        .chain(std::iter::once((output, "the output symbol")))
        .chain(constants.iter().map(|c| (c.as_str(), "an assumed constant")))
        .chain(
            functions
                .iter()
                .map(|f| (f.as_str(), "an assumed function output")),
        )
        .collect();

    let mut seen: Vec<(&str, &str)> = Vec::with_capacity(declared.len());
    for (name, role) in declared {
        if name.is_empty() || !name.chars().all(char::is_alphabetic) {
            return Err(CasError::malformed(format!(
                "declared symbol '{}' ({}) must be a non-empty alphabetic name",
                name, role
            )));
        }
        if symbols::is_reserved_function(name) {
            return Err(CasError::AmbiguousSymbol {
                name: name.to_string(),
                conflict: "a reserved function name".to_string(),
            });
        }
        if symbols::is_reserved_constant(name) {
            return Err(CasError::AmbiguousSymbol {
                name: name.to_string(),
                conflict: "a reserved constant".to_string(),
            });
        }
        if let Some((_, earlier_role)) = seen.iter().find(|(other, _)| *other == name) {
            return Err(CasError::AmbiguousSymbol {
                name: name.to_string(),
                conflict: earlier_role.to_string(),
            });
        }
        seen.push((name, role));
    }
    Ok(())
}

/// Step 2: for every function name immediately followed by a single argument
/// token, insert explicit parentheses around that token. A single
/// left-to-right scan resolving the longest declared name at each position,
/// so a short function name never re-matches inside a longer one (`s` inside
/// `sin`). Arguments already parenthesized are untouched.
fn wrap_function_arguments(s: &str, table: &NameTable<'_>) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    let mut pos = 0;
    while pos < s.len() {
        let rest = &s[pos..];
        if let Some(len) = number_prefix_len(rest) {
            out.push_str(&rest[..len]);
            pos += len;
            continue;
        }
        match table.classify_prefix(rest) {
            Some((len, TokenClass::Function)) => {
                out.push_str(&rest[..len]);
                pos += len;
                let after = &s[pos..];
                if after.starts_with('(') {
                    continue;
                }
                if let Some(token_len) = table.argument_token_len(after) {
                    out.push('(');
                    out.push_str(&after[..token_len]);
                    out.push(')');
                    pos += token_len;
                }
            }
            Some((len, _)) => {
                out.push_str(&rest[..len]);
                pos += len;
            }
            None => {
                let ch_len = rest.chars().next().map_or(1, char::len_utf8);
                out.push_str(&rest[..ch_len]);
                pos += ch_len;
            }
        }
    }
    out
}

/// Step 3: insert `×` wherever a numeral, the input symbol, the output
/// symbol, a constant, or a closing parenthesis is immediately followed by
/// the input symbol, the output symbol, a constant, an opening parenthesis,
/// or a function token
fn insert_implicit_multiplication(s: &str, table: &NameTable<'_>) -> String {
    let tokens = scan(s, table);

    let mut insert_at = Vec::new();
    for pair in tokens.windows(2) {
        let (left, right) = (&pair[0], &pair[1]);
        let left_ok = matches!(
            left.class,
            TokenClass::Number
                | TokenClass::Input
                | TokenClass::Output
                | TokenClass::Constant
                | TokenClass::RightParen
        );
        let right_ok = matches!(
            right.class,
            TokenClass::Input
                | TokenClass::Output
                | TokenClass::Constant
                | TokenClass::LeftParen
                | TokenClass::Function
        );
        if left_ok && right_ok {
            insert_at.push(right.start);
        }
    }
    if insert_at.is_empty() {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len() + insert_at.len() * TIMES.len_utf8());
    let mut prev = 0;
    for pos in insert_at {
        result.push_str(&s[prev..pos]);
        result.push(TIMES);
        prev = pos;
    }
    result.push_str(&s[prev..]);
    result
}

struct ScannedToken {
    class: TokenClass,
    start: usize,
}

/// Coarse token scan used by the implicit-multiplication pass. Undeclared
/// characters are passed through as `Other`; they surface as errors later,
/// during lexing.
fn scan(s: &str, table: &NameTable<'_>) -> Vec<ScannedToken> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < s.len() {
        let rest = &s[pos..];
        let ch = match rest.chars().next() {
            Some(c) => c,
            None => break,
        };
        let (class, len) = if let Some(len) = number_prefix_len(rest) {
            (TokenClass::Number, len)
        } else {
            match ch {
                '(' => (TokenClass::LeftParen, 1),
                ')' => (TokenClass::RightParen, 1),
                '+' | '-' | '*' | '/' | '^' | TIMES | '÷' | '−' => {
                    (TokenClass::Operator, ch.len_utf8())
                }
                _ => match table.classify_prefix(rest) {
                    Some((len, class)) => (class, len),
                    None => (TokenClass::Other, ch.len_utf8()),
                },
            }
        };
        tokens.push(ScannedToken { class, start: pos });
        pos += len;
    }
    tokens
}
