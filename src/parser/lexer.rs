//! Longest-match lexer for normalized definition strings

use crate::error::{CasError, Span};
use crate::normalizer;
use crate::parser::SymbolContext;
use crate::parser::tokens::{Operator, Token, TokenKind};

/// Tokenize a normalized definition string.
///
/// Identifiers are resolved greedily against the declared symbol tables, so
/// juxtaposed single-character symbols (`x` then `y`) lex as two tokens while
/// a multi-character name (`sqrt`, a declared constant) lexes as one.
///
/// # Errors
/// - `UnknownSymbol` for a letter sequence matching no declared name
/// - `MalformedExpression` for characters outside the grammar
pub(crate) fn lex<'src>(
    input: &'src str,
    ctx: &SymbolContext<'_>,
) -> Result<Vec<Token<'src>>, CasError> {
    let mut tokens = Vec::with_capacity(input.len() / 2 + 1);
    let mut pos = 0;

    while pos < input.len() {
        let rest = &input[pos..];
        let ch = match rest.chars().next() {
            Some(c) => c,
            None => break,
        };

        if let Some(len) = normalizer::number_prefix_len(rest) {
            let lexeme = &input[pos..pos + len];
            let value: f64 = lexeme.parse().map_err(|_| {
                CasError::malformed_at(
                    format!("invalid numeric literal '{}'", lexeme),
                    Span::new(pos, pos + len),
                )
            })?;
            tokens.push(Token {
                kind: TokenKind::Number(value),
                span: Span::new(pos, pos + len),
            });
            pos += len;
            continue;
        }

        let op = match ch {
            '+' => Some(Operator::Add),
            '-' | '−' => Some(Operator::Sub),
            '×' | '*' => Some(Operator::Mul),
            '÷' | '/' => Some(Operator::Div),
            '^' => Some(Operator::Pow),
            _ => None,
        };
        if let Some(op) = op {
            tokens.push(Token {
                kind: TokenKind::Op(op),
                span: Span::new(pos, pos + ch.len_utf8()),
            });
            pos += ch.len_utf8();
            continue;
        }

        match ch {
            '(' => {
                tokens.push(Token {
                    kind: TokenKind::LeftParen,
                    span: Span::at(pos),
                });
                pos += 1;
            }
            ')' => {
                tokens.push(Token {
                    kind: TokenKind::RightParen,
                    span: Span::at(pos),
                });
                pos += 1;
            }
            c if c.is_alphabetic() => match ctx.name_prefix(rest) {
                Some(name) => {
                    let len = name.len();
                    tokens.push(Token {
                        kind: TokenKind::Ident(&input[pos..pos + len]),
                        span: Span::new(pos, pos + len),
                    });
                    pos += len;
                }
                None => {
                    return Err(CasError::unknown_at(
                        c.to_string(),
                        Span::new(pos, pos + c.len_utf8()),
                    ));
                }
            },
            c => {
                return Err(CasError::malformed_at(
                    format!("unexpected character '{}'", c),
                    Span::new(pos, pos + c.len_utf8()),
                ));
            }
        }
    }

    Ok(tokens)
}
