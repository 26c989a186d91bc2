use crate::ast::Expr;
use crate::error::CasError;
use crate::parser::SymbolContext;
use crate::parser::tokens::{Operator, Token, TokenKind};

/// Parse tokens into an expression tree using Pratt parsing
pub(crate) fn parse_expression(
    tokens: &[Token<'_>],
    ctx: &SymbolContext<'_>,
) -> Result<Expr, CasError> {
    if tokens.is_empty() {
        return Err(CasError::malformed("empty definition"));
    }

    let mut parser = Parser {
        tokens,
        ctx,
        pos: 0,
    };
    let expr = parser.parse_expr(0)?;

    if let Some(token) = parser.current() {
        return Err(CasError::malformed_at(
            format!("unexpected token '{}'", token.describe()),
            token.span,
        ));
    }
    Ok(expr)
}

struct Parser<'a, 'src> {
    tokens: &'a [Token<'src>],
    ctx: &'a SymbolContext<'a>,
    pos: usize,
}

impl Parser<'_, '_> {
    fn current(&self) -> Option<&Token<'_>> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn parse_expr(&mut self, min_precedence: u8) -> Result<Expr, CasError> {
        let mut left = self.parse_prefix()?;

        while let Some(token) = self.current() {
            let precedence = match &token.kind {
                TokenKind::Op(op) => op.precedence(),
                _ => break,
            };
            if precedence < min_precedence {
                break;
            }
            left = self.parse_infix(left, precedence)?;
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> Result<Expr, CasError> {
        let token = self
            .tokens
            .get(self.pos)
            .ok_or_else(|| CasError::malformed("expression ends with a dangling operator"))?;

        match &token.kind {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr::number(*n))
            }

            TokenKind::Ident(name) => {
                let span = token.span;
                self.advance();
                if self.ctx.is_function(name) {
                    // A function token must be applied: normalization has
                    // already wrapped its argument in parentheses
                    match self.current().map(|t| &t.kind) {
                        Some(TokenKind::LeftParen) => {
                            self.advance();
                            let arg = self.parse_expr(0)?;
                            self.expect_right_paren()?;
                            Ok(Expr::call(*name, arg))
                        }
                        _ => Err(CasError::malformed_at(
                            format!("function '{}' must be applied to an argument", name),
                            span,
                        )),
                    }
                } else {
                    Ok(Expr::symbol(*name))
                }
            }

            // Unary minus: binds tighter than × but looser than ^,
            // so -x^2 parses as -(x^2)
            TokenKind::Op(Operator::Sub) => {
                self.advance();
                let expr = self.parse_expr(25)?;
                Ok(Expr::mul_expr(Expr::number(-1.0), expr))
            }

            // Unary plus is a no-op at the same binding power
            TokenKind::Op(Operator::Add) => {
                self.advance();
                self.parse_expr(25)
            }

            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expr(0)?;
                self.expect_right_paren()?;
                Ok(expr)
            }

            _ => Err(CasError::malformed_at(
                format!("expected an operand, found '{}'", token.describe()),
                token.span,
            )),
        }
    }

    fn parse_infix(&mut self, left: Expr, precedence: u8) -> Result<Expr, CasError> {
        let token = self
            .tokens
            .get(self.pos)
            .ok_or_else(|| CasError::malformed("expression ends with a dangling operator"))?;

        match &token.kind {
            TokenKind::Op(op) => {
                let op = *op;
                self.advance();

                // Right-associative for power, left for everything else
                let next_precedence = if op == Operator::Pow {
                    precedence
                } else {
                    precedence + 1
                };
                let right = self.parse_expr(next_precedence)?;

                Ok(match op {
                    Operator::Add => Expr::add_expr(left, right),
                    Operator::Sub => Expr::sub_expr(left, right),
                    Operator::Mul => Expr::mul_expr(left, right),
                    Operator::Div => Expr::div_expr(left, right),
                    Operator::Pow => Expr::pow(left, right),
                })
            }

            _ => Err(CasError::malformed_at(
                format!("expected an operator, found '{}'", token.describe()),
                token.span,
            )),
        }
    }

    fn expect_right_paren(&mut self) -> Result<(), CasError> {
        match self.current().map(|t| &t.kind) {
            Some(TokenKind::RightParen) => {
                self.advance();
                Ok(())
            }
            Some(_) => {
                let token = &self.tokens[self.pos];
                Err(CasError::malformed_at(
                    format!("expected ')', found '{}'", token.describe()),
                    token.span,
                ))
            }
            None => Err(CasError::malformed("unbalanced parentheses")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::Function;
    use crate::parser;

    fn parse_str(input: &str) -> Result<Expr, CasError> {
        let f = Function::new("x", "y", "x").assume_constants(["a"]);
        let ctx = SymbolContext::of(&f);
        parser::parse(input, &ctx)
    }

    #[test]
    fn test_parse_atoms() {
        assert_eq!(parse_str("45").unwrap(), Expr::number(45.0));
        assert_eq!(parse_str("x").unwrap(), Expr::symbol("x"));
    }

    #[test]
    fn test_precedence() {
        // x+2×3 parses as x + (2 × 3)
        let ast = parse_str("x+2×3").unwrap();
        match ast {
            Expr::Add(left, right) => {
                assert!(matches!(*left, Expr::Symbol(_)));
                assert!(matches!(*right, Expr::Mul(_, _)));
            }
            other => panic!("expected Add at top level, got {:?}", other),
        }
    }

    #[test]
    fn test_left_associativity() {
        // x-1+2 parses as (x - 1) + 2
        let ast = parse_str("x-1+2").unwrap();
        match ast {
            Expr::Add(left, _) => assert!(matches!(*left, Expr::Sub(_, _))),
            other => panic!("expected Add at top level, got {:?}", other),
        }
    }

    #[test]
    fn test_power_right_associativity() {
        // x^2^3 parses as x^(2^3)
        let ast = parse_str("x^2^3").unwrap();
        match ast {
            Expr::Pow(base, exp) => {
                assert!(matches!(*base, Expr::Symbol(_)));
                assert!(matches!(*exp, Expr::Pow(_, _)));
            }
            other => panic!("expected Pow at top level, got {:?}", other),
        }
    }

    #[test]
    fn test_parentheses_group() {
        let ast = parse_str("(x+1)×2").unwrap();
        match ast {
            Expr::Mul(left, right) => {
                assert!(matches!(*left, Expr::Add(_, _)));
                assert_eq!(right.as_number(), Some(2.0));
            }
            other => panic!("expected Mul at top level, got {:?}", other),
        }
    }

    #[test]
    fn test_unary_minus_binds_below_power() {
        // -x^2 parses as -(x^2)
        let ast = parse_str("-x^2").unwrap();
        match ast {
            Expr::Mul(left, right) => {
                assert_eq!(left.as_number(), Some(-1.0));
                assert!(matches!(*right, Expr::Pow(_, _)));
            }
            other => panic!("expected Mul(-1, Pow), got {:?}", other),
        }
    }

    #[test]
    fn test_function_call() {
        let ast = parse_str("sin(x)").unwrap();
        assert_eq!(ast, Expr::call("sin", Expr::symbol("x")));
    }

    #[test]
    fn test_bare_function_name_rejected() {
        assert!(matches!(
            parse_str("sin").unwrap_err(),
            CasError::MalformedExpression { .. }
        ));
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert!(matches!(
            parse_str("(x+1").unwrap_err(),
            CasError::MalformedExpression { .. }
        ));
        assert!(matches!(
            parse_str("x+1)").unwrap_err(),
            CasError::MalformedExpression { .. }
        ));
    }

    #[test]
    fn test_dangling_operator() {
        assert!(matches!(
            parse_str("x+").unwrap_err(),
            CasError::MalformedExpression { .. }
        ));
    }

    #[test]
    fn test_empty_parentheses() {
        assert!(matches!(
            parse_str("()").unwrap_err(),
            CasError::MalformedExpression { .. }
        ));
    }
}
