use crate::error::Span;

/// Binary operators of the expression grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    /// Binding power: `^` over `×`/`÷` over `+`/`-`
    pub(crate) fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 10,
            Operator::Mul | Operator::Div => 20,
            Operator::Pow => 30,
        }
    }

    /// Canonical glyph used in normalized definitions
    pub(crate) fn glyph(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '×',
            Operator::Div => '÷',
            Operator::Pow => '^',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind<'src> {
    Number(f64),
    Ident(&'src str),
    LeftParen,
    RightParen,
    Op(Operator),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token<'src> {
    pub kind: TokenKind<'src>,
    pub span: Span,
}

impl Token<'_> {
    /// Human-readable rendering for diagnostics
    pub(crate) fn describe(&self) -> String {
        match &self.kind {
            TokenKind::Number(n) => format!("{}", n),
            TokenKind::Ident(name) => (*name).to_string(),
            TokenKind::LeftParen => "(".to_string(),
            TokenKind::RightParen => ")".to_string(),
            TokenKind::Op(op) => op.glyph().to_string(),
        }
    }
}
