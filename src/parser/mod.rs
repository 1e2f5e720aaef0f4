pub mod ast;

use crate::diagnostics::CompileError;
use crate::lexer::token::Token;
use crate::model::Bounds;
use crate::span::{Span, Spanned};
use ast::*;

pub struct Parser<'a> {
    tokens: &'a [Spanned<Token>],
    source: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Spanned<Token>], source: &'a str) -> Self {
        Self { tokens, source, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Spanned<Token>> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Spanned<Token>> {
        let tok = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(tok)
    }

    fn expect(&mut self, expected: &Token) -> Result<&'a Spanned<Token>, CompileError> {
        match self.tokens.get(self.pos) {
            Some(tok) if std::mem::discriminant(&tok.node) == std::mem::discriminant(expected) => {
                self.pos += 1;
                Ok(tok)
            }
            Some(tok) => Err(CompileError::syntax(
                format!("expected {expected}, found {}", tok.node),
                tok.span,
            )),
            None => Err(CompileError::syntax(
                format!("expected {expected}, found end of file"),
                self.eof_span(),
            )),
        }
    }

    fn expect_ident(&mut self) -> Result<Spanned<String>, CompileError> {
        match self.tokens.get(self.pos) {
            Some(tok) if matches!(tok.node, Token::Ident) => {
                self.pos += 1;
                Ok(Spanned::new(self.text(tok.span), tok.span))
            }
            Some(tok) => Err(CompileError::syntax(
                format!("expected identifier, found {}", tok.node),
                tok.span,
            )),
            None => Err(CompileError::syntax(
                "expected identifier, found end of file",
                self.eof_span(),
            )),
        }
    }

    fn text(&self, span: Span) -> String {
        self.source[span.start..span.end].to_string()
    }

    fn eof_span(&self) -> Span {
        if let Some(last) = self.tokens.last() {
            Span::new(last.span.end, last.span.end)
        } else {
            Span::dummy()
        }
    }

    pub fn parse_model(&mut self) -> Result<ModelSource, CompileError> {
        let mut namespace = None;
        let mut types = Vec::new();

        while let Some(tok) = self.peek() {
            match &tok.node {
                Token::Namespace => {
                    let ns = self.parse_namespace()?;
                    if namespace.is_some() {
                        return Err(CompileError::syntax("duplicate namespace declaration", ns.span));
                    }
                    namespace = Some(ns);
                }
                Token::Class => types.push(self.parse_type_def(TypeDefKind::Class)?),
                Token::Interface => types.push(self.parse_type_def(TypeDefKind::Interface)?),
                other => {
                    return Err(CompileError::syntax(
                        format!("expected 'class', 'interface' or 'namespace', found {other}"),
                        tok.span,
                    ));
                }
            }
        }

        Ok(ModelSource { namespace, types })
    }

    fn parse_namespace(&mut self) -> Result<Spanned<String>, CompileError> {
        let start = self.expect(&Token::Namespace)?.span;
        let first = self.expect_ident()?;
        let mut path = first.node;
        let mut end = first.span;
        while matches!(self.peek().map(|t| &t.node), Some(Token::Dot)) {
            self.advance();
            let seg = self.expect_ident()?;
            path.push('.');
            path.push_str(&seg.node);
            end = seg.span;
        }
        self.expect(&Token::Semi)?;
        Ok(Spanned::new(path, start.to(end)))
    }

    fn parse_type_def(&mut self, kind: TypeDefKind) -> Result<Spanned<TypeDef>, CompileError> {
        let start = match self.advance() {
            Some(tok) => tok.span,
            None => self.eof_span(),
        };
        let name = self.expect_ident()?;
        self.expect(&Token::LBrace)?;

        let mut is_a = Vec::new();
        let mut associations = Vec::new();
        let end = loop {
            let Some(tok) = self.peek() else {
                return Err(CompileError::syntax("expected '}', found end of file", self.eof_span()));
            };
            match &tok.node {
                Token::RBrace => {
                    self.advance();
                    break tok.span;
                }
                Token::IsA => self.parse_is_a(&mut is_a)?,
                Token::IntLit(_) | Token::Star => associations.push(self.parse_association()?),
                other => {
                    return Err(CompileError::syntax(
                        format!("expected 'isA', an association or '}}', found {other}"),
                        tok.span,
                    ));
                }
            }
        };

        Ok(Spanned::new(TypeDef { kind, name, is_a, associations }, start.to(end)))
    }

    fn parse_is_a(&mut self, out: &mut Vec<Spanned<String>>) -> Result<(), CompileError> {
        self.expect(&Token::IsA)?;
        out.push(self.expect_ident()?);
        while matches!(self.peek().map(|t| &t.node), Some(Token::Comma)) {
            self.advance();
            out.push(self.expect_ident()?);
        }
        self.expect(&Token::Semi)?;
        Ok(())
    }

    fn parse_association(&mut self) -> Result<Spanned<AssociationDecl>, CompileError> {
        let owner_bound = self.parse_bounds()?;
        let owner_role = self.parse_optional_role()?;

        let direction = match self.advance() {
            Some(Spanned { node: Token::DashDash, .. }) => Direction::Both,
            Some(Spanned { node: Token::Arrow, .. }) => Direction::Forward,
            Some(Spanned { node: Token::BackArrow, .. }) => Direction::Backward,
            Some(tok) => {
                return Err(CompileError::syntax(
                    format!("expected association arrow '--', '->' or '<-', found {}", tok.node),
                    tok.span,
                ));
            }
            None => {
                return Err(CompileError::syntax(
                    "expected association arrow, found end of file",
                    self.eof_span(),
                ));
            }
        };

        let target_bound = self.parse_bounds()?;
        let target = self.expect_ident()?;
        let target_role = self.parse_optional_role()?;
        let end = self.expect(&Token::Semi)?.span;
        let span = owner_bound.span.to(end);

        Ok(Spanned::new(
            AssociationDecl { owner_bound, owner_role, direction, target_bound, target, target_role },
            span,
        ))
    }

    fn parse_optional_role(&mut self) -> Result<Option<Spanned<String>>, CompileError> {
        if matches!(self.peek().map(|t| &t.node), Some(Token::Ident)) {
            Ok(Some(self.expect_ident()?))
        } else {
            Ok(None)
        }
    }

    /// `*`, `n`, `n..m` or `n..*`
    fn parse_bounds(&mut self) -> Result<Spanned<Bounds>, CompileError> {
        let Some(tok) = self.advance() else {
            return Err(CompileError::syntax("expected multiplicity, found end of file", self.eof_span()));
        };
        let lower = match tok.node {
            Token::Star => return Ok(Spanned::new(Bounds::new(0, None), tok.span)),
            Token::IntLit(n) => n,
            ref other => {
                return Err(CompileError::syntax(format!("expected multiplicity, found {other}"), tok.span));
            }
        };

        if !matches!(self.peek().map(|t| &t.node), Some(Token::DotDot)) {
            return self.checked_bounds(lower, Some(lower), tok.span);
        }
        self.advance();

        match self.advance() {
            Some(Spanned { node: Token::Star, span }) => Ok(Spanned::new(Bounds::new(lower, None), tok.span.to(*span))),
            Some(Spanned { node: Token::IntLit(upper), span }) => self.checked_bounds(lower, Some(*upper), tok.span.to(*span)),
            Some(other) => Err(CompileError::syntax(
                format!("expected upper bound, found {}", other.node),
                other.span,
            )),
            None => Err(CompileError::syntax("expected upper bound, found end of file", self.eof_span())),
        }
    }

    fn checked_bounds(&self, lower: u32, upper: Option<u32>, span: Span) -> Result<Spanned<Bounds>, CompileError> {
        if let Some(upper) = upper {
            if upper == 0 {
                return Err(CompileError::syntax("upper bound must be at least 1", span));
            }
            if lower > upper {
                return Err(CompileError::syntax(
                    format!("lower bound {lower} exceeds upper bound {upper}"),
                    span,
                ));
            }
        }
        Ok(Spanned::new(Bounds::new(lower, upper), span))
    }
}
