pub mod token;
pub use token::is_keyword;

use logos::Logos;
use crate::span::{Span, Spanned};
use crate::diagnostics::CompileError;
use token::Token;

pub fn lex(source: &str) -> Result<Vec<Spanned<Token>>, CompileError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(Token::Comment) => continue,
            Ok(tok) => tokens.push(Spanned::new(tok, Span::new(span.start, span.end))),
            Err(()) => {
                let text = &source[span.start..span.end];
                let msg = if text.chars().all(|c| c.is_ascii_digit()) {
                    format!("integer literal '{text}' is out of range")
                } else if text.starts_with("/*") {
                    "unterminated block comment".to_string()
                } else {
                    format!("unexpected character '{text}'")
                };
                return Err(CompileError::syntax(msg, Span::new(span.start, span.end)));
            }
        }
    }

    Ok(tokens)
}
