//! Token definitions for normalized requisite strings
//!
//! Tokens are defined with the logos derive macro. The alphabet is small by
//! construction: the normalizer only emits course-code characters and the
//! four structural marks `(` `)` `,` `/`.

use crate::requisite::error::ParseError;
use logos::Logos;

/// All tokens of the requisite mini-grammar.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
pub enum Token {
    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    /// AND separator between required groups.
    #[token(",")]
    Comma,

    /// OR separator between alternatives within a group.
    #[token("/")]
    Slash,

    /// An alphanumeric run; course codes are the only atoms the grammar
    /// admits, but layout validation happens in the parser, not here.
    #[regex("[A-Za-z0-9]+", |lex| lex.slice().to_string())]
    Atom(String),
}

/// Tokenize a normalized requisite string with location information.
///
/// Any character outside the normalized alphabet is a hard error; the
/// normalizer never emits one, so hitting this means the caller skipped
/// normalization.
pub fn tokenize(source: &str) -> Result<Vec<(Token, logos::Span)>, ParseError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                let stray = source[lexer.span()].chars().next().unwrap_or('\u{fffd}');
                return Err(ParseError::UnexpectedCharacter(stray));
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_loc(pairs: Vec<(Token, logos::Span)>) -> Vec<Token> {
        pairs.into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_tokenizes_atoms_and_marks() {
        let tokens = strip_loc(tokenize("(MAT135H1,MAT136H1)/MAT137Y1").unwrap());
        assert_eq!(
            tokens,
            vec![
                Token::OpenParen,
                Token::Atom("MAT135H1".to_string()),
                Token::Comma,
                Token::Atom("MAT136H1".to_string()),
                Token::CloseParen,
                Token::Slash,
                Token::Atom("MAT137Y1".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }

    #[test]
    fn test_spans_cover_source() {
        let pairs = tokenize("MAT135H1/MAT136H1").unwrap();
        assert_eq!(pairs[0].1, 0..8);
        assert_eq!(pairs[1].1, 8..9);
        assert_eq!(pairs[2].1, 9..17);
    }

    #[test]
    fn test_stray_character_is_rejected() {
        assert_eq!(
            tokenize("MAT135H1;MAT136H1"),
            Err(ParseError::UnexpectedCharacter(';'))
        );
    }
}
