//! logos-based tokenizer for route patterns.
//!
//! `/users/{id}/files/{*rest}` lexes as
//! `Slash Literal Slash Param Slash Literal Slash Wildcard`.
//! Braces that do not form a valid parameter (`{1x}`, `{`) fail to lex.

use std::ops::Range;

use logos::Logos;

/// Route pattern token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Tail wildcard: `{*name}`.
    #[regex(r"\{\*[a-zA-Z_][a-zA-Z0-9_]*\}")]
    Wildcard,

    /// Single-segment parameter: `{name}`.
    #[regex(r"\{[a-zA-Z_][a-zA-Z0-9_]*\}")]
    Param,

    /// Segment separator.
    #[token("/")]
    Slash,

    /// Literal text between separators.
    #[regex(r"[^/{}]+")]
    Literal,
}

impl Token {
    /// The name inside a `{name}` or `{*name}` token's text.
    pub fn param_name(self, text: &str) -> Option<&str> {
        match self {
            Token::Param => text.strip_prefix('{')?.strip_suffix('}'),
            Token::Wildcard => text.strip_prefix("{*")?.strip_suffix('}'),
            Token::Slash | Token::Literal => None,
        }
    }
}

/// Tokenize a pattern into `(token, text)` pairs.
///
/// Fails with the byte range of the first fragment that does not lex.
pub fn tokenize(input: &str) -> Result<Vec<(Token, &str)>, Range<usize>> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| match result {
            Ok(token) => Ok((token, &input[span])),
            Err(()) => Err(span),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|(t, _)| t)
            .collect()
    }

    #[test]
    fn literal_path() {
        assert_eq!(
            tokens("/users/list"),
            vec![Token::Slash, Token::Literal, Token::Slash, Token::Literal]
        );
    }

    #[test]
    fn params_and_wildcard() {
        let lexed = tokenize("/users/{id}/{*rest}").unwrap();
        assert_eq!(
            lexed,
            vec![
                (Token::Slash, "/"),
                (Token::Literal, "users"),
                (Token::Slash, "/"),
                (Token::Param, "{id}"),
                (Token::Slash, "/"),
                (Token::Wildcard, "{*rest}"),
            ]
        );
    }

    #[test]
    fn param_names() {
        assert_eq!(Token::Param.param_name("{id}"), Some("id"));
        assert_eq!(Token::Wildcard.param_name("{*rest}"), Some("rest"));
        assert_eq!(Token::Literal.param_name("users"), None);
    }

    #[test]
    fn root_pattern() {
        assert_eq!(tokens("/"), vec![Token::Slash]);
    }

    #[test]
    fn literal_may_contain_punctuation() {
        assert_eq!(
            tokenize("/a-b.c_d~e").unwrap()[1],
            (Token::Literal, "a-b.c_d~e")
        );
    }

    #[test]
    fn malformed_braces_fail() {
        assert!(tokenize("/users/{1x}").is_err());
        assert!(tokenize("/users/{id").is_err());
        assert!(tokenize("/users/id}").is_err());
        assert!(tokenize("/{}").is_err());
    }

    #[test]
    fn error_span_points_at_fragment() {
        let span = tokenize("/ok/{").unwrap_err();
        assert_eq!(span.start, 4);
    }
}
