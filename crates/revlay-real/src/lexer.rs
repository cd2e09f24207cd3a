//! Line tokenizer for the circuit text format.

use logos::Logos;

/// Tokens on a single source line.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
pub enum Token {
    /// `#` and everything after it.
    #[regex(r"#.*")]
    Comment,

    /// Any whitespace-delimited word not starting with `#`.
    #[regex(r"[^\s#]\S*")]
    Word,
}

/// Split a line into words, stopping at the first comment token.
///
/// A `#` inside a word does not start a comment.
pub fn words(line: &str) -> Vec<&str> {
    let mut lexer = Token::lexer(line);
    let mut words = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(Token::Comment) => break,
            Ok(Token::Word) | Err(()) => words.push(lexer.slice()),
        }
    }

    words
}
