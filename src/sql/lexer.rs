//! Minimal lexer for clause splitting.
//!
//! Produces word, quoted-string and symbol tokens with byte spans into the
//! source text. Whitespace (including newlines) only separates tokens, so a
//! clause body may span any number of lines.
//!
//! Quoted literals are single tokens, so a keyword inside quotes never ends a
//! clause. This is stricter than a plain textual keyword split: in
//! `ON c.Descricao = 'x WHERE y'` the whole literal belongs to the JOIN
//! condition.

use std::ops::Range;

/// Kinds of tokens the clause extractor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A maximal run of `[A-Za-z0-9_]`.
    Word,
    /// A `'...'` or `"..."` literal, quotes included. Unterminated literals
    /// run to end of input.
    Quoted,
    /// Any other single character.
    Symbol,
}

/// A token and its byte span in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    /// Source text covered by this token.
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.span.clone()]
    }

    /// Case-insensitive whole-word keyword test.
    pub fn is_keyword(&self, src: &str, keyword: &str) -> bool {
        self.kind == TokenKind::Word && self.text(src).eq_ignore_ascii_case(keyword)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split `src` into tokens.
pub fn tokenize(src: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        let kind = if is_word_char(c) {
            while chars.peek().is_some_and(|&(_, n)| is_word_char(n)) {
                chars.next();
            }
            TokenKind::Word
        } else if c == '\'' || c == '"' {
            // A doubled quote inside the literal is an escaped quote.
            loop {
                match chars.next() {
                    Some((_, n)) if n == c => {
                        if chars.peek().is_some_and(|&(_, m)| m == c) {
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    Some(_) => {}
                    None => break,
                }
            }
            TokenKind::Quoted
        } else {
            TokenKind::Symbol
        };

        let end = chars.peek().map_or(src.len(), |&(i, _)| i);
        tokens.push(Token {
            kind,
            span: start..end,
        });
    }

    tokens
}
