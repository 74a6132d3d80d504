//! Tokenizer classifying the next slice of a type annotation.
//!
//! Rules are tried in a fixed priority order at the current position; the
//! first rule that matches wins. End of input is reported as its own token so
//! the parser can treat it like any other terminator.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{SyntaxError, syntax_error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    CollectionStart,
    CollectionEnd,
    TupleStart,
    TupleEnd,
    Name,
    Separator,
    Whitespace,
    HashStart,
    HashArrow,
    HashEnd,
    End,
}

impl TokenKind {
    /// Human-readable spelling used in syntax errors.
    pub(crate) const fn describe(self) -> &'static str {
        match self {
            Self::CollectionStart => "'<'",
            Self::CollectionEnd => "'>'",
            Self::TupleStart => "'('",
            Self::TupleEnd => "')'",
            Self::Name => "name",
            Self::Separator => "separator",
            Self::Whitespace => "whitespace",
            Self::HashStart => "'{'",
            Self::HashArrow => "'=>'",
            Self::HashEnd => "'}'",
            Self::End => "end of input",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub position: usize,
}

// `\w` and `\s` are spelled out so only ASCII word and space characters match.
static NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#[A-Za-z0-9_]+|(?:(?:::)?[A-Za-z0-9_]+)+)").unwrap_or_else(|_| unreachable!())
});
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t\r\n\x0B\x0C]+").unwrap_or_else(|_| unreachable!()));

enum Matcher {
    Exact(&'static str),
    AnyOf(&'static [char]),
    Pattern(&'static LazyLock<Regex>),
}

impl Matcher {
    fn matched<'a>(&self, rest: &'a str) -> Option<&'a str> {
        match self {
            Self::Exact(text) => rest.get(..text.len()).filter(|head| head == text),
            Self::AnyOf(chars) => rest
                .chars()
                .next()
                .filter(|c| chars.contains(c))
                .and_then(|c| rest.get(..c.len_utf8())),
            Self::Pattern(regex) => regex.find(rest).map(|m| m.as_str()),
        }
    }
}

static RULES: [(TokenKind, Matcher); 10] = [
    (TokenKind::CollectionStart, Matcher::Exact("<")),
    (TokenKind::CollectionEnd, Matcher::Exact(">")),
    (TokenKind::TupleStart, Matcher::Exact("(")),
    (TokenKind::TupleEnd, Matcher::Exact(")")),
    (TokenKind::Name, Matcher::Pattern(&NAME)),
    (TokenKind::Separator, Matcher::AnyOf(&[',', ';'])),
    (TokenKind::Whitespace, Matcher::Pattern(&WHITESPACE)),
    (TokenKind::HashStart, Matcher::Exact("{")),
    (TokenKind::HashArrow, Matcher::Exact("=>")),
    (TokenKind::HashEnd, Matcher::Exact("}")),
];

pub(crate) struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Classify and consume the next token.
    ///
    /// Once the input is exhausted every further call yields an
    /// [`TokenKind::End`] token at the same position.
    pub(crate) fn next_token(&mut self) -> Result<Token<'a>, SyntaxError> {
        let rest = self.input.get(self.pos..).unwrap_or_default();
        if rest.is_empty() {
            return Ok(Token {
                kind: TokenKind::End,
                text: "",
                position: self.pos,
            });
        }

        for (kind, matcher) in &RULES {
            if let Some(text) = matcher.matched(rest) {
                let token = Token {
                    kind: *kind,
                    text,
                    position: self.pos,
                };
                log::trace!("token {kind:?} '{text}' at byte {}", self.pos);
                self.pos += text.len();
                return Ok(token);
            }
        }

        let invalid = rest.chars().next().map(String::from).unwrap_or_default();
        Err(syntax_error(
            format!("invalid character '{invalid}'"),
            self.pos,
            &invalid,
        ))
    }
}
