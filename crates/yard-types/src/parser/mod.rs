//! Recursive-descent parser for type annotations.
//!
//! One routine parses a comma-separated list of alternatives up to a
//! terminator and is reused for the top level and for the contents of every
//! collection, tuple and hash.

mod lexer;
#[cfg(test)]
pub(crate) mod test_support;

use crate::constraint::Constraint;
use crate::errors::{SyntaxError, syntax_error};
use crate::types::{CollectionType, DEFAULT_COLLECTION, DEFAULT_HASH, HashType, TupleType, Type};

use lexer::{Lexer, Token, TokenKind};

/// Deepest nesting of collections, tuples and hashes accepted.
pub(crate) const MAX_NESTING: usize = 128;

/// Options controlling how strictly annotations are parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Require every opening bracket to be closed by its own closer and
    /// reject a second opener after a completed collection, tuple or hash.
    ///
    /// When disabled, any closing token ends the innermost group and end of
    /// input closes whatever is still open.
    pub strict_brackets: bool,
}

impl ParseOptions {
    /// Accept any closer for any opener.
    #[must_use]
    pub const fn permissive() -> Self {
        Self {
            strict_brackets: false,
        }
    }

    /// Require matching bracket pairs.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            strict_brackets: true,
        }
    }
}

/// Parse `text` into a [`Constraint`].
///
/// # Errors
/// Returns [`SyntaxError`] describing the first malformed token.
pub(crate) fn parse_constraint(text: &str, options: ParseOptions) -> Result<Constraint, SyntaxError> {
    let mut parser = Parser {
        lexer: Lexer::new(text),
        options,
        depth: 0,
    };
    let types = parser.parse_group(TokenKind::End)?;
    let constraint = Constraint::new(types);
    log::debug!("parsed type annotation '{text}' as '{constraint}'");
    Ok(constraint)
}

/// Name or composite seen since the last separator.
#[derive(Default)]
struct Pending<'a> {
    name: Option<&'a str>,
    composite: Option<Type>,
}

impl Pending<'_> {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.composite.is_none()
    }

    /// Turn the pending name or composite into a finished type.
    fn finish(&mut self, token: &Token<'_>) -> Result<Type, SyntaxError> {
        match (self.composite.take(), self.name.take()) {
            (Some(composite), _) => Ok(composite),
            (None, Some(name)) => Ok(Type::for_name(name)),
            (None, None) => Err(syntax_error(
                format!("expecting name, got {}", describe(token)),
                token.position,
                token.text,
            )),
        }
    }
}

fn describe(token: &Token<'_>) -> String {
    match token.kind {
        TokenKind::End => token.kind.describe().to_string(),
        _ => format!("'{}'", token.text),
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    options: ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Parse alternatives until a terminator, returning them in order.
    ///
    /// `closer` is the terminator that should end this group; it is only
    /// enforced in strict mode.
    fn parse_group(&mut self, closer: TokenKind) -> Result<Vec<Type>, SyntaxError> {
        let mut types = Vec::new();
        let mut pending = Pending::default();

        loop {
            let token = self.lexer.next_token()?;
            match token.kind {
                TokenKind::Whitespace => {}
                TokenKind::Name => {
                    if !pending.is_empty() {
                        return Err(syntax_error(
                            format!("expecting END, got name '{}'", token.text),
                            token.position,
                            token.text,
                        ));
                    }
                    pending.name = Some(token.text);
                }
                TokenKind::Separator => types.push(pending.finish(&token)?),
                TokenKind::CollectionStart => {
                    self.ensure_open(&pending, &token)?;
                    let name = *pending.name.get_or_insert(DEFAULT_COLLECTION);
                    let inner = self.parse_nested(TokenKind::CollectionEnd, &token)?;
                    pending.composite = Some(if name == DEFAULT_HASH {
                        hash_shorthand(inner, &token)?
                    } else {
                        Type::Collection(CollectionType::new(name, inner))
                    });
                }
                TokenKind::TupleStart => {
                    self.ensure_open(&pending, &token)?;
                    let inner = self.parse_nested(TokenKind::TupleEnd, &token)?;
                    pending.composite = Some(Type::Tuple(TupleType::new(pending.name, inner)));
                }
                TokenKind::HashStart => {
                    self.ensure_open(&pending, &token)?;
                    let name = *pending.name.get_or_insert(DEFAULT_HASH);
                    let keys = self.parse_nested(TokenKind::HashArrow, &token)?;
                    let values = self.parse_nested(TokenKind::HashEnd, &token)?;
                    pending.composite = Some(Type::Hash(HashType::new(name, keys, values)));
                }
                TokenKind::CollectionEnd
                | TokenKind::TupleEnd
                | TokenKind::HashArrow
                | TokenKind::HashEnd
                | TokenKind::End => {
                    types.push(pending.finish(&token)?);
                    self.ensure_closer(closer, &token)?;
                    return Ok(types);
                }
            }
        }
    }

    /// Parse the contents of the group opened by `opener`.
    fn parse_nested(
        &mut self,
        closer: TokenKind,
        opener: &Token<'a>,
    ) -> Result<Vec<Type>, SyntaxError> {
        if self.depth >= MAX_NESTING {
            return Err(syntax_error(
                format!("nesting deeper than {MAX_NESTING} levels"),
                opener.position,
                opener.text,
            ));
        }
        self.depth += 1;
        let inner = self.parse_group(closer);
        self.depth -= 1;
        inner
    }

    /// In strict mode, refuse to open a group after a completed composite.
    fn ensure_open(&self, pending: &Pending<'a>, token: &Token<'a>) -> Result<(), SyntaxError> {
        if self.options.strict_brackets && pending.composite.is_some() {
            return Err(syntax_error(
                format!("expecting END, got {}", describe(token)),
                token.position,
                token.text,
            ));
        }
        Ok(())
    }

    /// In strict mode, require the terminator that matches the open group.
    fn ensure_closer(&self, closer: TokenKind, token: &Token<'a>) -> Result<(), SyntaxError> {
        if self.options.strict_brackets && token.kind != closer {
            return Err(syntax_error(
                format!("expecting {}, got {}", closer.describe(), describe(token)),
                token.position,
                token.text,
            ));
        }
        Ok(())
    }
}

/// Desugar `Hash<K, V>` into a hash constraint.
fn hash_shorthand(inner: Vec<Type>, opener: &Token<'_>) -> Result<Type, SyntaxError> {
    let count = inner.len();
    let mut parts = inner.into_iter();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => Ok(Type::Hash(HashType::new(
            DEFAULT_HASH,
            vec![key],
            vec![value],
        ))),
        _ => Err(syntax_error(
            format!("expected 2 types for key/value; got {count}"),
            opener.position,
            opener.text,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::MAX_NESTING;
    use super::test_support::{parse_err, parse_ok, parse_strict_err};
    use crate::types::Type;
    use rstest::rstest;

    #[rstest]
    #[case("true")]
    #[case("false")]
    #[case("nil")]
    #[case("void")]
    #[case("self")]
    fn parses_literals(#[case] text: &str) {
        assert!(matches!(parse_ok(text).first(), Some(Type::Literal(_))));
    }

    #[rstest]
    #[case("Foo")]
    #[case("Array")]
    #[case("Hash")]
    #[case("::Foo::Bar")]
    fn parses_bare_names_as_kinds(#[case] text: &str) {
        assert!(matches!(parse_ok(text).first(), Some(Type::Kind(_))));
    }

    #[test]
    fn parses_duck_names() {
        let Some(Type::Duck(duck)) = parse_ok("#foo").first().cloned() else {
            panic!("expected duck type");
        };
        assert_eq!(duck.message(), "foo");
    }

    #[test]
    fn collection_defaults_to_array() {
        let Some(Type::Collection(collection)) = parse_ok("<String>").first().cloned() else {
            panic!("expected collection");
        };
        assert_eq!(collection.name(), "Array");
    }

    #[test]
    fn unnamed_tuple_has_no_kind() {
        let Some(Type::Tuple(tuple)) = parse_ok("(String, #to_date, true)").first().cloned()
        else {
            panic!("expected tuple");
        };
        assert_eq!(tuple.name(), None);
        assert_eq!(tuple.types().len(), 3);
    }

    #[test]
    fn hash_braces_split_keys_from_values() {
        let Some(Type::Hash(hash)) = parse_ok("{#a, #b => #to_date}").first().cloned() else {
            panic!("expected hash");
        };
        assert_eq!(hash.name(), "Hash");
        assert_eq!(hash.key_types().len(), 2);
        assert_eq!(hash.value_types().len(), 1);
    }

    #[test]
    fn hash_shorthand_takes_one_key_and_one_value() {
        let Some(Type::Hash(hash)) = parse_ok("Hash<(#some, #tuple), Array<#to_date>>")
            .first()
            .cloned()
        else {
            panic!("expected hash");
        };
        assert!(matches!(hash.key_types(), [Type::Tuple(_)]));
        assert!(matches!(hash.value_types(), [Type::Collection(_)]));
    }

    #[rstest]
    #[case("Hash<a>", "expected 2 types for key/value; got 1")]
    #[case("Hash<a, b, c>", "expected 2 types for key/value; got 3")]
    #[case("A B", "expecting END, got name 'B'")]
    #[case("(A) B", "expecting END, got name 'B'")]
    #[case(", A", "expecting name, got ','")]
    #[case("Array<>", "expecting name, got '>'")]
    #[case("", "expecting name, got end of input")]
    #[case("{A}", "expecting name, got end of input")]
    #[case("A & B", "invalid character '&'")]
    fn rejects_malformed_annotations(#[case] text: &str, #[case] message: &str) {
        let err = parse_err(text);
        assert!(
            err.to_string().contains(message),
            "'{text}' produced '{err}'"
        );
    }

    #[rstest]
    #[case("Array<String)")]
    #[case("(String>")]
    #[case("Array<String")]
    #[case("A)")]
    #[case("{A => B)")]
    fn permissive_mode_accepts_mismatched_closers(#[case] text: &str) {
        assert!(!parse_ok(text).is_empty());
    }

    #[rstest]
    #[case("Array<String)", "expecting '>', got ')'")]
    #[case("(String>", "expecting ')', got '>'")]
    #[case("Array<String", "expecting '>', got end of input")]
    #[case("A)", "expecting end of input, got ')'")]
    #[case("{A => B)", "expecting '}', got ')'")]
    #[case("Array<A>(B)", "expecting END, got '('")]
    fn strict_mode_requires_matching_closers(#[case] text: &str, #[case] message: &str) {
        let err = parse_strict_err(text);
        assert!(
            err.to_string().contains(message),
            "'{text}' produced '{err}'"
        );
    }

    #[test]
    fn nesting_is_capped() {
        let deepest = format!("{}A", "<".repeat(MAX_NESTING));
        assert_eq!(parse_ok(&deepest).len(), 1);

        let err = parse_err(&"<".repeat(MAX_NESTING + 1));
        assert_eq!(err.position, MAX_NESTING);
        assert!(err.message.starts_with("nesting deeper than"));
    }

    #[test]
    fn runaway_nesting_fails_without_exhausting_the_stack() {
        let err = parse_err(&"(".repeat(1_000_000));
        assert_eq!(err.position, MAX_NESTING);
    }

    #[test]
    fn errors_point_at_offending_token() {
        let err = parse_err("String, , Symbol");
        assert_eq!(err.position, 8);
        assert_eq!(err.token.as_deref(), Some(","));
    }
}
