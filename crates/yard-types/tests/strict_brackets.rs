//! Bracket strictness is chosen by the caller, never by the environment.

use rstest::rstest;
use yard_types::{Constraint, ParseOptions, Value, check, config, parse, parse_with};

#[rstest]
#[case("A)", "A")]
#[case("Array<String)", "Array<String>")]
#[case("(String>", "(String)")]
#[case("Array<String", "Array<String>")]
fn parse_is_always_permissive(#[case] text: &str, #[case] rendered: &str) {
    assert_eq!(
        parse(text).map(|constraint| constraint.to_string()),
        Ok(rendered.to_string())
    );
    let from_str: Result<Constraint, _> = text.parse();
    assert!(from_str.is_ok(), "'{text}'");
}

#[test]
fn check_parses_permissively() {
    let outcome = check("Array<String)", &Value::from(vec![Value::from("a")]));
    assert_eq!(outcome.map(|o| o.is_success()), Ok(true));
}

#[rstest]
#[case("A)", "expecting end of input, got ')'")]
#[case("Array<String)", "expecting '>', got ')'")]
fn strict_mode_is_explicit(#[case] text: &str, #[case] message: &str) {
    let Err(err) = parse_with(text, ParseOptions::strict()) else {
        panic!("'{text}' should be rejected in strict mode");
    };
    assert_eq!(err.message, message);
    assert!(parse_with("Array<(String, Symbol)>", ParseOptions::strict()).is_ok());
}

#[test]
fn environment_options_default_to_permissive() {
    if std::env::var_os(config::STRICT_BRACKETS_ENV).is_none() {
        assert_eq!(config::parse_options(), ParseOptions::permissive());
    }
}
