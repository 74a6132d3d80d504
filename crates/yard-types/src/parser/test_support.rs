//! Test helpers for asserting parser outcomes.
use super::{ParseOptions, parse_constraint};
use crate::constraint::Constraint;
use crate::errors::SyntaxError;

pub(crate) fn parse_ok(text: &str) -> Constraint {
    match parse_constraint(text, ParseOptions::permissive()) {
        Ok(constraint) => constraint,
        Err(err) => panic!("'{text}' should parse: {err}"),
    }
}

pub(crate) fn parse_err(text: &str) -> SyntaxError {
    match parse_constraint(text, ParseOptions::permissive()) {
        Ok(constraint) => panic!("'{text}' should fail to parse, got '{constraint}'"),
        Err(err) => err,
    }
}

pub(crate) fn parse_strict_err(text: &str) -> SyntaxError {
    match parse_constraint(text, ParseOptions::strict()) {
        Ok(constraint) => panic!("'{text}' should fail strict parsing, got '{constraint}'"),
        Err(err) => err,
    }
}
