//! Parse options taken from the environment.
//!
//! [`parse`](crate::parse) never consults this module; it always parses
//! permissively. Callers that want deployment-controlled strictness read the
//! options here and hand them to [`parse_with`](crate::parse_with):
//!
//! ```
//! use yard_types::{config, parse_with};
//!
//! let constraint = parse_with("Array<String>", config::parse_options());
//! assert!(constraint.is_ok());
//! ```

use crate::parser::ParseOptions;

/// Environment variable selecting the bracket mode.
///
/// Accepts `strict` or `permissive`, and the usual boolean spellings
/// (`1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off`) meaning strict or not.
pub const STRICT_BRACKETS_ENV: &str = "YARD_TYPES_STRICT_BRACKETS";

/// Options described by [`STRICT_BRACKETS_ENV`]; permissive when unset.
#[must_use]
pub fn parse_options() -> ParseOptions {
    options_from(std::env::var(STRICT_BRACKETS_ENV).ok().as_deref())
}

fn options_from(raw: Option<&str>) -> ParseOptions {
    let Some(raw) = raw else {
        return ParseOptions::permissive();
    };
    match bracket_mode(raw) {
        Some(true) => ParseOptions::strict(),
        Some(false) => ParseOptions::permissive(),
        None => {
            log::warn!("ignoring unrecognised {STRICT_BRACKETS_ENV} value '{raw}'");
            ParseOptions::permissive()
        }
    }
}

/// `Some(true)` for strict, `Some(false)` for permissive.
fn bracket_mode(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "strict" | "1" | "true" | "yes" | "on" => Some(true),
        "permissive" | "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
