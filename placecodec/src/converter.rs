//! Placeholder conversion between the Twine, Android and Flash conventions.
//!
//! Twine uses printf specifiers with `@` as its string conversion. Android
//! uses `s` instead, wants stray `%` escaped and needs positional indices
//! once a value has more than one placeholder. Flash only knows positional
//! `{N}` tokens.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace, warn};

use crate::{
    direction::Direction,
    error::Error,
    placeholder::{Grammar, Token, tokenize},
};

lazy_static! {
    static ref FLASH_PLACEHOLDER_REGEX: Regex = Regex::new(r"\{[0-9]+\}").unwrap();
}

/// Rewrites Twine string specifiers to printf ones: `%@` -> `%s`,
/// `%1$-5@` -> `%1$-5s`. Everything else is copied unchanged.
pub fn twine_to_printf(input: &str) -> String {
    rewrite_string_conversion(input, &Grammar::TWINE, '@', 's')
}

/// Rewrites printf string specifiers to Twine ones: `%s` -> `%@`.
pub fn printf_to_twine(input: &str) -> String {
    rewrite_string_conversion(input, &Grammar::PRINTF, 's', '@')
}

fn rewrite_string_conversion(input: &str, grammar: &Grammar, from: char, to: char) -> String {
    let mut out = String::with_capacity(input.len());
    for token in tokenize(input, grammar) {
        match token {
            Token::Specifier(spec) if spec.conversion == from => {
                out.push_str(&spec.with_conversion(to))
            }
            other => out.push_str(other.as_str()),
        }
    }
    out
}

/// Converts a Twine value to an Android resource string.
///
/// - `%@` becomes `%s`.
/// - When the value has at least one specifier, every bare `%` is doubled.
/// - When it has two or more and none are numbered, they are numbered
///   `%1$..`, `%2$..` left to right.
///
/// Values that mix numbered and non-numbered specifiers are rejected with
/// [`Error::MixedPlaceholderNumbering`].
///
/// # Example
///
/// ```rust
/// use placecodec::twine_to_android;
///
/// assert_eq!(twine_to_android("first %d second %f")?, "first %1$d second %2$f");
/// assert_eq!(twine_to_android("100% of %@")?, "100%% of %s");
/// assert!(twine_to_android("some %d second %2$f").is_err());
/// # Ok::<(), placecodec::Error>(())
/// ```
pub fn twine_to_android(input: &str) -> Result<String, Error> {
    let value = twine_to_printf(input);
    let tokens: Vec<Token<'_>> = tokenize(&value, &Grammar::PRINTF).collect();

    let total = tokens
        .iter()
        .filter(|token| matches!(token, Token::Specifier(_)))
        .count();
    if total == 0 {
        return Ok(value);
    }

    let non_numbered = tokens
        .iter()
        .filter(|token| matches!(token, Token::Specifier(spec) if !spec.is_numbered()))
        .count();
    let needs_numbering = total >= 2 && non_numbered > 0;
    if needs_numbering && non_numbered != total {
        debug!(total, non_numbered, "rejecting mixed placeholder numbering");
        return Err(Error::mixed_numbering(input));
    }
    trace!(total, needs_numbering, "converting to android");

    let mut out = String::with_capacity(value.len() + tokens.len() * 2);
    let mut index = 0;
    for token in &tokens {
        match token {
            Token::BarePercent => out.push_str("%%"),
            Token::Specifier(spec) if needs_numbering => {
                index += 1;
                out.push_str(&spec.with_parameter(index));
            }
            other => out.push_str(other.as_str()),
        }
    }
    Ok(out)
}

/// Converts an Android resource string to Twine.
///
/// Only the string conversion changes (`%s` -> `%@`). Escaped `%%` and
/// positional indices are kept as they are.
pub fn android_to_twine(input: &str) -> String {
    printf_to_twine(input)
}

/// Converts a Twine value to a Flash resource string.
///
/// Each specifier becomes `{0}`, `{1}`, ... in order of appearance. Any `N$`
/// index on the source specifier is ignored.
///
/// # Example
///
/// ```rust
/// use placecodec::twine_to_flash;
///
/// assert_eq!(twine_to_flash("%2$@ owes %1$.2f"), "{0} owes {1}");
/// ```
pub fn twine_to_flash(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut index = 0usize;
    for token in tokenize(input, &Grammar::TWINE) {
        match token {
            Token::Specifier(_) => {
                out.push_str(&format!("{{{}}}", index));
                index += 1;
            }
            other => out.push_str(other.as_str()),
        }
    }
    out
}

/// Converts a Flash resource string to Twine. Every `{N}` becomes `%@`
/// whatever its number.
pub fn flash_to_twine(input: &str) -> String {
    FLASH_PLACEHOLDER_REGEX.replace_all(input, "%@").into_owned()
}

/// Converts `input` in the given direction.
///
/// # Example
///
/// ```rust
/// use placecodec::{Direction, convert};
///
/// assert_eq!(convert("{3} and {9}", Direction::FromFlash)?, "%@ and %@");
/// # Ok::<(), placecodec::Error>(())
/// ```
pub fn convert(input: &str, direction: Direction) -> Result<String, Error> {
    match direction {
        Direction::ToAndroid => twine_to_android(input),
        Direction::FromAndroid => Ok(android_to_twine(input)),
        Direction::ToFlash => Ok(twine_to_flash(input)),
        Direction::FromFlash => Ok(flash_to_twine(input)),
    }
}

/// What [`convert_entries`] does with a value that cannot be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop and return the error.
    #[default]
    Abort,
    /// Leave the entry out of the result.
    Skip,
    /// Pass the original value through unconverted.
    Keep,
}

impl Display for ErrorPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorPolicy::Abort => write!(f, "abort"),
            ErrorPolicy::Skip => write!(f, "skip"),
            ErrorPolicy::Keep => write!(f, "keep"),
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(ErrorPolicy::Abort),
            "skip" => Ok(ErrorPolicy::Skip),
            "keep" => Ok(ErrorPolicy::Keep),
            _ => Err(Error::UnknownPolicy(s.to_string())),
        }
    }
}

/// Result of [`convert_entries`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Converted `(key, value)` pairs in input order.
    pub converted: Vec<(String, String)>,
    /// Keys whose value failed to convert.
    pub failed: Vec<String>,
}

/// Converts a sequence of keyed values, handling failures per `policy`.
///
/// With [`ErrorPolicy::Abort`] the first failure is returned as
/// [`Error::Conversion`] naming the key, with the underlying error as source.
///
/// # Example
///
/// ```rust
/// use placecodec::{Direction, ErrorPolicy, convert_entries};
///
/// let entries = vec![("ok", "%@ and %d"), ("bad", "%d and %2$d")];
/// let report = convert_entries(entries, Direction::ToAndroid, ErrorPolicy::Skip)?;
/// assert_eq!(report.converted, vec![("ok".to_string(), "%1$s and %2$d".to_string())]);
/// assert_eq!(report.failed, vec!["bad".to_string()]);
/// # Ok::<(), placecodec::Error>(())
/// ```
pub fn convert_entries<I, K, V>(
    entries: I,
    direction: Direction,
    policy: ErrorPolicy,
) -> Result<BatchReport, Error>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    let mut report = BatchReport::default();
    for (key, value) in entries {
        let key = key.into();
        let value = value.as_ref();
        match convert(value, direction) {
            Ok(converted) => report.converted.push((key, converted)),
            Err(e) => match policy {
                ErrorPolicy::Abort => {
                    return Err(Error::conversion_error(
                        format!("cannot convert entry `{}` {}", key, direction),
                        Some(Box::new(e)),
                    ));
                }
                ErrorPolicy::Skip => {
                    warn!(key = %key, error = %e, "skipping entry");
                    report.failed.push(key);
                }
                ErrorPolicy::Keep => {
                    warn!(key = %key, error = %e, "keeping entry unconverted");
                    report.converted.push((key.clone(), value.to_string()));
                    report.failed.push(key);
                }
            },
        }
    }
    debug!(
        converted = report.converted.len(),
        failed = report.failed.len(),
        %direction,
        "batch conversion finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twine_to_printf_keeps_prefix() {
        assert_eq!(twine_to_printf("%1$-10.5l@ and %@"), "%1$-10.5ls and %s");
        assert_eq!(twine_to_printf("mail@example.com @ %d"), "mail@example.com @ %d");
    }

    #[test]
    fn test_printf_to_twine_only_touches_strings() {
        assert_eq!(printf_to_twine("%2$s has %1$d, %s"), "%2$@ has %1$d, %@");
        assert_eq!(printf_to_twine("50%%s"), "50%%s");
    }

    #[test]
    fn test_android_escapes_leading_percent() {
        assert_eq!(twine_to_android("% off %d").unwrap(), "%% off %d");
    }

    #[test]
    fn test_android_escapes_trailing_percent() {
        assert_eq!(twine_to_android("%d%").unwrap(), "%d%%");
    }

    #[test]
    fn test_android_keeps_odd_percent_runs_balanced() {
        assert_eq!(twine_to_android("%%% %d").unwrap(), "%%%% %d");
    }

    #[test]
    fn test_android_single_numbered_is_not_validated() {
        assert_eq!(twine_to_android("only %5$d").unwrap(), "only %5$d");
    }

    #[test]
    fn test_android_mixed_error_carries_original_input() {
        match twine_to_android("%@ then %2$@") {
            Err(Error::MixedPlaceholderNumbering { value }) => assert_eq!(value, "%@ then %2$@"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_flash_ignores_escaped_percent() {
        assert_eq!(twine_to_flash("100%% %@"), "100%% {0}");
    }

    #[test]
    fn test_flash_to_twine_ignores_non_numeric_braces() {
        assert_eq!(flash_to_twine("{name} {} {0}"), "{name} {} %@");
    }

    #[test]
    fn test_error_policy_parse() {
        assert_eq!("Skip".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::Skip);
        assert_eq!(ErrorPolicy::Keep.to_string(), "keep");
        assert!(matches!("retry".parse::<ErrorPolicy>(), Err(Error::UnknownPolicy(_))));
    }

    #[test]
    fn test_convert_entries_abort_names_key() {
        let entries = vec![("first", "%@"), ("broken", "%d %1$d"), ("last", "%@")];
        let err = convert_entries(entries, Direction::ToAndroid, ErrorPolicy::Abort).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("broken"), "{}", message);
        assert!(message.contains("to-android"), "{}", message);
    }

    #[test]
    fn test_convert_entries_keep_passes_original() {
        let entries = vec![("broken".to_string(), "%d %1$d".to_string())];
        let report = convert_entries(entries, Direction::ToAndroid, ErrorPolicy::Keep).unwrap();
        assert_eq!(report.converted, vec![("broken".to_string(), "%d %1$d".to_string())]);
        assert_eq!(report.failed, vec!["broken".to_string()]);
    }

    #[test]
    fn test_convert_entries_never_fails_for_total_directions() {
        let entries = vec![("a", "%d %1$d"), ("b", "{1}")];
        for direction in [Direction::FromAndroid, Direction::ToFlash, Direction::FromFlash] {
            let report = convert_entries(entries.clone(), direction, ErrorPolicy::Abort).unwrap();
            assert_eq!(report.converted.len(), 2);
            assert!(report.failed.is_empty());
        }
    }
}
