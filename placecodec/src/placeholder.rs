//! Format specifier grammar and the scanner built on it.
//!
//! A specifier has the shape `%[N$][flag][width][.precision][length]type`:
//! - `N$`: explicit parameter index
//! - flag: at most one of `-`, `+`, `0`, `#` (the space flag is not recognised)
//! - width: digits or `*`
//! - precision: `.` followed by digits or `*`
//! - length: `h`, `hh`, `l`, `ll`, `L`, `z`, `j` or `t`
//! - type: one conversion character accepted by the active [`Grammar`]
//!
//! The scanner walks the input once, left to right, and splits it into
//! [`Token`]s. A `%` only becomes a specifier when the whole grammar matches,
//! so prose such as `70% and` never yields a `%a` conversion.

use serde::Serialize;

const PRINTF_CONVERSIONS: &[u8] = b"diufFeEgGxXoscpaA";
const TWINE_CONVERSIONS: &[u8] = b"diufFeEgGxXoscpaA@";
const FLAGS: &[u8] = b"-+0#";

/// The set of conversion characters a specifier may end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grammar {
    conversions: &'static [u8],
}

impl Grammar {
    /// Plain printf conversions, as used by Android resources.
    pub const PRINTF: Grammar = Grammar {
        conversions: PRINTF_CONVERSIONS,
    };

    /// Printf conversions plus the Twine string conversion `@`.
    pub const TWINE: Grammar = Grammar {
        conversions: TWINE_CONVERSIONS,
    };

    /// Returns true if `conversion` may terminate a specifier.
    pub fn accepts(&self, conversion: char) -> bool {
        conversion.is_ascii() && self.conversions.contains(&(conversion as u8))
    }

    /// Matches a complete specifier starting at byte offset `start`.
    ///
    /// Returns `None` unless `input[start..]` begins with `%` followed by a
    /// full specifier. `%%` is never a specifier.
    pub fn match_at<'a>(&self, input: &'a str, start: usize) -> Option<Specifier<'a>> {
        let bytes = input.as_bytes();
        if bytes.get(start) != Some(&b'%') {
            return None;
        }
        let mut j = start + 1;

        // Optional positional index: digits followed by '$'
        let mut parameter_index = None;
        let digits_end = scan_digits(bytes, j);
        if digits_end > j && bytes.get(digits_end) == Some(&b'$') {
            parameter_index = Some(parse_index(&bytes[j..digits_end]));
            j = digits_end + 1;
        }
        let body_start = j;

        let flag = match bytes.get(j) {
            Some(&b) if FLAGS.contains(&b) => {
                j += 1;
                Some(b as char)
            }
            _ => None,
        };

        let width_start = j;
        j = scan_count(bytes, j);
        let width = (j > width_start).then(|| &input[width_start..j]);

        let mut precision = None;
        if bytes.get(j) == Some(&b'.') {
            let end = scan_count(bytes, j + 1);
            if end > j + 1 {
                precision = Some(&input[j + 1..end]);
                j = end;
            }
        }

        let length_start = j;
        match bytes.get(j) {
            Some(&(b @ (b'h' | b'l'))) => {
                j += 1;
                if bytes.get(j) == Some(&b) {
                    j += 1;
                }
            }
            Some(b'L' | b'z' | b'j' | b't') => j += 1,
            _ => {}
        }
        let length = (j > length_start).then(|| &input[length_start..j]);

        let conversion = *bytes.get(j)?;
        if !self.conversions.contains(&conversion) {
            return None;
        }

        Some(Specifier {
            text: &input[start..=j],
            body_offset: body_start - start,
            parameter_index,
            flag,
            width,
            precision,
            length,
            conversion: conversion as char,
        })
    }
}

fn scan_digits(bytes: &[u8], mut j: usize) -> usize {
    while j < bytes.len() && bytes[j].is_ascii_digit() {
        j += 1;
    }
    j
}

/// Width and precision share the same shape: digits or a single `*`.
fn scan_count(bytes: &[u8], j: usize) -> usize {
    if bytes.get(j) == Some(&b'*') {
        j + 1
    } else {
        scan_digits(bytes, j)
    }
}

fn parse_index(digits: &[u8]) -> usize {
    digits.iter().fold(0usize, |acc, d| {
        acc.saturating_mul(10).saturating_add(usize::from(d - b'0'))
    })
}

/// One matched placeholder. The span is atomic: rewriting always produces a
/// whole new span and never edits part of the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Specifier<'a> {
    text: &'a str,
    #[serde(skip)]
    body_offset: usize,
    pub parameter_index: Option<usize>,
    pub flag: Option<char>,
    pub width: Option<&'a str>,
    pub precision: Option<&'a str>,
    pub length: Option<&'a str>,
    pub conversion: char,
}

impl<'a> Specifier<'a> {
    /// The matched source text, including the leading `%`.
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Whether the specifier carries an explicit `N$` parameter index.
    pub fn is_numbered(&self) -> bool {
        self.parameter_index.is_some()
    }

    /// Renders the specifier with a different conversion character.
    pub fn with_conversion(&self, conversion: char) -> String {
        let prefix = &self.text[..self.text.len() - 1];
        format!("{}{}", prefix, conversion)
    }

    /// Renders the specifier with `index` as its parameter, replacing any
    /// existing `N$`.
    pub fn with_parameter(&self, index: usize) -> String {
        format!("%{}${}", index, &self.text[self.body_offset..])
    }
}

/// A piece of scanned input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Token<'a> {
    /// Text containing no `%`.
    Literal(&'a str),
    /// An already escaped `%%`.
    EscapedPercent,
    /// A `%` that starts neither an escape nor a specifier.
    BarePercent,
    Specifier(Specifier<'a>),
}

impl<'a> Token<'a> {
    /// The source text this token was scanned from.
    pub fn as_str(&self) -> &'a str {
        match self {
            Token::Literal(text) => text,
            Token::EscapedPercent => "%%",
            Token::BarePercent => "%",
            Token::Specifier(spec) => spec.as_str(),
        }
    }
}

/// Iterator over the [`Token`]s of a string. See [`tokenize`].
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    grammar: Grammar,
    pos: usize,
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let start = self.pos;
        let bytes = self.input.as_bytes();
        if start >= bytes.len() {
            return None;
        }

        if bytes[start] != b'%' {
            let end = self.input[start..]
                .find('%')
                .map_or(bytes.len(), |offset| start + offset);
            self.pos = end;
            return Some(Token::Literal(&self.input[start..end]));
        }

        if bytes.get(start + 1) == Some(&b'%') {
            self.pos = start + 2;
            return Some(Token::EscapedPercent);
        }

        match self.grammar.match_at(self.input, start) {
            Some(spec) => {
                self.pos = start + spec.as_str().len();
                Some(Token::Specifier(spec))
            }
            None => {
                self.pos = start + 1;
                Some(Token::BarePercent)
            }
        }
    }
}

/// Splits `input` into tokens under `grammar`.
///
/// Concatenating [`Token::as_str`] over the result reproduces `input` exactly.
///
/// # Example
///
/// ```rust
/// use placecodec::placeholder::{Grammar, Token, tokenize};
///
/// let tokens: Vec<_> = tokenize("50%% off %@", &Grammar::TWINE).collect();
/// assert_eq!(tokens[0], Token::Literal("50"));
/// assert_eq!(tokens[1], Token::EscapedPercent);
/// assert!(matches!(tokens[3], Token::Specifier(s) if s.conversion == '@'));
/// ```
pub fn tokenize<'a>(input: &'a str, grammar: &Grammar) -> Tokenizer<'a> {
    Tokenizer {
        input,
        grammar: *grammar,
        pos: 0,
    }
}

/// Counts the specifiers `grammar` recognises in `input`.
pub fn count_specifiers(input: &str, grammar: &Grammar) -> usize {
    tokenize(input, grammar)
        .filter(|token| matches!(token, Token::Specifier(_)))
        .count()
}
