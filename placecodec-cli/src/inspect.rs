use placecodec::{Direction, Grammar, Token, convert, tokenize};
use serde::Serialize;

/// Which specifier grammar to scan a value with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Convention {
    /// Printf conversions plus `@`
    #[default]
    Twine,
    /// Plain printf conversions (Android)
    Printf,
}

impl Convention {
    fn grammar(&self) -> &'static Grammar {
        match self {
            Convention::Twine => &Grammar::TWINE,
            Convention::Printf => &Grammar::PRINTF,
        }
    }
}

#[derive(Serialize)]
struct Inspection<'a> {
    value: &'a str,
    tokens: Vec<Token<'a>>,
    conversions: Vec<ConversionPreview>,
}

#[derive(Serialize)]
struct ConversionPreview {
    direction: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn previews(value: &str) -> Vec<ConversionPreview> {
    Direction::ALL
        .into_iter()
        .map(|direction| match convert(value, direction) {
            Ok(output) => ConversionPreview {
                direction,
                output: Some(output),
                error: None,
            },
            Err(e) => ConversionPreview {
                direction,
                output: None,
                error: Some(e.to_string()),
            },
        })
        .collect()
}

/// Human-readable token listing for `value`.
pub fn render_inspect(value: &str, convention: Convention) -> String {
    let tokens: Vec<Token<'_>> = tokenize(value, convention.grammar()).collect();
    let specifiers: Vec<_> = tokens
        .iter()
        .filter_map(|t| match t {
            Token::Specifier(spec) => Some(spec),
            _ => None,
        })
        .collect();
    let numbered = specifiers.iter().filter(|s| s.is_numbered()).count();

    let mut out = String::new();
    out.push_str(&format!("Value: {}\n", value));
    out.push_str(&format!(
        "Specifiers: {} (numbered: {})\n",
        specifiers.len(),
        numbered
    ));
    out.push_str("Tokens:\n");
    for (i, token) in tokens.iter().enumerate() {
        let line = match token {
            Token::Literal(text) => format!("literal {:?}", text),
            Token::EscapedPercent => "escaped-percent \"%%\"".to_string(),
            Token::BarePercent => "bare-percent \"%\"".to_string(),
            Token::Specifier(spec) => {
                let mut line = format!("specifier {:?} type={}", spec.as_str(), spec.conversion);
                if let Some(index) = spec.parameter_index {
                    line.push_str(&format!(" parameter={}", index));
                }
                if let Some(flag) = spec.flag {
                    line.push_str(&format!(" flag={}", flag));
                }
                if let Some(width) = spec.width {
                    line.push_str(&format!(" width={}", width));
                }
                if let Some(precision) = spec.precision {
                    line.push_str(&format!(" precision={}", precision));
                }
                if let Some(length) = spec.length {
                    line.push_str(&format!(" length={}", length));
                }
                line
            }
        };
        out.push_str(&format!("  [{}] {}\n", i, line));
    }
    out.push_str("Conversions:\n");
    for preview in previews(value) {
        match (&preview.output, &preview.error) {
            (Some(output), _) => out.push_str(&format!("  {}: {}\n", preview.direction, output)),
            (None, Some(error)) => {
                out.push_str(&format!("  {}: error: {}\n", preview.direction, error))
            }
            (None, None) => {}
        }
    }
    out
}

/// JSON rendering of the same information as [`render_inspect`].
pub fn inspect_json(value: &str, convention: Convention) -> Result<String, String> {
    let inspection = Inspection {
        value,
        tokens: tokenize(value, convention.grammar()).collect(),
        conversions: previews(value),
    };
    serde_json::to_string_pretty(&inspection).map_err(|e| format!("Error serializing JSON: {}", e))
}
