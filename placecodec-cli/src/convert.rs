use placecodec::{BatchReport, Direction, ErrorPolicy, convert_entries};
use std::collections::HashMap;
use std::error::Error as _;
use std::fs;
use std::io::{self, Read};
use tracing::{debug, info};

/// How values are laid out in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum InputFormat {
    /// One value per line. Line endings (`\n` or `\r\n`) are kept; a line
    /// dropped by [`ErrorPolicy::Skip`] is left out of the output entirely.
    #[default]
    Lines,
    /// A JSON object mapping keys to string values:
    ///
    /// ```json
    /// {
    ///     "greeting": "Hello %@!",
    ///     "progress": "%d of %d done"
    /// }
    /// ```
    ///
    /// Output keys keep the input order.
    Json,
}

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub direction: Direction,
    pub input: Option<String>,
    pub output: Option<String>,
    pub value: Option<String>,
    pub format: InputFormat,
    pub on_error: ErrorPolicy,
}

impl ConvertOptions {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            input: None,
            output: None,
            value: None,
            format: InputFormat::default(),
            on_error: ErrorPolicy::default(),
        }
    }
}

pub fn run_convert_command(options: ConvertOptions) -> Result<(), String> {
    let (rendered, report) = match &options.value {
        Some(value) => convert_value(value, options.direction, options.on_error)?,
        None => {
            let content = read_input(options.input.as_deref())?;
            debug!(bytes = content.len(), format = ?options.format, "read input");
            convert_content(&content, options.format, options.direction, options.on_error)?
        }
    };

    match &options.output {
        Some(path) => fs::write(path, &rendered)
            .map_err(|e| format!("Error writing output '{}': {}", path, e))?,
        None => print!("{}", rendered),
    }

    info!(
        converted = report.converted.len(),
        failed = report.failed.len(),
        direction = %options.direction,
        "conversion finished"
    );
    if !report.failed.is_empty() {
        let verb = match options.on_error {
            ErrorPolicy::Keep => "kept unconverted",
            _ => "skipped",
        };
        eprintln!(
            "⚠️  {} value(s) {}: {}",
            report.failed.len(),
            verb,
            report.failed.join(", ")
        );
    }
    if let Some(path) = &options.output {
        eprintln!(
            "✅ Converted {} value(s) ({}) to {}",
            report.converted.len(),
            options.direction,
            path
        );
    }
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String, String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).map_err(|e| format!("Error reading input '{}': {}", path, e))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("Error reading stdin: {}", e))?;
            Ok(buffer)
        }
    }
}

/// Converts one value as a whole, newlines included. The output ends with a
/// newline unless the value was skipped.
pub fn convert_value(
    value: &str,
    direction: Direction,
    policy: ErrorPolicy,
) -> Result<(String, BatchReport), String> {
    let report =
        convert_entries([("value", value)], direction, policy).map_err(|e| error_chain(&e))?;
    let mut rendered = String::new();
    for (_, converted) in &report.converted {
        rendered.push_str(converted);
        rendered.push('\n');
    }
    Ok((rendered, report))
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

fn line_key(index: usize) -> String {
    format!("line {}", index + 1)
}

/// Converts every value in `content` and renders the result in the same
/// layout. Line keys are `line N`, counted from 1.
pub fn convert_content(
    content: &str,
    format: InputFormat,
    direction: Direction,
    policy: ErrorPolicy,
) -> Result<(String, BatchReport), String> {
    match format {
        InputFormat::Lines => {
            let lines: Vec<(&str, &str)> =
                content.split_inclusive('\n').map(split_line_ending).collect();
            let entries = lines
                .iter()
                .enumerate()
                .map(|(i, (body, _))| (line_key(i), *body));
            let report =
                convert_entries(entries, direction, policy).map_err(|e| error_chain(&e))?;

            let converted: HashMap<&str, &str> = report
                .converted
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str()))
                .collect();
            let mut rendered = String::with_capacity(content.len());
            for (i, (_, ending)) in lines.iter().enumerate() {
                if let Some(value) = converted.get(line_key(i).as_str()) {
                    rendered.push_str(value);
                    rendered.push_str(ending);
                }
            }
            Ok((rendered, report))
        }
        InputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)
                .map_err(|e| format!("Error parsing JSON input: {}", e))?;
            let mut entries = Vec::with_capacity(map.len());
            for (key, value) in &map {
                match value.as_str() {
                    Some(s) => entries.push((key.clone(), s)),
                    None => return Err(format!("Value for key '{}' is not a string", key)),
                }
            }
            let report =
                convert_entries(entries, direction, policy).map_err(|e| error_chain(&e))?;
            let object: serde_json::Map<String, serde_json::Value> = report
                .converted
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect();
            let mut rendered = serde_json::to_string_pretty(&object)
                .map_err(|e| format!("Error serializing JSON output: {}", e))?;
            rendered.push('\n');
            Ok((rendered, report))
        }
    }
}

fn error_chain(error: &placecodec::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
