//! CLI library for testing purposes

pub mod convert;
pub mod inspect;
pub mod logging;

pub use convert::{
    ConvertOptions, InputFormat, convert_content, convert_value, run_convert_command,
};
pub use inspect::{Convention, inspect_json, render_inspect};
