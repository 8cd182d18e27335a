#![forbid(unsafe_code)]
//! Format placeholder conversion for localization pipelines.
//!
//! Rewrites the placeholders of an already extracted string value between:
//!
//! - **Twine**: printf specifiers with `%@` for strings (iOS style)
//! - **Android**: printf specifiers with `%s`, escaped `%%`, and positional
//!   `%1$s` indices when a value has several placeholders
//! - **Flash**: positional `{0}`, `{1}`, ... tokens
//!
//! # Quick Start
//!
//! ```rust
//! use placecodec::{Direction, convert, twine_to_android, twine_to_flash};
//!
//! assert_eq!(twine_to_android("%.0f%@ (apparent: %.0f)")?, "%1$.0f%2$s (apparent: %3$.0f)");
//! assert_eq!(twine_to_flash("%@ likes %@"), "{0} likes {1}");
//! assert_eq!(convert("hello %s", Direction::FromAndroid)?, "hello %@");
//! # Ok::<(), placecodec::Error>(())
//! ```
//!
//! All functions are pure and hold no shared mutable state, so they can be
//! called from any number of threads.

pub mod converter;
pub mod direction;
pub mod error;
pub mod placeholder;

// Re-export most used types for easy consumption
pub use crate::{
    converter::{
        BatchReport, ErrorPolicy, android_to_twine, convert, convert_entries, flash_to_twine,
        printf_to_twine, twine_to_android, twine_to_flash, twine_to_printf,
    },
    direction::Direction,
    error::Error,
    placeholder::{Grammar, Specifier, Token, count_specifiers, tokenize},
};
