//! Conversion directions supported by the converter.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::Serialize;

use crate::Error;

/// Which way a value is converted. Twine is always one side of the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Twine `%@` to Android `%s`, escaping and numbering as Android requires.
    ToAndroid,
    /// Android `%s` back to Twine `%@`.
    FromAndroid,
    /// Twine specifiers to Flash `{N}` tokens.
    ToFlash,
    /// Flash `{N}` tokens back to Twine `%@`.
    FromFlash,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::ToAndroid,
        Direction::FromAndroid,
        Direction::ToFlash,
        Direction::FromFlash,
    ];

    /// Whether converting in this direction can return an error.
    pub fn is_fallible(&self) -> bool {
        matches!(self, Direction::ToAndroid)
    }
}

/// Implements [`std::fmt::Display`] for [`Direction`].
///
/// # Example
/// ```rust
/// use placecodec::Direction;
/// assert_eq!(Direction::ToAndroid.to_string(), "to-android");
/// assert_eq!(Direction::FromFlash.to_string(), "from-flash");
/// ```
impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::ToAndroid => write!(f, "to-android"),
            Direction::FromAndroid => write!(f, "from-android"),
            Direction::ToFlash => write!(f, "to-flash"),
            Direction::FromFlash => write!(f, "from-flash"),
        }
    }
}

/// Implements [`std::str::FromStr`] for [`Direction`].
///
/// Accepts, case-insensitively and with `_` treated as `-`:
/// - `to-android`, `android-out`, `twine-to-android`
/// - `from-android`, `android-in`, `android-to-twine`
/// - `to-flash`, `flash-out`, `twine-to-flash`
/// - `from-flash`, `flash-in`, `flash-to-twine`
///
/// # Example
/// ```rust
/// use placecodec::Direction;
/// use std::str::FromStr;
/// assert_eq!(Direction::from_str("android-out").unwrap(), Direction::ToAndroid);
/// assert_eq!(Direction::from_str("Flash_In").unwrap(), Direction::FromFlash);
/// assert!(Direction::from_str("sideways").is_err());
/// ```
impl FromStr for Direction {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "to-android" | "android-out" | "twine-to-android" => Ok(Direction::ToAndroid),
            "from-android" | "android-in" | "android-to-twine" => Ok(Direction::FromAndroid),
            "to-flash" | "flash-out" | "twine-to-flash" => Ok(Direction::ToFlash),
            "from-flash" | "flash-in" | "flash-to-twine" => Ok(Direction::FromFlash),
            _ => Err(Error::UnknownDirection(s.to_string())),
        }
    }
}
