//! Display colors for event titles.
//!
//! A color is either the platform's default foreground color, which is
//! resolved by the UI at render time, or a concrete RGBA value captured when
//! the event was saved. Both forms serialize to plain JSON:
//!
//! ```json
//! {"useDefault": true}
//! {"red": 255, "green": 0, "blue": 0, "alpha": 255}
//! ```
//!
//! Components are integers in `0..=255`. Any other payload, fractional
//! components included, fails to decode.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CountdownError, CountdownResult};

/// A concrete color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    pub const RED: Rgba = Rgba::opaque(255, 59, 48);
    pub const BLUE: Rgba = Rgba::opaque(0, 122, 255);

    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Rgba {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Rgba::new(red, green, blue, 255)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

/// The color an event title is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextColor {
    /// Platform default text color (theme dependent, resolved by the UI)
    #[default]
    Default,
    Rgba(Rgba),
}

impl TextColor {
    pub fn is_default(&self) -> bool {
        matches!(self, TextColor::Default)
    }

    /// Decode a stored color payload.
    ///
    /// Fails with `ColorDecode` when the payload is neither a default marker
    /// nor a complete set of in-range components.
    pub fn decode(value: &serde_json::Value) -> CountdownResult<Self> {
        let payload = ColorPayload::deserialize(value)
            .map_err(|e| CountdownError::ColorDecode(e.to_string()))?;

        match payload {
            ColorPayload::Default { use_default: true } => Ok(TextColor::Default),
            ColorPayload::Default { use_default: false } => Err(CountdownError::ColorDecode(
                "useDefault is false but no components were given".into(),
            )),
            ColorPayload::Rgba(rgba) => Ok(TextColor::Rgba(rgba)),
        }
    }
}

impl From<Rgba> for TextColor {
    fn from(rgba: Rgba) -> Self {
        TextColor::Rgba(rgba)
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TextColor::Default => write!(f, "default"),
            TextColor::Rgba(rgba) => write!(f, "{}", rgba),
        }
    }
}

/// Wire shape of a color.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ColorPayload {
    Rgba(Rgba),
    Default {
        #[serde(rename = "useDefault")]
        use_default: bool,
    },
}

impl Serialize for TextColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let payload = match self {
            TextColor::Default => ColorPayload::Default { use_default: true },
            TextColor::Rgba(rgba) => ColorPayload::Rgba(*rgba),
        };
        payload.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TextColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        TextColor::decode(&value).map_err(serde::de::Error::custom)
    }
}
