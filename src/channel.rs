//! Visual channels and per-variable intents.
//!
//! A [`Channel`] is the visual property a variable is mapped onto. Channels
//! come in two families: quantitative channels apply only to numeric
//! columns, categorical channels only to label columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Which kind of variable a channel can encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelFamily {
    /// Numeric-valued variables.
    Quantitative,
    /// Label-valued variables.
    Categorical,
}

impl ChannelFamily {
    /// Channels of this family, in enumeration order.
    #[must_use]
    pub fn channels(self) -> &'static [Channel] {
        match self {
            ChannelFamily::Quantitative => &Channel::QUANTITATIVE,
            ChannelFamily::Categorical => &Channel::CATEGORICAL,
        }
    }
}

/// A visual encoding kind.
///
/// The declaration order is the canonical order used when sorting encodings
/// that share a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    /// Marker area scaled by value.
    Size,
    /// Sequential colormap, dark for high values.
    ColorLightnessHigh,
    /// Sequential colormap, dark for low values.
    ColorLightnessLow,
    /// Continuous hue.
    ColorHue,
    /// Qualitative hue, one color per label.
    ColorHueCategorical,
    /// Marker shape, one glyph per label.
    Shape,
}

impl Channel {
    /// Quantitative channels in enumeration order.
    pub const QUANTITATIVE: [Channel; 4] = [
        Channel::Size,
        Channel::ColorLightnessHigh,
        Channel::ColorLightnessLow,
        Channel::ColorHue,
    ];

    /// Categorical channels in enumeration order.
    pub const CATEGORICAL: [Channel; 2] = [Channel::ColorHueCategorical, Channel::Shape];

    /// All channels.
    pub const ALL: [Channel; 6] = [
        Channel::Size,
        Channel::ColorLightnessHigh,
        Channel::ColorLightnessLow,
        Channel::ColorHue,
        Channel::ColorHueCategorical,
        Channel::Shape,
    ];

    /// The family of variables this channel applies to.
    #[must_use]
    pub const fn family(self) -> ChannelFamily {
        match self {
            Channel::Size
            | Channel::ColorLightnessHigh
            | Channel::ColorLightnessLow
            | Channel::ColorHue => ChannelFamily::Quantitative,
            Channel::ColorHueCategorical | Channel::Shape => ChannelFamily::Categorical,
        }
    }

    /// Whether this channel consumes the marker color.
    ///
    /// At most one color channel may appear in a valid design.
    #[must_use]
    pub const fn is_color(self) -> bool {
        match self {
            Channel::ColorHue
            | Channel::ColorLightnessHigh
            | Channel::ColorLightnessLow
            | Channel::ColorHueCategorical => true,
            Channel::Size | Channel::Shape => false,
        }
    }

    /// Score of this channel when no intent applies.
    #[must_use]
    pub const fn base_score(self) -> i32 {
        match self {
            Channel::Size | Channel::Shape => 5,
            Channel::ColorHue => 4,
            Channel::ColorLightnessHigh | Channel::ColorLightnessLow => 3,
            Channel::ColorHueCategorical => 10,
        }
    }

    /// Whether this channel emphasizes what `intent` asks for.
    #[must_use]
    pub const fn satisfies(self, intent: VariableIntent) -> bool {
        matches!(
            (self, intent),
            (Channel::ColorLightnessHigh, VariableIntent::PreferHigh)
                | (Channel::ColorLightnessLow, VariableIntent::PreferLow)
                | (Channel::Size, VariableIntent::PreferMagnitude)
        )
    }

    /// Upper-case name, e.g. `COLOR_HUE`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Channel::Size => "SIZE",
            Channel::ColorLightnessHigh => "COLOR_LIGHTNESS_HIGH",
            Channel::ColorLightnessLow => "COLOR_LIGHTNESS_LOW",
            Channel::ColorHue => "COLOR_HUE",
            Channel::ColorHueCategorical => "COLOR_HUE_CATEGORICAL",
            Channel::Shape => "SHAPE",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidEncodingOperand(format!("unknown channel '{s}'")))
    }
}

/// How a caller wants a variable's extremes emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableIntent {
    /// High values should stand out.
    PreferHigh,
    /// Low values should stand out.
    PreferLow,
    /// Overall magnitude should be readable.
    PreferMagnitude,
}

impl VariableIntent {
    /// Upper-case name, e.g. `PREFER_HIGH`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            VariableIntent::PreferHigh => "PREFER_HIGH",
            VariableIntent::PreferLow => "PREFER_LOW",
            VariableIntent::PreferMagnitude => "PREFER_MAGNITUDE",
        }
    }
}

impl fmt::Display for VariableIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariableIntent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [
            VariableIntent::PreferHigh,
            VariableIntent::PreferLow,
            VariableIntent::PreferMagnitude,
        ]
        .into_iter()
        .find(|i| i.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| Error::InvalidEncodingOperand(format!("unknown intent '{s}'")))
    }
}
