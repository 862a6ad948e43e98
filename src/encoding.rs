//! Atomic (variable, channel) encodings and their rendering parameters.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::channel::{Channel, VariableIntent};
use crate::error::Result;

/// Caller-declared intent per variable name.
pub type IntentMap = BTreeMap<String, VariableIntent>;

/// Score awarded to an encoding whose channel matches the variable's intent.
pub const INTENT_MATCH_SCORE: i32 = 10;

/// Named colormaps understood by the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMap {
    /// Sequential blues, light to dark.
    Blues,
    /// Sequential blues, dark to light.
    BluesReversed,
    /// Ten-color qualitative palette.
    Tab10,
}

impl ColorMap {
    /// Colormap name as the plotting backend spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ColorMap::Blues => "Blues",
            ColorMap::BluesReversed => "Blues_r",
            ColorMap::Tab10 => "tab10",
        }
    }
}

/// Keys of the flat style mapping handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKey {
    /// Column whose values scale the marker area.
    ScaleBy,
    /// Marker area bounds.
    SizeRange,
    /// Column whose values drive marker color.
    Hue,
    /// Colormap for `Hue`.
    ColorMap,
    /// Marker outline color.
    EdgeColor,
    /// Marker outline width.
    LineWidth,
    /// Marker fill color.
    FillColor,
    /// Fixed marker size.
    MarkerSize,
    /// Marker opacity.
    Alpha,
    /// Draw a legend.
    Legend,
    /// Legend shrink factor.
    LegendShrink,
    /// Column whose labels select the marker glyph.
    MarkerBy,
    /// Marker glyph for one render pass.
    Marker,
    /// Legend label for one render pass.
    Label,
    /// Shared color normalisation range.
    Norm,
    /// Shared data domain mapped onto `SizeRange`.
    SizeDomain,
}

impl ParamKey {
    /// Snake-case key name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ParamKey::ScaleBy => "scale_by",
            ParamKey::SizeRange => "size_range",
            ParamKey::Hue => "hue",
            ParamKey::ColorMap => "color_map",
            ParamKey::EdgeColor => "edge_color",
            ParamKey::LineWidth => "line_width",
            ParamKey::FillColor => "fill_color",
            ParamKey::MarkerSize => "marker_size",
            ParamKey::Alpha => "alpha",
            ParamKey::Legend => "legend",
            ParamKey::LegendShrink => "legend_shrink",
            ParamKey::MarkerBy => "marker_by",
            ParamKey::Marker => "marker",
            ParamKey::Label => "label",
            ParamKey::Norm => "norm",
            ParamKey::SizeDomain => "size_domain",
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendering parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// A dataset column name.
    Column(String),
    /// A scalar.
    Number(f32),
    /// A closed numeric interval.
    Range(f32, f32),
    /// A named color or glyph.
    Text(String),
    /// A colormap.
    ColorMap(ColorMap),
    /// A flag.
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Column(c) => write!(f, "{c}"),
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Range(lo, hi) => write!(f, "({lo}, {hi})"),
            ParamValue::Text(t) => write!(f, "{t:?}"),
            ParamValue::ColorMap(m) => write!(f, "{:?}", m.as_str()),
            ParamValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Flat style mapping consumed by the rendering collaborator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderParams {
    entries: BTreeMap<ParamKey, ParamValue>,
}

impl RenderParams {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Style for points that carry no encoding: small, outlined, translucent.
    #[must_use]
    pub fn unencoded() -> Self {
        Self::new()
            .with(ParamKey::EdgeColor, ParamValue::Text("white".to_string()))
            .with(ParamKey::MarkerSize, ParamValue::Number(7.0))
            .with(ParamKey::Alpha, ParamValue::Number(0.8))
    }

    /// Parameters a channel applies when encoding `variable`.
    #[must_use]
    pub fn for_channel(channel: Channel, variable: &str) -> Self {
        let column = || ParamValue::Column(variable.to_string());
        let text = |s: &str| ParamValue::Text(s.to_string());

        match channel {
            Channel::Size => Self::new()
                .with(ParamKey::ScaleBy, column())
                .with(ParamKey::SizeRange, ParamValue::Range(4.0, 20.0))
                .with(ParamKey::EdgeColor, text("black"))
                .with(ParamKey::FillColor, text("white"))
                .with(ParamKey::Alpha, ParamValue::Number(0.7))
                .with(ParamKey::Legend, ParamValue::Bool(true)),
            Channel::ColorLightnessHigh | Channel::ColorLightnessLow => {
                let map = if channel == Channel::ColorLightnessHigh {
                    ColorMap::Blues
                } else {
                    ColorMap::BluesReversed
                };
                Self::sequential_hue(variable).with(ParamKey::ColorMap, ParamValue::ColorMap(map))
            }
            Channel::ColorHue => Self::sequential_hue(variable),
            Channel::ColorHueCategorical => Self::new()
                .with(ParamKey::Hue, column())
                .with(ParamKey::ColorMap, ParamValue::ColorMap(ColorMap::Tab10))
                .with(ParamKey::Legend, ParamValue::Bool(true)),
            Channel::Shape => Self::new().with(ParamKey::MarkerBy, column()),
        }
    }

    fn sequential_hue(variable: &str) -> Self {
        Self::new()
            .with(ParamKey::Hue, ParamValue::Column(variable.to_string()))
            .with(ParamKey::EdgeColor, ParamValue::Text("white".to_string()))
            .with(ParamKey::LineWidth, ParamValue::Number(0.5))
            .with(ParamKey::MarkerSize, ParamValue::Number(7.0))
            .with(ParamKey::Alpha, ParamValue::Number(0.8))
            .with(ParamKey::Legend, ParamValue::Bool(true))
            .with(ParamKey::LegendShrink, ParamValue::Number(0.5))
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: ParamKey, value: ParamValue) -> Self {
        self.entries.insert(key, value);
        self
    }

    /// Insert a parameter, returning the previous value.
    pub fn insert(&mut self, key: ParamKey, value: ParamValue) -> Option<ParamValue> {
        self.entries.insert(key, value)
    }

    /// Remove a parameter.
    pub fn remove(&mut self, key: ParamKey) -> Option<ParamValue> {
        self.entries.remove(&key)
    }

    /// Get a parameter.
    #[must_use]
    pub fn get(&self, key: ParamKey) -> Option<&ParamValue> {
        self.entries.get(&key)
    }

    /// Check if a parameter is set.
    #[must_use]
    pub fn contains_key(&self, key: ParamKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Merge another parameter set, with `other` taking precedence.
    pub fn merge(&mut self, other: &RenderParams) {
        for (k, v) in &other.entries {
            self.entries.insert(*k, v.clone());
        }
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate parameters in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, ParamKey, ParamValue> {
        self.entries.iter()
    }
}

impl fmt::Display for RenderParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        f.write_str("}")
    }
}

/// One variable mapped onto one channel.
///
/// Ordering is by variable name, then channel.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Encoding {
    variable: String,
    channel: Channel,
}

impl Encoding {
    /// Create a new encoding.
    #[must_use]
    pub fn new(variable: impl Into<String>, channel: Channel) -> Self {
        Self {
            variable: variable.into(),
            channel,
        }
    }

    /// Create an encoding from a channel name such as `"SIZE"`.
    pub fn parse(variable: impl Into<String>, channel: &str) -> Result<Self> {
        Ok(Self::new(variable, channel.parse()?))
    }

    /// The encoded variable.
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// The visual channel.
    #[must_use]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Style fragment this encoding contributes to a design.
    #[must_use]
    pub fn rendering_params(&self) -> RenderParams {
        RenderParams::for_channel(self.channel, &self.variable)
    }

    /// Intent-aware score.
    ///
    /// Returns [`INTENT_MATCH_SCORE`] when `intents` holds an intent for this
    /// variable that the channel satisfies, the channel's base score otherwise.
    #[must_use]
    pub fn score(&self, intents: Option<&IntentMap>) -> i32 {
        match intents.and_then(|m| m.get(&self.variable)) {
            Some(&intent) if self.channel.satisfies(intent) => INTENT_MATCH_SCORE,
            _ => self.channel.base_score(),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.variable, self.channel)
    }
}
