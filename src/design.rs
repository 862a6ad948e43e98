//! Designs: canonical sets of encodings rendered together on one map.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::channel::Channel;
use crate::encoding::{Encoding, IntentMap, RenderParams};
use crate::render::RenderPlan;

/// An immutable, canonical set of encodings.
///
/// Encodings are kept sorted by variable name (then channel) with duplicates
/// removed, so two designs built from the same encodings in any order compare
/// and hash equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Encoding>", into = "Vec<Encoding>")]
pub struct Design {
    encodings: Vec<Encoding>,
}

impl Design {
    /// Create an empty design.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a design holding a single encoding.
    #[must_use]
    pub fn single(encoding: Encoding) -> Self {
        Self {
            encodings: vec![encoding],
        }
    }

    /// Create a design from encodings in any order.
    pub fn from_encodings(encodings: impl IntoIterator<Item = Encoding>) -> Self {
        let mut encodings: Vec<Encoding> = encodings.into_iter().collect();
        encodings.sort();
        encodings.dedup();
        Self { encodings }
    }

    /// Return a new design extended by `encoding`. The receiver is unchanged.
    ///
    /// Adding an encoding the design already holds yields an equal design.
    #[must_use]
    pub fn add_encoding(&self, encoding: Encoding) -> Design {
        match self.encodings.binary_search(&encoding) {
            Ok(_) => self.clone(),
            Err(pos) => {
                let mut encodings = Vec::with_capacity(self.encodings.len() + 1);
                encodings.extend_from_slice(&self.encodings[..pos]);
                encodings.push(encoding);
                encodings.extend_from_slice(&self.encodings[pos..]);
                Design { encodings }
            }
        }
    }

    /// Encodings in canonical order.
    #[must_use]
    pub fn encodings(&self) -> &[Encoding] {
        &self.encodings
    }

    /// Number of encodings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.encodings.len()
    }

    /// Whether the design has no encodings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.encodings.is_empty()
    }

    /// Distinct variables referenced by this design.
    #[must_use]
    pub fn variables(&self) -> BTreeSet<&str> {
        self.encodings.iter().map(Encoding::variable).collect()
    }

    /// Whether any encoding references `variable`.
    #[must_use]
    pub fn references(&self, variable: &str) -> bool {
        self.encodings.iter().any(|e| e.variable() == variable)
    }

    /// Whether any encoding uses `channel`.
    #[must_use]
    pub fn has_channel(&self, channel: Channel) -> bool {
        self.encoding_for(channel).is_some()
    }

    /// First encoding using `channel`.
    #[must_use]
    pub fn encoding_for(&self, channel: Channel) -> Option<&Encoding> {
        self.encodings.iter().find(|e| e.channel() == channel)
    }

    /// The encoding occupying the color channel, if any.
    #[must_use]
    pub fn color_encoding(&self) -> Option<&Encoding> {
        self.encodings.iter().find(|e| e.channel().is_color())
    }

    /// Sum of encoding scores under `intents`.
    #[must_use]
    pub fn score(&self, intents: Option<&IntentMap>) -> i32 {
        self.encodings.iter().map(|e| e.score(intents)).sum()
    }

    /// Merged style parameters.
    ///
    /// Fragments are merged in encoding order; on key collision the later
    /// encoding wins. An empty design gets the unencoded point style.
    #[must_use]
    pub fn rendering_parameters(&self) -> RenderParams {
        if self.encodings.is_empty() {
            return RenderParams::unencoded();
        }
        let mut params = RenderParams::new();
        for e in &self.encodings {
            params.merge(&e.rendering_params());
        }
        params
    }

    /// Flat parameters plus split directive for the rendering collaborator.
    #[must_use]
    pub fn render_plan(&self) -> RenderPlan {
        RenderPlan::from_design(self)
    }

    /// Human-readable description, e.g. `[depth: SIZE, kind: SHAPE]`.
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Design {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, e) in self.encodings.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{e}")?;
        }
        f.write_str("]")
    }
}

impl From<Vec<Encoding>> for Design {
    fn from(encodings: Vec<Encoding>) -> Self {
        Self::from_encodings(encodings)
    }
}

impl From<Design> for Vec<Encoding> {
    fn from(design: Design) -> Self {
        design.encodings
    }
}

impl FromIterator<Encoding> for Design {
    fn from_iter<I: IntoIterator<Item = Encoding>>(iter: I) -> Self {
        Self::from_encodings(iter)
    }
}
