//! Hand-off to the map rendering collaborator.
//!
//! A design becomes a [`RenderPlan`]: one flat parameter mapping plus an
//! optional [`SplitBy`] directive when a shape encoding is present. The plan
//! expands into [`RenderPass`]es, each a single call to the collaborator.

use crate::channel::Channel;
use crate::dataset::GeoFrame;
use crate::design::Design;
use crate::encoding::{ParamKey, ParamValue, RenderParams};

/// Marker glyphs assigned to split values, cycled when exhausted.
pub const MARKERS: [&str; 8] = ["o", "D", "^", "P", "s", "X", "v", "d"];

/// Marker size used for split passes when no size encoding is present.
const SPLIT_MARKER_SIZE: f32 = 10.0;

/// Render one pass per distinct value of a categorical column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitBy {
    /// Column whose values select the pass.
    pub variable: String,
}

impl SplitBy {
    /// Marker glyph for the `index`-th distinct value.
    #[must_use]
    pub fn marker(index: usize) -> &'static str {
        MARKERS[index % MARKERS.len()]
    }
}

/// Row selection for one pass: rows where `column` equals `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    /// Column to compare.
    pub column: String,
    /// Label to match.
    pub value: String,
}

/// A single rendering call.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPass {
    /// Style parameters for this call.
    pub params: RenderParams,
    /// Rows to draw; `None` draws every row.
    pub rows: Option<RowFilter>,
}

/// Everything the collaborator needs to draw a design.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    /// Flat style parameters.
    pub params: RenderParams,
    /// Split directive, present iff the design has a shape encoding.
    pub split: Option<SplitBy>,
    /// Column whose extent normalises color across split passes.
    pub normalize_by: Option<String>,
    /// Column whose extent fixes the size scale across split passes.
    pub size_by: Option<String>,
}

impl RenderPlan {
    /// Build the plan for `design`.
    #[must_use]
    pub fn from_design(design: &Design) -> Self {
        let merged = design.rendering_parameters();
        let split = design.encoding_for(Channel::Shape).map(|e| SplitBy {
            variable: e.variable().to_string(),
        });

        let mut params = if split.is_some() {
            let mut base = RenderParams::new()
                .with(ParamKey::EdgeColor, ParamValue::Text("white".to_string()))
                .with(ParamKey::LineWidth, ParamValue::Number(0.5));
            if !merged.contains_key(ParamKey::ScaleBy) {
                base.insert(ParamKey::MarkerSize, ParamValue::Number(SPLIT_MARKER_SIZE));
            }
            base.merge(&merged);
            base.remove(ParamKey::MarkerBy);
            base
        } else {
            merged
        };

        if params.contains_key(ParamKey::ScaleBy) {
            params.remove(ParamKey::MarkerSize);
        }
        if params.contains_key(ParamKey::Hue) {
            params.remove(ParamKey::FillColor);
        }

        let normalize_by = split
            .as_ref()
            .and(design.color_encoding())
            .map(|e| e.variable().to_string());
        let size_by = split
            .as_ref()
            .and(design.encoding_for(Channel::Size))
            .map(|e| e.variable().to_string());

        Self {
            params,
            split,
            normalize_by,
            size_by,
        }
    }

    /// Expand into rendering calls against `frame`.
    ///
    /// Without a split directive this is a single pass over every row. With
    /// one, each distinct value of the split column gets its own pass,
    /// marker and label; only the first pass keeps the legend. Color and size
    /// scales span the whole column, so equal values look alike in every pass.
    #[must_use]
    pub fn passes(&self, frame: &GeoFrame) -> Vec<RenderPass> {
        let Some(split) = &self.split else {
            return vec![RenderPass {
                params: self.params.clone(),
                rows: None,
            }];
        };

        let norm = self
            .normalize_by
            .as_deref()
            .and_then(|v| frame.numeric_extent(v));
        let size_domain = self
            .size_by
            .as_deref()
            .and_then(|v| frame.numeric_extent(v));

        frame
            .distinct_values(&split.variable)
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let mut params = self.params.clone();
                params.insert(ParamKey::Marker, ParamValue::Text(SplitBy::marker(i).to_string()));
                params.insert(ParamKey::Label, ParamValue::Text(value.clone()));
                if let Some((lo, hi)) = norm {
                    params.insert(ParamKey::Norm, ParamValue::Range(lo, hi));
                }
                if let Some((lo, hi)) = size_domain {
                    params.insert(ParamKey::SizeDomain, ParamValue::Range(lo, hi));
                }
                if i > 0 {
                    params.remove(ParamKey::Legend);
                    params.remove(ParamKey::LegendShrink);
                }
                RenderPass {
                    params,
                    rows: Some(RowFilter {
                        column: split.variable.clone(),
                        value,
                    }),
                }
            })
            .collect()
    }
}

/// The external map renderer (projection, basemap, marker drawing).
pub trait MapRenderer {
    /// Collaborator failure type.
    type Error: std::fmt::Display;

    /// Draw one map titled `title` from `passes`, in order.
    fn render(&mut self, title: &str, passes: &[RenderPass]) -> Result<(), Self::Error>;
}
