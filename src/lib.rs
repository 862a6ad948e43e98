//! # geovis-recommend
//!
//! Visual-encoding recommendations for geospatial point maps.
//!
//! Given the variables a user wants to see on a map, the crate enumerates
//! every combination of (variable, visual channel) assignments, drops the
//! combinations that fight over a variable, a channel or the marker color,
//! applies the user's constraints, and ranks what is left against optional
//! per-variable intents. Each resulting [`Design`](design::Design) reduces to
//! a flat parameter mapping for an external map renderer.
//!
//! ## Quick Start
//!
//! ```rust
//! use geovis_recommend::prelude::*;
//!
//! let mut wells = GeoFrame::new().with_geometry(vec![Point::new(-70.1, 42.3); 3]);
//! wells.add_column_str("water_type", &["spring", "well", "spring"]);
//! wells.add_column_f32("water_quantity", &[1.5, 3.0, 0.5]);
//!
//! let request = RecommendRequest::new(&["water_type", "water_quantity"])
//!     .intent("water_quantity", VariableIntent::PreferHigh);
//! let designs = recommend(&wells, &request)?;
//!
//! assert!(designs[0].describe().contains("score"));
//! # Ok::<(), geovis_recommend::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. [`enumerate`]: atomic encoding pool, seeds, two growth rounds
//! 2. [`validate`]: value dedup and pairwise conflict check
//! 3. [`filter`]: required-variable constraint
//! 4. [`rank`]: intent-aware scores, stable descending sort
//! 5. [`render`]: render plan and split passes for the collaborator
//!
//! The [`overplot`] module is an unrelated diagnostic that measures marker
//! crowding on an already projected point set.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Visual channels and per-variable intents.
pub mod channel;

/// Atomic encodings and rendering parameters.
pub mod encoding;

/// Designs: canonical sets of encodings.
pub mod design;

/// Dataset schema access and classification.
pub mod dataset;

/// Geometric primitives (points, rectangles).
pub mod geometry;

// ============================================================================
// Pipeline Modules
// ============================================================================

/// Candidate design enumeration.
pub mod enumerate;

/// Design validation and deduplication.
pub mod validate;

/// Required-variable filtering.
pub mod filter;

/// Intent-aware ranking.
pub mod rank;

/// Render plans for the map rendering collaborator.
pub mod render;

/// End-to-end recommendation pipeline.
pub mod recommend;

// ============================================================================
// Support Modules
// ============================================================================

/// YAML configuration.
pub mod config;

/// Marker crowding diagnostic.
pub mod overplot;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for recommendation operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use geovis_recommend::prelude::*;
/// ```
pub mod prelude {
    pub use crate::channel::{Channel, ChannelFamily, VariableIntent};
    pub use crate::config::RecommenderConfig;
    pub use crate::dataset::{
        ColumnKind, DataValue, DatasetSchema, GeoFrame, SchemaClassifier, VariableClassifier,
    };
    pub use crate::design::Design;
    pub use crate::encoding::{Encoding, IntentMap, ParamKey, ParamValue, RenderParams};
    pub use crate::enumerate::{enumerate, DesignEnumerator, COMBINATION_ROUNDS};
    pub use crate::error::{Error, Result};
    pub use crate::filter::filter_by_required_variables;
    pub use crate::geometry::{Point, Rect};
    pub use crate::overplot::{occupancy_grid, rescale_to_figure, FigureSize, OccupancyGrid};
    pub use crate::rank::{rank, rank_scored, ScoredDesign};
    pub use crate::recommend::{recommend, recommend_and_render, RecommendRequest, Recommendation};
    pub use crate::render::{MapRenderer, RenderPass, RenderPlan, SplitBy};
    pub use crate::validate::{filter_valid, is_valid};
}
