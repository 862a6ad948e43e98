//! The recommendation pipeline.
//!
//! variables → classify → enumerate → validate → required-variable filter →
//! rank (optional) → ordered recommendations.

use std::fmt;

use tracing::info;

use crate::channel::VariableIntent;
use crate::config::RecommenderConfig;
use crate::dataset::{DatasetSchema, GeoFrame, SchemaClassifier};
use crate::design::Design;
use crate::encoding::{IntentMap, RenderParams};
use crate::enumerate::DesignEnumerator;
use crate::error::{Error, Result};
use crate::filter::filter_by_required_variables;
use crate::rank::rank_scored;
use crate::render::{MapRenderer, RenderPlan};
use crate::validate::filter_valid;

/// What the caller wants visualized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendRequest {
    /// Variables to encode, in priority order.
    pub variables: Vec<String>,
    /// Variables every recommended design must reference.
    pub required_variables: Option<Vec<String>>,
    /// Per-variable intents used for scoring.
    pub intents: Option<IntentMap>,
    /// Whether to score and sort the designs.
    pub rank: bool,
}

impl RecommendRequest {
    /// Request designs for `variables`, ranked, with no constraints.
    #[must_use]
    pub fn new<S: AsRef<str>>(variables: &[S]) -> Self {
        Self {
            variables: variables.iter().map(|v| v.as_ref().to_string()).collect(),
            required_variables: None,
            intents: None,
            rank: true,
        }
    }

    /// Build a request from configured defaults.
    #[must_use]
    pub fn from_config<S: AsRef<str>>(variables: &[S], config: &RecommenderConfig) -> Self {
        let mut request = Self::new(variables).rank(config.rank);
        if !config.required_variables.is_empty() {
            request.required_variables = Some(config.required_variables.clone());
        }
        if !config.intents.is_empty() {
            request.intents = Some(config.intents.clone());
        }
        request
    }

    /// Require `variable` in every design.
    #[must_use]
    pub fn require(mut self, variable: &str) -> Self {
        self.required_variables
            .get_or_insert_with(Vec::new)
            .push(variable.to_string());
        self
    }

    /// Declare an intent for `variable`.
    #[must_use]
    pub fn intent(mut self, variable: &str, intent: VariableIntent) -> Self {
        self.intents
            .get_or_insert_with(IntentMap::new)
            .insert(variable.to_string(), intent);
        self
    }

    /// Toggle ranking.
    #[must_use]
    pub fn rank(mut self, rank: bool) -> Self {
        self.rank = rank;
        self
    }
}

/// One recommended design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    /// The design.
    pub design: Design,
    /// Score, present when the request was ranked.
    pub score: Option<i32>,
}

impl Recommendation {
    /// Merged style parameters of the design.
    #[must_use]
    pub fn rendering_parameters(&self) -> RenderParams {
        self.design.rendering_parameters()
    }

    /// Render plan of the design.
    #[must_use]
    pub fn render_plan(&self) -> RenderPlan {
        self.design.render_plan()
    }

    /// Encodings, plus the score when ranked.
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.score {
            Some(score) => write!(f, "{} (score {score})", self.design),
            None => write!(f, "{}", self.design),
        }
    }
}

/// Check that every variable exists and the dataset has geometry.
///
/// Missing variables are reported before missing geometry.
pub fn check_dataset<D: DatasetSchema + ?Sized, S: AsRef<str>>(
    dataset: &D,
    variables: &[S],
) -> Result<()> {
    if let Some(missing) = variables.iter().find(|v| !dataset.has_column(v.as_ref())) {
        return Err(Error::InvalidVariable(missing.as_ref().to_string()));
    }
    if !dataset.has_geometry() {
        return Err(Error::MissingGeometry);
    }
    Ok(())
}

/// Recommend designs for `request` over `dataset`.
pub fn recommend<D: DatasetSchema + ?Sized>(
    dataset: &D,
    request: &RecommendRequest,
) -> Result<Vec<Recommendation>> {
    check_dataset(dataset, &request.variables)?;

    let candidates =
        DesignEnumerator::new(&request.variables, &SchemaClassifier(dataset))?.enumerate();
    let candidate_count = candidates.len();
    let valid = filter_valid(&candidates);
    let kept = filter_by_required_variables(valid, request.required_variables.as_deref());

    let recommendations: Vec<Recommendation> = if request.rank {
        rank_scored(kept, request.intents.as_ref())
            .into_iter()
            .map(|s| Recommendation {
                design: s.design,
                score: Some(s.score),
            })
            .collect()
    } else {
        kept.into_iter()
            .map(|design| Recommendation {
                design,
                score: None,
            })
            .collect()
    };

    info!(
        variables = request.variables.len(),
        candidates = candidate_count,
        recommended = recommendations.len(),
        ranked = request.rank,
        "recommended designs"
    );
    Ok(recommendations)
}

/// Recommend designs and hand each one to `renderer`, in order.
pub fn recommend_and_render<R: MapRenderer>(
    frame: &GeoFrame,
    request: &RecommendRequest,
    renderer: &mut R,
) -> Result<Vec<Recommendation>> {
    let recommendations = recommend(frame, request)?;
    for rec in &recommendations {
        let passes = rec.render_plan().passes(frame);
        renderer
            .render(&rec.describe(), &passes)
            .map_err(|e| Error::Rendering(e.to_string()))?;
    }
    Ok(recommendations)
}
