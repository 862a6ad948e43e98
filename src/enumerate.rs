//! Design enumeration.
//!
//! Builds the pool of atomic encodings for a variable set, seeds one design
//! per encoding, then grows every design of the previous round by every pool
//! member for [`COMBINATION_ROUNDS`] rounds. Nothing is filtered here; see
//! [`crate::validate`].
//!
//! With `|M|` pool encodings the candidate count is
//! `|M| + |M|^2 + ... + |M|^(R+1)`, so `R` is a compile-time constant.

use tracing::{debug, warn};

use crate::dataset::{ColumnKind, VariableClassifier};
use crate::design::Design;
use crate::encoding::Encoding;
use crate::error::Result;

/// Number of growth rounds after seeding. Caps designs at three encodings.
pub const COMBINATION_ROUNDS: usize = 2;

/// Requested variables split by classification, each in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariablePartition {
    /// Numeric-valued variables.
    pub quantitative: Vec<String>,
    /// Label-valued variables.
    pub categorical: Vec<String>,
    /// Variables the classifier could not place; they get no encodings.
    pub unknown: Vec<String>,
}

impl VariablePartition {
    /// Classify `variables`, failing on the first one that does not exist.
    ///
    /// Repeated names are classified once.
    pub fn classify<S, C>(variables: &[S], classifier: &C) -> Result<Self>
    where
        S: AsRef<str>,
        C: VariableClassifier + ?Sized,
    {
        let mut partition = Self::default();
        for v in variables {
            let v = v.as_ref();
            if partition.contains(v) {
                continue;
            }
            let bucket = match classifier.classify(v)? {
                ColumnKind::Quantitative => &mut partition.quantitative,
                ColumnKind::Categorical => &mut partition.categorical,
                ColumnKind::Unknown => {
                    warn!(variable = v, "variable is neither quantitative nor categorical");
                    &mut partition.unknown
                }
            };
            bucket.push(v.to_string());
        }
        Ok(partition)
    }

    fn contains(&self, v: &str) -> bool {
        [&self.quantitative, &self.categorical, &self.unknown]
            .iter()
            .any(|b| b.iter().any(|x| x == v))
    }
}

/// Generates every candidate design for a variable set.
#[derive(Debug, Clone)]
pub struct DesignEnumerator {
    pool: Vec<Encoding>,
}

impl DesignEnumerator {
    /// Classify `variables` and build the atomic encoding pool.
    ///
    /// The pool follows request order; each variable contributes the
    /// channels of its family in declaration order.
    pub fn new<S, C>(variables: &[S], classifier: &C) -> Result<Self>
    where
        S: AsRef<str>,
        C: VariableClassifier + ?Sized,
    {
        let partition = VariablePartition::classify(variables, classifier)?;
        let mut pool = Vec::new();
        for v in variables {
            let v = v.as_ref();
            let family = if partition.quantitative.iter().any(|q| q == v) {
                ColumnKind::Quantitative.family()
            } else if partition.categorical.iter().any(|c| c == v) {
                ColumnKind::Categorical.family()
            } else {
                None
            };
            let Some(family) = family else { continue };
            for &channel in family.channels() {
                let encoding = Encoding::new(v, channel);
                if !pool.contains(&encoding) {
                    pool.push(encoding);
                }
            }
        }
        debug!(
            quantitative = partition.quantitative.len(),
            categorical = partition.categorical.len(),
            pool = pool.len(),
            "built encoding pool"
        );
        Ok(Self { pool })
    }

    /// Create an enumerator over an explicit encoding pool.
    #[must_use]
    pub fn from_pool(pool: Vec<Encoding>) -> Self {
        Self { pool }
    }

    /// The atomic encoding pool.
    #[must_use]
    pub fn pool(&self) -> &[Encoding] {
        &self.pool
    }

    /// One single-encoding design per pool member.
    #[must_use]
    pub fn seeds(&self) -> Vec<Design> {
        self.pool.iter().cloned().map(Design::single).collect()
    }

    /// Seeds followed by every candidate of every growth round.
    #[must_use]
    pub fn enumerate(&self) -> Vec<Design> {
        let seeds = self.seeds();
        let mut all = seeds.clone();
        let mut frontier = seeds;

        for round in 1..=COMBINATION_ROUNDS {
            let next: Vec<Design> = frontier
                .iter()
                .flat_map(|d| self.pool.iter().map(move |m| d.add_encoding(m.clone())))
                .collect();
            debug!(round, candidates = next.len(), "combination round");
            all.extend_from_slice(&next);
            frontier = next;
        }

        all
    }
}

/// Enumerate every candidate design for `variables`.
pub fn enumerate<S, C>(variables: &[S], classifier: &C) -> Result<Vec<Design>>
where
    S: AsRef<str>,
    C: VariableClassifier + ?Sized,
{
    Ok(DesignEnumerator::new(variables, classifier)?.enumerate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;
    use crate::dataset::{GeoFrame, SchemaClassifier};
    use crate::error::Error;
    use crate::geometry::Point;

    fn wells() -> GeoFrame {
        let mut df = GeoFrame::new().with_geometry(vec![Point::ORIGIN; 2]);
        df.add_column_str("water_type", &["spring", "well"]);
        df.add_column_f32("water_quantity", &[1.0, 2.0]);
        df.add_column_str("notes", &[]);
        df
    }

    #[test]
    fn test_pool_and_seeds() {
        let df = wells();
        let e = DesignEnumerator::new(&["water_type", "water_quantity"], &SchemaClassifier(&df))
            .unwrap();
        assert_eq!(
            e.pool(),
            &[
                Encoding::new("water_type", Channel::ColorHueCategorical),
                Encoding::new("water_type", Channel::Shape),
                Encoding::new("water_quantity", Channel::Size),
                Encoding::new("water_quantity", Channel::ColorLightnessHigh),
                Encoding::new("water_quantity", Channel::ColorLightnessLow),
                Encoding::new("water_quantity", Channel::ColorHue),
            ]
        );
        assert_eq!(e.seeds().len(), 6);
    }

    #[test]
    fn test_enumerate_count() {
        let df = wells();
        let designs = enumerate(&["water_type", "water_quantity"], &SchemaClassifier(&df)).unwrap();
        assert_eq!(designs.len(), 6 + 36 + 216);
    }

    #[test]
    fn test_enumerate_bounds_design_size() {
        let df = wells();
        let designs = enumerate(&["water_type", "water_quantity"], &SchemaClassifier(&df)).unwrap();
        assert!(designs.iter().all(|d| (1..=COMBINATION_ROUNDS + 1).contains(&d.len())));
    }

    #[test]
    fn test_enumerate_deterministic() {
        let df = wells();
        let a = enumerate(&["water_quantity", "water_type"], &SchemaClassifier(&df)).unwrap();
        let b = enumerate(&["water_quantity", "water_type"], &SchemaClassifier(&df)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeds_come_first() {
        let df = wells();
        let e = DesignEnumerator::new(&["water_quantity"], &SchemaClassifier(&df)).unwrap();
        let designs = e.enumerate();
        assert_eq!(&designs[..4], e.seeds().as_slice());
    }

    #[test]
    fn test_invalid_variable() {
        let df = wells();
        let err = enumerate(&["water_type", "invalid_column"], &SchemaClassifier(&df)).unwrap_err();
        assert!(matches!(err, Error::InvalidVariable(ref v) if v == "invalid_column"));
    }

    #[test]
    fn test_unknown_kind_contributes_nothing() {
        let df = wells();
        let e = DesignEnumerator::new(&["notes"], &SchemaClassifier(&df)).unwrap();
        assert!(e.pool().is_empty());
        assert!(e.enumerate().is_empty());
    }

    #[test]
    fn test_repeated_variable_classified_once() {
        let df = wells();
        let p = VariablePartition::classify(
            &["water_type", "water_type", "notes"],
            &SchemaClassifier(&df),
        )
        .unwrap();
        assert_eq!(p.categorical, vec!["water_type".to_string()]);
        assert_eq!(p.unknown, vec!["notes".to_string()]);
        let e = DesignEnumerator::new(&["water_type", "water_type"], &SchemaClassifier(&df)).unwrap();
        assert_eq!(e.pool().len(), 2);
    }

    #[test]
    fn test_from_pool() {
        let e = DesignEnumerator::from_pool(vec![Encoding::new("a", Channel::Size)]);
        // Growing a single-encoding design by itself yields the same design.
        assert_eq!(e.enumerate().len(), 3);
        assert!(e.enumerate().iter().all(|d| d.len() == 1));
    }
}
