//! Design validation.
//!
//! A design is valid when no two encodings share a variable, no two share a
//! channel, and at most one occupies a color channel.

use std::collections::HashSet;

use tracing::debug;

use crate::design::Design;
use crate::encoding::Encoding;

/// Why two encodings cannot appear in the same design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// Both encode the same variable.
    SharedVariable,
    /// Both use the same channel.
    SharedChannel,
    /// Both use a color channel.
    TwoColors,
}

/// First conflict between two encodings, if any.
#[must_use]
pub fn conflict(a: &Encoding, b: &Encoding) -> Option<Conflict> {
    if a.variable() == b.variable() {
        Some(Conflict::SharedVariable)
    } else if a.channel() == b.channel() {
        Some(Conflict::SharedChannel)
    } else if a.channel().is_color() && b.channel().is_color() {
        Some(Conflict::TwoColors)
    } else {
        None
    }
}

/// Whether every pair of encodings in `design` is conflict-free.
///
/// Designs with fewer than two encodings are trivially valid.
#[must_use]
pub fn is_valid(design: &Design) -> bool {
    let encodings = design.encodings();
    encodings.iter().enumerate().all(|(i, a)| {
        encodings[i + 1..]
            .iter()
            .all(|b| conflict(a, b).is_none())
    })
}

/// Remove repeated designs, keeping the first occurrence of each.
#[must_use]
pub fn dedup(designs: &[Design]) -> Vec<Design> {
    let mut seen: HashSet<&Design> = HashSet::with_capacity(designs.len());
    designs
        .iter()
        .filter(|d| seen.insert(*d))
        .cloned()
        .collect()
}

/// Deduplicate, then drop every invalid design. Order is preserved.
#[must_use]
pub fn filter_valid(designs: &[Design]) -> Vec<Design> {
    let unique = dedup(designs);
    let unique_count = unique.len();
    let valid: Vec<Design> = unique.into_iter().filter(is_valid).collect();
    debug!(
        input = designs.len(),
        unique = unique_count,
        valid = valid.len(),
        "validated designs"
    );
    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;

    fn d(encs: &[(&str, Channel)]) -> Design {
        encs.iter().map(|&(v, c)| Encoding::new(v, c)).collect()
    }

    #[test]
    fn test_single_and_empty_valid() {
        assert!(is_valid(&Design::new()));
        assert!(is_valid(&d(&[("a", Channel::ColorHue)])));
    }

    #[test]
    fn test_categorical_hue_with_size_valid() {
        let design = d(&[
            ("water_type", Channel::ColorHueCategorical),
            ("water_quantity", Channel::Size),
        ]);
        assert!(is_valid(&design));
    }

    #[test]
    fn test_two_colors_invalid() {
        let design = d(&[
            ("water_type", Channel::ColorHueCategorical),
            ("water_quantity", Channel::ColorHue),
        ]);
        assert!(!is_valid(&design));
        assert!(filter_valid(&[design]).is_empty());
    }

    #[test]
    fn test_shared_variable_invalid() {
        let design = d(&[("a", Channel::Size), ("a", Channel::ColorHue)]);
        assert!(!is_valid(&design));
    }

    #[test]
    fn test_shared_channel_invalid() {
        let design = d(&[("a", Channel::Size), ("b", Channel::Size)]);
        assert!(!is_valid(&design));
    }

    #[test]
    fn test_conflict_kinds() {
        let size_a = Encoding::new("a", Channel::Size);
        assert_eq!(
            conflict(&size_a, &Encoding::new("a", Channel::Shape)),
            Some(Conflict::SharedVariable)
        );
        assert_eq!(
            conflict(&size_a, &Encoding::new("b", Channel::Size)),
            Some(Conflict::SharedChannel)
        );
        assert_eq!(
            conflict(
                &Encoding::new("a", Channel::ColorLightnessLow),
                &Encoding::new("b", Channel::ColorHueCategorical)
            ),
            Some(Conflict::TwoColors)
        );
        assert_eq!(conflict(&size_a, &Encoding::new("b", Channel::Shape)), None);
    }

    #[test]
    fn test_three_encoding_design() {
        let design = d(&[
            ("kind", Channel::Shape),
            ("depth", Channel::Size),
            ("flow", Channel::ColorLightnessHigh),
        ]);
        assert!(is_valid(&design));
    }

    #[test]
    fn test_dedup_keeps_first_seen() {
        let d1 = d(&[("b", Channel::Shape), ("a", Channel::Size)]);
        let d1_reordered = d(&[("a", Channel::Size), ("b", Channel::Shape)]);
        let d2 = d(&[("a", Channel::ColorHue)]);
        assert_eq!(dedup(&[d1.clone(), d2.clone(), d1_reordered]), vec![d1, d2]);
    }
}
