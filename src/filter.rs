//! User constraints on design sets.

use tracing::debug;

use crate::design::Design;

/// Keep the designs that reference every variable in `required`.
///
/// An absent or empty `required` list returns the input unchanged.
#[must_use]
pub fn filter_by_required_variables<S: AsRef<str>>(
    designs: Vec<Design>,
    required: Option<&[S]>,
) -> Vec<Design> {
    let Some(required) = required.filter(|r| !r.is_empty()) else {
        return designs;
    };
    let before = designs.len();
    let kept: Vec<Design> = designs
        .into_iter()
        .filter(|d| required.iter().all(|v| d.references(v.as_ref())))
        .collect();
    debug!(
        required = required.len(),
        before,
        kept = kept.len(),
        "filtered by required variables"
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;
    use crate::encoding::Encoding;

    fn designs() -> Vec<Design> {
        vec![
            Design::single(Encoding::new("water_type", Channel::Shape)),
            Design::single(Encoding::new("water_quantity", Channel::Size)),
            Design::single(Encoding::new("water_type", Channel::ColorHueCategorical)),
            Design::from_encodings([
                Encoding::new("water_type", Channel::Shape),
                Encoding::new("water_quantity", Channel::ColorHue),
            ]),
        ]
    }

    #[test]
    fn test_absent_is_identity() {
        assert_eq!(filter_by_required_variables::<&str>(designs(), None), designs());
    }

    #[test]
    fn test_empty_is_identity() {
        let none: &[&str] = &[];
        assert_eq!(filter_by_required_variables(designs(), Some(none)), designs());
    }

    #[test]
    fn test_keeps_designs_referencing_required() {
        let out = filter_by_required_variables(designs(), Some(&["water_quantity"][..]));
        let all = designs();
        assert_eq!(out, vec![all[1].clone(), all[3].clone()]);
    }

    #[test]
    fn test_superset_required() {
        let out =
            filter_by_required_variables(designs(), Some(&["water_quantity", "water_type"][..]));
        assert_eq!(out, vec![designs()[3].clone()]);
    }

    #[test]
    fn test_unknown_required_variable_empties() {
        let out = filter_by_required_variables(designs(), Some(&["depth".to_string()][..]));
        assert!(out.is_empty());
    }
}
