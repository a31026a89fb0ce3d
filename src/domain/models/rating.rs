//! Ratings and per-criterion scores.
//!
//! A rating is always in the closed range [1, 5]. `0` is never a valid
//! observed value and never used as a "no data" sentinel: absence is modeled
//! with `Option` in the context and with an explicit `unavailable` marker in
//! reports.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a raw score falls outside the 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rating {0} is outside the valid range 1-5")]
pub struct RatingOutOfRange(pub u8);

/// An effectiveness rating on the 1-5 scale.
///
/// Serde round-trips through `u8` and rejects out-of-range values, so a
/// model response claiming `"overall_score": 7` fails deserialization
/// instead of leaking an invalid rating into the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Raw value, guaranteed in [1, 5].
    pub fn get(self) -> u8 {
        self.0
    }

    /// Signed difference `self - earlier`, for initial-to-final deltas.
    pub fn delta_from(self, earlier: Rating) -> i8 {
        // Both operands are in [1, 5]; the subtraction cannot overflow i8.
        self.0 as i8 - earlier.0 as i8
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingOutOfRange(value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

/// A single criterion score with its model-supplied rationale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub score: Rating,
    pub rationale: String,
}

/// Per-criterion evaluation scores for a control description.
///
/// The five criteria are fixed by the evaluation prompt; modeling them as
/// named fields (rather than a free-form map) means a response missing a
/// criterion is rejected at deserialization time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricScores {
    /// How clearly the control is defined and communicated.
    pub clarity: CriterionScore,
    /// How well the control addresses the identified risk.
    pub appropriateness: CriterionScore,
    /// How efficiently the control can be implemented.
    pub efficiency: CriterionScore,
    /// How easily the control's effectiveness can be measured.
    pub measurability: CriterionScore,
    /// How sustainable the control is over time.
    pub sustainability: CriterionScore,
}

impl MetricScores {
    /// Criteria in prompt order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &CriterionScore)> {
        [
            ("clarity", &self.clarity),
            ("appropriateness", &self.appropriateness),
            ("efficiency", &self.efficiency),
            ("measurability", &self.measurability),
            ("sustainability", &self.sustainability),
        ]
        .into_iter()
    }

    /// Per-criterion rationales joined into a single narrative, one
    /// `criterion: rationale` line per criterion.
    pub fn joined_rationale(&self) -> String {
        self.iter()
            .map(|(name, criterion)| format!("{name}: {}", criterion.rationale))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(score: u8) -> CriterionScore {
        CriterionScore {
            score: Rating::try_from(score).unwrap(),
            rationale: format!("reason for {score}"),
        }
    }

    #[test]
    fn rating_accepts_bounds() {
        assert_eq!(Rating::try_from(1).unwrap().get(), 1);
        assert_eq!(Rating::try_from(5).unwrap().get(), 5);
    }

    #[test]
    fn rating_rejects_out_of_range() {
        assert_eq!(Rating::try_from(0), Err(RatingOutOfRange(0)));
        assert_eq!(Rating::try_from(6), Err(RatingOutOfRange(6)));
    }

    #[test]
    fn rating_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rating>("4").is_ok());
        assert!(serde_json::from_str::<Rating>("0").is_err());
        assert!(serde_json::from_str::<Rating>("7").is_err());
    }

    #[test]
    fn rating_delta_is_signed() {
        let initial = Rating::try_from(4).unwrap();
        let final_ = Rating::try_from(2).unwrap();
        assert_eq!(final_.delta_from(initial), -2);
        assert_eq!(initial.delta_from(final_), 2);
    }

    #[test]
    fn joined_rationale_has_one_line_per_criterion() {
        let scores = MetricScores {
            clarity: criterion(4),
            appropriateness: criterion(3),
            efficiency: criterion(5),
            measurability: criterion(2),
            sustainability: criterion(4),
        };
        let joined = scores.joined_rationale();
        assert_eq!(joined.lines().count(), 5);
        assert!(joined.starts_with("clarity: reason for 4"));
    }
}
