//! Bracket styles
//!
//! Both styles feed the same collapser and produce the same node model.

mod template;

pub use template::{template_nodes, template_round_count, TEMPLATE_SLOTS};

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "visualize")]
use serde::{Deserialize, Serialize};

use crate::{round_count, BracketError};

/// Supported bracket layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub enum BracketStyle {
    /// Doubling tree with third-place match
    #[default]
    SingleElimination,

    /// Table-driven 16-slot bracket that plays out every placement
    FixedSeededTemplate16,
}

impl BracketStyle {
    /// All styles
    pub const ALL: [BracketStyle; 2] = [
        BracketStyle::SingleElimination,
        BracketStyle::FixedSeededTemplate16,
    ];

    /// Canonical name, accepted by `FromStr`
    pub fn name(self) -> &'static str {
        match self {
            BracketStyle::SingleElimination => "single-elimination",
            BracketStyle::FixedSeededTemplate16 => "template16",
        }
    }

    /// Participant limit, if the style has one
    pub fn max_participants(self) -> Option<u32> {
        match self {
            BracketStyle::SingleElimination => None,
            BracketStyle::FixedSeededTemplate16 => Some(TEMPLATE_SLOTS),
        }
    }

    /// Rounds in the generated bracket (`None` for fewer than two players)
    pub fn round_count(self, num_players: u32) -> Option<u32> {
        match self {
            BracketStyle::SingleElimination => round_count(num_players),
            BracketStyle::FixedSeededTemplate16 => template_round_count(num_players),
        }
    }
}

impl fmt::Display for BracketStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BracketStyle {
    type Err = BracketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "single-elimination" | "single-elim" | "single" | "ko" => {
                Ok(BracketStyle::SingleElimination)
            }
            "template16" | "fixed-seeded-template16" | "ranking16" | "ranking1" => {
                Ok(BracketStyle::FixedSeededTemplate16)
            }
            _ => Err(BracketError::UnsupportedBracketStyle(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_names() {
        for style in BracketStyle::ALL {
            assert_eq!(style.name().parse::<BracketStyle>().unwrap(), style);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            "Single_Elimination".parse::<BracketStyle>().unwrap(),
            BracketStyle::SingleElimination
        );
        assert_eq!(
            " ranking16 ".parse::<BracketStyle>().unwrap(),
            BracketStyle::FixedSeededTemplate16
        );
    }

    #[test]
    fn test_unknown_style_is_rejected() {
        let err = "double-elimination".parse::<BracketStyle>().unwrap_err();
        assert!(matches!(err, BracketError::UnsupportedBracketStyle(ref name) if name == "double-elimination"));
        assert_eq!(
            err.to_string(),
            "unsupported bracket style: double-elimination"
        );
    }

    #[test]
    fn test_limits() {
        assert_eq!(BracketStyle::SingleElimination.max_participants(), None);
        assert_eq!(BracketStyle::FixedSeededTemplate16.max_participants(), Some(16));
        assert_eq!(BracketStyle::FixedSeededTemplate16.round_count(9), Some(5));
        assert_eq!(BracketStyle::SingleElimination.round_count(9), Some(4));
    }
}
