//! Final tier grouping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::{Score, ScoreMap};
use crate::DrugCode;

/// Named output tier, ordered best first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Preferred.
    #[serde(rename = "tier_1")]
    First,
    /// Alternative.
    #[serde(rename = "tier_2")]
    Second,
    /// Less preferred.
    #[serde(rename = "tier_3")]
    Third,
    /// Least desirable or contraindicated.
    #[serde(rename = "tier_4")]
    Fourth,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::First, Tier::Second, Tier::Third, Tier::Fourth];

    /// Bucket a final score: `<= 1` is tier 1 and `>= 4` is tier 4.
    pub fn from_score(score: Score) -> Self {
        match score {
            s if s <= 1 => Tier::First,
            2 => Tier::Second,
            3 => Tier::Third,
            _ => Tier::Fourth,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::First => "tier_1",
            Tier::Second => "tier_2",
            Tier::Third => "tier_3",
            Tier::Fourth => "tier_4",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Sparse mapping from tier to alphabetically sorted drug codes. Empty tiers are absent.
pub type TierGroups = BTreeMap<Tier, Vec<DrugCode>>;

/// Bucket every drug in `scores` into its tier.
pub fn group_by_tiers(scores: &ScoreMap) -> TierGroups {
    let mut groups = TierGroups::new();
    for (drug, score) in scores.iter() {
        groups
            .entry(Tier::from_score(score))
            .or_default()
            .push(drug.clone());
    }
    for drugs in groups.values_mut() {
        drugs.sort();
    }
    groups
}
