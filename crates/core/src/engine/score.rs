//! Per-drug working scores.

use std::collections::BTreeMap;

use crate::reference::BaselineTiers;
use crate::DrugCode;

/// Working score of a drug. Lower is better and values outside `1..=4` are legal while rules
/// are being applied.
pub type Score = i64;

/// Mapping from candidate drug to its current score.
///
/// Built fresh for every request by [`build_score_map`] and mutated in place by the modifier
/// rule engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreMap(BTreeMap<DrugCode, Score>);

impl ScoreMap {
    pub fn get(&self, drug: &DrugCode) -> Option<Score> {
        self.0.get(drug).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, drug: &DrugCode) -> bool {
        self.0.contains_key(drug)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DrugCode, Score)> {
        self.0.iter().map(|(drug, score)| (drug, *score))
    }

    pub fn drugs(&self) -> impl Iterator<Item = &DrugCode> {
        self.0.keys()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&DrugCode, &mut Score)> {
        self.0.iter_mut()
    }

    /// Drop every drug for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&DrugCode) -> bool) {
        self.0.retain(|drug, _| keep(drug));
    }
}

impl FromIterator<(DrugCode, Score)> for ScoreMap {
    fn from_iter<I: IntoIterator<Item = (DrugCode, Score)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Assign every baseline drug its tier number as initial score.
///
/// Tiers are visited in ascending order. A drug listed under more than one tier is a data
/// defect; the first (best) tier wins and later listings are ignored.
pub fn build_score_map(tiers: &BaselineTiers) -> ScoreMap {
    let mut scores = BTreeMap::new();
    for (&tier, drugs) in tiers {
        for drug in drugs {
            if let Some(&kept) = scores.get(drug) {
                tracing::warn!(
                    "{} listed in tier {} and tier {}; keeping tier {}",
                    drug,
                    kept,
                    tier,
                    kept
                );
                continue;
            }
            scores.insert(drug.clone(), Score::from(tier));
        }
    }

    let scores = ScoreMap(scores);
    tracing::debug!("score map: {:?}", scores);
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(names: &[&str]) -> Vec<DrugCode> {
        names.iter().map(|n| DrugCode::new(n).unwrap()).collect()
    }

    #[test]
    fn assigns_tier_number_as_score() {
        let tiers = BaselineTiers::from([
            (1, codes(&["VPA"])),
            (2, codes(&["LTG", "LEV"])),
            (3, codes(&["TPM", "ZNS", "CLB", "CLN"])),
        ]);

        let scores = build_score_map(&tiers);
        assert_eq!(scores.len(), 7);
        assert_eq!(scores.get(&DrugCode::new("VPA").unwrap()), Some(1));
        assert_eq!(scores.get(&DrugCode::new("LEV").unwrap()), Some(2));
        assert_eq!(scores.get(&DrugCode::new("CLN").unwrap()), Some(3));
    }

    #[test]
    fn duplicate_listing_keeps_first_tier() {
        let tiers = BaselineTiers::from([
            (1, codes(&["LEV"])),
            (2, codes(&["LTG"])),
            (3, codes(&["LEV", "LTG"])),
        ]);

        let scores = build_score_map(&tiers);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores.get(&DrugCode::new("LEV").unwrap()), Some(1));
        assert_eq!(scores.get(&DrugCode::new("LTG").unwrap()), Some(2));
    }

    #[test]
    fn empty_tiers_give_empty_map() {
        assert!(build_score_map(&BaselineTiers::new()).is_empty());
    }

    #[test]
    fn retain_drops_unwanted_drugs() {
        let mut scores = build_score_map(&BaselineTiers::from([(1, codes(&["VPA", "LEV"]))]));
        scores.retain(|drug| drug.as_str() != "VPA");
        let remaining: Vec<&str> = scores.drugs().map(DrugCode::as_str).collect();
        assert_eq!(remaining, ["LEV"]);
    }
}
