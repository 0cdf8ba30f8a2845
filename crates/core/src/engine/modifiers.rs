//! Patient modifier rule application.
//!
//! For each candidate drug, every rule whose modifier and seizure type are both present in
//! the request fires, in the order the rules are listed for that drug. Firing rules move the
//! score by their step count and raise a per-drug floor to their `max`. Once all rules have
//! been visited the score is clamped to that floor: `score = max(score, floor)`.
//!
//! There is no upper bound: a drug may end beyond tier 4, and tier grouping folds it into
//! tier 4. Intermediate scores may also dip below 1; only the final floor clamp lifts them.

use std::collections::BTreeSet;

use crate::constants::BEST_TIER;
use crate::engine::{Score, ScoreMap};
use crate::reference::RuleTable;
use crate::{ModifierId, SeizureType};

/// Apply every matching rule to every drug in `scores`, in place.
///
/// Drugs without an entry in `rules` keep their baseline score. Rules for drugs that are not
/// in `scores` are never consulted.
///
/// This must run exactly once per freshly built [`ScoreMap`]; it is not idempotent.
pub fn apply_modifier_rules(
    scores: &mut ScoreMap,
    rules: &RuleTable,
    modifiers: &BTreeSet<ModifierId>,
    seizure_types: &BTreeSet<SeizureType>,
) {
    for (drug, score) in scores.iter_mut() {
        let Some(drug_rules) = rules.get(drug) else {
            continue;
        };

        let mut floor = Score::from(BEST_TIER);
        for rule in drug_rules {
            if !rule.applies_to(modifiers, seizure_types) {
                continue;
            }

            tracing::debug!("rule found for {}: {:?}", drug, rule);
            floor = floor.max(Score::from(rule.max));
            *score = score.saturating_add(rule.score_delta());
        }

        *score = (*score).max(floor);
    }

    tracing::debug!("score map after modifier rules: {:?}", scores);
}
