//! Recommendation pipeline stages, leaves first:
//!
//! 1. [`normalize_seizure_types`] turns the requested seizure types into a canonical key.
//! 2. [`resolve_candidates`] finds the baseline tiers for that key.
//! 3. [`build_score_map`] flattens the tiers into per-drug scores.
//! 4. [`apply_modifier_rules`] shifts scores according to the patient's modifiers.
//! 5. [`group_by_tiers`] buckets the final scores into named tiers.
//!
//! Every stage is a pure function of its inputs apart from step 4, which mutates the
//! request-local score map it is given.

mod candidates;
mod key;
mod modifiers;
mod score;
mod tiers;

pub use candidates::resolve_candidates;
pub use key::{normalize_seizure_types, SeizureCombinationKey};
pub use modifiers::apply_modifier_rules;
pub use score::{build_score_map, Score, ScoreMap};
pub use tiers::{group_by_tiers, Tier, TierGroups};
