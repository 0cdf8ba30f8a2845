use crate::engine::SeizureCombinationKey;
use crate::reference::{BaselineTierMap, BaselineTiers};
use crate::{AsmError, AsmResult};

/// Look up the baseline tiers for an exact combination key.
///
/// There is no fallback to subsets or supersets of the seizure types: either the key is in
/// the map or the request has no recommendation.
///
/// # Errors
///
/// Returns [`AsmError::UnknownSeizureCombination`] if `key` has no baseline entry.
pub fn resolve_candidates<'a>(
    key: &SeizureCombinationKey,
    baseline: &'a BaselineTierMap,
) -> AsmResult<&'a BaselineTiers> {
    let tiers = baseline
        .get(key.as_str())
        .ok_or_else(|| AsmError::UnknownSeizureCombination(key.to_string()))?;
    tracing::debug!("proposed drugs for {:?}: {:?}", key.as_str(), tiers);
    Ok(tiers)
}
