//! Recommendation service.
//!
//! [`AsmService`] owns a shared, read-only handle to the reference data and evaluates each
//! request on its own freshly built score map. It holds no mutable state, so one instance
//! can serve any number of concurrent requests.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::engine::{
    apply_modifier_rules, build_score_map, group_by_tiers, normalize_seizure_types,
    resolve_candidates,
};
use crate::reference::{DrugInfo, ReferenceData, SelectOption};
use crate::selection::{Recommendation, SelectionRequest};
use crate::validation::validate_selection;
use crate::{AsmResult, DrugCode, ModifierId, SeizureType};

/// Pure recommendation operations - no API concerns
#[derive(Clone, Debug)]
pub struct AsmService {
    data: Arc<ReferenceData>,
}

impl AsmService {
    pub fn new(data: Arc<ReferenceData>) -> Self {
        Self { data }
    }

    pub fn reference_data(&self) -> &ReferenceData {
        &self.data
    }

    /// Recommend anti-seizure medications for one patient.
    ///
    /// Runs the full pipeline exactly once: canonical key, baseline lookup, score map,
    /// quarantine filter, modifier rules, tier grouping.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AsmError`] if:
    /// - the request has no seizure types or an implausible patient snapshot
    ///   ([`crate::AsmError::InvalidInput`]),
    /// - the seizure combination has no baseline entry
    ///   ([`crate::AsmError::UnknownSeizureCombination`]).
    pub fn select(&self, request: &SelectionRequest) -> AsmResult<Recommendation> {
        validate_selection(request)?;

        let seizure_types: BTreeSet<SeizureType> = request.seizure_types.iter().cloned().collect();
        let modifiers: BTreeSet<ModifierId> = request.modifiers.iter().cloned().collect();

        let key = normalize_seizure_types(&seizure_types)?;
        let candidates = resolve_candidates(&key, self.data.baseline())?;

        let mut scores = build_score_map(candidates);
        scores.retain(|drug| {
            let excluded = self.data.is_quarantined(drug);
            if excluded {
                tracing::warn!("excluding {} from {}: reference data defect", drug, key);
            }
            !excluded
        });

        apply_modifier_rules(&mut scores, self.data.rules(), &modifiers, &seizure_types);
        let tiers = group_by_tiers(&scores);

        Ok(Recommendation {
            tiers,
            patient_snapshot: request.patient.clone(),
        })
    }

    pub fn seizure_types(&self) -> &[SelectOption<SeizureType>] {
        self.data.seizure_types()
    }

    pub fn modifiers(&self) -> &[SelectOption<ModifierId>] {
        self.data.modifiers()
    }

    pub fn drugs(&self) -> impl Iterator<Item = (&DrugCode, &DrugInfo)> {
        self.data.drugs().iter()
    }
}
