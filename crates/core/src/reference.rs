//! Static reference data consumed by the recommendation pipeline.
//!
//! Responsibilities:
//! - Define the in-memory shape of the drug catalog, baseline tier map and modifier rules
//! - Audit the tables once, at construction, for data-integrity defects
//! - Quarantine drugs whose data cannot be trusted so that no request ever sees them
//!
//! Notes:
//! - A [`ReferenceData`] value is immutable after construction. Services share it behind an
//!   `Arc` and never mutate it during a request.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::constants::{BEST_TIER, SEIZURE_COMBINATION_SEPARATOR, WORST_TIER};
use crate::engine::normalize_seizure_types;
use crate::{AsmError, AsmResult, DrugCode, ModifierId, SeizureType};

/// Baseline drugs for one seizure combination, grouped by tier number (1 = best).
pub type BaselineTiers = BTreeMap<u32, Vec<DrugCode>>;

/// Canonical seizure combination key to its baseline tiers.
pub type BaselineTierMap = BTreeMap<String, BaselineTiers>;

/// Ordered modifier rules per drug.
pub type RuleTable = BTreeMap<DrugCode, Vec<ModifierRule>>;

/// Drug catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrugInfo {
    pub name: String,
}

/// A selectable option (seizure type or modifier) offered to front ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectOption<T> {
    pub value: T,
    pub label: String,
}

/// Direction a modifier rule moves a drug on the tier scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    /// Towards tier 1.
    Upgrade,
    /// Towards tier 4. Any action other than `upgrade` in the data lands here.
    #[serde(other)]
    Downgrade,
}

/// A single conditional score adjustment for one drug.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModifierRule {
    pub modifier: ModifierId,
    pub seizure: SeizureType,
    pub action: RuleAction,
    pub steps: u32,
    /// Best tier the drug may end on once this rule has fired.
    pub max: u32,
}

impl ModifierRule {
    /// A rule fires only when both its modifier and its seizure type are present.
    pub fn applies_to(
        &self,
        modifiers: &BTreeSet<ModifierId>,
        seizure_types: &BTreeSet<SeizureType>,
    ) -> bool {
        modifiers.contains(&self.modifier) && seizure_types.contains(&self.seizure)
    }

    /// Signed score change: negative for upgrades, positive otherwise.
    pub fn score_delta(&self) -> i64 {
        let steps = i64::from(self.steps);
        match self.action {
            RuleAction::Upgrade => -steps,
            RuleAction::Downgrade => steps,
        }
    }

    fn defect(&self) -> Option<String> {
        if self.steps == 0 {
            return Some("steps must be at least 1".into());
        }
        if !(BEST_TIER..=WORST_TIER).contains(&self.max) {
            return Some(format!(
                "max {} is outside the tier range {BEST_TIER}..={WORST_TIER}",
                self.max
            ));
        }
        if self.action == RuleAction::Upgrade && self.max == WORST_TIER {
            return Some(format!(
                "upgrade with max {WORST_TIER} pins the drug to the worst tier"
            ));
        }
        None
    }
}

/// A defect found while auditing reference data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DataIntegrityIssue {
    #[error(
        "{drug} is listed in tier {kept_tier} and tier {ignored_tier} for {combination:?}; \
         tier {kept_tier} is used"
    )]
    DuplicateBaselineDrug {
        combination: String,
        drug: DrugCode,
        kept_tier: u32,
        ignored_tier: u32,
    },
    #[error("tier 0 is not a valid tier for {combination:?}; {drugs:?} are quarantined")]
    InvalidTierNumber {
        combination: String,
        drugs: Vec<DrugCode>,
    },
    #[error("rule #{index} of {drug} is invalid ({reason}); {drug} is quarantined")]
    InvalidRule {
        drug: DrugCode,
        index: usize,
        reason: String,
    },
    #[error("baseline key {key:?} can never match a request: {reason}")]
    NonCanonicalCombinationKey { key: String, reason: String },
    #[error("{drug} is referenced by the {referenced_in} but missing from the drug catalog")]
    UnknownDrug {
        drug: DrugCode,
        referenced_in: &'static str,
    },
}

/// Raw tables as loaded from storage, before auditing.
#[derive(Clone, Debug, Default)]
pub struct ReferenceTables {
    pub drugs: BTreeMap<DrugCode, DrugInfo>,
    pub seizure_types: Vec<SelectOption<SeizureType>>,
    pub modifiers: Vec<SelectOption<ModifierId>>,
    pub baseline: BaselineTierMap,
    pub rules: RuleTable,
}

/// Audited, immutable reference data.
#[derive(Clone, Debug)]
pub struct ReferenceData {
    tables: ReferenceTables,
    issues: Vec<DataIntegrityIssue>,
    quarantined: BTreeSet<DrugCode>,
}

impl ReferenceData {
    /// Audit `tables` and wrap them for read-only sharing.
    ///
    /// Integrity issues do not fail construction; they are logged, recorded, and any drug
    /// whose data is unusable is quarantined. Call [`ReferenceData::ensure_clean`] to treat
    /// issues as fatal.
    ///
    /// # Errors
    ///
    /// Returns [`AsmError::DataUnavailable`] if the baseline map or the rule table is empty.
    pub fn new(tables: ReferenceTables) -> AsmResult<Self> {
        if tables.baseline.is_empty() {
            return Err(AsmError::DataUnavailable(
                "seizure combination map is empty".into(),
            ));
        }
        if tables.rules.is_empty() {
            return Err(AsmError::DataUnavailable(
                "modifier rule table is empty".into(),
            ));
        }

        let (issues, quarantined) = audit(&tables);
        for issue in &issues {
            tracing::warn!("reference data defect: {}", issue);
        }

        Ok(Self {
            tables,
            issues,
            quarantined,
        })
    }

    /// Fail if the audit found anything at all.
    pub fn ensure_clean(&self) -> AsmResult<()> {
        if self.issues.is_empty() {
            return Ok(());
        }
        let joined = self
            .issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(AsmError::DataIntegrity(joined))
    }

    pub fn baseline(&self) -> &BaselineTierMap {
        &self.tables.baseline
    }

    pub fn rules(&self) -> &RuleTable {
        &self.tables.rules
    }

    pub fn drugs(&self) -> &BTreeMap<DrugCode, DrugInfo> {
        &self.tables.drugs
    }

    pub fn seizure_types(&self) -> &[SelectOption<SeizureType>] {
        &self.tables.seizure_types
    }

    pub fn modifiers(&self) -> &[SelectOption<ModifierId>] {
        &self.tables.modifiers
    }

    pub fn issues(&self) -> &[DataIntegrityIssue] {
        &self.issues
    }

    pub fn is_quarantined(&self, drug: &DrugCode) -> bool {
        self.quarantined.contains(drug)
    }

    pub fn quarantined(&self) -> &BTreeSet<DrugCode> {
        &self.quarantined
    }
}

fn audit(tables: &ReferenceTables) -> (Vec<DataIntegrityIssue>, BTreeSet<DrugCode>) {
    let mut issues = Vec::new();
    let mut quarantined = BTreeSet::new();

    for (combination, tiers) in &tables.baseline {
        if let Some(reason) = combination_key_defect(combination) {
            issues.push(DataIntegrityIssue::NonCanonicalCombinationKey {
                key: combination.clone(),
                reason,
            });
        }

        let mut seen: BTreeMap<&DrugCode, u32> = BTreeMap::new();
        for (&tier, drugs) in tiers {
            if tier == 0 {
                quarantined.extend(drugs.iter().cloned());
                issues.push(DataIntegrityIssue::InvalidTierNumber {
                    combination: combination.clone(),
                    drugs: drugs.clone(),
                });
            }
            for drug in drugs {
                match seen.get(drug) {
                    Some(&kept_tier) => {
                        issues.push(DataIntegrityIssue::DuplicateBaselineDrug {
                            combination: combination.clone(),
                            drug: drug.clone(),
                            kept_tier,
                            ignored_tier: tier,
                        });
                    }
                    None => {
                        seen.insert(drug, tier);
                    }
                }
            }
        }
    }

    for (drug, rules) in &tables.rules {
        for (index, rule) in rules.iter().enumerate() {
            if let Some(reason) = rule.defect() {
                quarantined.insert(drug.clone());
                issues.push(DataIntegrityIssue::InvalidRule {
                    drug: drug.clone(),
                    index,
                    reason,
                });
            }
        }
    }

    // The catalog is optional for the pipeline; only cross-check when one was supplied.
    if !tables.drugs.is_empty() {
        let baseline_drugs: BTreeSet<&DrugCode> = tables
            .baseline
            .values()
            .flat_map(|tiers| tiers.values().flatten())
            .collect();
        for drug in baseline_drugs {
            if !tables.drugs.contains_key(drug) {
                issues.push(DataIntegrityIssue::UnknownDrug {
                    drug: drug.clone(),
                    referenced_in: "seizure combination map",
                });
            }
        }
        for drug in tables.rules.keys() {
            if !tables.drugs.contains_key(drug) {
                issues.push(DataIntegrityIssue::UnknownDrug {
                    drug: drug.clone(),
                    referenced_in: "modifier rule table",
                });
            }
        }
    }

    (issues, quarantined)
}

fn combination_key_defect(key: &str) -> Option<String> {
    let parts: Result<Vec<SeizureType>, _> = key
        .split(SEIZURE_COMBINATION_SEPARATOR)
        .map(SeizureType::new)
        .collect();
    let parts = match parts {
        Ok(parts) => parts,
        Err(err) => return Some(err.to_string()),
    };

    match normalize_seizure_types(&parts) {
        Ok(canonical) if canonical.as_str() == key => None,
        Ok(canonical) => Some(format!("expected {:?}", canonical.as_str())),
        Err(err) => Some(err.to_string()),
    }
}
