//! Wire types for the ASM HTTP API.
//!
//! Responsibilities:
//! - Define request/response bodies exactly as clients see them (camelCase field names)
//! - Translate request bodies into validated `asm-core` requests
//! - Translate core results into response bodies
//!
//! Notes:
//! - Identifiers arrive as plain strings and are validated here, so a malformed seizure type
//!   or modifier is rejected before the pipeline runs.

use std::collections::BTreeMap;

use asm_core::reference::{DrugInfo, SelectOption};
use asm_core::validation::parse_identifiers;
use asm_core::{AsmResult, DrugCode, Gender, PatientSnapshot, Recommendation, SelectionRequest};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// A selectable seizure type or modifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OptionRes {
    pub value: String,
    pub label: String,
}

impl<T: AsRef<str>> From<&SelectOption<T>> for OptionRes {
    fn from(option: &SelectOption<T>) -> Self {
        Self {
            value: option.value.as_ref().to_string(),
            label: option.label.clone(),
        }
    }
}

/// Drug catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DrugRes {
    pub code: String,
    pub name: String,
}

impl From<(&DrugCode, &DrugInfo)> for DrugRes {
    fn from((code, info): (&DrugCode, &DrugInfo)) -> Self {
        Self {
            code: code.to_string(),
            name: info.name.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PatientGender {
    Male,
    Female,
}

impl From<PatientGender> for Gender {
    fn from(gender: PatientGender) -> Self {
        match gender {
            PatientGender::Male => Gender::Male,
            PatientGender::Female => Gender::Female,
        }
    }
}

impl From<Gender> for PatientGender {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Male => PatientGender::Male,
            Gender::Female => PatientGender::Female,
        }
    }
}

/// Recommendation request body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectionReq {
    pub gender: PatientGender,
    pub age: u32,
    pub weight: f64,
    pub seizure_types: Vec<String>,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl SelectionReq {
    /// Validate identifiers and build a core request.
    ///
    /// # Errors
    ///
    /// Returns [`asm_core::AsmError::InvalidInput`] if any seizure type or modifier is
    /// malformed.
    pub fn into_request(self) -> AsmResult<SelectionRequest> {
        let seizure_types = parse_identifiers(&self.seizure_types)?;
        let modifiers = parse_identifiers(&self.modifiers)?;

        Ok(SelectionRequest {
            patient: PatientSnapshot {
                gender: self.gender.into(),
                age: self.age,
                weight: self.weight,
            },
            seizure_types,
            modifiers,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientSnapshotRes {
    pub gender: PatientGender,
    pub age: u32,
    pub weight: f64,
}

/// Recommendation response body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRes {
    /// Non-empty tiers only, keyed `tier_1`..`tier_4`, drug codes sorted alphabetically.
    pub tiers: BTreeMap<String, Vec<String>>,
    pub patient_snapshot: PatientSnapshotRes,
}

impl From<Recommendation> for SelectionRes {
    fn from(recommendation: Recommendation) -> Self {
        let tiers = recommendation
            .tiers
            .into_iter()
            .map(|(tier, drugs)| {
                let drugs = drugs.iter().map(ToString::to_string).collect();
                (tier.label().to_string(), drugs)
            })
            .collect();
        let patient = recommendation.patient_snapshot;

        Self {
            tiers,
            patient_snapshot: PatientSnapshotRes {
                gender: patient.gender.into(),
                age: patient.age,
                weight: patient.weight,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}
