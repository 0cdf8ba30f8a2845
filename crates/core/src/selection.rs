//! Request and result types for a single recommendation.

use serde::{Deserialize, Serialize};

use crate::engine::TierGroups;
use crate::{AsmError, AsmResult, ModifierId, SeizureType};

/// Oldest age accepted in a patient snapshot.
pub const MAX_AGE_YEARS: u32 = 150;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Patient details echoed back with the result. Not interpreted by the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientSnapshot {
    pub gender: Gender,
    pub age: u32,
    pub weight: f64,
}

impl PatientSnapshot {
    /// Validates that the snapshot describes a plausible patient.
    ///
    /// # Errors
    ///
    /// Returns [`AsmError::InvalidInput`] if the age exceeds [`MAX_AGE_YEARS`] or the weight
    /// is not a finite, positive number.
    pub fn validate(&self) -> AsmResult<()> {
        if self.age > MAX_AGE_YEARS {
            return Err(AsmError::InvalidInput(format!(
                "age {} exceeds maximum of {MAX_AGE_YEARS} years",
                self.age
            )));
        }
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(AsmError::InvalidInput(format!(
                "weight must be a positive number, got {}",
                self.weight
            )));
        }
        Ok(())
    }
}

/// A validated recommendation request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub patient: PatientSnapshot,
    pub seizure_types: Vec<SeizureType>,
    pub modifiers: Vec<ModifierId>,
}

/// Tiered recommendation plus the echoed patient snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub tiers: TierGroups,
    pub patient_snapshot: PatientSnapshot,
}
