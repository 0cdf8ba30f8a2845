//! Input validation utilities.
//!
//! Front ends hand over raw strings; these helpers turn them into validated identifiers and
//! check a request before it reaches the pipeline.

use std::str::FromStr;

use asm_types::IdentifierError;

use crate::selection::SelectionRequest;
use crate::{AsmError, AsmResult};

/// Parse every value into an identifier, failing on the first malformed one.
///
/// # Errors
///
/// Returns [`AsmError::InvalidInput`] naming the offending position.
pub fn parse_identifiers<T, S>(values: &[S]) -> AsmResult<Vec<T>>
where
    T: FromStr<Err = IdentifierError>,
    S: AsRef<str>,
{
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value
                .as_ref()
                .parse::<T>()
                .map_err(|err| AsmError::InvalidInput(format!("item {index}: {err}")))
        })
        .collect()
}

/// Validates a selection request before it is evaluated.
///
/// # Errors
///
/// Returns [`AsmError::InvalidInput`] if no seizure type was given or the patient snapshot
/// is implausible.
pub fn validate_selection(request: &SelectionRequest) -> AsmResult<()> {
    if request.seizure_types.is_empty() {
        return Err(AsmError::InvalidInput(
            "at least one seizure type is required".into(),
        ));
    }
    request.patient.validate()
}
