//! JSON-backed reference data repository.
//!
//! Reads the five reference data files from the configured data directory once, at startup.
//! Schema mismatches are reported with the JSON path of the failing field so that a broken
//! data file can be fixed without guesswork.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::constants::{
    DRUGS_FILE_NAME, MODIFIERS_FILE_NAME, MODIFIER_RULES_FILE_NAME, SEIZURE_DRUG_MAP_FILE_NAME,
    SEIZURE_TYPES_FILE_NAME,
};
use crate::reference::{ReferenceData, ReferenceTables};
use crate::{AsmError, AsmResult, CoreConfig};

/// Load and audit all reference data under `config.data_dir()`.
///
/// # Errors
///
/// Returns [`AsmError`] if:
/// - a file is missing ([`AsmError::DataUnavailable`]) or unreadable,
/// - a file does not match its schema,
/// - the seizure combination map or rule table is empty,
/// - strict mode is enabled and the integrity audit found any issue.
pub fn load_reference_data(config: &CoreConfig) -> AsmResult<ReferenceData> {
    let dir = config.data_dir();
    tracing::info!("loading reference data from {}", dir.display());

    let tables = ReferenceTables {
        drugs: read_json(dir, DRUGS_FILE_NAME)?,
        seizure_types: read_json(dir, SEIZURE_TYPES_FILE_NAME)?,
        modifiers: read_json(dir, MODIFIERS_FILE_NAME)?,
        baseline: read_json(dir, SEIZURE_DRUG_MAP_FILE_NAME)?,
        rules: read_json(dir, MODIFIER_RULES_FILE_NAME)?,
    };

    let data = ReferenceData::new(tables)?;
    if config.strict_reference_data() {
        data.ensure_clean()?;
    }

    tracing::info!(
        "loaded {} drugs, {} seizure combinations, rules for {} drugs ({} integrity issues)",
        data.drugs().len(),
        data.baseline().len(),
        data.rules().len(),
        data.issues().len()
    );
    Ok(data)
}

fn read_json<T: DeserializeOwned>(dir: &Path, file_name: &str) -> AsmResult<T> {
    let path = dir.join(file_name);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(AsmError::DataUnavailable(format!(
                "{} not found",
                path.display()
            )));
        }
        Err(source) => return Err(AsmError::FileRead { path, source }),
    };

    let mut deserializer = serde_json::Deserializer::from_str(&contents);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        let path = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        AsmError::Deserialization {
            file: file_name.to_string(),
            message: format!("schema mismatch at {path}: {}", err.into_inner()),
        }
    })?;
    deserializer.end().map_err(|err| AsmError::Deserialization {
        file: file_name.to_string(),
        message: err.to_string(),
    })?;

    Ok(value)
}
