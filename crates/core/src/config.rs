//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handling never reads environment variables; the
//! binaries read them once and hand the result to [`CoreConfig::new`].

use crate::constants::{DATA_DIR, SEIZURE_DRUG_MAP_FILE_NAME};
use crate::{AsmError, AsmResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    strict_reference_data: bool,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AsmError::InvalidInput`] if `data_dir` is not an existing directory.
    pub fn new(data_dir: PathBuf, strict_reference_data: bool) -> AsmResult<Self> {
        if !data_dir.is_dir() {
            return Err(AsmError::InvalidInput(format!(
                "reference data directory does not exist: {}",
                data_dir.display()
            )));
        }

        Ok(Self {
            data_dir,
            strict_reference_data,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Whether any reference data integrity issue should abort loading.
    pub fn strict_reference_data(&self) -> bool {
        self.strict_reference_data
    }
}

/// Resolve the reference data directory without reading environment variables.
///
/// If `override_dir` is provided, it must be a directory containing the seizure combination
/// map. Otherwise this searches for `crates/core/data/` relative to the current working
/// directory and then walks up from `CARGO_MANIFEST_DIR`.
pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> AsmResult<PathBuf> {
    fn looks_like_data_dir(path: &Path) -> bool {
        path.join(SEIZURE_DRUG_MAP_FILE_NAME).is_file()
    }

    if let Some(data_dir) = override_dir {
        if data_dir.is_dir() && looks_like_data_dir(&data_dir) {
            return Ok(data_dir);
        }
        return Err(AsmError::InvalidInput(format!(
            "ASM_DATA_DIR override is not a valid data directory (must contain {SEIZURE_DRUG_MAP_FILE_NAME})"
        )));
    }

    let cwd_relative = PathBuf::from(DATA_DIR);
    if looks_like_data_dir(&cwd_relative) {
        return Ok(cwd_relative);
    }

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    if looks_like_data_dir(&manifest_dir.join("data")) {
        return Ok(manifest_dir.join("data"));
    }
    for ancestor in manifest_dir.ancestors() {
        let candidate = ancestor.join(DATA_DIR);
        if looks_like_data_dir(&candidate) {
            return Ok(candidate);
        }
    }

    Err(AsmError::InvalidInput(format!(
        "could not locate {DATA_DIR}/ directory with {SEIZURE_DRUG_MAP_FILE_NAME}"
    )))
}

/// Parse the strict-mode flag from an optional string value.
///
/// `None` or empty/whitespace means `false`. Accepts `true`/`false`/`1`/`0`/`yes`/`no`,
/// case-insensitively.
pub fn strict_from_env_value(value: Option<String>) -> AsmResult<bool> {
    let value = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        None => Ok(false),
        Some("true" | "1" | "yes") => Ok(true),
        Some("false" | "0" | "no") => Ok(false),
        Some(other) => Err(AsmError::InvalidInput(format!(
            "ASM_STRICT_DATA must be true or false, got {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_bundled_data_dir() {
        let dir = resolve_data_dir(None).expect("bundled data should be found");
        assert!(dir.join(SEIZURE_DRUG_MAP_FILE_NAME).is_file());
    }

    #[test]
    fn override_must_contain_seizure_map() {
        let tmp = tempfile::tempdir().unwrap();
        let err = resolve_data_dir(Some(tmp.path().to_path_buf())).expect_err("empty dir");
        assert!(matches!(err, AsmError::InvalidInput(msg) if msg.contains("ASM_DATA_DIR")));

        std::fs::write(tmp.path().join(SEIZURE_DRUG_MAP_FILE_NAME), "{}").unwrap();
        let dir = resolve_data_dir(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(dir, tmp.path());
    }

    #[test]
    fn config_requires_existing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing");
        assert!(CoreConfig::new(missing, false).is_err());

        let cfg = CoreConfig::new(tmp.path().to_path_buf(), true).unwrap();
        assert_eq!(cfg.data_dir(), tmp.path());
        assert!(cfg.strict_reference_data());
    }

    #[test]
    fn strict_flag_parsing() {
        assert!(!strict_from_env_value(None).unwrap());
        assert!(!strict_from_env_value(Some("  ".into())).unwrap());
        assert!(strict_from_env_value(Some("TRUE".into())).unwrap());
        assert!(strict_from_env_value(Some("1".into())).unwrap());
        assert!(!strict_from_env_value(Some("no".into())).unwrap());
        assert!(strict_from_env_value(Some("sometimes".into())).is_err());
    }
}
