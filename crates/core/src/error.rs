use asm_types::IdentifierError;

#[derive(Debug, thiserror::Error)]
pub enum AsmError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no recommendation available for seizure combination {0:?}")]
    UnknownSeizureCombination(String),
    #[error("reference data integrity violation: {0}")]
    DataIntegrity(String),
    #[error("reference data unavailable: {0}")]
    DataUnavailable(String),
    #[error("failed to read reference data file {}: {source}", path.display())]
    FileRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse reference data file {file}: {message}")]
    Deserialization { file: String, message: String },
}

impl From<IdentifierError> for AsmError {
    fn from(err: IdentifierError) -> Self {
        AsmError::InvalidInput(err.to_string())
    }
}

pub type AsmResult<T> = std::result::Result<T, AsmError>;
