//! # ASM Types
//!
//! Validated identifier types shared by every crate in the workspace.
//!
//! Seizure types, patient modifiers and drug codes all arrive as plain strings, either from
//! the static reference data or from a request body. Wrapping them in distinct newtypes keeps
//! a modifier from being looked up where a drug code is expected, and means the character
//! checks below run exactly once, at the boundary.

/// Maximum length, in bytes, of any identifier.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Errors that can occur when creating validated identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// The input was empty or contained only whitespace
    #[error("{kind} cannot be empty")]
    Empty { kind: &'static str },

    #[error("{kind} exceeds maximum length of {MAX_IDENTIFIER_LEN} characters")]
    TooLong { kind: &'static str },

    #[error("{kind} must contain only ASCII characters: {value:?}")]
    NonAscii { kind: &'static str, value: String },

    #[error(
        "{kind} contains invalid characters (only alphanumeric, '.', '-', '_' allowed): {value:?}"
    )]
    InvalidCharacters { kind: &'static str, value: String },
}

/// Trim `input` and check it against the identifier alphabet.
fn validate(kind: &'static str, input: &str) -> Result<String, IdentifierError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(IdentifierError::Empty { kind });
    }
    if trimmed.len() > MAX_IDENTIFIER_LEN {
        return Err(IdentifierError::TooLong { kind });
    }
    if !trimmed.is_ascii() {
        return Err(IdentifierError::NonAscii {
            kind,
            value: trimmed.to_owned(),
        });
    }

    let ok = trimmed
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'.' | b'-' | b'_'));
    if !ok {
        return Err(IdentifierError::InvalidCharacters {
            kind,
            value: trimmed.to_owned(),
        });
    }

    Ok(trimmed.to_owned())
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Creates a validated identifier, trimming surrounding whitespace.
            ///
            /// # Errors
            ///
            /// Returns [`IdentifierError`] if the trimmed input is empty, too long,
            /// non-ASCII, or contains characters outside `[A-Za-z0-9._-]`.
            pub fn new(input: impl AsRef<str>) -> Result<Self, IdentifierError> {
                validate($kind, input.as_ref()).map(Self)
            }

            /// Returns the inner string as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::new(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

identifier!(
    /// A seizure type identifier such as `gtc` or `focal`.
    SeizureType,
    "seizure type"
);

identifier!(
    /// A patient modifier identifier such as `female-fertile` or `diabetes`.
    ModifierId,
    "modifier"
);

identifier!(
    /// An anti-seizure medication code such as `VPA` or `LTG`.
    DrugCode,
    "drug code"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_identifiers() {
        assert_eq!(SeizureType::new("gtc").unwrap().as_str(), "gtc");
        assert_eq!(
            ModifierId::new("oral-contraceptive").unwrap().as_str(),
            "oral-contraceptive"
        );
        assert_eq!(DrugCode::new("VPA").unwrap().to_string(), "VPA");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let code = DrugCode::new("  LEV \n").unwrap();
        assert_eq!(code.as_str(), "LEV");
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert_eq!(
            SeizureType::new("").unwrap_err(),
            IdentifierError::Empty {
                kind: "seizure type"
            }
        );
        assert!(matches!(
            ModifierId::new("   ").unwrap_err(),
            IdentifierError::Empty { kind: "modifier" }
        ));
    }

    #[test]
    fn rejects_too_long() {
        let long = "a".repeat(MAX_IDENTIFIER_LEN + 1);
        assert!(matches!(
            DrugCode::new(long).unwrap_err(),
            IdentifierError::TooLong { .. }
        ));
        assert!(DrugCode::new("a".repeat(MAX_IDENTIFIER_LEN)).is_ok());
    }

    #[test]
    fn rejects_separator_and_other_characters() {
        // '+' is the combination separator and must never appear inside a seizure type.
        let err = SeizureType::new("gtc+absence").unwrap_err();
        assert!(matches!(err, IdentifierError::InvalidCharacters { .. }));
        assert!(err.to_string().contains("invalid characters"));

        assert!(ModifierId::new("bad modifier").is_err());
        assert!(ModifierId::new("bad/modifier").is_err());
    }

    #[test]
    fn rejects_non_ascii() {
        let err = ModifierId::new("беременность").unwrap_err();
        assert!(err.to_string().contains("must contain only ASCII"));
    }

    #[test]
    fn ordering_is_lexicographic() {
        let mut types = vec![
            SeizureType::new("myoclonic").unwrap(),
            SeizureType::new("absence").unwrap(),
            SeizureType::new("gtc").unwrap(),
        ];
        types.sort();
        let names: Vec<&str> = types.iter().map(SeizureType::as_str).collect();
        assert_eq!(names, ["absence", "gtc", "myoclonic"]);
    }

    #[test]
    fn deserialization_validates() {
        let ok: DrugCode = serde_json::from_str("\"LTG\"").unwrap();
        assert_eq!(ok.as_str(), "LTG");

        let err = serde_json::from_str::<DrugCode>("\"\"").unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn usable_as_json_map_keys() {
        let map: std::collections::BTreeMap<DrugCode, u32> =
            serde_json::from_str(r#"{"VPA": 1, "LTG": 2}"#).unwrap();
        assert_eq!(map.get("LTG"), Some(&2));
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"LTG":2,"VPA":1}"#);
    }
}
