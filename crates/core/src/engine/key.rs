//! Canonical seizure combination keys.

use std::collections::BTreeSet;

use crate::constants::SEIZURE_COMBINATION_SEPARATOR;
use crate::{AsmError, AsmResult, SeizureType};

/// Order-independent lookup key for a set of seizure types, e.g. `absence+gtc+myoclonic`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeizureCombinationKey(String);

impl SeizureCombinationKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SeizureCombinationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SeizureCombinationKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Sort seizure types lexicographically and join them with `+`.
///
/// Duplicates collapse, so any permutation of the same set of seizure types yields the
/// same key.
///
/// # Errors
///
/// Returns [`AsmError::InvalidInput`] if `seizure_types` is empty.
pub fn normalize_seizure_types<'a, I>(seizure_types: I) -> AsmResult<SeizureCombinationKey>
where
    I: IntoIterator<Item = &'a SeizureType>,
{
    let sorted: BTreeSet<&str> = seizure_types.into_iter().map(SeizureType::as_str).collect();
    if sorted.is_empty() {
        return Err(AsmError::InvalidInput(
            "at least one seizure type is required".into(),
        ));
    }

    let key = sorted
        .into_iter()
        .collect::<Vec<_>>()
        .join(SEIZURE_COMBINATION_SEPARATOR);
    tracing::debug!("combined seizure types: {:?}", key);

    Ok(SeizureCombinationKey(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn types(names: &[&str]) -> Vec<SeizureType> {
        names.iter().map(|n| SeizureType::new(n).unwrap()).collect()
    }

    #[test]
    fn sorts_and_joins() {
        let key = normalize_seizure_types(&types(&["gtc", "myoclonic", "absence"])).unwrap();
        assert_eq!(key.as_str(), "absence+gtc+myoclonic");
    }

    #[test]
    fn single_type_has_no_separator() {
        let key = normalize_seizure_types(&types(&["focal"])).unwrap();
        assert_eq!(key.to_string(), "focal");
    }

    #[test]
    fn duplicates_collapse() {
        let key = normalize_seizure_types(&types(&["gtc", "absence", "gtc"])).unwrap();
        assert_eq!(key.as_str(), "absence+gtc");
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = normalize_seizure_types(&Vec::<SeizureType>::new())
            .expect_err("should reject empty");
        assert!(matches!(err, AsmError::InvalidInput(msg) if msg.contains("at least one")));
    }

    fn names_and_permutation() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
        proptest::collection::vec("[a-z][a-z0-9-]{0,11}", 1..6)
            .prop_flat_map(|names| (Just(names.clone()), Just(names).prop_shuffle()))
    }

    proptest! {
        #[test]
        fn any_permutation_yields_the_same_key((names, shuffled) in names_and_permutation()) {
            let original = types(&names.iter().map(String::as_str).collect::<Vec<_>>());
            let shuffled = types(&shuffled.iter().map(String::as_str).collect::<Vec<_>>());

            prop_assert_eq!(
                normalize_seizure_types(&original).unwrap(),
                normalize_seizure_types(&shuffled).unwrap()
            );
        }
    }
}
