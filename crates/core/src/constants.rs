//! Constants used throughout the ASM core crate.
//!
//! This module contains the reference data file names, the default data location and the
//! numeric bounds of the tier scale.

/// Directory holding the bundled reference data, relative to the workspace root.
pub const DATA_DIR: &str = "crates/core/data";

/// Drug catalog file name.
pub const DRUGS_FILE_NAME: &str = "drugs.json";

/// Selectable seizure types file name.
pub const SEIZURE_TYPES_FILE_NAME: &str = "seizure_types.json";

/// Selectable patient modifiers file name.
pub const MODIFIERS_FILE_NAME: &str = "modifiers.json";

/// Seizure combination to baseline tiers file name.
pub const SEIZURE_DRUG_MAP_FILE_NAME: &str = "seizure_drug_map.json";

/// Per-drug modifier rules file name.
pub const MODIFIER_RULES_FILE_NAME: &str = "modifier_rules.json";

/// Separator used when joining sorted seizure types into a combination key.
pub const SEIZURE_COMBINATION_SEPARATOR: &str = "+";

/// Best (most preferred) tier number.
pub const BEST_TIER: u32 = 1;

/// Worst tier number a rule bound may name.
pub const WORST_TIER: u32 = 4;
