//! # ASM Core
//!
//! Core business logic for anti-seizure medication (ASM) recommendations.
//!
//! This crate contains the rule-evaluation pipeline and the reference data it runs on:
//! - Canonical seizure combination keys and baseline tier lookup
//! - Patient modifier rules that move drugs up or down the tier scale
//! - Grouping of final scores into `tier_1`..`tier_4`
//! - Loading and auditing of the JSON reference data
//!
//! **No API concerns**: HTTP servers, wire formats and field-name conventions belong in
//! `api-rest` or `api-shared`.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod reference;
pub mod repository;
pub mod selection;
pub mod service;
pub mod validation;

pub use asm_types::{DrugCode, IdentifierError, ModifierId, SeizureType};
pub use config::CoreConfig;
pub use engine::{Tier, TierGroups};
pub use error::{AsmError, AsmResult};
pub use reference::{DataIntegrityIssue, ReferenceData};
pub use repository::load_reference_data;
pub use selection::{Gender, PatientSnapshot, Recommendation, SelectionRequest};
pub use service::AsmService;
