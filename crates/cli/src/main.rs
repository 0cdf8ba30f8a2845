use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use asm_core::config::resolve_data_dir;
use asm_core::validation::parse_identifiers;
use asm_core::{
    load_reference_data, AsmService, CoreConfig, Gender, PatientSnapshot, Recommendation,
    SelectionRequest,
};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "asm")]
#[command(about = "Anti-seizure medication recommendation CLI")]
struct Cli {
    /// Reference data directory (defaults to the bundled crates/core/data)
    #[arg(long, global = true, env = "ASM_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend medications for a patient
    Recommend {
        /// Seizure type (repeatable)
        #[arg(short = 's', long = "seizure-type", required = true)]
        seizure_types: Vec<String>,
        /// Patient modifier (repeatable)
        #[arg(short = 'm', long = "modifier")]
        modifiers: Vec<String>,
        #[arg(long, value_enum)]
        gender: CliGender,
        /// Age in years
        #[arg(long)]
        age: u32,
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List selectable seizure types
    SeizureTypes,
    /// List selectable patient modifiers
    Modifiers,
    /// List the drug catalog
    Drugs,
    /// Audit the reference data and report integrity issues
    CheckData,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliGender {
    Male,
    Female,
}

impl From<CliGender> for Gender {
    fn from(gender: CliGender) -> Self {
        match gender {
            CliGender::Male => Gender::Male,
            CliGender::Female => Gender::Female,
        }
    }
}

fn load_service(data_dir: Option<PathBuf>) -> Result<AsmService, Box<dyn std::error::Error>> {
    let cfg = CoreConfig::new(resolve_data_dir(data_dir)?, false)?;
    let data = load_reference_data(&cfg)?;
    Ok(AsmService::new(Arc::new(data)))
}

fn print_tiers(recommendation: &Recommendation) {
    if recommendation.tiers.is_empty() {
        println!("No medications to recommend.");
        return;
    }
    for (tier, drugs) in &recommendation.tiers {
        let codes: Vec<&str> = drugs.iter().map(|drug| drug.as_str()).collect();
        println!("{}: {}", tier, codes.join(", "));
    }
}

/// Returns `Ok(false)` when the command ran but found problems worth a failing exit status.
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    match cli.command {
        Some(Commands::Recommend {
            seizure_types,
            modifiers,
            gender,
            age,
            weight,
            json,
        }) => {
            let service = load_service(cli.data_dir)?;
            let request = SelectionRequest {
                patient: PatientSnapshot {
                    gender: gender.into(),
                    age,
                    weight,
                },
                seizure_types: parse_identifiers(&seizure_types)?,
                modifiers: parse_identifiers(&modifiers)?,
            };

            let recommendation = service.select(&request)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&recommendation)?);
            } else {
                print_tiers(&recommendation);
            }
        }
        Some(Commands::SeizureTypes) => {
            let service = load_service(cli.data_dir)?;
            for option in service.seizure_types() {
                println!("{}\t{}", option.value, option.label);
            }
        }
        Some(Commands::Modifiers) => {
            let service = load_service(cli.data_dir)?;
            for option in service.modifiers() {
                println!("{}\t{}", option.value, option.label);
            }
        }
        Some(Commands::Drugs) => {
            let service = load_service(cli.data_dir)?;
            for (code, info) in service.drugs() {
                println!("{}\t{}", code, info.name);
            }
        }
        Some(Commands::CheckData) => {
            let service = load_service(cli.data_dir)?;
            let data = service.reference_data();
            if data.issues().is_empty() {
                println!("Reference data is clean.");
                return Ok(true);
            }
            for issue in data.issues() {
                println!("{}", issue);
            }
            if !data.quarantined().is_empty() {
                let codes: Vec<&str> = data.quarantined().iter().map(|d| d.as_str()).collect();
                println!("Quarantined: {}", codes.join(", "));
            }
            eprintln!("{} integrity issue(s) found", data.issues().len());
            return Ok(false);
        }
        None => {
            println!("Use 'asm --help' for commands");
        }
    }

    Ok(true)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeatable_flags() {
        let cli = Cli::try_parse_from([
            "asm", "recommend", "-s", "gtc", "-s", "absence", "-m", "migraine", "--gender",
            "female", "--age", "22", "--weight", "45.5", "--json",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Recommend {
                seizure_types,
                modifiers,
                json,
                ..
            }) => {
                assert_eq!(seizure_types, vec!["gtc", "absence"]);
                assert_eq!(modifiers, vec!["migraine"]);
                assert!(json);
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn recommend_requires_a_seizure_type() {
        let result = Cli::try_parse_from([
            "asm", "recommend", "--gender", "male", "--age", "40", "--weight", "80",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn recommend_against_bundled_data() {
        let cli = Cli::try_parse_from([
            "asm", "recommend", "-s", "focal", "-m", "diabetes", "--gender", "male", "--age",
            "35", "--weight", "74.8",
        ])
        .unwrap();
        assert!(run(cli).unwrap());
    }

    #[test]
    fn unknown_combination_is_an_error() {
        let cli = Cli::try_parse_from([
            "asm", "recommend", "-s", "focal", "-s", "absence", "--gender", "male", "--age",
            "35", "--weight", "74.8",
        ])
        .unwrap();
        let err = run(cli).unwrap_err();
        assert!(err.to_string().contains("absence+focal"));
    }

    #[test]
    fn bundled_data_checks_clean() {
        let cli = Cli::try_parse_from(["asm", "check-data"]).unwrap();
        assert!(run(cli).unwrap());
    }
}
