use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use payout_split::application::simulator::SplitSimulator;
use payout_split::config::SplitConfig;
use payout_split::domain::rule::{RulePatch, RuleType};
use payout_split::error::SplitError;
use payout_split::infrastructure::in_memory::InMemoryRuleStore;
use payout_split::interfaces::csv::rule_reader::RuleReader;
use payout_split::interfaces::csv::rule_writer::RuleWriter;
use payout_split::interfaces::csv::split_writer::SplitWriter;
use payout_split::logging::init_tracing;
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Preview how a deposit is split across a rules CSV
    Split {
        /// Input rules CSV file
        rules: PathBuf,

        /// Gross deposit to distribute
        #[arg(long, allow_negative_numbers = true)]
        deposit: Decimal,

        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },
    /// Print zero-value percentage rules for the configured roster
    Init,
    /// Replace fields of one rule and print the updated rules CSV
    Patch {
        /// Input rules CSV file
        rules: PathBuf,

        /// Id of the rule to edit
        #[arg(long)]
        id: String,

        #[arg(long)]
        recipient_id: Option<String>,

        #[arg(long)]
        recipient_name: Option<String>,

        /// PERCENTAGE or FLAT_RATE
        #[arg(long = "type")]
        rule_type: Option<RuleType>,

        #[arg(long, allow_negative_numbers = true)]
        value: Option<Decimal>,

        #[arg(long)]
        role_label: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

fn load_simulator(config: &SplitConfig) -> SplitSimulator {
    SplitSimulator::new(Box::new(InMemoryRuleStore::new()))
        .with_vault_label(config.vault_label.clone())
}

async fn load_rules(simulator: &SplitSimulator, path: PathBuf) -> Result<()> {
    let file = File::open(path).into_diagnostic()?;
    let rules = RuleReader::new(file).read_all().into_diagnostic()?;
    simulator.load_rules(rules).await.into_diagnostic()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SplitConfig::from_toml_file(path).into_diagnostic()?,
        None => SplitConfig::default(),
    };
    init_tracing(&config.log_level);

    let simulator = load_simulator(&config);
    let stdout = io::stdout();

    match cli.command {
        Command::Split {
            rules,
            deposit,
            format,
        } => {
            load_rules(&simulator, rules).await?;
            let plan = simulator.preview(deposit).await.into_diagnostic()?;

            for advisory in &plan.advisories {
                eprintln!("WARNING: {}", advisory);
            }

            let mut writer = SplitWriter::new(stdout.lock(), config.display_precision);
            let written = match format {
                OutputFormat::Csv => writer.write_csv(&plan.result),
                OutputFormat::Json => writer.write_json(&plan.result),
            };
            written.into_diagnostic()?;
        }
        Command::Init => {
            if config.roster.is_empty() {
                return Err(SplitError::ConfigError(
                    "roster is empty; add [[roster]] entries to the config file".to_string(),
                ))
                .into_diagnostic();
            }
            let rules = simulator.seed_roster(&config.roster).await.into_diagnostic()?;
            RuleWriter::new(stdout.lock())
                .write_rules(&rules)
                .into_diagnostic()?;
        }
        Command::Patch {
            rules,
            id,
            recipient_id,
            recipient_name,
            rule_type,
            value,
            role_label,
        } => {
            load_rules(&simulator, rules).await?;
            let patch = RulePatch {
                recipient_id,
                recipient_name,
                r#type: rule_type,
                value,
                role_label,
            };
            if patch.is_empty() {
                tracing::warn!(rule = %id, "patch has no fields; rules are unchanged");
            }
            simulator.update_rule(&id, patch).await.into_diagnostic()?;

            let rules = simulator.rules().await.into_diagnostic()?;
            RuleWriter::new(stdout.lock())
                .write_rules(&rules)
                .into_diagnostic()?;
        }
    }

    Ok(())
}
