//! raqam - Egyptian national ID validator and generator
//!
//! Structural validation only: a valid ID is well-formed, not
//! necessarily issued.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "raqam")]
#[command(about = "Egyptian national ID validator and generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a 14-digit national ID
    Validate {
        /// The ID to validate
        id: String,
    },

    /// Generate a national ID from its parts
    Generate {
        /// Birth date (YYYY-MM-DD)
        #[arg(short, long)]
        birth_date: String,

        /// Governorate code or name (e.g. "21" or "Giza")
        #[arg(short, long)]
        governorate: Option<String>,

        /// 3-digit civil-registry serial
        #[arg(short, long)]
        serial: Option<String>,

        /// Gender digit (odd = male, even = female)
        #[arg(short = 'd', long)]
        gender_digit: Option<u8>,

        /// Emit a preview with a `*` in place of the check digit
        #[arg(long)]
        no_checksum: bool,
    },

    /// List governorate codes
    Governorates,

    /// Show or edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Edit configuration file
    Edit,
    /// Reset to default configuration
    Reset,
    /// Print the configuration file path
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { id } => commands::validate(&id, cli.json),
        Commands::Generate {
            birth_date,
            governorate,
            serial,
            gender_digit,
            no_checksum,
        } => commands::generate(
            &birth_date,
            governorate,
            serial,
            gender_digit,
            no_checksum,
            cli.json,
        ),
        Commands::Governorates => commands::governorates(cli.json),
        Commands::Config { command } => match command {
            Some(ConfigCommands::Show) => commands::config_show(cli.json),
            Some(ConfigCommands::Edit) => commands::config_edit(),
            Some(ConfigCommands::Reset) => commands::config_reset(),
            Some(ConfigCommands::Path) => commands::config_path(),
            None => commands::config_show(cli.json),
        },
    }
}
