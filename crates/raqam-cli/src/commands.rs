//! CLI command implementations

use anyhow::{Result, bail};
use chrono::NaiveDate;
use colored::Colorize;
use raqam_core::{Config, Governorate, NationalId};
use tabled::{Table, Tabled, settings::Style};

fn load_config() -> Result<Config> {
    let config = Config::load(&Config::default_path()?)?;
    if !config.display.colors {
        colored::control::set_override(false);
    }
    Ok(config)
}

pub fn validate(raw: &str, json: bool) -> Result<()> {
    let config = load_config()?;

    match NationalId::parse(raw) {
        Ok(id) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&id)?);
            } else {
                println!("{} Structurally valid national ID", "✓".green());
                println!();
                println!("ID:          {}", id.as_str().cyan());
                println!(
                    "Birth date:  {}",
                    id.birth_date().format(&config.display.date_format)
                );
                println!(
                    "Governorate: {} ({})",
                    id.governorate(),
                    id.governorate().code()
                );
                println!("Serial:      {}", id.serial());
                println!("Gender:      {} (digit {})", id.gender(), id.gender_digit());
                println!("Check digit: {}", id.check_digit());
                println!();
                println!(
                    "{}",
                    "Note: the format and components are correct; this does not \
                     prove the ID was officially issued."
                        .dimmed()
                );
            }
            Ok(())
        }
        Err(err) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "valid": false, "error": err.to_string() })
                );
                std::process::exit(1);
            }
            bail!("Invalid ID: {}", err)
        }
    }
}

pub fn generate(
    birth_date: &str,
    governorate: Option<String>,
    serial: Option<String>,
    gender_digit: Option<u8>,
    no_checksum: bool,
    json: bool,
) -> Result<()> {
    let config = load_config()?;

    let birth_date = NaiveDate::parse_from_str(birth_date, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Birth date must be YYYY-MM-DD, got {}", birth_date))?;

    let governorate = governorate.unwrap_or_else(|| config.default_governorate.clone());
    let serial = serial.unwrap_or_else(|| config.default_serial.clone());
    let gender_digit = gender_digit.unwrap_or(config.default_gender_digit);

    // Accept a name or table code, but pass bare 2-digit codes through
    // so off-table codes still compose.
    let code = match governorate.parse::<Governorate>() {
        Ok(gov) => gov.code().to_string(),
        Err(_)
            if !governorate.is_empty()
                && governorate.len() <= 2
                && governorate.bytes().all(|b| b.is_ascii_digit()) =>
        {
            governorate
        }
        Err(err) => return Err(err.into()),
    };

    if no_checksum {
        let preview = raqam_core::preview(birth_date, &code, &serial, Some(gender_digit), false);
        if json {
            println!("{}", serde_json::json!({ "id": preview, "complete": false }));
        } else {
            println!("{}", preview.cyan());
            println!("{}", "Check digit not computed (`*` placeholder).".dimmed());
        }
        return Ok(());
    }

    let id = raqam_core::generate(birth_date, &code, &serial, gender_digit)?;

    if json {
        println!("{}", serde_json::to_string(&id)?);
    } else {
        println!("{} Generated national ID: {}", "✓".green(), id.as_str().cyan());
        println!(
            "  Born {} in {}, serial {}, {}",
            id.birth_date().format(&config.display.date_format),
            id.governorate(),
            id.serial(),
            id.gender()
        );
    }

    Ok(())
}

#[derive(Tabled)]
struct GovernorateRow {
    #[tabled(rename = "Code")]
    code: &'static str,
    #[tabled(rename = "Governorate")]
    name: &'static str,
}

pub fn governorates(json: bool) -> Result<()> {
    if json {
        let entries: Vec<_> = Governorate::ALL
            .iter()
            .map(|g| serde_json::json!({ "code": g.code(), "name": g.name() }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        let rows: Vec<_> = Governorate::ALL
            .iter()
            .map(|g| GovernorateRow {
                code: g.code(),
                name: g.name(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}", table);
    }

    Ok(())
}

/// Show current configuration
pub fn config_show(json: bool) -> Result<()> {
    let config = Config::load(&Config::default_path()?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("{}", "Current configuration:".bold());
        println!();
        println!("default_governorate = \"{}\"", config.default_governorate);
        println!("default_serial = \"{}\"", config.default_serial);
        println!("default_gender_digit = {}", config.default_gender_digit);
        println!("compute_checksum = {}", config.compute_checksum);
        println!();
        println!("{}", "[display]".bold());
        println!("colors = {}", config.display.colors);
        println!("date_format = \"{}\"", config.display.date_format);
        println!("show_hints = {}", config.display.show_hints);
    }

    Ok(())
}

/// Edit configuration file
pub fn config_edit() -> Result<()> {
    let config_path = Config::default_path()?;

    if !config_path.exists() {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&config_path, Config::default_with_comments())?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = std::process::Command::new(&editor)
        .arg(&config_path)
        .status()?;

    if !status.success() {
        bail!("Editor exited with an error");
    }

    // Validate the config after editing
    match Config::load(&config_path) {
        Ok(_) => println!("{} Configuration updated", "✓".green()),
        Err(err) => bail!("Edited config is invalid: {}", err),
    }

    Ok(())
}

/// Reset to default configuration
pub fn config_reset() -> Result<()> {
    let config_path = Config::default_path()?;
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&config_path, Config::default_with_comments())?;
    println!(
        "{} Reset configuration at {}",
        "✓".green(),
        config_path.display()
    );
    Ok(())
}

/// Print the configuration file path
pub fn config_path() -> Result<()> {
    println!("{}", Config::default_path()?.display());
    Ok(())
}
