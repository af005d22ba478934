//! `logscope config` command handler

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use logscope_core::config::{DEFAULT_CONFIG_PATH, LogScopeConfig};

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Label used when no configuration file is involved.
const BUILTIN_SOURCE: &str = "(built-in defaults)";

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    config_path: Option<&Path>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let resolved = resolve_config_path(config_path).await;
    match args.action {
        ConfigAction::Validate => execute_validate(resolved.as_deref(), writer).await,
        ConfigAction::Show { section } => {
            execute_show(resolved.as_deref(), section, writer).await
        }
    }
}

/// Pick the file the command operates on.
///
/// An explicit `-c` path is always used. Otherwise `./logscope.toml` is used
/// when it exists, and `None` means built-in defaults.
async fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if tokio::fs::try_exists(&default_path).await.unwrap_or(false) {
        Some(default_path)
    } else {
        None
    }
}

fn source_label(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| BUILTIN_SOURCE.to_owned())
}

async fn load(path: Option<&Path>) -> Result<LogScopeConfig, CliError> {
    let config = match path {
        Some(path) => LogScopeConfig::load(path).await?,
        None => LogScopeConfig::load_or_default(None).await?,
    };
    Ok(config)
}

/// Execute the config validate subcommand.
///
/// # Errors
///
/// Returns `CliError::Config` if validation fails (parse errors, invalid values,
/// missing file).
async fn execute_validate(config_path: Option<&Path>, writer: &OutputWriter) -> Result<(), CliError> {
    let source = source_label(config_path);
    info!(source = %source, "validating configuration");

    let report = match load(config_path).await {
        Ok(_) => ConfigValidationReport {
            source,
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source,
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Execute the config show subcommand.
///
/// Displays the effective configuration (file + env overrides + defaults),
/// optionally restricted to one section.
async fn execute_show(
    config_path: Option<&Path>,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let source = source_label(config_path);
    info!(source = %source, "loading configuration");

    let config = load(config_path).await?;

    let (section, config_toml) = match section.as_deref() {
        None => (None, to_toml(&config)),
        Some("general") => (section, to_toml(&config.general)),
        Some("analysis") => (section, to_toml(&config.analysis)),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {} (expected: general, analysis)",
                other
            )));
        }
    };

    writer.render(&ConfigReport {
        source,
        section,
        config: config_value(&config, &config_toml),
        config_toml,
    })?;

    Ok(())
}

fn to_toml<T: Serialize>(value: &T) -> String {
    toml::to_string_pretty(value).unwrap_or_else(|e| format!("(serialization error: {})", e))
}

/// JSON view of the rendered section.
fn config_value(config: &LogScopeConfig, config_toml: &str) -> serde_json::Value {
    toml::from_str::<toml::Table>(config_toml)
        .ok()
        .and_then(|table| serde_json::to_value(table).ok())
        .or_else(|| serde_json::to_value(config).ok())
        .unwrap_or(serde_json::Value::Null)
}

/// Configuration display report.
///
/// `config_toml` is used for text rendering, `config` for JSON output.
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration file path, or the built-in defaults label
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Effective values as structured data
    pub config: serde_json::Value,
    /// Serialized TOML configuration
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{}]", section);
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration file path, or the built-in defaults label
    pub source: String,
    /// Whether the configuration is valid
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}
