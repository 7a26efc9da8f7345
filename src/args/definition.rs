//! Command-line argument definitions.

use clap::{ArgAction, Parser, Subcommand};

use leafscan::state::{Crop, Language, TemperatureUnit};

/// Leafscan - inspect and change crop-scanner preferences
#[derive(Parser, Debug)]
#[command(name = "leafscan")]
#[command(version)]
#[command(about = "Inspect and change crop-scanner preferences", long_about = None)]
pub struct Args {
    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Use this configuration directory instead of ~/.config/leafscan
    #[arg(long)]
    pub config_dir: Option<String>,

    /// Action to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands operating on the persisted preferences.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the current preferences
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the confidence threshold for a crop (0.0 - 1.0)
    SetThreshold {
        /// Crop: rice, mango, soil or corn
        #[arg(value_parser = parse_crop)]
        crop: Crop,
        /// Minimum confidence
        value: f64,
    },
    /// Turn saving captured photos on or off
    SetAutoSave {
        /// true/false, yes/no, on/off
        #[arg(value_parser = parse_flag, action = ArgAction::Set)]
        enabled: bool,
    },
    /// Turn dark mode on or off
    SetDarkMode {
        /// true/false, yes/no, on/off
        #[arg(value_parser = parse_flag, action = ArgAction::Set)]
        enabled: bool,
    },
    /// Set the temperature unit for weather readings
    SetUnit {
        /// celsius or fahrenheit
        #[arg(value_parser = parse_unit)]
        unit: TemperatureUnit,
    },
    /// Set the UI language and refresh translations
    SetLanguage {
        /// en or tl
        #[arg(value_parser = parse_language)]
        language: Language,
        /// Skip live translation and use the built-in table
        #[arg(long)]
        offline: bool,
    },
    /// Print one UI string in the current language
    Text {
        /// Dot-notation key, e.g. settings.language
        key: String,
    },
    /// Check whether a detection would be shown for a crop
    Check {
        /// Crop: rice, mango, soil or corn
        #[arg(value_parser = parse_crop)]
        crop: Crop,
        /// Model confidence of the detection
        confidence: f64,
    },
}

impl Command {
    /// Whether this command changes stored preferences.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::SetThreshold { .. }
                | Self::SetAutoSave { .. }
                | Self::SetDarkMode { .. }
                | Self::SetUnit { .. }
                | Self::SetLanguage { .. }
        )
    }
}

/// Parse a crop argument (case-insensitive).
fn parse_crop(s: &str) -> Result<Crop, String> {
    Crop::from_config_key(&s.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown crop '{s}' (expected rice, mango, soil or corn)"))
}

/// Parse a language argument.
fn parse_language(s: &str) -> Result<Language, String> {
    Language::from_config_key(&s.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown language '{s}' (expected en or tl)"))
}

/// Parse a temperature unit argument.
fn parse_unit(s: &str) -> Result<TemperatureUnit, String> {
    TemperatureUnit::from_config_key(&s.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown unit '{s}' (expected celsius or fahrenheit)"))
}

/// Parse an on/off argument.
fn parse_flag(s: &str) -> Result<bool, String> {
    leafscan::util::parse_bool(s).ok_or_else(|| format!("expected true or false, got '{s}'"))
}
