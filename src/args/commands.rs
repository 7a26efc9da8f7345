//! Subcommand handlers.

use std::fmt::Write;
use std::process::ExitCode;

use leafscan::prefs::PreferencesStore;
use leafscan::state::{Crop, PreferenceSet};
use leafscan::storage::KeyValueStore;
use leafscan::translate::Translator;

use crate::args::Command;

/// What: Run one subcommand against an initialized store.
///
/// Inputs:
/// - `store`: Hydrated preferences store.
/// - `command`: Parsed subcommand.
///
/// Output:
/// - `ExitCode::SUCCESS`, or `ExitCode::FAILURE` when a change could not be persisted.
///
/// Details:
/// - Mutations print the resulting value and flush the write queue before returning.
/// - Writes that exhausted their retries are reported on stderr.
pub async fn execute<S: KeyValueStore, T: Translator>(
    store: &PreferencesStore<S, T>,
    command: &Command,
) -> ExitCode {
    match command {
        Command::Show { json } => {
            let prefs = store.read();
            if *json {
                match serde_json::to_string_pretty(&prefs) {
                    Ok(s) => println!("{s}"),
                    Err(e) => {
                        tracing::error!(error = %e, "failed to serialize preferences");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print!("{}", render_summary(&prefs));
            }
        }
        Command::SetThreshold { crop, value } => {
            store.set_confidence_threshold(*crop, *value);
            println!("{crop} = {:.2}", store.read().threshold(*crop));
        }
        Command::SetAutoSave { enabled } => {
            store.set_auto_save_photos(*enabled);
            println!("autoSavePhotos = {enabled}");
        }
        Command::SetDarkMode { enabled } => {
            store.set_dark_mode(*enabled);
            println!("darkMode = {enabled}");
        }
        Command::SetUnit { unit } => {
            store.set_temperature_unit(*unit);
            println!("temperatureUnit = {}", unit.as_config_key());
        }
        Command::SetLanguage { language, .. } => {
            store.set_language(*language).await;
            let prefs = store.read();
            println!(
                "language = {language} ({:?} translations)",
                prefs.translation_source
            );
            println!("{}", prefs.text("settings.title"));
        }
        Command::Text { key } => println!("{}", store.read().text(key)),
        Command::Check { crop, confidence } => {
            let prefs = store.read();
            println!("{}", render_check(&prefs, *crop, *confidence));
        }
    }

    if command.is_mutation() {
        store.flush().await;
        let letters = store.dead_letters();
        if !letters.is_empty() {
            for letter in &letters {
                eprintln!(
                    "could not save {} = {} after {} attempts: {}",
                    letter.key, letter.value, letter.attempts, letter.error
                );
            }
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

/// What: Human-readable summary of a snapshot, labelled in the active language.
///
/// Output:
/// - One `label: value` line per preference, thresholds indented per crop.
fn render_summary(prefs: &PreferenceSet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", prefs.text("settings.title"));
    let _ = writeln!(out, "  {}:", prefs.text("settings.confidence_threshold"));
    for crop in Crop::ALL {
        let _ = writeln!(out, "    {crop:<6} {:.2}", prefs.threshold(crop));
    }
    let _ = writeln!(
        out,
        "  {}: {}",
        prefs.text("settings.auto_save"),
        prefs.auto_save_photos
    );
    let _ = writeln!(out, "  {}: {}", prefs.text("settings.dark_mode"), prefs.dark_mode);
    let _ = writeln!(
        out,
        "  {}: {}",
        prefs.text("settings.temperature_unit"),
        prefs.temperature_unit.as_config_key()
    );
    let _ = writeln!(
        out,
        "  {}: {} ({:?})",
        prefs.text("settings.language"),
        prefs.language,
        prefs.translation_source
    );
    out
}

/// What: Describe whether a detection passes the crop's threshold.
fn render_check(prefs: &PreferenceSet, crop: Crop, confidence: f64) -> String {
    let threshold = prefs.threshold(crop);
    if prefs.accepts(crop, confidence) {
        format!(
            "{crop}: {} {:.0}% >= {:.0}%",
            prefs.text("scan.confidence"),
            confidence * 100.0,
            threshold * 100.0
        )
    } else {
        format!(
            "{crop}: {} ({:.0}% < {:.0}%)",
            prefs.text("scan.no_detection"),
            confidence * 100.0,
            threshold * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leafscan::i18n;
    use leafscan::state::Language;

    #[test]
    /// What: Summary lists every crop and uses the active language for labels.
    ///
    /// - Input: Default preferences, then static Tagalog strings
    /// - Output: English labels first, Tagalog labels after switching
    fn summary_uses_active_labels() {
        let mut prefs = PreferenceSet::default();
        let summary = render_summary(&prefs);
        assert!(summary.starts_with("Settings\n"));
        assert!(summary.contains("    rice   0.70\n    mango  0.70\n"));
        assert!(summary.contains("    corn   0.70\n"));
        assert!(summary.contains("  Dark Mode: false\n"));
        assert!(summary.ends_with("(Static)\n"));

        prefs.active_translations = i18n::static_translations(Language::Tl);
        assert!(render_summary(&prefs).starts_with("Mga Setting\n"));
    }

    #[test]
    /// What: Check output reflects the threshold decision.
    ///
    /// - Input: Default rice threshold with 0.82 and 0.50 confidences
    /// - Output: Pass line and no-detection line
    fn check_reports_decision() {
        let prefs = PreferenceSet::default();
        assert_eq!(
            render_check(&prefs, Crop::Rice, 0.82),
            "rice: Confidence 82% >= 70%"
        );
        assert!(render_check(&prefs, Crop::Rice, 0.5).contains("No disease detected"));
    }
}
