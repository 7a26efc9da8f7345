//! Filesystem locations for the preferences file and logs.

use std::env;
use std::path::{Path, PathBuf};

/// File name of the persisted preferences inside the config directory.
pub const PREFERENCES_FILE: &str = "preferences.conf";

/// Application directory name under the config base.
const APP_DIR: &str = "leafscan";

/// What: Base directory for per-user configuration.
///
/// Output:
/// - `$XDG_CONFIG_HOME` when set and non-blank, else `$HOME/.config`, else `./.config`.
fn config_base() -> PathBuf {
    env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.to_string_lossy().trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            env::var_os("HOME")
                .map_or_else(|| PathBuf::from("."), PathBuf::from)
                .join(".config")
        })
}

/// Config directory for Leafscan (`<config base>/leafscan`), created on demand.
///
/// Creation failures are logged; the path is returned regardless so callers can
/// report the problem when they first touch the directory.
#[must_use]
pub fn config_dir() -> PathBuf {
    let dir = config_base().join(APP_DIR);
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!(path = %dir.display(), error = %e, "failed to create config directory");
    }
    dir
}

/// Logs directory under `base`: `<base>/logs` (ensured to exist).
#[must_use]
pub fn logs_dir(base: &Path) -> PathBuf {
    let dir = base.join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Path of the preferences file under `base`.
#[must_use]
pub fn preferences_path(base: &Path) -> PathBuf {
    base.join(PREFERENCES_FILE)
}
