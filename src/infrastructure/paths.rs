//! Path resolution following the XDG base directory layout.

use crate::Config;
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "dexview";

/// Returns the data directory for the favorites store and trace file.
///
/// Resolution order: `config.data_dir` (with `~` expanded), then
/// `$XDG_DATA_HOME/dexview`, then `$HOME/.local/share/dexview`. Falls back to a
/// relative `.dexview` directory when no home directory is known.
///
/// # Examples
///
/// ```
/// use dexview::infrastructure::data_dir;
/// use dexview::Config;
///
/// let config = Config { data_dir: Some("/tmp/dex".into()), ..Config::default() };
/// assert_eq!(data_dir(&config).to_str(), Some("/tmp/dex"));
/// ```
#[must_use]
pub fn data_dir(config: &Config) -> PathBuf {
    if let Some(dir) = config.data_dir.as_deref().filter(|d| !d.is_empty()) {
        return PathBuf::from(expand_tilde(dir));
    }
    xdg_dir("XDG_DATA_HOME", &[".local", "share"])
}

/// Returns the directory searched for `config.toml`.
///
/// `$XDG_CONFIG_HOME/dexview`, else `$HOME/.config/dexview`.
#[must_use]
pub fn config_dir() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", &[".config"])
}

fn xdg_dir(variable: &str, home_relative: &[&str]) -> PathBuf {
    if let Some(base) = env::var_os(variable).filter(|v| !v.is_empty()) {
        return PathBuf::from(base).join(APP_DIR);
    }

    env::var_os("HOME").filter(|v| !v.is_empty()).map_or_else(
        || PathBuf::from(format!(".{APP_DIR}")),
        |home| {
            home_relative
                .iter()
                .fold(PathBuf::from(home), |path, part| path.join(part))
                .join(APP_DIR)
        },
    )
}

/// Expands a leading `~` to `$HOME`.
///
/// Paths without a leading `~`, or with no `$HOME` set, are returned unchanged.
///
/// # Examples
///
/// ```
/// use dexview::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let Some(home) = env::var("HOME").ok().filter(|h| !h.is_empty()) else {
        return path.to_string();
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{rest}", home.trim_end_matches('/'))
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_data_dir_wins() {
        let config = Config {
            data_dir: Some("/srv/dex".into()),
            ..Config::default()
        };
        assert_eq!(data_dir(&config), PathBuf::from("/srv/dex"));
    }

    #[test]
    fn default_dirs_end_in_app_name() {
        let config = Config::default();
        assert!(data_dir(&config).ends_with(APP_DIR) || data_dir(&config).ends_with(".dexview"));
        assert!(config_dir().ends_with(APP_DIR) || config_dir().ends_with(".dexview"));
    }

    #[test]
    fn non_tilde_paths_are_untouched() {
        assert_eq!(expand_tilde("relative/dir"), "relative/dir");
        assert_eq!(expand_tilde("/abs/~/dir"), "/abs/~/dir");
    }
}
