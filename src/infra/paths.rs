// src/infra/paths.rs — Config and data path resolution
//
// EPIMINER_HOME, when set, holds both the config file and any saved results.
// Otherwise config lives in ~/.epiminer/ and results under XDG_DATA_HOME/epiminer.

use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::OnceLock;

static PROJECT_DIRS: OnceLock<Option<ProjectDirs>> = OnceLock::new();

fn project_dirs() -> Option<&'static ProjectDirs> {
    PROJECT_DIRS
        .get_or_init(|| ProjectDirs::from("", "", "epiminer"))
        .as_ref()
}

fn epiminer_home() -> Option<PathBuf> {
    std::env::var_os("EPIMINER_HOME").map(PathBuf::from)
}

/// Home directory, falling back to the working directory when it cannot be determined.
pub fn dirs_home() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration directory: $EPIMINER_HOME/ or ~/.epiminer/
pub fn config_dir() -> PathBuf {
    if let Some(home) = epiminer_home() {
        return home;
    }
    dirs_home().join(".epiminer")
}

/// Data directory: $EPIMINER_HOME/data/ or ~/.local/share/epiminer/
pub fn data_dir() -> PathBuf {
    if let Some(home) = epiminer_home() {
        return home.join("data");
    }
    match project_dirs() {
        Some(dirs) => dirs.data_local_dir().to_path_buf(),
        None => config_dir().join("data"),
    }
}

/// Where `mine --save` writes result files.
pub fn results_dir() -> PathBuf {
    data_dir().join("results")
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
