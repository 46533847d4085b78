//! Editor configuration for the snapshot tool.
//!
//! The CLI reads an [`EditorConfig`] from TOML: the `[properties]` table
//! controls the grid and move constraints, the `[surface]` table the size of
//! the rendered SVG. Every key is optional. A loaded file is checked for
//! values the surface cannot draw before it is handed to the editor.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use grapheditor::{GraphEditorError, config::EditorConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

impl From<ConfigError> for GraphEditorError {
    fn from(err: ConfigError) -> Self {
        GraphEditorError::Config(err.to_string())
    }
}

/// Locate and load the editor configuration for a snapshot run.
///
/// The first file found wins:
/// 1. `explicit_path`, from `--config`
/// 2. `grapheditor/config.toml` relative to the working directory
/// 3. `config.toml` in the platform config directory for `grapheditor`
///
/// Without any file the editor defaults are used: an 800x600 surface with
/// the grid hidden.
///
/// # Arguments
///
/// * `explicit_path` - Path given on the command line, if any
///
/// # Errors
///
/// Returns [`GraphEditorError::Config`] if:
/// - `explicit_path` is given but no file exists there
/// - the file is not valid TOML for [`EditorConfig`]
/// - the surface size or grid spacing is not a positive number
pub fn load_config(
    explicit_path: Option<impl AsRef<Path>>,
) -> Result<EditorConfig, GraphEditorError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("grapheditor/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "grapheditor", "grapheditor") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(EditorConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<EditorConfig, GraphEditorError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: EditorConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &EditorConfig) -> Result<(), ConfigError> {
    let checks = [
        ("surface.width", config.surface().width()),
        ("surface.height", config.surface().height()),
        ("properties.grid_spacing", config.properties().grid_spacing()),
    ];
    for (key, value) in checks {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "`{key}` must be a positive number, got {value}"
            )));
        }
    }
    Ok(())
}
