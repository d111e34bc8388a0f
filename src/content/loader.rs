//! Loader for the gameplay defaults RON file at startup.

use ron::Options;
use std::fs;
use std::path::{Path, PathBuf};

use super::data::GameplayDefaults;

pub const GAMEPLAY_DEFAULTS_FILE: &str = "gameplay_defaults.ron";

/// Error type for content loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ContentLoadError {
    #[error("Failed to load {file}: IO error: {source}")]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to load {file}: Parse error: {source}")]
    Parse {
        file: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse gameplay defaults from RON text.
pub fn parse_gameplay_defaults(
    file: &Path,
    contents: &str,
) -> Result<GameplayDefaults, ContentLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|source| ContentLoadError::Parse {
            file: file.to_path_buf(),
            source,
        })
}

/// Load `gameplay_defaults.ron` from the data directory.
pub fn load_gameplay_defaults(base_path: &Path) -> Result<GameplayDefaults, ContentLoadError> {
    let path = base_path.join(GAMEPLAY_DEFAULTS_FILE);
    let contents = fs::read_to_string(&path).map_err(|source| ContentLoadError::Io {
        file: path.clone(),
        source,
    })?;

    parse_gameplay_defaults(&path, &contents)
}
