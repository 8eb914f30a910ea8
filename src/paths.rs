//! XDG-compliant path resolution for resposta.
//!
//! The assistant keeps two things on disk: its TOML config and the JSON
//! answer database. Both follow the XDG Base Directory Specification.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors from path resolution.
#[derive(Debug, Error, Diagnostic)]
pub enum PathError {
    #[error("cannot determine home directory")]
    #[diagnostic(
        code(resposta::paths::no_home),
        help("Set the HOME environment variable or pass --config and --database explicitly.")
    )]
    NoHome,

    #[error("failed to create directory: {path}")]
    #[diagnostic(
        code(resposta::paths::create_dir),
        help("Check that the parent directory exists and you have write permissions.")
    )]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type PathResult<T> = std::result::Result<T, PathError>;

/// Global XDG-compliant directories for resposta.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// `$XDG_CONFIG_HOME/resposta/`
    pub config_dir: PathBuf,
    /// `$XDG_DATA_HOME/resposta/`
    pub data_dir: PathBuf,
}

impl AppPaths {
    /// Resolve XDG directories from environment variables with standard fallbacks.
    pub fn resolve() -> PathResult<Self> {
        let home = std::env::var("HOME")
            .map(PathBuf::from)
            .map_err(|_| PathError::NoHome)?;

        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".config"))
            .join("resposta");

        let data_dir = std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".local/share"))
            .join("resposta");

        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    /// Create both base directories. Idempotent.
    pub fn ensure_dirs(&self) -> PathResult<()> {
        for dir in [&self.config_dir, &self.data_dir] {
            std::fs::create_dir_all(dir).map_err(|e| PathError::CreateDir {
                path: dir.display().to_string(),
                source: e,
            })?;
        }
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Default location of the answer database.
    pub fn database_file(&self) -> PathBuf {
        self.data_dir.join("database.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_use_xdg_layout() {
        // Env vars are not mutated here (unsafe in edition 2024).
        let Ok(paths) = AppPaths::resolve() else {
            return;
        };
        assert!(
            paths.config_dir.to_string_lossy().contains("resposta"),
            "config_dir should contain 'resposta': {}",
            paths.config_dir.display()
        );
        assert!(paths.config_file().starts_with(&paths.config_dir));
        assert!(paths.database_file().starts_with(&paths.data_dir));
    }

    #[test]
    fn files_derive_from_dirs() {
        let paths = AppPaths {
            config_dir: PathBuf::from("/cfg/resposta"),
            data_dir: PathBuf::from("/data/resposta"),
        };
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/cfg/resposta/config.toml")
        );
        assert_eq!(
            paths.database_file(),
            PathBuf::from("/data/resposta/database.json")
        );
    }

    #[test]
    fn ensure_dirs_creates_both() {
        let dir = tempfile::TempDir::new().unwrap();
        let paths = AppPaths {
            config_dir: dir.path().join("cfg"),
            data_dir: dir.path().join("data"),
        };
        paths.ensure_dirs().unwrap();
        assert!(paths.config_dir.is_dir());
        assert!(paths.data_dir.is_dir());
    }
}
