use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("could not determine the user home directory")]
    NoHomeDir,

    #[error("home_dir must be absolute after expansion: {0}")]
    NotAbsolute(String),

    #[error("failed to create directory {path}: {source}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Resolve the server home directory.
///
/// - `None` (or empty) resolves to `<user home>/<default_subdir>`.
/// - A leading `~` is expanded to the user home.
/// - Relative paths are resolved against the current working directory.
///
/// When `create` is set the directory is created (with parents).
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf, PathError> {
    let resolved = match configured.as_deref().map(str::trim) {
        None | Some("") => user_home()?.join(default_subdir),
        Some(raw) => expand_tilde(raw)?,
    };

    let resolved = if resolved.is_relative() {
        std::env::current_dir()
            .map_err(|_| PathError::NotAbsolute(resolved.to_string_lossy().to_string()))?
            .join(resolved)
    } else {
        resolved
    };

    if create {
        std::fs::create_dir_all(&resolved).map_err(|source| PathError::Create {
            path: resolved.to_string_lossy().to_string(),
            source,
        })?;
    }

    Ok(resolved)
}

fn user_home() -> Result<PathBuf, PathError> {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return Ok(PathBuf::from(appdata));
        }
    }
    dirs::home_dir().ok_or(PathError::NoHomeDir)
}

fn expand_tilde(raw: &str) -> Result<PathBuf, PathError> {
    if raw == "~" {
        return user_home();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(user_home()?.join(rest));
    }
    Ok(Path::new(raw).to_path_buf())
}
