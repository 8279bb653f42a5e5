//! Configuration file discovery and loading.

use std::env::VarError;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::ProbeConfig;
use crate::discovery::ProbeContext;
use crate::error::{ProbeError, Result};

/// Environment variable overriding the home directory.
pub const HOME_ENV: &str = "IDEPROBE_HOME";

/// Find the user's global config at `~/.ideprobe/config.yml`.
pub fn user_config_path() -> Option<PathBuf> {
    let path = dirs::home_dir()?.join(".ideprobe").join("config.yml");
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ProbeConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ProbeError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ProbeError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a `ProbeConfig`.
///
/// An empty document is the default config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ProbeConfig> {
    if content.trim().is_empty() {
        return Ok(ProbeConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| ProbeError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the user global config, then the explicitly requested one on top.
///
/// A missing global config is not an error; a missing explicit config is.
pub fn load_config(config_override: Option<&Path>) -> Result<ProbeConfig> {
    let mut config = match user_config_path() {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)?
        }
        None => ProbeConfig::default(),
    };

    if let Some(path) = config_override {
        tracing::debug!("Loading config from {}", path.display());
        config = config.merge(load_config_file(path)?);
    }
    Ok(config)
}

/// Apply configuration, environment and the `--home` flag to a context.
///
/// Home precedence: `home_flag`, then `IDEPROBE_HOME`, then the config
/// file, then whatever `ctx` already holds.
pub fn build_context<F>(
    mut ctx: ProbeContext,
    config: &ProbeConfig,
    home_flag: Option<PathBuf>,
    env_fn: F,
) -> ProbeContext
where
    F: Fn(&str) -> std::result::Result<String, VarError>,
{
    let env_home = env_fn(HOME_ENV)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);

    if let Some(home) = home_flag.or(env_home).or_else(|| config.home.clone()) {
        ctx.home = Some(home);
    }
    if let Some(dirs) = &config.application_dirs {
        ctx.application_dirs = Some(dirs.clone());
    }
    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;
    use crate::sys::MemoryFs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn empty_ctx() -> ProbeContext {
        ProbeContext::new(Platform::Linux, Arc::new(MemoryFs::new())).with_home("/detected")
    }

    fn no_env(_: &str) -> std::result::Result<String, VarError> {
        Err(VarError::NotPresent)
    }

    #[test]
    fn parse_full_config() {
        let config = parse_config(
            "home: /srv/dev\napplication_dirs:\n  - /Applications\n  - /opt/apps\n",
            Path::new("config.yml"),
        )
        .unwrap();
        assert_eq!(config.home, Some(PathBuf::from("/srv/dev")));
        assert_eq!(
            config.application_dirs,
            Some(vec![PathBuf::from("/Applications"), PathBuf::from("/opt/apps")])
        );
    }

    #[test]
    fn parse_empty_is_default() {
        let config = parse_config("\n", Path::new("config.yml")).unwrap();
        assert_eq!(config, ProbeConfig::default());
    }

    #[test]
    fn parse_rejects_unknown_fields() {
        let err = parse_config("hom: /srv/dev\n", Path::new("/etc/ideprobe.yml")).unwrap_err();
        assert!(matches!(err, ProbeError::ConfigParseError { .. }));
        assert!(err.to_string().contains("/etc/ideprobe.yml"));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load_config_file(&temp.path().join("missing.yml")).unwrap_err();
        assert!(matches!(err, ProbeError::ConfigNotFound { .. }));
    }

    #[test]
    fn load_file_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "home: /from/file\n").unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.home, Some(PathBuf::from("/from/file")));
    }

    #[test]
    fn build_context_keeps_detected_home_without_overrides() {
        let ctx = build_context(empty_ctx(), &ProbeConfig::default(), None, no_env);
        assert_eq!(ctx.home, Some(PathBuf::from("/detected")));
        assert!(ctx.application_dirs.is_none());
    }

    #[test]
    fn build_context_precedence() {
        let config = ProbeConfig {
            home: Some(PathBuf::from("/from/file")),
            application_dirs: Some(vec![PathBuf::from("/opt/apps")]),
        };
        let env = |key: &str| {
            if key == HOME_ENV {
                Ok("/from/env".to_string())
            } else {
                Err(VarError::NotPresent)
            }
        };

        let ctx = build_context(empty_ctx(), &config, None, no_env);
        assert_eq!(ctx.home, Some(PathBuf::from("/from/file")));
        assert_eq!(ctx.application_dirs, Some(vec![PathBuf::from("/opt/apps")]));

        let ctx = build_context(empty_ctx(), &config, None, env);
        assert_eq!(ctx.home, Some(PathBuf::from("/from/env")));

        let ctx = build_context(empty_ctx(), &config, Some(PathBuf::from("/from/flag")), env);
        assert_eq!(ctx.home, Some(PathBuf::from("/from/flag")));
    }

    #[test]
    fn build_context_ignores_empty_env() {
        let env = |_: &str| Ok(String::new());
        let ctx = build_context(empty_ctx(), &ProbeConfig::default(), None, env);
        assert_eq!(ctx.home, Some(PathBuf::from("/detected")));
    }
}
