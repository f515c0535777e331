use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::client::DEFAULT_BASE_URL;

/// Environment variable that overrides the configured service URL.
pub const URL_ENV: &str = "SEMANTICHECK_URL";

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    pub fps: Option<u32>,
}

impl ConfigFile {
    pub fn base_url(&self) -> Option<&str> {
        self.server.as_ref()?.base_url.as_deref()
    }

    pub fn theme(&self) -> Option<&str> {
        self.display.as_ref()?.theme.as_deref()
    }

    pub fn fps(&self) -> Option<u32> {
        self.display.as_ref()?.fps
    }
}

/// Platform config directory path: `<config_dir>/semanticheck/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("semanticheck").join("config.toml"))
}

/// Load config by cascading CWD `.semanticheck.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".semanticheck.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        server: Some(ServerConfig {
            base_url: overlay
                .base_url()
                .or_else(|| base.base_url())
                .map(str::to_string),
        }),
        display: Some(DisplayConfig {
            theme: overlay
                .theme()
                .or_else(|| base.theme())
                .map(str::to_string),
            fps: overlay.fps().or_else(|| base.fps()),
        }),
    }
}

/// Resolve the service URL: flag, then `SEMANTICHECK_URL`, then config, then
/// the built-in default.
pub fn resolve_base_url(flag: Option<&str>, config: &ConfigFile) -> String {
    let env = std::env::var(URL_ENV).ok();
    pick_base_url(flag, env.as_deref(), config)
}

fn pick_base_url(flag: Option<&str>, env: Option<&str>, config: &ConfigFile) -> String {
    [flag, env, config.base_url()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn with_url(url: &str) -> ConfigFile {
        ConfigFile {
            server: Some(ServerConfig {
                base_url: Some(url.into()),
            }),
            display: None,
        }
    }

    #[test]
    fn loads_partial_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[display]\ntheme = \"modern\"").unwrap();
        let cfg = load_from_path(f.path()).unwrap();
        assert_eq!(cfg.theme(), Some("modern"));
        assert_eq!(cfg.base_url(), None);
        assert_eq!(cfg.fps(), None);
    }

    #[test]
    fn bad_toml_is_ignored() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[server\nbase_url = ").unwrap();
        assert!(load_from_path(f.path()).is_none());
        assert!(load_from_path(Path::new("/nonexistent/semanticheck.toml")).is_none());
    }

    #[test]
    fn overlay_wins_field_by_field() {
        let base = ConfigFile {
            server: Some(ServerConfig {
                base_url: Some("http://base:8000".into()),
            }),
            display: Some(DisplayConfig {
                theme: Some("hacker".into()),
                fps: Some(30),
            }),
        };
        let overlay = ConfigFile {
            server: None,
            display: Some(DisplayConfig {
                theme: Some("modern".into()),
                fps: None,
            }),
        };
        let merged = merge(base, overlay);
        assert_eq!(merged.base_url(), Some("http://base:8000"));
        assert_eq!(merged.theme(), Some("modern"));
        assert_eq!(merged.fps(), Some(30));
    }

    #[test]
    fn base_url_precedence() {
        let cfg = with_url("http://config:1");
        assert_eq!(
            pick_base_url(Some("http://flag:1"), Some("http://env:1"), &cfg),
            "http://flag:1"
        );
        assert_eq!(pick_base_url(None, Some("http://env:1"), &cfg), "http://env:1");
        assert_eq!(pick_base_url(None, None, &cfg), "http://config:1");
        assert_eq!(
            pick_base_url(None, None, &ConfigFile::default()),
            DEFAULT_BASE_URL
        );
    }

    #[test]
    fn blank_sources_are_skipped() {
        let cfg = with_url("http://config:1");
        assert_eq!(pick_base_url(Some("  "), Some(""), &cfg), "http://config:1");
    }
}
