use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::query::{SortDirection, SortKey, SortSpec};
use crate::remote::http::DEFAULT_TIMEOUT_SECS;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8089";
const PROJECT_DIR: &str = ".calc-history";
const CONFIG_FILE: &str = "config.toml";

/// Runtime settings merged from config files and environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server_url: String,
    pub timeout_secs: u64,
    /// Ordering applied when the command line does not choose one.
    pub sort: SortSpec,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            sort: SortSpec::default(),
        }
    }
}

/// Private: parsed representation of a config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
    server: Option<ServerSection>,
    history: Option<HistorySection>,
}

#[derive(Deserialize)]
struct ServerSection {
    url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Deserialize)]
struct HistorySection {
    sort: Option<SortKey>,
    direction: Option<SortDirection>,
}

/// Read one config file. Missing files are silently skipped; unreadable or
/// malformed ones are skipped with a warning.
fn read_config_file(path: &Path) -> Option<ConfigFile> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), "cannot read config file: {e}");
            return None;
        }
    };
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!(path = %path.display(), "ignoring invalid config file: {e}");
            None
        }
    }
}

impl AppConfig {
    /// Load config using auto-detected paths, then apply environment overrides.
    ///
    /// Priority (highest first):
    /// 1. `CALC_HISTORY_SERVER_URL`, `CALC_HISTORY_TIMEOUT_SECS`
    /// 2. `{project_root}/.calc-history/config.toml`
    /// 3. `{config_dir}/calc-history/config.toml` (e.g. `~/.config/calc-history/config.toml`)
    /// 4. Defaults
    pub fn load() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        let project = project_root_for(&cwd);
        let global = dirs::config_dir().map(|d| d.join("calc-history").join(CONFIG_FILE));
        let mut config = Self::load_from(Some(&project), global.as_deref());
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Load config from explicit paths, without environment overrides.
    /// Each field is taken from the project file, else the global file, else the default.
    pub fn load_from(project_root: Option<&Path>, global_config: Option<&Path>) -> Self {
        let project_path = project_root.map(|root| root.join(PROJECT_DIR).join(CONFIG_FILE));
        let from_project = project_path.as_deref().and_then(read_config_file);
        let from_global = global_config.and_then(read_config_file);

        let mut config = Self::default();
        // Apply the lower-priority file first so the project file wins.
        for file in [from_global, from_project].into_iter().flatten() {
            config.apply_file(file);
        }
        tracing::debug!(
            server_url = %config.server_url,
            timeout_secs = config.timeout_secs,
            "resolved config"
        );
        config
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(server) = file.server {
            if let Some(url) = server.url {
                self.server_url = url;
            }
            if let Some(timeout) = server.timeout_secs {
                self.timeout_secs = timeout;
            }
        }
        if let Some(history) = file.history {
            if let Some(key) = history.sort {
                self.sort.key = key;
            }
            if let Some(direction) = history.direction {
                self.sort.direction = direction;
            }
        }
    }

    /// Apply environment overrides through `lookup`. Unparseable values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("CALC_HISTORY_SERVER_URL").filter(|u| !u.trim().is_empty()) {
            self.server_url = url;
        }
        if let Some(timeout) = lookup("CALC_HISTORY_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.timeout_secs = timeout;
        }
    }

    /// Server URL without a trailing slash, ready for `format!("{base}/...")`.
    pub fn base_url(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }
}

/// Walk up from `dir` to find the nearest ancestor containing `.git` or `.calc-history/`.
/// Falls back to `dir` itself if neither is found.
pub fn project_root_for(dir: &Path) -> PathBuf {
    let mut current = dir.to_path_buf();
    loop {
        if current.join(".git").exists() || current.join(PROJECT_DIR).is_dir() {
            return current;
        }
        if !current.pop() {
            break;
        }
    }
    dir.to_path_buf()
}
