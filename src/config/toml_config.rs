use crate::config::ApiConfig;
use crate::utils::error::{CommandError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Path of an optional TOML file with [`ApiConfig`] settings.
pub const CONFIG_PATH_ENV: &str = "PIZZA_CLI_CONFIG";
pub const BASE_URL_ENV: &str = "PIZZA_API_URL";
pub const LANG_ENV: &str = "PIZZA_API_LANG";
pub const TIMEOUT_ENV: &str = "PIZZA_API_TIMEOUT";

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

impl ApiConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommandError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content)
            .map_err(|e| CommandError::config(format!("TOML parsing error: {}", e)))
    }

    /// Defaults, then the file named by `PIZZA_CLI_CONFIG`, then single-value env overrides.
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            Some(path) => {
                tracing::debug!("Loading API config from {}", path);
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        if let Some(base_url) = lookup(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        if let Some(lang) = lookup(LANG_ENV) {
            config.lang = lang;
        }
        if let Some(timeout) = lookup(TIMEOUT_ENV) {
            let seconds = timeout.trim().parse::<u64>().map_err(|_| {
                CommandError::config(format!("{} must be a whole number of seconds", TIMEOUT_ENV))
            })?;
            config.timeout_seconds = Some(seconds);
        }

        config.validate()?;
        Ok(config)
    }
}

/// 替換環境變數 (例如 ${API_HOST})，未設定的保留原樣
fn substitute_env_vars(content: &str) -> String {
    ENV_VAR
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}
