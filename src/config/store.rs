use crate::utils::error::{RelayError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// 指定配置檔路徑的環境變數
pub const CONFIG_PATH_ENV: &str = "SOS_RELAY_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "sos-relay.toml";

/// 環境變數缺少設定時的備援配置檔
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigStore {
    pub twilio: Option<TwilioSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TwilioSection {
    pub sid: Option<String>,
    pub token: Option<String>,
    pub number: Option<String>,
    pub api_base: Option<String>,
}

impl ConfigStore {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RelayError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 尋找配置檔
    ///
    /// 明確指定的路徑或 `SOS_RELAY_CONFIG` 指向的檔案必須存在；
    /// 預設的 `sos-relay.toml` 不存在時回傳 `None`
    pub fn discover(explicit: Option<&Path>) -> Result<Option<Self>> {
        if let Some(path) = explicit {
            return Self::from_file(path).map(Some);
        }

        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Self::from_file(&path).map(Some);
        }

        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            tracing::debug!("Using configuration store {}", DEFAULT_CONFIG_PATH);
            return Self::from_file(default_path).map(Some);
        }

        Ok(None)
    }

    pub fn twilio(&self) -> Option<&TwilioSection> {
        self.twilio.as_ref()
    }

    /// 替換環境變數 (例如 ${TWILIO_TOKEN})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RelayError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_twilio_section() {
        let toml_content = r#"
[twilio]
sid = "AC0123456789"
token = "secret"
number = "+15550000"
"#;

        let store = ConfigStore::from_toml_str(toml_content).unwrap();
        let twilio = store.twilio().unwrap();
        assert_eq!(twilio.sid.as_deref(), Some("AC0123456789"));
        assert_eq!(twilio.token.as_deref(), Some("secret"));
        assert_eq!(twilio.number.as_deref(), Some("+15550000"));
        assert!(twilio.api_base.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SOS_RELAY_TEST_STORE_TOKEN", "from-env");

        let toml_content = r#"
[twilio]
token = "${SOS_RELAY_TEST_STORE_TOKEN}"
number = "${SOS_RELAY_TEST_UNSET_VAR}"
"#;

        let store = ConfigStore::from_toml_str(toml_content).unwrap();
        let twilio = store.twilio().unwrap();
        assert_eq!(twilio.token.as_deref(), Some("from-env"));
        assert_eq!(
            twilio.number.as_deref(),
            Some("${SOS_RELAY_TEST_UNSET_VAR}")
        );

        std::env::remove_var("SOS_RELAY_TEST_STORE_TOKEN");
    }

    #[test]
    fn test_empty_store_has_no_twilio_section() {
        let store = ConfigStore::from_toml_str("").unwrap();
        assert!(store.twilio().is_none());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = ConfigStore::from_toml_str("[twilio\nsid = ").unwrap_err();
        assert!(matches!(err, RelayError::TomlError(_)));
    }

    #[test]
    fn test_discover_explicit_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[twilio]\nsid = \"ACfile\"\n")
            .unwrap();

        let store = ConfigStore::discover(Some(temp_file.path())).unwrap().unwrap();
        assert_eq!(store.twilio().unwrap().sid.as_deref(), Some("ACfile"));
    }

    #[test]
    fn test_discover_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = ConfigStore::discover(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, RelayError::IoError(_)));
    }
}
