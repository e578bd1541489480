#[cfg(feature = "cli")]
pub mod cli;
pub mod store;

use crate::adapters::twilio::DEFAULT_API_BASE;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::Path;
pub use store::{ConfigStore, TwilioSection};

pub const SID_ENV: &str = "TWILIO_SID";
pub const TOKEN_ENV: &str = "TWILIO_TOKEN";
pub const NUMBER_ENV: &str = "TWILIO_NUMBER";
pub const API_BASE_ENV: &str = "TWILIO_API_BASE";

/// SMS 閘道憑證與發送號碼
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub api_base: String,
}

// 避免在日誌中輸出 auth token
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("from_number", &self.from_number)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GatewayConfig {
    /// 從環境變數載入，缺少的欄位改由 `SOS_RELAY_CONFIG`（或 `sos-relay.toml`）
    /// 指定的配置檔補上，最後進行驗證
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    pub fn load(store_path: Option<&Path>) -> Result<Self> {
        let store = ConfigStore::discover(store_path)?;
        let config = Self::resolve(|key| std::env::var(key).ok(), store.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// 逐欄位解析：環境變數有值時優先，否則使用配置檔的值
    pub fn resolve<F>(lookup: F, store: Option<&ConfigStore>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let section = store.and_then(ConfigStore::twilio);
        let pick = |key: &str, fallback: Option<&String>| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| fallback.cloned())
        };

        let account_sid = pick(SID_ENV, section.and_then(|s| s.sid.as_ref()));
        let auth_token = pick(TOKEN_ENV, section.and_then(|s| s.token.as_ref()));
        let from_number = pick(NUMBER_ENV, section.and_then(|s| s.number.as_ref()));
        let api_base = pick(API_BASE_ENV, section.and_then(|s| s.api_base.as_ref()));

        Ok(Self {
            account_sid: validation::validate_required_field(SID_ENV, &account_sid)?.clone(),
            auth_token: validation::validate_required_field(TOKEN_ENV, &auth_token)?.clone(),
            from_number: validation::validate_required_field(NUMBER_ENV, &from_number)?.clone(),
            api_base: api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        })
    }
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_prefix("account_sid", &self.account_sid, "AC")?;
        validation::validate_non_empty_string("auth_token", &self.auth_token)?;
        validation::validate_non_empty_string("from_number", &self.from_number)?;
        validation::validate_url("api_base", &self.api_base)?;

        tracing::debug!("✅ Gateway configuration validation passed");
        Ok(())
    }
}
