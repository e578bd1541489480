use crate::config::GatewayConfig;
use crate::core::{SentMessage, SmsGateway};
use crate::utils::error::{GatewayError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "https://api.twilio.com";

/// Twilio Messages API 客戶端，每個行程建立一次並唯讀共用
#[derive(Clone)]
pub struct TwilioClient {
    client: Client,
    account_sid: String,
    auth_token: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    code: Option<i64>,
    message: Option<String>,
}

impl TwilioClient {
    /// 驗證配置後建立客戶端
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            client: Client::new(),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base, self.account_sid
        )
    }
}

#[async_trait]
impl SmsGateway for TwilioClient {
    async fn send(
        &self,
        from: &str,
        to: &str,
        body: &str,
    ) -> std::result::Result<SentMessage, GatewayError> {
        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("From", from), ("To", to), ("Body", body)])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Twilio response status: {}", status);

        if !status.is_success() {
            // 錯誤內容無法解析時仍回報狀態碼
            let text = response.text().await?;
            let error_body = serde_json::from_str::<TwilioErrorBody>(&text).ok();
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                code: error_body.as_ref().and_then(|b| b.code),
                message: error_body.and_then(|b| b.message),
            });
        }

        let resource: MessageResource = response.json().await.map_err(|e| {
            if e.is_decode() {
                GatewayError::MalformedResponse {
                    reason: format!("invalid message resource: {}", e),
                }
            } else {
                GatewayError::Transport(e)
            }
        })?;

        match resource.sid {
            Some(sid) if !sid.is_empty() => Ok(SentMessage { sid }),
            _ => Err(GatewayError::MalformedResponse {
                reason: "message resource has no sid".to_string(),
            }),
        }
    }
}
