use crate::utils::error::GatewayError;
use async_trait::async_trait;

/// 供應商接受訊息後回傳的識別資料
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub sid: String,
}

#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send(&self, from: &str, to: &str, body: &str)
        -> std::result::Result<SentMessage, GatewayError>;
}
