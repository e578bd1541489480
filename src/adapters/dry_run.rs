use crate::core::{SentMessage, SmsGateway};
use crate::utils::error::GatewayError;
use async_trait::async_trait;

/// 只記錄日誌不實際寄送，供 CLI `--dry-run` 使用
#[derive(Debug, Clone, Default)]
pub struct DryRunGateway;

#[async_trait]
impl SmsGateway for DryRunGateway {
    async fn send(
        &self,
        from: &str,
        to: &str,
        body: &str,
    ) -> std::result::Result<SentMessage, GatewayError> {
        tracing::info!("[dry-run] {} -> {} ({} chars)", from, to, body.chars().count());
        Ok(SentMessage {
            sid: format!("dry-run-{}", to),
        })
    }
}
