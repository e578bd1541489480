use crate::core::{CallerIdentity, Contact, SendResult, SmsGateway, SosRequest, SosResponse};
use crate::utils::error::{RelayError, Result};

/// 每次請求的收件人上限，超出的聯絡人直接捨棄
pub const MAX_RECIPIENTS: usize = 3;

/// 供應商錯誤沒有訊息時使用的預設文字
pub const SEND_FAILED_FALLBACK: &str = "send failed";

/// 通過驗證的請求：去除空白的內容與截斷後的收件人
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub body: String,
    pub recipients: Vec<Contact>,
    pub dropped: usize,
}

pub struct SosRelay<G: SmsGateway> {
    gateway: G,
    from_number: String,
}

impl<G: SmsGateway> SosRelay<G> {
    pub fn new(gateway: G, from_number: impl Into<String>) -> Self {
        Self {
            gateway,
            from_number: from_number.into(),
        }
    }

    /// 驗證請求並轉寄給最多 [`MAX_RECIPIENTS`] 位聯絡人
    ///
    /// 只有被拒絕的請求（`Unauthenticated`、`InvalidArgument`）會回傳 `Err`，
    /// 且此時尚未寄出任何訊息。開始寄送後一律回傳 `Ok`：供應商失敗轉為
    /// `SosResponse::Failed`，失敗前已寄出的結果不會回報
    pub async fn handle(
        &self,
        caller: Option<&CallerIdentity>,
        request: SosRequest,
    ) -> Result<SosResponse> {
        let validated = validate(caller, request)?;

        tracing::info!("Relaying SOS to {} recipient(s)", validated.recipients.len());
        if validated.dropped > 0 {
            tracing::warn!(
                "Recipient cap of {} reached, dropped {} contact(s)",
                MAX_RECIPIENTS,
                validated.dropped
            );
        }

        let mut results = Vec::with_capacity(validated.recipients.len());
        let outcome = self
            .dispatch(&validated.recipients, &validated.body, &mut results)
            .await;

        match outcome {
            Ok(()) => {
                tracing::info!("✅ SOS relayed, {} message(s) sent", results.len());
                Ok(SosResponse::Delivered { results })
            }
            Err(RelayError::ProviderSendFailure(e)) => {
                tracing::error!(
                    "❌ SMS provider send error after {} delivered message(s): {:?}",
                    results.len(),
                    e
                );
                let error = e
                    .provider_message()
                    .unwrap_or_else(|| SEND_FAILED_FALLBACK.to_string());
                Ok(SosResponse::Failed { error })
            }
            Err(other) => Err(other),
        }
    }

    /// 依序寄送，遇到第一個供應商錯誤即停止
    async fn dispatch(
        &self,
        recipients: &[Contact],
        body: &str,
        results: &mut Vec<SendResult>,
    ) -> Result<()> {
        for (index, contact) in recipients.iter().enumerate() {
            let to = contact.phone.trim();
            if to.is_empty() {
                tracing::debug!("Skipping recipient #{} with blank phone", index + 1);
                continue;
            }

            tracing::debug!("Sending SOS to recipient #{}", index + 1);
            let sent = self.gateway.send(&self.from_number, to, body).await?;
            tracing::debug!("Recipient #{} accepted as {}", index + 1, sent.sid);

            results.push(SendResult {
                to: to.to_string(),
                provider_message_id: sent.sid,
            });
        }
        Ok(())
    }
}

pub fn validate(caller: Option<&CallerIdentity>, request: SosRequest) -> Result<ValidatedRequest> {
    if caller.is_none() {
        return Err(RelayError::Unauthenticated {
            message: "Sign in required.".to_string(),
        });
    }

    let body = request.message.trim();
    if body.is_empty() || request.contacts.is_empty() {
        return Err(RelayError::InvalidArgument {
            message: "contacts and message are required".to_string(),
        });
    }

    let body = body.to_string();
    let mut recipients = request.contacts;
    let dropped = recipients.len().saturating_sub(MAX_RECIPIENTS);
    recipients.truncate(MAX_RECIPIENTS);

    Ok(ValidatedRequest {
        body,
        recipients,
        dropped,
    })
}
