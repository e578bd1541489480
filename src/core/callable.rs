use crate::core::relay::SosRelay;
use crate::core::{CallerIdentity, SmsGateway, SosRequest, SosResponse};
use crate::utils::error::RelayError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 呼叫請求：平台提供的驗證資訊加上呼叫者的資料
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallableRequest {
    #[serde(default)]
    pub auth: Option<CallerIdentity>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: SosRequest,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Unauthenticated,
    InvalidArgument,
    Internal,
}

impl ErrorCode {
    pub fn status(&self) -> &'static str {
        match self {
            ErrorCode::Unauthenticated => "UNAUTHENTICATED",
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Unauthenticated => "unauthenticated",
            ErrorCode::InvalidArgument => "invalid-argument",
            ErrorCode::Internal => "internal",
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            ErrorCode::Unauthenticated => 401,
            ErrorCode::InvalidArgument => 400,
            ErrorCode::Internal => 500,
        }
    }
}

/// 協定層級的拒絕，取代回應內容回傳給呼叫者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableError {
    pub code: ErrorCode,
    pub message: String,
}

impl fmt::Display for CallableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for CallableError {}

impl Serialize for CallableError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CallableError", 2)?;
        state.serialize_field("status", self.code.status())?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}

impl From<RelayError> for CallableError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::Unauthenticated { message } => CallableError {
                code: ErrorCode::Unauthenticated,
                message,
            },
            RelayError::InvalidArgument { message } => CallableError {
                code: ErrorCode::InvalidArgument,
                message,
            },
            // 其他錯誤不暴露內部細節
            other => {
                tracing::error!("Unexpected relay error: {:?}", other);
                CallableError {
                    code: ErrorCode::Internal,
                    message: "internal error".to_string(),
                }
            }
        }
    }
}

/// 回應格式：`{"result": ...}` 或 `{"error": {...}}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallableEnvelope {
    Result(SosResponse),
    Error(CallableError),
}

impl From<Result<SosResponse, CallableError>> for CallableEnvelope {
    fn from(outcome: Result<SosResponse, CallableError>) -> Self {
        match outcome {
            Ok(response) => CallableEnvelope::Result(response),
            Err(err) => CallableEnvelope::Error(err),
        }
    }
}

pub async fn invoke<G: SmsGateway>(
    relay: &SosRelay<G>,
    request: CallableRequest,
) -> Result<SosResponse, CallableError> {
    let CallableRequest { auth, data } = request;
    relay.handle(auth.as_ref(), data).await.map_err(|e| {
        tracing::warn!("SOS request rejected: {}", e);
        CallableError::from(e)
    })
}
