use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// 由平台驗證層提供的呼叫者身分，只檢查是否存在
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<Value>,
}

impl CallerIdentity {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: String,
}

impl Contact {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SosRequest {
    #[serde(default, deserialize_with = "lenient_contacts")]
    pub contacts: Vec<Contact>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: String,
}

impl SosRequest {
    pub fn new(message: impl Into<String>, contacts: Vec<Contact>) -> Self {
        Self {
            contacts,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResult {
    pub to: String,
    #[serde(rename = "sid")]
    pub provider_message_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SosResponse {
    Delivered { results: Vec<SendResult> },
    Failed { error: String },
}

impl SosResponse {
    pub fn is_ok(&self) -> bool {
        matches!(self, SosResponse::Delivered { .. })
    }
}

// 輸出格式：{ok: true, results} 或 {ok: false, error}
impl Serialize for SosResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SosResponse", 2)?;
        match self {
            SosResponse::Delivered { results } => {
                state.serialize_field("ok", &true)?;
                state.serialize_field("results", results)?;
            }
            SosResponse::Failed { error } => {
                state.serialize_field("ok", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

/// 寬鬆欄位轉為文字：falsy 值（null、false、0、空字串）視為空字串，
/// 其餘純量取其文字形式，陣列與物件取 JSON 文字
fn text_of(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "true".to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(text_of).unwrap_or_default())
}

// 非陣列視為空清單；null 或非物件的聯絡人視為沒有電話，之後會被略過
fn lenient_contacts<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Contact>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    let contacts = match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| Contact {
                phone: item.get("phone").map(text_of).unwrap_or_default(),
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_from_payload() {
        let request: SosRequest = serde_json::from_value(json!({
            "message": "Help, call me",
            "contacts": [
                {"phone": " 555-0100 ", "name": "Mom"},
                {"phone": 5550101},
                {"name": "no phone"},
                {"phone": null},
                "not an object"
            ]
        }))
        .unwrap();

        assert_eq!(request.message, "Help, call me");
        let phones: Vec<&str> = request.contacts.iter().map(|c| c.phone.as_str()).collect();
        assert_eq!(phones, vec![" 555-0100 ", "5550101", "", "", ""]);
    }

    #[test]
    fn test_missing_or_mistyped_fields_default_to_empty() {
        let request: SosRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.contacts.is_empty());
        assert!(request.message.is_empty());

        let request: SosRequest = serde_json::from_value(json!({
            "contacts": {"phone": "555-0100"},
            "message": null
        }))
        .unwrap();
        assert!(request.contacts.is_empty());
        assert!(request.message.is_empty());

        let request: SosRequest = serde_json::from_value(json!({
            "contacts": [],
            "message": 911
        }))
        .unwrap();
        assert_eq!(request.message, "911");
    }

    #[test]
    fn test_falsy_values_become_empty_text() {
        let request: SosRequest = serde_json::from_value(json!({
            "message": false,
            "contacts": [{"phone": 0}, {"phone": false}, {"phone": 0.0}, {"phone": 5550100}]
        }))
        .unwrap();
        assert!(request.message.is_empty());
        let phones: Vec<&str> = request.contacts.iter().map(|c| c.phone.as_str()).collect();
        assert_eq!(phones, vec!["", "", "", "5550100"]);

        let request: SosRequest = serde_json::from_value(json!({
            "message": 0,
            "contacts": [{"phone": true}]
        }))
        .unwrap();
        assert!(request.message.is_empty());
        assert_eq!(request.contacts[0].phone, "true");
    }

    #[test]
    fn test_null_contact_entry_has_no_phone() {
        let request: SosRequest = serde_json::from_value(json!({
            "message": "Help",
            "contacts": [{"phone": "555-0100"}, null]
        }))
        .unwrap();
        assert_eq!(request.contacts.len(), 2);
        assert!(request.contacts[1].phone.is_empty());
    }

    #[test]
    fn test_response_wire_shape() {
        let delivered = SosResponse::Delivered {
            results: vec![SendResult {
                to: "555-0100".to_string(),
                provider_message_id: "SM1".to_string(),
            }],
        };
        assert_eq!(
            serde_json::to_value(&delivered).unwrap(),
            json!({"ok": true, "results": [{"to": "555-0100", "sid": "SM1"}]})
        );

        let failed = SosResponse::Failed {
            error: "send failed".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"ok": false, "error": "send failed"})
        );
        assert!(!failed.is_ok());
    }
}
