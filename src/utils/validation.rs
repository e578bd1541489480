use crate::utils::error::{RelayError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(RelayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(RelayError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(RelayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| RelayError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RelayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 帳號識別碼等需有固定前綴的欄位
pub fn validate_prefix(field_name: &str, value: &str, prefix: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    if !value.starts_with(prefix) {
        return Err(RelayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must start with '{}'", prefix),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api_base", "https://api.twilio.com").is_ok());
        assert!(validate_url("api_base", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("api_base", "").is_err());
        assert!(validate_url("api_base", "invalid-url").is_err());
        assert!(validate_url("api_base", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("value".to_string());
        assert_eq!(
            validate_required_field("TWILIO_SID", &present).unwrap(),
            "value"
        );

        let missing: Option<String> = None;
        match validate_required_field("TWILIO_SID", &missing) {
            Err(RelayError::MissingConfigError { field }) => assert_eq!(field, "TWILIO_SID"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_prefix() {
        assert!(validate_prefix("account_sid", "AC0123", "AC").is_ok());
        assert!(validate_prefix("account_sid", "SK0123", "AC").is_err());
        assert!(validate_prefix("account_sid", "   ", "AC").is_err());
    }
}
