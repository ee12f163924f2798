use crate::utils::error::{PluginError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PluginError::InvalidSettingValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PluginError::InvalidSettingValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PluginError::InvalidSettingValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PluginError::InvalidSettingValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PluginError::InvalidSettingValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(PluginError::InvalidSettingValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 判斷是否為非空的純數字字串 (ASCII digits only)
pub fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("shipping.url", "https://example.com").is_ok());
        assert!(validate_url("shipping.url", "http://example.com").is_ok());
        assert!(validate_url("shipping.url", "").is_err());
        assert!(validate_url("shipping.url", "invalid-url").is_err());
        assert!(validate_url("shipping.url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("settings_path", "./settings.toml").is_ok());
        assert!(validate_path("settings_path", "").is_err());
        assert!(validate_path("settings_path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("expire_month", 5, 1, 12).is_ok());
        assert!(validate_range("expire_month", 13, 1, 12).is_err());
        assert!(validate_range("expire_month", 0, 1, 12).is_err());
    }

    #[test]
    fn test_is_digits() {
        assert!(is_digits("4111111111111111"));
        assert!(is_digits("03"));
        assert!(!is_digits(""));
        assert!(!is_digits("4111 1111"));
        assert!(!is_digits("41x1"));
    }
}
