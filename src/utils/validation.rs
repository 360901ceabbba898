use crate::utils::error::{Result, StoreError};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> StoreError {
    StoreError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Checks that `url_str` can serve as the catalog root and returns it parsed.
///
/// Endpoint paths are appended as segments, so the URL must be hierarchical
/// and must not carry a query or fragment that would end up in front of them.
pub fn validate_base_url(field_name: &str, url_str: &str) -> Result<Url> {
    if url_str.trim().is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(invalid(field_name, url_str, "URL cannot be used as a base"));
    }
    if url.query().is_some() {
        return Err(invalid(field_name, url_str, "Base URL must not have a query"));
    }
    if url.fragment().is_some() {
        return Err(invalid(field_name, url_str, "Base URL must not have a fragment"));
    }
    Ok(url)
}

/// Config files are TOML; anything else is almost certainly a typo.
pub fn validate_config_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() || path.contains('\0') {
        return Err(invalid(field_name, path, "Path is empty or malformed"));
    }
    match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(()),
        _ => Err(invalid(field_name, path, "Config file must end in .toml")),
    }
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("base_url", "https://fakestoreapi.com").is_ok());
        assert!(validate_base_url("base_url", "http://127.0.0.1:8080").is_ok());
        assert!(validate_base_url("base_url", "http://host/api/").is_ok());
        assert!(validate_base_url("base_url", "").is_err());
        assert!(validate_base_url("base_url", "fakestoreapi.com").is_err());
        assert!(validate_base_url("base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_base_url_rejects_what_endpoints_cannot_extend() {
        assert!(validate_base_url("base_url", "mailto:shop@example.com").is_err());
        assert!(validate_base_url("base_url", "http://host/api?x=1").is_err());
        assert!(validate_base_url("base_url", "http://host#frag").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("timeout_seconds", 30, 1, 300).is_ok());
        assert!(validate_range("timeout_seconds", 0, 1, 300).is_err());
        assert!(validate_range("timeout_seconds", 301, 1, 300).is_err());
    }

    #[test]
    fn test_validate_config_path() {
        assert!(validate_config_path("config", "storefront.toml").is_ok());
        assert!(validate_config_path("config", "conf/Storefront.TOML").is_ok());
        assert!(validate_config_path("config", "").is_err());
        assert!(validate_config_path("config", "bad\0path.toml").is_err());
        assert!(validate_config_path("config", "storefront.json").is_err());
    }
}
