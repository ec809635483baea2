use anyhow::{anyhow, Result};

pub fn validate_http_url(value: &str) -> Result<()> {
    validate_scheme(value, &["http://", "https://"])
}

pub fn validate_ws_url(value: &str) -> Result<()> {
    validate_scheme(value, &["ws://", "wss://"])
}

fn validate_scheme(value: &str, schemes: &[&str]) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("url is empty"));
    }
    let Some(rest) = schemes.iter().find_map(|scheme| trimmed.strip_prefix(scheme)) else {
        return Err(anyhow!("url must start with {}", schemes.join(" or ")));
    };
    if rest.is_empty() || rest.starts_with('/') {
        return Err(anyhow!("url has no host"));
    }
    Ok(())
}
