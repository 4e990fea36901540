//! Guards against provider base URLs that point at internal infrastructure
//! instead of a real upstream.

use url::Url;

/// Rejects non-http(s) schemes, missing hosts, and loopback/link-local
/// addresses. This is a best-effort admin-time check, not a runtime
/// firewall — DNS can still rebind after validation.
pub fn validate_base_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| format!("invalid base_url '{raw}': {e}"))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("base_url '{raw}' must use http or https"));
    }

    let host = url
        .host_str()
        .ok_or_else(|| format!("base_url '{raw}' has no host"))?;

    if host == "localhost" || host == "0.0.0.0" {
        return Err(format!("base_url '{raw}' points at local infrastructure"));
    }

    if let Ok(ip) = host.parse::<std::net::IpAddr>() {
        if ip.is_loopback() || ip.is_unspecified() {
            return Err(format!("base_url '{raw}' points at local infrastructure"));
        }
        if let std::net::IpAddr::V4(v4) = ip {
            if v4.is_link_local() || v4.is_private() {
                return Err(format!("base_url '{raw}' points at a private network address"));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_public_https() {
        assert!(validate_base_url("https://api.openai.com/v1").is_ok());
    }

    #[test]
    fn rejects_non_http_scheme() {
        assert!(validate_base_url("ftp://api.example.com").is_err());
    }

    #[test]
    fn rejects_loopback() {
        assert!(validate_base_url("http://127.0.0.1:11434").is_err());
        assert!(validate_base_url("http://localhost:8080").is_err());
    }

    #[test]
    fn rejects_private_network() {
        assert!(validate_base_url("http://10.0.0.5").is_err());
        assert!(validate_base_url("http://192.168.1.1").is_err());
    }
}
