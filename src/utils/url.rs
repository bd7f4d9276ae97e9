//! URL helpers.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Hosts considered safe for WebUI content served from the local network.
static LOCAL_HOST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(localhost",
        r"|127(\.\d{1,3}){3}",
        r"|10(\.\d{1,3}){3}",
        r"|172\.(1[6-9]|2\d|3[01])(\.\d{1,3}){2}",
        r"|192\.168(\.\d{1,3}){2}",
        r"|[a-z0-9-]+(\.[a-z0-9-]+)*\.local)$",
    ))
    .expect("static regex is valid")
});

/// Checks whether `input` points to a host on the local network.
///
/// The host has to be a loopback or private IPv4 address, `localhost` or a `.local` mDNS name. An
/// explicit port must be within `1..=65535`. Anything that does not parse as a URL is rejected.
pub(crate) fn is_local_wifi_url(input: &str) -> bool {
    let Ok(url) = Url::parse(input) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };

    let port_ok = match url.port() {
        None => true,
        Some(port) => port >= 1,
    };

    LOCAL_HOST_REGEX.is_match(host) && port_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_hosts() {
        assert!(is_local_wifi_url("http://localhost:8080/index.html"));
        assert!(is_local_wifi_url("http://127.0.0.1"));
        assert!(is_local_wifi_url("https://192.168.1.20:443/"));
        assert!(is_local_wifi_url("http://10.0.0.5:3000"));
        assert!(is_local_wifi_url("http://172.20.1.1"));
        assert!(is_local_wifi_url("http://phone.local:9000"));
    }

    #[test]
    fn test_remote_hosts() {
        assert!(!is_local_wifi_url("https://example.com"));
        assert!(!is_local_wifi_url("http://172.32.0.1"));
        assert!(!is_local_wifi_url("http://8.8.8.8"));
    }

    #[test]
    fn test_invalid_input() {
        assert!(!is_local_wifi_url("not a url"));
        assert!(!is_local_wifi_url(""));
        assert!(!is_local_wifi_url("http://localhost:0"));
        assert!(!is_local_wifi_url("http://localhost:70000"));
        assert!(!is_local_wifi_url("mailto:someone@localhost"));
    }
}
