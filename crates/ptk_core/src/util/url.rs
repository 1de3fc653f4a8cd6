//! Server URL sanitizing.
//!
//! Site addresses are compared against each other all over the pipeline
//! (credential caches, config matching), so they are reduced to a
//! canonical `scheme://host[:port]` form, lowercased, before storage.

use url::Url;

/// Default scheme when the caller supplied none.
const DEFAULT_SCHEME: &str = "https";

/// Cleans up a URL so that only scheme, host and optional port remain.
///
/// For example:
/// - `host.com` => `https://host.com`
/// - `host.com:8080` => `https://host.com:8080`
/// - `https://host.com/` => `https://host.com`
/// - `HTTPS://Host.COM/path?a=b` => `https://host.com`
///
/// The result is lowercased and the function is idempotent. Malformed
/// input is not rejected: anything that cannot be parsed at all comes
/// back trimmed and lowercased, unchanged otherwise.
pub fn sanitize_url(server_url: &str) -> String {
    let trimmed = server_url.trim();

    match parse_with_default_scheme(trimmed) {
        Some(parsed) => rebuild(&parsed).to_lowercase(),
        None => trimmed.to_lowercase(),
    }
}

/// Parse a URL, injecting the default scheme when the input has none.
///
/// A scheme-less input needs the retry in both parser outcomes:
/// `host.com` fails to parse outright, while `host.com:8080` parses
/// with `host.com` taken as the scheme and therefore no host at all.
fn parse_with_default_scheme(raw: &str) -> Option<Url> {
    if let Ok(parsed) = Url::parse(raw) {
        if parsed.host_str().is_some() {
            return Some(parsed);
        }
    }

    Url::parse(&format!("{DEFAULT_SCHEME}://{raw}"))
        .ok()
        .filter(|parsed| parsed.host_str().is_some())
}

/// Keep only scheme, host and explicit port.
fn rebuild(parsed: &Url) -> String {
    // host_str is checked by the caller.
    let host = parsed.host_str().unwrap_or_default();
    match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_default_scheme() {
        assert_eq!(sanitize_url("host.com"), "https://host.com");
    }

    #[test]
    fn bare_host_with_port_gets_default_scheme() {
        assert_eq!(sanitize_url("host.com:8080"), "https://host.com:8080");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        assert_eq!(sanitize_url("http://host.com"), "http://host.com");
        assert_eq!(sanitize_url("https://host.com"), "https://host.com");
    }

    #[test]
    fn path_query_and_fragment_are_dropped() {
        assert_eq!(
            sanitize_url("HTTPS://Host.COM/path?a=b"),
            "https://host.com"
        );
        assert_eq!(sanitize_url("https://host.com/#top"), "https://host.com");
        assert_eq!(
            sanitize_url("host.com/sub/page?x=1"),
            "https://host.com"
        );
    }

    #[test]
    fn trailing_slash_is_dropped() {
        assert_eq!(sanitize_url("https://host.com/"), "https://host.com");
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(sanitize_url("  host.com \n"), "https://host.com");
    }

    #[test]
    fn result_is_lowercase() {
        assert_eq!(
            sanitize_url("HTTP://STUDIO.Example.COM"),
            "http://studio.example.com"
        );
    }

    #[test]
    fn unparseable_input_is_returned_trimmed() {
        assert_eq!(sanitize_url("  "), "");
        assert_eq!(sanitize_url(""), "");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let cases = [
            "host.com",
            "host.com:8080",
            "HTTPS://Host.COM/path?a=b",
            "http://studio.example.com/",
            "192.168.1.250:30/path?a=b",
            "",
        ];
        for case in cases {
            let once = sanitize_url(case);
            assert_eq!(sanitize_url(&once), once, "not idempotent for {case:?}");
        }
    }
}
