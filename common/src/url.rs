//! String-level URL helpers.
//!
//! These work on the raw text rather than on a parsed [`url::Url`]-style value
//! on purpose: parsing would canonicalize default ports and paths, and the
//! normalization rules below are defined on the literal text.

const DEFAULT_PORT_SUFFIXES: [&str; 2] = [":80", ":443"];

/// Normalizes a probed URL for storage and display.
///
/// * A network location ending in `:80` or `:443` loses that suffix. The match is
///   literal and ignores the scheme, so `ftp://host:80` becomes `ftp://host`.
/// * Trailing `/` characters are removed.
///
/// Never fails, and `sanitize_url(&sanitize_url(u)) == sanitize_url(u)`.
pub fn sanitize_url(http_url: &str) -> String {
    let (prefix, netloc, rest) = split_netloc(http_url);

    let mut netloc: &str = netloc;
    while let Some(stripped) = DEFAULT_PORT_SUFFIXES
        .iter()
        .find_map(|suffix| netloc.strip_suffix(suffix))
    {
        netloc = stripped;
    }

    let joined: String = format!("{prefix}{netloc}{rest}");
    joined.trim_end_matches('/').to_string()
}

/// Extracts the bare hostname from a URL or a `host[:port][/path]` string.
pub fn subdomain_from_url(url: &str) -> String {
    let url: &str = url.trim();
    let (prefix, netloc, rest) = split_netloc(url);
    let host_part: &str = if prefix.is_empty() {
        rest.split(['/', '?', '#']).next().unwrap_or_default()
    } else {
        netloc
    };
    let host_part: &str = host_part.rsplit('@').next().unwrap_or_default();
    host_part.split(':').next().unwrap_or_default().to_string()
}

/// Splits `scheme://netloc/rest` into (`scheme://`, `netloc`, `/rest`).
///
/// Strings without an [`explicit_scheme`] have an empty prefix and netloc.
pub fn split_netloc(url: &str) -> (&str, &str, &str) {
    let Some(scheme) = explicit_scheme(url) else {
        return ("", "", url);
    };
    let (prefix, after) = url.split_at(scheme.len() + 3);
    let end: usize = after.find(['/', '?', '#']).unwrap_or(after.len());
    let (netloc, rest) = after.split_at(end);
    (prefix, netloc, rest)
}

/// Returns the explicit scheme of `input`, if it has one.
///
/// Only a leading `scheme://` counts, where the scheme is a letter followed by
/// letters, digits, `+`, `-` or `.`. A `://` further in, e.g. inside a query
/// string, does not.
pub fn explicit_scheme(input: &str) -> Option<&str> {
    let (scheme, _) = input.split_once("://")?;
    let mut chars = scheme.chars();
    let valid: bool = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_default_ports_and_slash() {
        assert_eq!(sanitize_url("http://example.com:80/path/"), "http://example.com/path");
        assert_eq!(sanitize_url("https://example.com:443"), "https://example.com");
        assert_eq!(sanitize_url("https://example.com:443/"), "https://example.com");
        assert_eq!(sanitize_url("https://example.com/"), "https://example.com");
    }

    #[test]
    fn sanitize_keeps_other_ports() {
        assert_eq!(sanitize_url("http://example.com:8080/"), "http://example.com:8080");
        assert_eq!(sanitize_url("https://example.com:4443"), "https://example.com:4443");
    }

    #[test]
    fn sanitize_matches_port_suffix_literally() {
        assert_eq!(sanitize_url("ftp://files.example.com:80"), "ftp://files.example.com");
        assert_eq!(sanitize_url("http://example.com:443/a"), "http://example.com/a");
    }

    #[test]
    fn sanitize_leaves_port_lookalikes_in_path() {
        assert_eq!(sanitize_url("http://example.com/x:80"), "http://example.com/x:80");
        assert_eq!(sanitize_url("example.com:80/"), "example.com:80");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let inputs = [
            "http://example.com:80/path/",
            "https://example.com:443",
            "http://a:443:80//",
            "http:///",
            "example.com//",
            "",
            "https://example.com/?q=1/",
        ];
        for input in inputs {
            let once = sanitize_url(input);
            assert_eq!(sanitize_url(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn subdomain_from_url_variants() {
        assert_eq!(subdomain_from_url("https://api.example.com:8443/v1"), "api.example.com");
        assert_eq!(subdomain_from_url(" dev.example.com:22 "), "dev.example.com");
        assert_eq!(subdomain_from_url("dev.example.com/login"), "dev.example.com");
        assert_eq!(subdomain_from_url("ftp://user@files.example.com"), "files.example.com");
    }

    #[test]
    fn split_netloc_parts() {
        assert_eq!(
            split_netloc("https://example.com:443/a?b"),
            ("https://", "example.com:443", "/a?b")
        );
        assert_eq!(split_netloc("example.com/a"), ("", "", "example.com/a"));
        assert_eq!(explicit_scheme("ftp://x"), Some("ftp"));
        assert_eq!(explicit_scheme("x.com"), None);
    }

    #[test]
    fn url_inside_query_is_not_a_scheme() {
        let input = "127.0.0.1:1/redirect?next=http://a.example";
        assert_eq!(explicit_scheme(input), None);
        assert_eq!(explicit_scheme("x.com/?u=https://y"), None);
        assert_eq!(explicit_scheme("svn+ssh://x"), Some("svn+ssh"));
        assert_eq!(explicit_scheme("://x"), None);
        assert_eq!(split_netloc(input), ("", "", input));
        assert_eq!(subdomain_from_url(input), "127.0.0.1");
        assert_eq!(
            sanitize_url("http://a.com:80/r?next=http://b.com:443/"),
            "http://a.com/r?next=http://b.com:443"
        );
    }
}
