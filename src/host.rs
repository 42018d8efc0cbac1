//! Canonical base URL construction for a PowerDNS server.

use url::{ParseError, Url};

use crate::errors::InvalidHostError;

/// Joins a hostname and port into `host:port`.
///
/// Hostnames containing a `:` (IPv6 literals) are wrapped in brackets, so
/// `::1` and `8081` become `[::1]:8081`.
pub fn join_host_port(hostname: &str, port: &str) -> String {
    if hostname.contains(':') {
        format!("[{hostname}]:{port}")
    } else {
        format!("{hostname}:{port}")
    }
}

/// Builds `http://<hostname>:<port>/` and checks that it parses as a URL.
///
/// The returned string is exactly the one that was built, not the parser's
/// normalised form. No DNS lookup or connection attempt is made.
pub fn validate_host(hostname: &str, port: &str) -> Result<String, InvalidHostError> {
    base_url(hostname, port).map(|(host, _)| host)
}

/// Canonical base URL string together with its parsed form.
pub(crate) fn base_url(hostname: &str, port: &str) -> Result<(String, Url), InvalidHostError> {
    let host = format!("http://{}/", join_host_port(hostname, port));
    match check_host(&host, hostname, port) {
        Ok(url) => Ok((host, url)),
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(url = ?host, error = %err, "rejected powerdns host");
            Err(InvalidHostError::new(host, err))
        }
    }
}

/// Characters the URL parser would treat as the end of the authority (or
/// as userinfo), moving part of the hostname into the path.
const HOST_DELIMITERS: [char; 5] = ['\\', '/', '?', '#', '@'];

fn check_host(host: &str, hostname: &str, port: &str) -> Result<Url, ParseError> {
    // The parser strips tabs and newlines and reads `\` as `/`; refuse them
    // up front so the string handed back is the one that was parsed.
    if hostname
        .chars()
        .any(|c| c.is_control() || HOST_DELIMITERS.contains(&c))
    {
        return Err(ParseError::InvalidDomainCharacter);
    }
    if port.chars().any(|c| c.is_control()) {
        return Err(ParseError::InvalidPort);
    }

    let url = Url::parse(host)?;
    let port_matches = if port.is_empty() {
        url.port().is_none()
    } else {
        port.parse::<u16>().ok() == url.port_or_known_default()
    };
    if !port_matches {
        return Err(ParseError::InvalidPort);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_hostname_builds_canonical_url() {
        assert_eq!(
            validate_host("foo.org", "8888").unwrap(),
            "http://foo.org:8888/"
        );
    }

    #[test]
    fn hostname_that_will_not_parse_is_rejected() {
        let err = validate_host(":\\^", "8888").unwrap_err();
        assert_eq!(err.url, "http://[:\\^]:8888/");
        assert_eq!(validate_host(":\\^", "8888").unwrap_or_default(), "");
    }

    #[test]
    fn ipv6_literals_are_bracketed() {
        assert_eq!(join_host_port("::1", "8081"), "[::1]:8081");
        assert_eq!(validate_host("::1", "8081").unwrap(), "http://[::1]:8081/");
    }

    #[test]
    fn ipv4_and_plain_names_are_not_bracketed() {
        assert_eq!(join_host_port("127.0.0.1", "8081"), "127.0.0.1:8081");
        assert_eq!(
            validate_host("localhost", "80").unwrap(),
            "http://localhost:80/"
        );
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let err = validate_host("foo.org", "http").unwrap_err();
        assert_eq!(err.source, url::ParseError::InvalidPort);
    }

    #[test]
    fn backslash_in_hostname_is_rejected() {
        let err = validate_host("foo\\bar", "8888").unwrap_err();
        assert_eq!(err.url, "http://foo\\bar:8888/");
        assert_eq!(err.source, ParseError::InvalidDomainCharacter);
    }

    #[test]
    fn path_delimiters_in_hostname_are_rejected() {
        for hostname in ["foo/bar", "foo?bar", "foo#bar", "user@foo.org"] {
            assert!(validate_host(hostname, "8888").is_err(), "{hostname}");
        }
    }

    #[test]
    fn control_characters_are_rejected() {
        let err = validate_host("foo\tbar", "8888").unwrap_err();
        assert_eq!(err.source, ParseError::InvalidDomainCharacter);

        let err = validate_host("foo.org", "88\n88").unwrap_err();
        assert_eq!(err.source, ParseError::InvalidPort);

        assert!(validate_host("foo\tbar", "88\n88").is_err());
    }

    #[test]
    fn port_that_spills_into_the_path_is_rejected() {
        let err = validate_host("foo.org", "88/88").unwrap_err();
        assert_eq!(err.source, ParseError::InvalidPort);
    }

    #[test]
    fn default_and_empty_ports_are_accepted() {
        assert_eq!(validate_host("foo.org", "80").unwrap(), "http://foo.org:80/");
        assert_eq!(validate_host("foo.org", "").unwrap(), "http://foo.org:/");
    }

    #[test]
    fn empty_hostname_and_out_of_range_port_are_rejected() {
        assert_eq!(
            validate_host("", "8081").unwrap_err().source,
            ParseError::EmptyHost
        );
        assert_eq!(
            validate_host("foo.org", "99999").unwrap_err().source,
            ParseError::InvalidPort
        );
    }

    #[test]
    fn whitespace_in_hostname_is_rejected() {
        assert!(validate_host("foo bar.org", "8081").is_err());
    }
}
