//! Extraction of the device description URL from an SSDP answer.
//!
//! The text handed to [`extract_location`] is either an `M-SEARCH` response
//! (`HTTP/1.1 200 OK` status line) or a `NOTIFY * HTTP/1.1` announcement, as
//! received by whatever SSDP socket the caller runs. Only the `LOCATION`
//! header matters here.

use tracing::{debug, trace};

use crate::errors::{IgdError, Result};

/// Offset past the shortest scheme prefix (`http://`) where the path slash
/// of a location URL is searched.
pub(crate) const SCHEME_PREFIX_LEN: usize = 7;

/// Returns the index of the first `/` following the scheme prefix.
pub(crate) fn path_slash(url: &str) -> Option<usize> {
    url.get(SCHEME_PREFIX_LEN..)
        .and_then(|rest| rest.find('/'))
        .map(|idx| idx + SCHEME_PREFIX_LEN)
}

/// Parse an SSDP response and return the value of its `LOCATION` header.
///
/// Lines are split on `\n` so both CRLF and bare LF separators work. The
/// first `LOCATION` header decides: if its value has no path after the
/// scheme and host, the gateway is rejected even when a later header
/// would have been usable.
pub fn extract_location(response: &str) -> Result<String> {
    let lines = response
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty());

    for line in lines {
        if line.starts_with("HTTP/1.") || line.starts_with("NOTIFY *") {
            continue;
        }

        // Split on first ':' only (values may contain ':')
        let Some((name, value)) = line.split_once(':') else {
            trace!("Skipping line without colon: '{}'", line);
            continue;
        };

        if !name.trim().eq_ignore_ascii_case("location") {
            continue;
        }

        let value = value.trim();
        if path_slash(value).is_none() {
            debug!("SSDP LOCATION '{}' has no path, gateway rejected", value);
            return Err(IgdError::unsupported_gateway(
                "LOCATION header has no path after the host",
            ));
        }

        debug!("SSDP LOCATION: {}", value);
        return Ok(value.to_string());
    }

    Err(IgdError::unsupported_gateway(
        "SSDP response has no LOCATION header",
    ))
}
