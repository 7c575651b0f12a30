use crate::types::ThreadReference;

const ARCHIVE_MARKER: &str = "/archives/";

/// Parse a Slack thread link (or the bare `channel/ts` shorthand) into a
/// [`ThreadReference`].
///
/// Accepted forms:
/// - full permalink: `https://workspace.slack.com/archives/C12345/p1234567890123456`
/// - archive segment: `C12345/p1234567890123456`
/// - already-canonical: `C12345/1234567890.123456`
///
/// Returns `None` for anything that does not contain two path components;
/// malformed input never panics.
pub fn parse_thread_link(input: &str) -> Option<ThreadReference> {
    let segment = if let Some((_, rest)) = input.split_once(ARCHIVE_MARKER) {
        rest
    } else if input.contains('/') {
        input
    } else {
        return None;
    };

    let mut parts = segment.split('/');
    let channel_id = parts.next()?;
    let raw_ts = parts.next()?;
    if channel_id.is_empty() || raw_ts.is_empty() {
        return None;
    }

    Some(ThreadReference {
        channel_id: channel_id.to_string(),
        thread_ts: canonicalize_ts(raw_ts),
    })
}

/// Convert the permalink `pXXXXXXXXXXXXXXXX` form into the `X.XXXXXX`
/// decimal form the Slack API expects. Already-canonical timestamps pass
/// through unmodified.
fn canonicalize_ts(raw: &str) -> String {
    match raw.strip_prefix('p') {
        Some(digits) if digits.len() > 10 => {
            format!("{}.{}", &digits[..10], &digits[10..])
        }
        // A p-id with no fractional digits keeps the bare seconds value
        // rather than gaining a trailing dot.
        Some(digits) => digits.to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_permalink() {
        let parsed =
            parse_thread_link("https://x.slack.com/archives/C12345/p1234567890123456").unwrap();
        assert_eq!(parsed.channel_id, "C12345");
        assert_eq!(parsed.thread_ts, "1234567890.123456");
    }

    #[test]
    fn test_parse_archive_segment_shorthand() {
        let parsed = parse_thread_link("C12345/p1234567890123456").unwrap();
        assert_eq!(parsed.channel_id, "C12345");
        assert_eq!(parsed.thread_ts, "1234567890.123456");
    }

    #[test]
    fn test_parse_canonical_ts_passes_through() {
        let parsed = parse_thread_link("C12345/1234567890.123456").unwrap();
        assert_eq!(parsed.thread_ts, "1234567890.123456");
    }

    #[test]
    fn test_canonical_ts_has_single_dot_and_ten_digit_seconds() {
        let parsed = parse_thread_link("C1/p1111111111000001").unwrap();
        let (secs, frac) = parsed.thread_ts.split_once('.').unwrap();
        assert_eq!(secs.len(), 10);
        assert!(secs.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(frac, "000001");
        assert_eq!(parsed.thread_ts.matches('.').count(), 1);
    }

    #[test]
    fn test_short_p_id_stays_undotted() {
        let parsed = parse_thread_link("C12345/p123").unwrap();
        assert_eq!(parsed.thread_ts, "123");

        let parsed = parse_thread_link("C12345/p1234567890").unwrap();
        assert_eq!(parsed.thread_ts, "1234567890");
    }

    #[test]
    fn test_parse_no_separator_fails() {
        assert!(parse_thread_link("C12345").is_none());
        assert!(parse_thread_link("not a link").is_none());
        assert!(parse_thread_link("").is_none());
    }

    #[test]
    fn test_parse_empty_components_fail() {
        assert!(parse_thread_link("/p1234567890123456").is_none());
        assert!(parse_thread_link("C12345/").is_none());
    }

    #[test]
    fn test_parse_ignores_extra_path_components() {
        let parsed = parse_thread_link("C12345/p1234567890123456/extra").unwrap();
        assert_eq!(parsed.channel_id, "C12345");
        assert_eq!(parsed.thread_ts, "1234567890.123456");
    }
}
