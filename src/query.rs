//! Query string manipulation
//!
//! Threads pagination cursors and date filters through request URLs.

use crate::error::Result;
use url::Url;

/// Set or replace query parameters on a URL and return the new URL.
///
/// Parameters already on the URL keep their position; a replaced parameter
/// keeps the position of its first occurrence and later duplicates are
/// dropped. New parameters are appended in iteration order. `None` values
/// are skipped entirely.
///
/// ```
/// use tap_stella::query::set_query_parameters;
///
/// let url = set_query_parameters(
///     "http://example.com?foo=bar&biz=baz",
///     [("foo", Some("stuff")), ("bat", Some("boots"))],
/// )
/// .unwrap();
/// assert_eq!(url, "http://example.com/?foo=stuff&biz=baz&bat=boots");
/// ```
pub fn set_query_parameters<I, K, V>(url: &str, params: I) -> Result<String>
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: ToString,
{
    let mut parsed = Url::parse(url)?;
    let mut pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
    let mut changed = false;

    for (key, value) in params {
        let Some(value) = value else {
            continue;
        };
        let key = key.as_ref();
        let value = value.to_string();
        changed = true;

        match pairs.iter().position(|(k, _)| k == key) {
            Some(idx) => {
                pairs[idx].1 = value;
                let mut first = true;
                pairs.retain(|(k, _)| k != key || std::mem::replace(&mut first, false));
            }
            None => pairs.push((key.to_string(), value)),
        }
    }

    if changed {
        parsed.query_pairs_mut().clear().extend_pairs(&pairs);
    }

    Ok(parsed.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn query_of(url: &str) -> Vec<(String, String)> {
        Url::parse(url).unwrap().query_pairs().into_owned().collect()
    }

    #[test]
    fn test_replaces_and_appends() {
        let url = set_query_parameters(
            "http://example.com?foo=bar&biz=baz",
            [("foo", Some("stuff")), ("bat", Some("boots"))],
        )
        .unwrap();
        assert_eq!(url, "http://example.com/?foo=stuff&biz=baz&bat=boots");
    }

    #[test]
    fn test_adds_query_to_bare_url() {
        let url =
            set_query_parameters("https://api.stellaconnect.net/v2/qa", [("after", Some(500))])
                .unwrap();
        assert_eq!(url, "https://api.stellaconnect.net/v2/qa?after=500");
    }

    #[test]
    fn test_none_values_are_skipped() {
        let url = set_query_parameters(
            "https://api.stellaconnect.net/v2/qa?limit=5",
            [("after", None), ("created_at_gte", Some("2024-01-01"))],
        )
        .unwrap();
        assert!(!url.contains("None"));
        assert!(!url.contains("after"));
        assert_eq!(
            query_of(&url),
            vec![
                ("limit".to_string(), "5".to_string()),
                ("created_at_gte".to_string(), "2024-01-01".to_string()),
            ]
        );
    }

    #[test]
    fn test_all_none_leaves_url_untouched() {
        let url = set_query_parameters(
            "https://api.stellaconnect.net/v2/data?a=1&b=2",
            [("after", None::<i64>)],
        )
        .unwrap();
        assert_eq!(url, "https://api.stellaconnect.net/v2/data?a=1&b=2");
    }

    #[test]
    fn test_preserves_fragment_and_path() {
        let url = set_query_parameters(
            "https://host.example/a/b/c?x=1#section",
            [("after", Some(10))],
        )
        .unwrap();
        assert_eq!(url, "https://host.example/a/b/c?x=1&after=10#section");
    }

    #[test]
    fn test_duplicate_keys_collapse_to_first_position() {
        let url = set_query_parameters(
            "https://host.example/?after=1&x=y&after=2",
            [("after", Some(3))],
        )
        .unwrap();
        assert_eq!(
            query_of(&url),
            vec![
                ("after".to_string(), "3".to_string()),
                ("x".to_string(), "y".to_string()),
            ]
        );
    }

    #[test_case("a&b=c d" ; "ampersand equals and space")]
    #[test_case("2024-01-01T00:00:00+00:00" ; "timestamp with plus")]
    #[test_case("100%/#?" ; "percent slash hash question")]
    fn test_reserved_characters_round_trip(value: &str) {
        let url =
            set_query_parameters("https://host.example/v2/qa?keep=me", [("q", Some(value))])
                .unwrap();
        assert_eq!(
            query_of(&url),
            vec![
                ("keep".to_string(), "me".to_string()),
                ("q".to_string(), value.to_string()),
            ]
        );
    }

    #[test_case("https://host.example/v2/qa" ; "no query")]
    #[test_case("https://host.example/v2/qa?after=5&z=a%20b" ; "existing query")]
    #[test_case("http://host.example/?x=1&x=2#frag" ; "duplicates and fragment")]
    fn test_idempotent(url: &str) {
        let params = [("after", Some("77")), ("created_at_lte", Some("2024-02-01"))];
        let once = set_query_parameters(url, params).unwrap();
        let twice = set_query_parameters(&once, params).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_malformed_url_is_an_error() {
        let err = set_query_parameters("v2/qa", [("after", Some(1))]).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidUrl(_)));
    }
}
