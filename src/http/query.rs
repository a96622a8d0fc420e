//! Query-string builder
//!
//! Merges parameters into a base URL. Values are form-encoded, except for a
//! configurable set of characters that must reach the server verbatim; the
//! search operators `(from:x OR from:y)` are rejected when the parentheses
//! arrive percent-encoded.

use crate::error::Result;
use crate::types::SearchParams;
use url::form_urlencoded::byte_serialize;
use url::Url;

/// Merge `params` into the query of `base`, overriding keys already present.
///
/// Characters in `safe` are left unescaped.
pub fn set_query(base: &str, params: &SearchParams, safe: &str) -> Result<String> {
    let mut url = Url::parse(base)?;

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .into_owned()
        .filter(|(key, _)| !params.contains_key(key))
        .collect();
    pairs.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));

    if pairs.is_empty() {
        url.set_query(None);
        return Ok(url.into());
    }

    let query = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key, safe), encode(value, safe)))
        .collect::<Vec<_>>()
        .join("&");

    url.set_query(Some(&query));
    Ok(url.into())
}

/// Form-encode `value`, then restore the characters listed in `safe`
pub fn encode(value: &str, safe: &str) -> String {
    let mut encoded: String = byte_serialize(value.as_bytes()).collect();
    for ch in safe.chars() {
        let mut buf = [0u8; 4];
        let escaped: String = ch
            .encode_utf8(&mut buf)
            .bytes()
            .map(|b| format!("%{b:02X}"))
            .collect();
        if encoded.contains(&escaped) {
            encoded = encoded.replace(&escaped, ch.encode_utf8(&mut buf));
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn params(pairs: &[(&str, &str)]) -> SearchParams {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test_case("(from:nasa)", "()", "(from%3Anasa)" ; "parentheses kept")]
    #[test_case("(from:nasa)", "", "%28from%3Anasa%29" ; "nothing safe")]
    #[test_case("a b", "()", "a+b" ; "space as plus")]
    #[test_case("x:y", "():", "x:y" ; "extra safe char")]
    #[test_case("#rust", "()", "%23rust" ; "hash encoded")]
    fn test_encode(value: &str, safe: &str, expected: &str) {
        assert_eq!(encode(value, safe), expected);
    }

    #[test]
    fn test_set_query_merges_params() {
        let url = set_query(
            "https://api.example.com/search.json",
            &params(&[("q", "(from:nasa) lang:en"), ("count", "20")]),
            "()",
        )
        .unwrap();

        assert_eq!(
            url,
            "https://api.example.com/search.json?count=20&q=(from%3Anasa)+lang%3Aen"
        );
    }

    #[test]
    fn test_set_query_overrides_existing_keys() {
        let url = set_query(
            "https://api.example.com/search.json?cursor=old&keep=1",
            &params(&[("cursor", "new")]),
            "()",
        )
        .unwrap();

        assert_eq!(url, "https://api.example.com/search.json?keep=1&cursor=new");
    }

    #[test]
    fn test_set_query_empty_params() {
        let url = set_query("https://api.example.com/search.json", &params(&[]), "()").unwrap();
        assert_eq!(url, "https://api.example.com/search.json");
    }

    #[test]
    fn test_set_query_invalid_base() {
        assert!(set_query("not a url", &params(&[("q", "x")]), "()").is_err());
    }
}
