//! HTTP API route handlers.

pub mod cities;
pub mod debug;
pub mod people;
pub mod system;

/// Extracts the first `page` value from a raw query string.
///
/// Pairs are decoded one at a time, so a malformed pair only drops itself.
/// Repeated or malformed parameters never reject the request; the value is
/// handed to the pagination policy as-is.
pub(crate) fn page_param(raw_query: Option<&str>) -> Option<String> {
    raw_query
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| serde_urlencoded::from_str::<Vec<(String, String)>>(pair).ok())
        .flatten()
        .find_map(|(key, value)| (key == "page").then_some(value))
}
