use percent_encoding::{percent_decode_str, utf8_percent_encode};
use snsign_core::MultiMap;

use crate::constants::SNWS2_URI_ENCODE_SET;

/// Percent-encode a query key or value for the canonical query string.
///
/// Unreserved characters (`A-Z a-z 0-9 - . _ ~`) pass through, everything
/// else becomes `%XX` with uppercase hex over the UTF-8 bytes.
pub fn uri_encode(s: &str) -> String {
    utf8_percent_encode(s, &SNWS2_URI_ENCODE_SET).to_string()
}

/// Parse the query part of a URL into a parameter map.
///
/// A leading `?` is ignored. Pairs without `=` are skipped, only the first `=`
/// separates key and value, and repeated keys collect their values in order.
/// `+` is kept literally.
pub fn parse_query(query: &str) -> MultiMap {
    let mut params = MultiMap::new();
    let query = query.strip_prefix('?').unwrap_or(query);
    if query.is_empty() {
        return params;
    }

    for pair in query.split('&') {
        let Some((k, v)) = pair.split_once('=') else {
            continue;
        };
        let k = percent_decode_str(k).decode_utf8_lossy();
        let v = percent_decode_str(v).decode_utf8_lossy();
        params.add(&k, v.into_owned());
    }

    params
}
