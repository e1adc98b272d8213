//! Categorical dimension filtering
//!
//! Parses free-form comma-separated skip lists and filters host-supplied name
//! lists against them. Filtering never produces an empty dimension: if every
//! name is skipped, the unfiltered list is used as a fallback and a warning is
//! logged.

use log::warn;

/// Parse a comma-separated skip string into a list of names to skip.
///
/// Tokens are whitespace-trimmed and matched case-sensitively against
/// `available`; empty tokens are dropped. Tokens naming no known member are
/// logged and ignored.
pub fn parse_skip_list(skip_raw: &str, available: &[String]) -> Vec<String> {
    if skip_raw.trim().is_empty() {
        return Vec::new();
    }

    let mut skip_list = Vec::new();
    for token in skip_raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if available.iter().any(|name| name == token) {
            skip_list.push(token.to_string());
        } else {
            warn!("'{}' is not a valid name, ignoring skip entry", token);
        }
    }

    skip_list
}

/// Filter `all_names` by a raw skip string, preserving order.
///
/// If the skip list removes every name, the unfiltered list is returned so the
/// dimension never collapses to size 0; this fallback is logged, not silent.
pub fn filter_names(all_names: &[String], skip_raw: &str) -> Vec<String> {
    let skip_list = parse_skip_list(skip_raw, all_names);

    let filtered: Vec<String> = all_names
        .iter()
        .filter(|name| !skip_list.contains(*name))
        .cloned()
        .collect();

    if filtered.is_empty() && !all_names.is_empty() {
        warn!("All names were skipped, using full list as fallback");
        return all_names.to_vec();
    }

    filtered
}
