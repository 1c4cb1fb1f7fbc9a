//! Query path parsing for element lookups like `Guild.owner` or `Client#fetch()`.

/// Split a dotted/hashed query into its path terms.
///
/// Both `.` and `#` separate terms; surrounding whitespace and empty terms are dropped.
/// Markers such as a trailing `()` or a leading `e-` stay attached to their term.
pub fn parse_query_path(query: &str) -> Vec<&str> {
    query
        .split(['.', '#'])
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .collect()
}

/// Split a search-entry id (`Parent#member` or `Name`) into path terms.
pub fn split_entry_id(id: &str) -> Vec<&str> {
    id.split('#').collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("Guild", &["Guild"])]
    #[case("Guild.owner", &["Guild", "owner"])]
    #[case("Guild#fetch()", &["Guild", "fetch()"])]
    #[case("Client#e-ready", &["Client", "e-ready"])]
    #[case(" Guild . owner . username ", &["Guild", "owner", "username"])]
    #[case("Guild..owner", &["Guild", "owner"])]
    #[case("", &[])]
    fn test_parse_query_path(#[case] query: &str, #[case] expected: &[&str]) {
        check!(parse_query_path(query) == expected);
    }

    #[test]
    fn entry_ids_split_on_hash_only() {
        check!(split_entry_id("Guild#owner") == ["Guild", "owner"]);
        check!(split_entry_id("Guild") == ["Guild"]);
    }
}
