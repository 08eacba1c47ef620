//! Topic pattern algebra (§4.5): `*` matches exactly one dot-separated
//! segment; a pattern ending in `.*` matches the literal prefix itself and
//! anything nested under it. Dots are always literal separators.

/// Does `topic` match `pattern`?
///
/// A bare `"*"` matches every topic. A trailing `.*` is a prefix wildcard:
/// `"orders.*"` matches `"orders"`, `"orders.placed"`, and
/// `"orders.placed.v2"`. A bare `*` segment anywhere else matches exactly
/// one segment at that position: `"orders.*.created"` matches
/// `"orders.eu.created"` but not `"orders.created"` or
/// `"orders.eu.de.created"`.
pub fn pattern_matches(pattern: &str, topic: &str) -> bool {
    if pattern == "*" {
        return true;
    }

    if let Some(prefix) = pattern.strip_suffix(".*") {
        return topic == prefix || topic.starts_with(&format!("{prefix}."));
    }

    let pattern_segments: Vec<&str> = pattern.split('.').collect();
    let topic_segments: Vec<&str> = topic.split('.').collect();

    if pattern_segments.len() != topic_segments.len() {
        return false;
    }

    pattern_segments
        .iter()
        .zip(topic_segments.iter())
        .all(|(p, t)| *p == "*" || p == t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(pattern_matches("orders.placed", "orders.placed"));
        assert!(!pattern_matches("orders.placed", "orders.shipped"));
    }

    #[test]
    fn test_single_segment_wildcard() {
        assert!(pattern_matches("orders.*.created", "orders.eu.created"));
        assert!(!pattern_matches("orders.*.created", "orders.created"));
        assert!(!pattern_matches("orders.*.created", "orders.eu.de.created"));
    }

    #[test]
    fn test_prefix_wildcard_matches_bare_prefix() {
        assert!(pattern_matches("orders.*", "orders"));
    }

    #[test]
    fn test_prefix_wildcard_matches_nested() {
        assert!(pattern_matches("orders.*", "orders.placed"));
        assert!(pattern_matches("orders.*", "orders.placed.v2"));
    }

    #[test]
    fn test_prefix_wildcard_rejects_sibling() {
        assert!(!pattern_matches("orders.*", "ordersx.placed"));
    }

    #[test]
    fn test_dots_are_literal() {
        assert!(!pattern_matches("orders.placed", "orders-placed"));
    }

    #[test]
    fn test_bare_star_matches_everything() {
        assert!(pattern_matches("*", "a.b.c"));
        assert!(pattern_matches("*", "orders"));
        assert!(pattern_matches("*", "a"));
    }
}
