//! Identifier mangling
//!
//! Turns arbitrary match values into valid, deterministic Rust identifier
//! fragments for generated function and node names. Two distinct values
//! never collide: `_` always introduces an escape (`__` for a literal
//! underscore, `_x{hex}_` for any other non-alphanumeric character), so the
//! encoding is uniquely decodable.

/// Sanitize `value` into an identifier fragment.
pub fn sanitize(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
        } else if ch == '_' {
            out.push_str("__");
        } else {
            out.push_str(&format!("_x{:x}_", ch as u32));
        }
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    if out.is_empty() {
        out.push('_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("foo", "foo")]
    #[case("a_b", "a__b")]
    #[case("+", "_x2b_")]
    #[case("\n", "_xa_")]
    #[case("1x", "_1x")]
    #[case("", "_")]
    fn sanitizes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize(input), expected);
    }

    #[test]
    fn distinct_values_never_collide() {
        let values = ["+", "-", "++", " ", "a b", "a+b", "ab", "a_x2b_", "a+"];
        let mut seen = std::collections::HashSet::new();
        for value in values {
            assert!(seen.insert(sanitize(value)), "collision for {:?}", value);
        }
    }
}
