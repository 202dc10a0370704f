//! English pluralization for log lines.

/// `"s"` unless `n == 1`.
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// `plural_count(3, "sprite")` -> `"3 sprites"`
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "problem"), "0 problems");
        assert_eq!(plural_count(1, "problem"), "1 problem");
        assert_eq!(plural_count(17, "sprite"), "17 sprites");
    }
}
