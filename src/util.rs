// src/util.rs — Shared display helpers

use std::borrow::Cow;

/// Shorten a label to at most `max_chars` characters for table output,
/// marking the cut with a trailing `…`.
pub fn truncate_label(s: &str, max_chars: usize) -> Cow<'_, str> {
    if s.chars().count() <= max_chars {
        return Cow::Borrowed(s);
    }
    if max_chars == 0 {
        return Cow::Borrowed("");
    }
    let kept: String = s.chars().take(max_chars - 1).collect();
    Cow::Owned(format!("{kept}…"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_label_untouched() {
        assert!(matches!(truncate_label("A -> B", 10), Cow::Borrowed("A -> B")));
    }

    #[test]
    fn test_exact_fit() {
        assert_eq!(truncate_label("A -> B", 6), "A -> B");
    }

    #[test]
    fn test_long_label_marked() {
        assert_eq!(truncate_label("sched_switch -> sys_read", 8), "sched_s…");
    }

    #[test]
    fn test_multibyte_counts_chars() {
        assert_eq!(truncate_label("café -> thé", 5), "café…");
    }

    #[test]
    fn test_zero_width() {
        assert_eq!(truncate_label("abc", 0), "");
    }
}
