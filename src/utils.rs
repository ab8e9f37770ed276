//! Small text helpers used by the card and the stats panel.

/// Upper-case the first letter of every word and lower-case the rest.
///
/// A word starts after any non-alphanumeric character other than an
/// apostrophe, so `"neutral-bad"` becomes `"Neutral-Bad"` and `"don't"`
/// stays one word.
pub fn capitalize_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphanumeric() || c == '\'' || c == '\u{2019}' {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// A bar of `█` proportional to `value` out of `max`, at most `width` cells.
pub fn stat_bar(value: i64, max: i64, width: usize) -> String {
    if max <= 0 || value <= 0 {
        return String::new();
    }
    let ratio = (value.min(max) as f32) / (max as f32);
    "█".repeat((ratio * width as f32).round() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_each_word() {
        assert_eq!(capitalize_words("good"), "Good");
        assert_eq!(capitalize_words("BAD"), "Bad");
        assert_eq!(capitalize_words("neutral evil"), "Neutral Evil");
        assert_eq!(capitalize_words("neutral-bad"), "Neutral-Bad");
        assert_eq!(capitalize_words("-"), "-");
        assert_eq!(capitalize_words("don't know"), "Don't Know");
        assert_eq!(capitalize_words("o\u{2019}neil"), "O\u{2019}neil");
        assert_eq!(capitalize_words(""), "");
    }

    #[test]
    fn bars_scale_and_clamp() {
        assert_eq!(stat_bar(50, 100, 10).chars().count(), 5);
        assert_eq!(stat_bar(100, 100, 10).chars().count(), 10);
        assert_eq!(stat_bar(250, 100, 10).chars().count(), 10);
        assert_eq!(stat_bar(0, 100, 10), "");
        assert_eq!(stat_bar(-3, 100, 10), "");
        assert_eq!(stat_bar(10, 0, 10), "");
    }
}
