pub const TAGLINE_ITEM_SELECTOR: &str = ".tagline-item";

const LINE_STAGGER_MS: u32 = 500;
pub const CHAR_INTERVAL_MS: u32 = 50;

pub fn line_start_delay_ms(line_index: usize) -> u32 {
    u32::try_from(line_index)
        .unwrap_or(u32::MAX)
        .saturating_mul(LINE_STAGGER_MS)
}

/// First `typed_chars` characters of `text`, on a char boundary.
pub fn typed_prefix(text: &str, typed_chars: usize) -> &str {
    match text.char_indices().nth(typed_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_start_half_a_second_apart() {
        let delays: Vec<u32> = (0..3).map(line_start_delay_ms).collect();
        assert_eq!(delays, vec![0, 500, 1_000]);
    }

    #[test]
    fn prefix_grows_one_char_at_a_time() {
        let text = "AI & Cinema";
        let frames: Vec<&str> = (0..=3).map(|count| typed_prefix(text, count)).collect();

        assert_eq!(frames, vec!["", "A", "AI", "AI "]);
        assert_eq!(typed_prefix(text, 100), text);
    }

    #[test]
    fn prefix_respects_multibyte_characters() {
        let text = "🦇 Gotham";
        assert_eq!(typed_prefix(text, 1), "🦇");
        assert_eq!(typed_prefix(text, 2), "🦇 ");
    }
}
