//! Character-counted text helpers.
//!
//! Table layout counts characters (Unicode scalar values), never bytes: a
//! Cyrillic letter is two bytes in UTF-8 but occupies one cell.

/// Number of characters in `s`.
pub fn char_width(s: &str) -> usize {
    s.chars().count()
}

/// Splits `s` into consecutive chunks of at most `width` characters.
///
/// Text that already fits comes back as a single chunk (an empty string
/// yields one empty chunk). A zero width yields no chunks.
pub fn chunk_chars(s: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    if char_width(s) <= width {
        return vec![s.to_string()];
    }

    let chars: Vec<char> = s.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Lowercase fold used for case-insensitive ordering of names.
pub fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

/// Right-pads `s` with spaces to `width` characters.
pub fn pad_right(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(char_width(s));
    format!("{}{}", s, " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(char_width("Anna"), 4);
        assert_eq!(char_width("Анна"), 4);
        assert_eq!("Анна".len(), 8);
        assert_eq!(char_width("€"), 1);
        assert_eq!(char_width("𝄞x"), 2);
        assert_eq!(char_width(""), 0);
    }

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(chunk_chars("abc", 5), vec!["abc"]);
        assert_eq!(chunk_chars("", 5), vec![""]);
    }

    #[test]
    fn long_text_is_chunked_by_characters() {
        let chunks = chunk_chars("Преподаватель", 5);
        assert_eq!(chunks, vec!["Препо", "дават", "ель"]);
        for chunk in &chunks {
            assert!(char_width(chunk) <= 5);
        }
        assert_eq!(chunks.concat(), "Преподаватель");
    }

    #[test]
    fn zero_width_yields_nothing() {
        assert!(chunk_chars("abc", 0).is_empty());
    }

    #[test]
    fn fold_case_handles_cyrillic() {
        assert_eq!(fold_case("ИВАНОВ"), "иванов");
        assert_eq!(fold_case("Ёлкин"), "ёлкин");
        assert_eq!(fold_case("SMITH"), "smith");
    }

    #[test]
    fn pad_right_uses_character_width() {
        assert_eq!(pad_right("Юля", 5), "Юля  ");
        assert_eq!(pad_right("toolong", 3), "toolong");
    }
}
