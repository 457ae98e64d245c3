//! Member name mapping between `PascalCase` host names and `snake_case` wire names.

use std::str::CharIndices;

/// Convert a member name to its wire field name.
///
/// Every uppercase character after the first one starts a new word, unless it
/// follows whitespace. The words are joined with `_` and lowercased. Runs of
/// capitals are not treated as acronyms, so `HTMLUrl` becomes `h_t_m_l_url`.
///
/// ```
/// use hubwire_json::naming::to_wire_name;
///
/// assert_eq!(to_wire_name("LastReadAt"), "last_read_at");
/// assert_eq!(to_wire_name("HTMLUrl"), "h_t_m_l_url");
/// ```
#[must_use]
pub fn to_wire_name(member: &str) -> String {
    split_upper_case(member)
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Split a member name into the words [`to_wire_name`] joins.
///
/// Always yields at least one word; the empty string yields a single empty word.
#[must_use]
pub fn split_upper_case(source: &str) -> SplitUpperCase<'_> {
    let mut chars = source.char_indices();
    // The first character never starts a word.
    chars.next();

    SplitUpperCase {
        source,
        chars,
        word_start: 0,
        previous: '\0',
        finished: false,
    }
}

/// Iterator over the words of a member name. See [`split_upper_case`].
#[derive(Debug, Clone)]
pub struct SplitUpperCase<'a> {
    source: &'a str,
    chars: CharIndices<'a>,
    word_start: usize,
    previous: char,
    finished: bool,
}

impl<'a> Iterator for SplitUpperCase<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let source = self.source;

        for (index, c) in self.chars.by_ref() {
            let boundary = c.is_uppercase() && !self.previous.is_whitespace();
            self.previous = c;

            if boundary {
                let word = &source[self.word_start..index];
                self.word_start = index;
                return Some(word);
            }
        }

        if self.finished {
            return None;
        }
        self.finished = true;
        Some(&source[self.word_start..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word() {
        assert_eq!(to_wire_name("Id"), "id");
    }

    #[test]
    fn test_multiple_words() {
        assert_eq!(to_wire_name("LastReadAt"), "last_read_at");
        assert_eq!(to_wire_name("PerPage"), "per_page");
        assert_eq!(to_wire_name("SubscriptionUrl"), "subscription_url");
    }

    #[test]
    fn test_capital_runs_are_not_acronyms() {
        assert_eq!(to_wire_name("HTMLUrl"), "h_t_m_l_url");
        assert_eq!(to_wire_name("ID"), "i_d");
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(to_wire_name(""), "");
        assert_eq!(split_upper_case("").collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn test_first_character_case_is_ignored() {
        assert_eq!(to_wire_name("lastReadAt"), "last_read_at");
        assert_eq!(to_wire_name("A"), "a");
    }

    #[test]
    fn test_snake_case_passes_through() {
        assert_eq!(to_wire_name("last_read_at"), "last_read_at");
        assert_eq!(to_wire_name("type"), "type");
    }

    #[test]
    fn test_whitespace_suppresses_boundary() {
        assert_eq!(to_wire_name("Last Read"), "last read");
        assert_eq!(
            split_upper_case("Last ReadAt").collect::<Vec<_>>(),
            vec!["Last Read", "At"]
        );
    }

    #[test]
    fn test_leading_whitespace_does_not_count_as_previous() {
        // Only characters after the first one are tracked as "previous".
        assert_eq!(
            split_upper_case(" Ab").collect::<Vec<_>>(),
            vec![" ", "Ab"]
        );
    }

    #[test]
    fn test_output_is_lowercase_with_one_word_per_capital() {
        for name in ["Id", "LastReadAt", "PerPage", "HTMLUrl", "AbCdEfGh"] {
            let wire = to_wire_name(name);
            assert!(!wire.chars().any(char::is_uppercase), "{wire}");

            let capitals = name.chars().skip(1).filter(|c| c.is_uppercase()).count();
            assert_eq!(wire.split('_').count(), capitals + 1, "{name}");
        }
    }

    #[test]
    fn test_non_ascii_words() {
        assert_eq!(to_wire_name("ÉtéÀPlage"), "été_à_plage");
    }
}
