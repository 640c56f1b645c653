/// Title-case `s`: the first letter of every word upper-cased, the rest
/// lower-cased. Separators are kept as they are.
///
/// A word starts after any character that is neither alphanumeric nor an
/// apostrophe, so `"don't PANIC"` becomes `"Don't Panic"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        in_word = c.is_alphanumeric() || c == '\'';
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_upper() {
        assert_eq!(title_case("PENDING"), "Pending");
    }

    #[test]
    fn single_word_lower() {
        assert_eq!(title_case("yes"), "Yes");
    }

    #[test]
    fn multiple_words_keep_spacing() {
        assert_eq!(title_case("ask  me LATER"), "Ask  Me Later");
    }

    #[test]
    fn apostrophe_stays_inside_word() {
        assert_eq!(title_case("don't PANIC"), "Don't Panic");
    }

    #[test]
    fn punctuation_starts_new_word() {
        assert_eq!(title_case("yes-or-no"), "Yes-Or-No");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn non_ascii() {
        assert_eq!(title_case("ÉCOLE"), "École");
    }
}
