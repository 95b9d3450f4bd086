use tracing::{debug, instrument};

use crate::models::{strip_leading_title, Doctor};

/// Surname spellings users commonly swap for one another.
const SURNAME_VARIANTS: [(&str, &str); 1] = [("thompson", "thomson")];

/// Resolves a doctor mentioned by name in free text against a candidate list.
#[derive(Debug, Default, Clone, Copy)]
pub struct DoctorNameMatcher;

impl DoctorNameMatcher {
    pub fn new() -> Self {
        Self
    }

    /// First candidate, in list order, whose name appears in `input`.
    #[instrument(skip(self, candidates))]
    pub fn find_match<'a, D>(&self, input: &str, candidates: &'a [D]) -> Option<&'a D>
    where
        D: AsRef<Doctor>,
    {
        let input = input.to_lowercase();
        let clean_input = strip_title_tokens(&input);

        let found = candidates
            .iter()
            .find(|candidate| Self::is_mentioned(candidate.as_ref(), &input, &clean_input));

        if let Some(candidate) = found {
            debug!("Matched doctor {} from free text", candidate.as_ref().name);
        }
        found
    }

    fn is_mentioned(doctor: &Doctor, input: &str, clean_input: &str) -> bool {
        let full_name = doctor.name.to_lowercase();
        if input.contains(&full_name) {
            return true;
        }

        let bare_name = strip_leading_title(&full_name);
        if bare_name.is_empty() {
            return false;
        }
        if input.contains(bare_name) || clean_input.contains(bare_name) {
            return true;
        }

        let Some((first, last)) = bare_name.split_once(' ') else {
            return false;
        };
        let (first, last) = (first.trim(), last.trim());
        if first.is_empty() || last.is_empty() {
            return false;
        }

        let mentions_both = |text: &str| text.contains(first) && text.contains(last);
        if mentions_both(input) || mentions_both(clean_input) {
            return true;
        }

        input.contains(first)
            && surname_variant(last)
                .is_some_and(|variant| input.contains(variant) || clean_input.contains(variant))
    }
}

fn surname_variant(surname: &str) -> Option<&'static str> {
    SURNAME_VARIANTS.iter().find_map(|(a, b)| {
        if surname == *a {
            Some(*b)
        } else if surname == *b {
            Some(*a)
        } else {
            None
        }
    })
}

/// Remove standalone "dr" / "dr." tokens anywhere in already-lowercased text.
fn strip_title_tokens(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    let mut at_word_start = true;

    while !rest.is_empty() {
        if at_word_start {
            if let Some(after) = rest.strip_prefix("dr") {
                let (after, dotted) = match after.strip_prefix('.') {
                    Some(after_dot) => (after_dot, true),
                    None => (after, false),
                };
                if dotted || !after.starts_with(char::is_alphanumeric) {
                    rest = after.trim_start();
                    continue;
                }
            }
        }

        let mut chars = rest.chars();
        let Some(c) = chars.next() else { break };
        out.push(c);
        at_word_start = !c.is_alphanumeric();
        rest = chars.as_str();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_tokens_are_removed_only_at_word_boundaries() {
        assert_eq!(strip_title_tokens("book with dr. sarah"), "book with sarah");
        assert_eq!(strip_title_tokens("dr sarah"), "sarah");
        assert_eq!(strip_title_tokens("andrew drives"), "andrew drives");
    }

    #[test]
    fn surname_variants_are_symmetric() {
        assert_eq!(surname_variant("thompson"), Some("thomson"));
        assert_eq!(surname_variant("thomson"), Some("thompson"));
        assert_eq!(surname_variant("smith"), None);
    }
}
