//! Validity and uniqueness checks over fully-lettered slots.

use crate::grid::Slot;
use crate::library::Library;
use std::collections::HashSet;

/// Why a set of full slots cannot stand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A full slot spells something outside the dictionary.
    NotAWord(String),
    /// Two full slots spell the same word.
    Duplicate(String),
}

/// Every full slot spells a dictionary word.
#[must_use]
pub fn all_words(library: &Library, full_slots: &[Slot]) -> bool {
    full_slots.iter().all(|slot| library.is_word(&slot.pattern))
}

/// No two full slots spell the same word.
#[must_use]
pub fn all_distinct(full_slots: &[Slot]) -> bool {
    let mut seen = HashSet::with_capacity(full_slots.len());
    full_slots.iter().all(|slot| seen.insert(slot.pattern.as_str()))
}

/// First violation among `full_slots`, if any. Validity is checked before
/// uniqueness, matching the engine's prune order.
#[must_use]
pub fn find_violation(library: &Library, full_slots: &[Slot]) -> Option<Violation> {
    for slot in full_slots {
        if !library.is_word(&slot.pattern) {
            return Some(Violation::NotAWord(slot.pattern.clone()));
        }
    }

    let mut seen = HashSet::with_capacity(full_slots.len());
    for slot in full_slots {
        if !seen.insert(slot.pattern.as_str()) {
            return Some(Violation::Duplicate(slot.pattern.clone()));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Point, Span};

    fn slot(pattern: &str) -> Slot {
        Slot {
            span: Span { start: Point::new(0, 0), len: pattern.len(), vertical: false },
            pattern: pattern.to_string(),
        }
    }

    fn library() -> Library {
        Library::parse_from_str("cat\ndog\ntoad\n", 1, 15)
    }

    #[test]
    fn test_valid_distinct_slots_pass() {
        let library = library();
        let slots = [slot("CAT"), slot("DOG")];
        assert!(all_words(&library, &slots));
        assert!(all_distinct(&slots));
        assert_eq!(find_violation(&library, &slots), None);
    }

    #[test]
    fn test_non_word_is_flagged() {
        let library = library();
        let slots = [slot("CAT"), slot("XYZ")];
        assert!(!all_words(&library, &slots));
        assert_eq!(
            find_violation(&library, &slots),
            Some(Violation::NotAWord("XYZ".to_string()))
        );
    }

    #[test]
    fn test_duplicate_is_flagged() {
        let library = library();
        let slots = [slot("CAT"), slot("DOG"), slot("CAT")];
        assert!(all_words(&library, &slots));
        assert!(!all_distinct(&slots));
        assert_eq!(
            find_violation(&library, &slots),
            Some(Violation::Duplicate("CAT".to_string()))
        );
    }

    #[test]
    fn test_validity_reported_before_uniqueness() {
        let library = library();
        let slots = [slot("CAT"), slot("CAT"), slot("XYZ")];
        assert_eq!(
            find_violation(&library, &slots),
            Some(Violation::NotAWord("XYZ".to_string()))
        );
    }

    #[test]
    fn test_no_full_slots_is_fine() {
        let library = library();
        assert_eq!(find_violation(&library, &[]), None);
        assert!(all_words(&library, &[]));
        assert!(all_distinct(&[]));
    }
}
