// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Best-effort extraction of required class names from a challenge scenario.
//!
//! A name is a capitalized word directly followed by the word `class` in any letter case, as
//! in "- Book class (title, author)". This is a heuristic for seeding and gating the exercise,
//! not a grammar: "Book classes" also counts, lowercase words never do.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

fn required_class_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b([A-Z][A-Za-z0-9_]*)\s+(?i:class)").expect("scenario pattern is valid")
    })
}

/// Returns the distinct required class names in first-seen order.
pub fn required_class_names(scenario: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    required_class_pattern()
        .captures_iter(scenario)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str())
        .filter(|name| seen.insert(*name))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::required_class_names;

    #[test]
    fn extracts_names_in_first_seen_order() {
        let scenario = "Design a class diagram for a library system with:\n\
            - Book class (title, author, ISBN, availability)\n\
            - Member class (memberID, name, borrowedBooks)\n\
            - Librarian class (employeeID, name)\n\
            - Library class that manages books and members";

        assert_eq!(
            required_class_names(scenario),
            ["Book", "Member", "Librarian", "Library"]
        );
    }

    #[test]
    fn deduplicates_repeated_names() {
        assert_eq!(
            required_class_names("Book class, Member class, then Book class again"),
            ["Book", "Member"]
        );
    }

    #[rstest]
    #[case("Book CLASS", &["Book"])]
    #[case("Book Class", &["Book"])]
    #[case("Book\tclass", &["Book"])]
    #[case("Book classes", &["Book"])]
    #[case("book class", &[])]
    #[case("a class diagram", &[])]
    #[case("Order_2 class", &["Order_2"])]
    #[case("", &[])]
    fn matches_trigger_word_case_insensitively_but_keeps_capture_case(
        #[case] scenario: &str,
        #[case] expected: &[&str],
    ) {
        assert_eq!(required_class_names(scenario), expected);
    }

    #[test]
    fn scenario_without_class_keyword_yields_nothing() {
        let scenario = "Model the sequence for sending an email:\n\
            1. User clicks \"Send\" in Email Client";
        assert!(required_class_names(scenario).is_empty());
    }
}
