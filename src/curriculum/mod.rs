// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Lessons that carry a diagram challenge.
//!
//! The built-in catalog is embedded at compile time from `lessons.toml`; other catalogs can be
//! parsed from the same TOML shape with [`Catalog::from_toml_str`].

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::model::LessonId;

const BUILTIN_CATALOG: &str = include_str!("lessons.toml");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Challenge {
    title: String,
    #[serde(default)]
    description: String,
    scenario: String,
    #[serde(default)]
    hints: Vec<String>,
    #[serde(default)]
    solution: String,
}

impl Challenge {
    pub fn new(title: impl Into<String>, scenario: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            scenario: scenario.into(),
            hints: Vec::new(),
            solution: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hints = hints.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = solution.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Free text the required class names are read from.
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Reference solution, shown verbatim.
    pub fn solution(&self) -> &str {
        &self.solution
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Lesson {
    id: LessonId,
    title: String,
    challenge: Challenge,
}

impl Lesson {
    pub fn new(id: LessonId, title: impl Into<String>, challenge: Challenge) -> Self {
        Self {
            id,
            title: title.into(),
            challenge,
        }
    }

    pub fn id(&self) -> &LessonId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog TOML is invalid: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("lesson {0} is listed more than once")]
    DuplicateLesson(LessonId),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    lessons: Vec<Lesson>,
}

/// Ordered, id-unique list of challenge lessons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    lessons: Vec<Lesson>,
}

impl Catalog {
    pub fn new(lessons: Vec<Lesson>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(lessons.len());
        for lesson in &lessons {
            if !seen.insert(lesson.id()) {
                return Err(CatalogError::DuplicateLesson(lesson.id().clone()));
            }
        }
        Ok(Self { lessons })
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_toml_str(toml_source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(toml_source)?;
        Self::new(file.lessons)
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.lessons
            .iter()
            .find(|lesson| lesson.id().as_str() == lesson_id)
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Catalog, CatalogError};
    use crate::scenario::required_class_names;

    #[test]
    fn builtin_catalog_has_the_three_challenges_in_order() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        let ids: Vec<&str> = catalog.lessons().iter().map(|l| l.id().as_str()).collect();
        assert_eq!(ids, vec!["class_diagram", "use_case", "sequence_diagram"]);

        for lesson in catalog.lessons() {
            assert!(!lesson.challenge().scenario().is_empty());
            assert_eq!(lesson.challenge().hints().len(), 4);
            assert!(!lesson.challenge().solution().is_empty());
        }
    }

    #[rstest]
    #[case("class_diagram", vec!["Book", "Member", "Librarian", "Library"])]
    #[case("use_case", vec![])]
    #[case("sequence_diagram", vec![])]
    fn builtin_scenarios_name_their_required_classes(
        #[case] lesson_id: &str,
        #[case] expected: Vec<&str>,
    ) {
        let catalog = Catalog::builtin().expect("builtin catalog");
        let lesson = catalog.lesson(lesson_id).expect("lesson");
        assert_eq!(required_class_names(lesson.challenge().scenario()), expected);
    }

    #[test]
    fn reference_solution_is_kept_verbatim() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        let solution = catalog
            .lesson("use_case")
            .expect("lesson")
            .challenge()
            .solution();
        assert!(solution.starts_with("┌"));
        assert!(solution.contains("  /|\\   │"));
    }

    #[test]
    fn unknown_lesson_is_none() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        assert!(catalog.lesson("intro").is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let source = r#"
            [[lessons]]
            id = "a"
            title = "A"
            [lessons.challenge]
            title = "A"
            scenario = "X class"

            [[lessons]]
            id = "a"
            title = "A again"
            [lessons.challenge]
            title = "A"
            scenario = "Y class"
        "#;
        assert!(matches!(
            Catalog::from_toml_str(source),
            Err(CatalogError::DuplicateLesson(id)) if id.as_str() == "a"
        ));
    }

    #[test]
    fn invalid_lesson_id_is_a_parse_error() {
        let source = r#"
            [[lessons]]
            id = "a/b"
            title = "A"
            [lessons.challenge]
            title = "A"
            scenario = ""
        "#;
        assert!(matches!(Catalog::from_toml_str(source), Err(CatalogError::Parse(_))));
    }
}
