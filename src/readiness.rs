// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Submission gate for a challenge diagram.
//!
//! Readiness answers "may the learner submit?", not "is the diagram correct?". Required names
//! match as case-insensitive substrings of class names, so "LibraryBook" satisfies "Book".

use serde::Serialize;

use crate::model::Diagram;
use crate::scenario::required_class_names;

pub const MIN_CLASSES: usize = 3;
pub const MIN_RELATIONSHIPS: usize = 1;

/// Three independent completion criteria; all are always computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Readiness {
    pub classes_ok: bool,
    pub relationships_ok: bool,
    pub required_ok: bool,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        self.classes_ok && self.relationships_ok && self.required_ok
    }
}

pub fn evaluate(diagram: &Diagram, scenario: &str) -> Readiness {
    let class_names: Vec<String> = diagram
        .classes()
        .iter()
        .map(|class| class.name().to_lowercase())
        .collect();

    let required_ok = required_class_names(scenario).iter().all(|required| {
        let required = required.to_lowercase();
        class_names.iter().any(|name| name.contains(&required))
    });

    Readiness {
        classes_ok: diagram.classes().len() >= MIN_CLASSES,
        relationships_ok: diagram.relationships().len() >= MIN_RELATIONSHIPS,
        required_ok,
    }
}
