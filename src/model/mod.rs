// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model for the diagram-building exercise.
//!
//! A [`Diagram`] holds ordered [`ClassNode`]s and typed [`Relationship`]s between them.

pub mod class_node;
pub mod diagram;
pub mod ids;
pub mod relationship;

pub use class_node::{ClassNode, MemberKind};
pub use diagram::{Diagram, DiagramIntegrityError, DiagramRecord};
pub use ids::{ClassId, Id, IdError, IdPrefix, LessonId, RelationshipId};
pub use relationship::{ParseRelationshipKindError, Relationship, RelationshipKind};

/// JSON schema of the persisted diagram payload.
pub fn diagram_json_schema() -> schemars::Schema {
    schemars::schema_for!(DiagramRecord)
}
