// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::class_node::ClassNode;
use super::ids::{ClassId, RelationshipId};
use super::relationship::Relationship;

/// The class diagram edited during one challenge: ordered classes plus relationships.
///
/// Every relationship endpoint resolves to a class of the same diagram, no relationship
/// connects a class to itself, and class and relationship ids are unique. Deserialization
/// enforces the same rules, so a `Diagram` value is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "DiagramRecord")]
pub struct Diagram {
    classes: Vec<ClassNode>,
    relationships: Vec<Relationship>,
}

/// Wire shape of a persisted diagram: exactly `classes` and `relationships`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DiagramRecord {
    pub classes: Vec<ClassNode>,
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramIntegrityError {
    #[error("duplicate class id {0}")]
    DuplicateClassId(ClassId),
    #[error("duplicate relationship id {0}")]
    DuplicateRelationshipId(RelationshipId),
    #[error("relationship {relationship_id} references unknown class {class_id}")]
    DanglingEndpoint {
        relationship_id: RelationshipId,
        class_id: ClassId,
    },
    #[error("relationship {0} connects a class to itself")]
    SelfRelationship(RelationshipId),
}

impl Diagram {
    pub fn new(
        classes: Vec<ClassNode>,
        relationships: Vec<Relationship>,
    ) -> Result<Self, DiagramIntegrityError> {
        let diagram = Self {
            classes,
            relationships,
        };
        diagram.check_integrity()?;
        Ok(diagram)
    }

    pub fn classes(&self) -> &[ClassNode] {
        &self.classes
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn class(&self, class_id: &ClassId) -> Option<&ClassNode> {
        self.classes.iter().find(|class| class.id() == class_id)
    }

    pub fn contains_class(&self, class_id: &ClassId) -> bool {
        self.class(class_id).is_some()
    }

    pub fn first_class(&self) -> Option<&ClassNode> {
        self.classes.first()
    }

    pub fn relationship(&self, relationship_id: &RelationshipId) -> Option<&Relationship> {
        self.relationships
            .iter()
            .find(|relationship| relationship.id() == relationship_id)
    }

    pub fn contains_relationship(&self, relationship_id: &RelationshipId) -> bool {
        self.relationship(relationship_id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.relationships.is_empty()
    }

    pub(crate) fn class_mut(&mut self, class_id: &ClassId) -> Option<&mut ClassNode> {
        self.classes.iter_mut().find(|class| class.id() == class_id)
    }

    pub(crate) fn relationships_mut(&mut self) -> &mut Vec<Relationship> {
        &mut self.relationships
    }

    pub fn check_integrity(&self) -> Result<(), DiagramIntegrityError> {
        let mut class_ids = HashSet::with_capacity(self.classes.len());
        for class in &self.classes {
            if !class_ids.insert(class.id()) {
                return Err(DiagramIntegrityError::DuplicateClassId(class.id().clone()));
            }
        }

        let mut relationship_ids = HashSet::with_capacity(self.relationships.len());
        for relationship in &self.relationships {
            if !relationship_ids.insert(relationship.id()) {
                return Err(DiagramIntegrityError::DuplicateRelationshipId(
                    relationship.id().clone(),
                ));
            }
            for endpoint in [relationship.from_id(), relationship.to_id()] {
                if !class_ids.contains(endpoint) {
                    return Err(DiagramIntegrityError::DanglingEndpoint {
                        relationship_id: relationship.id().clone(),
                        class_id: endpoint.clone(),
                    });
                }
            }
            if relationship.from_id() == relationship.to_id() {
                return Err(DiagramIntegrityError::SelfRelationship(
                    relationship.id().clone(),
                ));
            }
        }

        Ok(())
    }
}

impl TryFrom<DiagramRecord> for Diagram {
    type Error = DiagramIntegrityError;

    fn try_from(record: DiagramRecord) -> Result<Self, Self::Error> {
        Self::new(record.classes, record.relationships)
    }
}
