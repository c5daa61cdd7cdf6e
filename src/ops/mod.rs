// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Edit operations for challenge diagrams.
//!
//! Every operation takes a diagram by reference and returns a new diagram; the input value is
//! never touched. Invalid requests (unknown ids, blank text, self relationships) leave the
//! diagram unchanged. [`try_apply_op`] reports why an op was rejected, [`apply_op`] swallows
//! the reason after logging it.

use thiserror::Error;
use tracing::debug;

use crate::model::{
    ClassId, ClassNode, Diagram, MemberKind, Relationship, RelationshipId, RelationshipKind,
};

/// Class names used when a scenario names no classes.
pub const FALLBACK_CLASS_NAMES: [&str; 3] = ["Class1", "Class2", "Class3"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramOp {
    RenameClass {
        class_id: ClassId,
        name: String,
    },
    AddMember {
        class_id: ClassId,
        kind: MemberKind,
        text: String,
    },
    RemoveMember {
        class_id: ClassId,
        kind: MemberKind,
        index: usize,
    },
    UpdateClass {
        class_id: ClassId,
        patch: ClassPatch,
    },
    AddRelationship {
        from_id: ClassId,
        to_id: ClassId,
        kind: RelationshipKind,
        label: String,
    },
    RemoveRelationship {
        relationship_id: RelationshipId,
    },
}

/// Field replacements for one class. `None` leaves the field as it is.
///
/// Member lines are trimmed and blank lines dropped when the patch is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassPatch {
    pub name: Option<String>,
    pub attributes: Option<Vec<String>>,
    pub methods: Option<Vec<String>>,
}

/// Why an op left the diagram unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpRejected {
    #[error("class not found (id={class_id})")]
    UnknownClass { class_id: ClassId },
    #[error("{kind} text is blank")]
    BlankMember { kind: MemberKind },
    #[error("{kind} index {index} is out of range (len={len})")]
    MemberIndexOutOfRange {
        kind: MemberKind,
        index: usize,
        len: usize,
    },
    #[error("relationship endpoint is not set")]
    MissingEndpoint,
    #[error("relationship cannot connect class {class_id} to itself")]
    SelfRelationship { class_id: ClassId },
    #[error("relationship not found (id={relationship_id})")]
    UnknownRelationship { relationship_id: RelationshipId },
}

/// Builds a fresh diagram with one empty class per name and no relationships.
///
/// An empty `names` list falls back to [`FALLBACK_CLASS_NAMES`].
pub fn initialize<S: AsRef<str>>(names: &[S]) -> Diagram {
    let classes: Vec<ClassNode> = if names.is_empty() {
        FALLBACK_CLASS_NAMES
            .iter()
            .map(|name| ClassNode::new(ClassId::generate(), *name))
            .collect()
    } else {
        names
            .iter()
            .map(|name| ClassNode::new(ClassId::generate(), name.as_ref()))
            .collect()
    };

    // Generated ids are unique and there are no relationships, so this cannot fail.
    Diagram::new(classes, Vec::new()).unwrap_or_default()
}

/// Discards every edit and starts over from the given names.
pub fn reset<S: AsRef<str>>(names: &[S]) -> Diagram {
    initialize(names)
}

pub fn try_apply_op(diagram: &Diagram, op: &DiagramOp) -> Result<Diagram, OpRejected> {
    let mut next = diagram.clone();

    match op {
        DiagramOp::RenameClass { class_id, name } => {
            let class = class_mut(&mut next, class_id)?;
            class.set_name(name.as_str());
        }
        DiagramOp::AddMember {
            class_id,
            kind,
            text,
        } => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(OpRejected::BlankMember { kind: *kind });
            }
            let class = class_mut(&mut next, class_id)?;
            class.members_mut(*kind).push(trimmed.to_owned());
        }
        DiagramOp::RemoveMember {
            class_id,
            kind,
            index,
        } => {
            let members = class_mut(&mut next, class_id)?.members_mut(*kind);
            if *index >= members.len() {
                return Err(OpRejected::MemberIndexOutOfRange {
                    kind: *kind,
                    index: *index,
                    len: members.len(),
                });
            }
            members.remove(*index);
        }
        DiagramOp::UpdateClass { class_id, patch } => {
            let class = class_mut(&mut next, class_id)?;
            if let Some(name) = &patch.name {
                class.set_name(name.as_str());
            }
            if let Some(attributes) = &patch.attributes {
                *class.members_mut(MemberKind::Attribute) = normalize_member_lines(attributes);
            }
            if let Some(methods) = &patch.methods {
                *class.members_mut(MemberKind::Method) = normalize_member_lines(methods);
            }
        }
        DiagramOp::AddRelationship {
            from_id,
            to_id,
            kind,
            label,
        } => {
            for endpoint in [from_id, to_id] {
                if !next.contains_class(endpoint) {
                    return Err(OpRejected::UnknownClass {
                        class_id: endpoint.clone(),
                    });
                }
            }
            if from_id == to_id {
                return Err(OpRejected::SelfRelationship {
                    class_id: from_id.clone(),
                });
            }

            let relationship_id = fresh_relationship_id(&next);
            next.relationships_mut().push(Relationship::new(
                relationship_id,
                from_id.clone(),
                to_id.clone(),
                *kind,
                label.trim(),
            ));
        }
        DiagramOp::RemoveRelationship { relationship_id } => {
            let relationships = next.relationships_mut();
            let before = relationships.len();
            relationships.retain(|relationship| relationship.id() != relationship_id);
            if relationships.len() == before {
                return Err(OpRejected::UnknownRelationship {
                    relationship_id: relationship_id.clone(),
                });
            }
        }
    }

    Ok(next)
}

/// Applies `op`, returning an unchanged copy of `diagram` when the op is rejected.
pub fn apply_op(diagram: &Diagram, op: &DiagramOp) -> Diagram {
    match try_apply_op(diagram, op) {
        Ok(next) => next,
        Err(reason) => {
            debug!(target: "uml_tutor::ops", %reason, "edit rejected; diagram unchanged");
            diagram.clone()
        }
    }
}

pub fn rename_class(diagram: &Diagram, class_id: &ClassId, name: impl Into<String>) -> Diagram {
    apply_op(
        diagram,
        &DiagramOp::RenameClass {
            class_id: class_id.clone(),
            name: name.into(),
        },
    )
}

pub fn add_attribute(diagram: &Diagram, class_id: &ClassId, text: &str) -> Diagram {
    add_member(diagram, class_id, MemberKind::Attribute, text)
}

pub fn add_method(diagram: &Diagram, class_id: &ClassId, text: &str) -> Diagram {
    add_member(diagram, class_id, MemberKind::Method, text)
}

pub fn remove_attribute(diagram: &Diagram, class_id: &ClassId, index: usize) -> Diagram {
    remove_member(diagram, class_id, MemberKind::Attribute, index)
}

pub fn remove_method(diagram: &Diagram, class_id: &ClassId, index: usize) -> Diagram {
    remove_member(diagram, class_id, MemberKind::Method, index)
}

pub fn update_class(diagram: &Diagram, class_id: &ClassId, patch: ClassPatch) -> Diagram {
    apply_op(
        diagram,
        &DiagramOp::UpdateClass {
            class_id: class_id.clone(),
            patch,
        },
    )
}

pub fn add_relationship(
    diagram: &Diagram,
    from_id: &ClassId,
    to_id: &ClassId,
    kind: RelationshipKind,
    label: &str,
) -> Diagram {
    apply_op(
        diagram,
        &DiagramOp::AddRelationship {
            from_id: from_id.clone(),
            to_id: to_id.clone(),
            kind,
            label: label.to_owned(),
        },
    )
}

pub fn remove_relationship(diagram: &Diagram, relationship_id: &RelationshipId) -> Diagram {
    apply_op(
        diagram,
        &DiagramOp::RemoveRelationship {
            relationship_id: relationship_id.clone(),
        },
    )
}

fn add_member(diagram: &Diagram, class_id: &ClassId, kind: MemberKind, text: &str) -> Diagram {
    apply_op(
        diagram,
        &DiagramOp::AddMember {
            class_id: class_id.clone(),
            kind,
            text: text.to_owned(),
        },
    )
}

fn remove_member(diagram: &Diagram, class_id: &ClassId, kind: MemberKind, index: usize) -> Diagram {
    apply_op(
        diagram,
        &DiagramOp::RemoveMember {
            class_id: class_id.clone(),
            kind,
            index,
        },
    )
}

fn class_mut<'a>(
    diagram: &'a mut Diagram,
    class_id: &ClassId,
) -> Result<&'a mut ClassNode, OpRejected> {
    diagram
        .class_mut(class_id)
        .ok_or_else(|| OpRejected::UnknownClass {
            class_id: class_id.clone(),
        })
}

/// Splits multi-line editor text into member lines: trimmed, blank lines dropped.
pub fn split_member_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

fn normalize_member_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

fn fresh_relationship_id(diagram: &Diagram) -> RelationshipId {
    loop {
        let candidate = RelationshipId::generate();
        if !diagram.contains_relationship(&candidate) {
            return candidate;
        }
    }
}
