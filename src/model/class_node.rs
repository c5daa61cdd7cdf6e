// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::ClassId;

/// One UML class box: a name plus ordered attribute and method lines.
///
/// Member lines are kept non-empty by the edit operations; the name may be empty while the
/// learner is typing and is rendered with a placeholder instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClassNode {
    #[schemars(with = "String")]
    id: ClassId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    attributes: Vec<String>,
    #[serde(default)]
    methods: Vec<String>,
}

impl ClassNode {
    pub fn new(id: ClassId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            attributes: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_members(
        id: ClassId,
        name: impl Into<String>,
        attributes: Vec<String>,
        methods: Vec<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            attributes,
            methods,
        }
    }

    pub fn id(&self) -> &ClassId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name, or `None` when it is empty.
    pub fn display_name(&self) -> Option<&str> {
        (!self.name.is_empty()).then_some(self.name.as_str())
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    pub fn members(&self, kind: MemberKind) -> &[String] {
        match kind {
            MemberKind::Attribute => &self.attributes,
            MemberKind::Method => &self.methods,
        }
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn members_mut(&mut self, kind: MemberKind) -> &mut Vec<String> {
        match kind {
            MemberKind::Attribute => &mut self.attributes,
            MemberKind::Method => &mut self.methods,
        }
    }
}

/// Which member list of a class an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Attribute,
    Method,
}

impl std::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attribute => f.write_str("attribute"),
            Self::Method => f.write_str("method"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ClassNode, MemberKind};
    use crate::model::ClassId;

    #[test]
    fn class_node_can_be_constructed_and_updated() {
        let mut node = ClassNode::new(ClassId::new("c1").expect("class id"), "Book");
        assert_eq!(node.name(), "Book");
        assert_eq!(node.display_name(), Some("Book"));
        assert!(node.attributes().is_empty());
        assert!(node.methods().is_empty());

        node.members_mut(MemberKind::Method).push("checkOut()".to_owned());
        node.set_name("");
        assert_eq!(node.display_name(), None);
        assert_eq!(node.members(MemberKind::Method), ["checkOut()".to_owned()]);
    }

    #[test]
    fn missing_member_lists_deserialize_as_empty() {
        let node: ClassNode = serde_json::from_str(r#"{"id":"c1","name":"Book"}"#).expect("node");
        assert!(node.attributes().is_empty());
        assert!(node.methods().is_empty());
    }
}
