// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::{ClassId, RelationshipId};

/// The fixed set of class-diagram relationship types.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    #[default]
    Association,
    Aggregation,
    Composition,
    Inheritance,
    Realization,
}

impl RelationshipKind {
    pub const ALL: [RelationshipKind; 5] = [
        Self::Association,
        Self::Aggregation,
        Self::Composition,
        Self::Inheritance,
        Self::Realization,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Association => "association",
            Self::Aggregation => "aggregation",
            Self::Composition => "composition",
            Self::Inheritance => "inheritance",
            Self::Realization => "realization",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unknown relationship kind {0:?} (expected association, aggregation, composition, \
     inheritance or realization)"
)]
pub struct ParseRelationshipKindError(String);

impl FromStr for RelationshipKind {
    type Err = ParseRelationshipKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseRelationshipKindError(s.to_owned()))
    }
}

/// A directed, typed edge between two classes of the same diagram.
///
/// Relationships are immutable once created; removal plus re-creation is the update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    #[schemars(with = "String")]
    id: RelationshipId,
    #[schemars(with = "String")]
    from_id: ClassId,
    #[schemars(with = "String")]
    to_id: ClassId,
    #[serde(rename = "type")]
    kind: RelationshipKind,
    #[serde(default)]
    label: String,
}

impl Relationship {
    pub fn new(
        id: RelationshipId,
        from_id: ClassId,
        to_id: ClassId,
        kind: RelationshipKind,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id,
            from_id,
            to_id,
            kind,
            label: label.into(),
        }
    }

    pub fn id(&self) -> &RelationshipId {
        &self.id
    }

    pub fn from_id(&self) -> &ClassId {
        &self.from_id
    }

    pub fn to_id(&self) -> &ClassId {
        &self.to_id
    }

    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Relationship, RelationshipKind};
    use crate::model::{ClassId, RelationshipId};

    #[rstest]
    #[case("association", RelationshipKind::Association)]
    #[case("Aggregation", RelationshipKind::Aggregation)]
    #[case(" COMPOSITION ", RelationshipKind::Composition)]
    #[case("inheritance", RelationshipKind::Inheritance)]
    #[case("realization", RelationshipKind::Realization)]
    fn relationship_kind_parses_case_insensitively(
        #[case] raw: &str,
        #[case] expected: RelationshipKind,
    ) {
        assert_eq!(raw.parse::<RelationshipKind>(), Ok(expected));
    }

    #[test]
    fn relationship_kind_rejects_unknown_names() {
        assert!("dependency".parse::<RelationshipKind>().is_err());
    }

    #[test]
    fn relationship_uses_camel_case_wire_fields() {
        let rel = Relationship::new(
            RelationshipId::new("r1").expect("relationship id"),
            ClassId::new("c1").expect("class id"),
            ClassId::new("c2").expect("class id"),
            RelationshipKind::Composition,
            "owns",
        );

        let json = serde_json::to_value(&rel).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "id": "r1",
                "fromId": "c1",
                "toId": "c2",
                "type": "composition",
                "label": "owns",
            })
        );
    }
}
