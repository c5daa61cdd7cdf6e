// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Projections of a challenge diagram for display.
//!
//! [`render_solution`] produces the plain-text summary shown next to the editor;
//! [`render_svg`] draws the schematic from a [`crate::layout::ClassLayout`].

use crate::model::RelationshipKind;

pub mod solution;
pub mod svg;

pub use solution::{render_solution, UNNAMED_CLASS_PLACEHOLDER};
pub use svg::render_svg;

/// Line terminator drawn at one end of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Arrow,
    HollowTriangle,
    HollowDiamond,
    FilledDiamond,
}

impl Marker {
    pub const ALL: [Marker; 4] = [
        Self::Arrow,
        Self::HollowTriangle,
        Self::HollowDiamond,
        Self::FilledDiamond,
    ];

    pub fn svg_id(self) -> &'static str {
        match self {
            Self::Arrow => "arrow",
            Self::HollowTriangle => "triangle",
            Self::HollowDiamond => "diamond",
            Self::FilledDiamond => "diamond-filled",
        }
    }
}

/// How a relationship line is drawn.
///
/// Diamonds sit at the source (whole) end; arrowheads and triangles at the target end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeDecoration {
    pub start: Option<Marker>,
    pub end: Option<Marker>,
    pub dashed: bool,
}

impl EdgeDecoration {
    pub fn for_kind(kind: RelationshipKind) -> Self {
        match kind {
            RelationshipKind::Association => Self {
                start: None,
                end: Some(Marker::Arrow),
                dashed: false,
            },
            RelationshipKind::Aggregation => Self {
                start: Some(Marker::HollowDiamond),
                end: Some(Marker::Arrow),
                dashed: false,
            },
            RelationshipKind::Composition => Self {
                start: Some(Marker::FilledDiamond),
                end: Some(Marker::Arrow),
                dashed: false,
            },
            RelationshipKind::Inheritance => Self {
                start: None,
                end: Some(Marker::HollowTriangle),
                dashed: false,
            },
            RelationshipKind::Realization => Self {
                start: None,
                end: Some(Marker::HollowTriangle),
                dashed: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{EdgeDecoration, Marker};
    use crate::model::RelationshipKind;

    #[rstest]
    #[case(RelationshipKind::Association, None, Some(Marker::Arrow), false)]
    #[case(RelationshipKind::Aggregation, Some(Marker::HollowDiamond), Some(Marker::Arrow), false)]
    #[case(RelationshipKind::Composition, Some(Marker::FilledDiamond), Some(Marker::Arrow), false)]
    #[case(RelationshipKind::Inheritance, None, Some(Marker::HollowTriangle), false)]
    #[case(RelationshipKind::Realization, None, Some(Marker::HollowTriangle), true)]
    fn decoration_depends_on_kind(
        #[case] kind: RelationshipKind,
        #[case] start: Option<Marker>,
        #[case] end: Option<Marker>,
        #[case] dashed: bool,
    ) {
        assert_eq!(EdgeDecoration::for_kind(kind), EdgeDecoration { start, end, dashed });
    }
}
