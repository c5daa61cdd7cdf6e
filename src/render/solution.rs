// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use crate::model::{ClassId, Diagram};

pub const UNNAMED_CLASS_PLACEHOLDER: &str = "(unnamed)";

/// Renders the learner's diagram as a plain-text listing.
///
/// ```text
/// Classes:
/// - Book: attrs=[title, isbn] methods=[checkOut()]
/// Relationships:
/// - Library --composition(holds)--> Book
/// ```
///
/// Relationship endpoints resolve to the current class name, falling back to the class id
/// when the name is empty.
pub fn render_solution(diagram: &Diagram) -> String {
    let titles: HashMap<&ClassId, &str> = diagram
        .classes()
        .iter()
        .map(|class| (class.id(), class.display_name().unwrap_or(class.id().as_str())))
        .collect();
    let title = |class_id: &ClassId| -> String {
        titles
            .get(class_id)
            .copied()
            .unwrap_or(class_id.as_str())
            .to_owned()
    };

    let mut lines = Vec::with_capacity(diagram.classes().len() + diagram.relationships().len() + 2);

    lines.push("Classes:".to_owned());
    for class in diagram.classes() {
        lines.push(format!(
            "- {}: attrs=[{}] methods=[{}]",
            class.display_name().unwrap_or(UNNAMED_CLASS_PLACEHOLDER),
            class.attributes().join(", "),
            class.methods().join(", "),
        ));
    }

    lines.push("Relationships:".to_owned());
    for relationship in diagram.relationships() {
        let label = if relationship.label().is_empty() {
            String::new()
        } else {
            format!("({})", relationship.label())
        };
        lines.push(format!(
            "- {} --{}{}--> {}",
            title(relationship.from_id()),
            relationship.kind(),
            label,
            title(relationship.to_id()),
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::render_solution;
    use crate::model::{ClassId, ClassNode, Diagram, Relationship, RelationshipId, RelationshipKind};

    fn sample() -> Diagram {
        let library = ClassNode::with_members(
            ClassId::new("c1").expect("class id"),
            "Library",
            vec!["- name".to_owned(), "- address".to_owned()],
            vec!["+ addBook()".to_owned()],
        );
        let book = ClassNode::new(ClassId::new("c2").expect("class id"), "Book");
        let unnamed = ClassNode::new(ClassId::new("c3").expect("class id"), "");

        Diagram::new(
            vec![library, book, unnamed],
            vec![
                Relationship::new(
                    RelationshipId::new("r1").expect("relationship id"),
                    ClassId::new("c1").expect("class id"),
                    ClassId::new("c2").expect("class id"),
                    RelationshipKind::Composition,
                    "holds",
                ),
                Relationship::new(
                    RelationshipId::new("r2").expect("relationship id"),
                    ClassId::new("c3").expect("class id"),
                    ClassId::new("c2").expect("class id"),
                    RelationshipKind::Association,
                    "",
                ),
            ],
        )
        .expect("diagram")
    }

    #[test]
    fn renders_classes_then_relationships() {
        assert_eq!(
            render_solution(&sample()),
            "Classes:\n\
             - Library: attrs=[- name, - address] methods=[+ addBook()]\n\
             - Book: attrs=[] methods=[]\n\
             - (unnamed): attrs=[] methods=[]\n\
             Relationships:\n\
             - Library --composition(holds)--> Book\n\
             - c3 --association--> Book"
        );
    }

    #[test]
    fn empty_diagram_renders_only_headers() {
        assert_eq!(render_solution(&Diagram::default()), "Classes:\nRelationships:");
    }

    #[test]
    fn rendering_is_pure() {
        let diagram = sample();
        assert_eq!(render_solution(&diagram), render_solution(&diagram));
    }
}
