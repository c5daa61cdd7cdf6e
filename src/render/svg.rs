// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt::{self, Write as _};

use super::{EdgeDecoration, Marker};
use crate::layout::ClassLayout;
use crate::model::{ClassNode, Diagram};

const STROKE: &str = "#38bdf8";
const BOX_FILL: &str = "#111827";
const TITLE_FILL: &str = "#0b172a";
const DIVIDER: &str = "#1f2937";
const TEXT: &str = "#e5e7eb";
const BOX_NAME_PLACEHOLDER: &str = "Class";
const TITLE_BAND: u32 = 28;
const MEMBER_LINE_HEIGHT: u32 = 14;

/// Draws the diagram as a standalone SVG document.
///
/// Relationships are drawn first, center to center, so class boxes sit on top of them.
/// Relationships whose endpoints have no placement are skipped.
pub fn render_svg(diagram: &Diagram, layout: &ClassLayout) -> Result<String, fmt::Error> {
    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="Inter, system-ui, sans-serif">"#,
        w = layout.width(),
        h = layout.height(),
    )?;
    write_marker_defs(&mut svg)?;

    for relationship in diagram.relationships() {
        let (Some(from), Some(to)) = (
            layout.position(relationship.from_id()),
            layout.position(relationship.to_id()),
        ) else {
            continue;
        };
        let (x1, y1) = from.center();
        let (x2, y2) = to.center();
        let decoration = EdgeDecoration::for_kind(relationship.kind());

        svg.push_str("  <g>\n");
        write!(
            svg,
            r#"    <line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="{STROKE}" stroke-width="2""#
        )?;
        if decoration.dashed {
            svg.push_str(r#" stroke-dasharray="6 4""#);
        }
        if let Some(marker) = decoration.start {
            write!(svg, r#" marker-start="url(#{})""#, marker.svg_id())?;
        }
        if let Some(marker) = decoration.end {
            write!(svg, r#" marker-end="url(#{})""#, marker.svg_id())?;
        }
        svg.push_str(" />\n");

        if !relationship.label().is_empty() {
            writeln!(
                svg,
                r#"    <text x="{:.1}" y="{:.1}" fill="{STROKE}" font-size="12" text-anchor="middle">{}</text>"#,
                (x1 + x2) / 2.0,
                (y1 + y2) / 2.0 - 6.0,
                escape_xml(relationship.label()),
            )?;
        }
        svg.push_str("  </g>\n");
    }

    for class in diagram.classes() {
        let Some(node) = layout.position(class.id()) else {
            continue;
        };
        write_class_box(&mut svg, class, node.x, node.y, node.w, node.h)?;
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

fn write_marker_defs(svg: &mut String) -> fmt::Result {
    svg.push_str("  <defs>\n");
    for marker in Marker::ALL {
        let (size, ref_x, ref_y, path, fill) = match marker {
            Marker::Arrow => (10, 10, 5, "M0,0 L10,5 L0,10 z", STROKE),
            Marker::HollowTriangle => (12, 12, 6, "M0,0 L12,6 L0,12 z", "white"),
            Marker::HollowDiamond => (16, 16, 8, "M0,8 L8,0 L16,8 L8,16 z", "white"),
            Marker::FilledDiamond => (16, 16, 8, "M0,8 L8,0 L16,8 L8,16 z", STROKE),
        };
        writeln!(
            svg,
            r#"    <marker id="{}" markerWidth="{size}" markerHeight="{size}" refX="{ref_x}" refY="{ref_y}" orient="auto">"#,
            marker.svg_id(),
        )?;
        writeln!(
            svg,
            r#"      <path d="{path}" fill="{fill}" stroke="{STROKE}" stroke-width="1.5" />"#
        )?;
        svg.push_str("    </marker>\n");
    }
    svg.push_str("  </defs>\n");
    Ok(())
}

fn write_class_box(
    svg: &mut String,
    class: &ClassNode,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
) -> fmt::Result {
    writeln!(svg, r#"  <g transform="translate({x}, {y})">"#)?;
    writeln!(
        svg,
        r#"    <rect width="{w}" height="{h}" rx="6" ry="6" fill="{BOX_FILL}" stroke="{STROKE}" stroke-width="2" opacity="0.95" />"#
    )?;
    writeln!(
        svg,
        r#"    <rect width="{w}" height="{TITLE_BAND}" rx="6" ry="6" fill="{TITLE_FILL}" stroke="{STROKE}" stroke-width="1.5" />"#
    )?;
    writeln!(
        svg,
        r#"    <text x="10" y="18" fill="white" font-size="14" font-weight="700">{}</text>"#,
        escape_xml(class.display_name().unwrap_or(BOX_NAME_PLACEHOLDER)),
    )?;

    writeln!(svg, r#"    <line x1="0" y1="40" x2="{w}" y2="40" stroke="{DIVIDER}" />"#)?;
    write_member_lines(svg, class.attributes(), 56)?;

    let methods_divider = h.saturating_sub(40);
    writeln!(
        svg,
        r#"    <line x1="0" y1="{methods_divider}" x2="{w}" y2="{methods_divider}" stroke="{DIVIDER}" />"#
    )?;
    write_member_lines(svg, class.methods(), h.saturating_sub(22))?;

    svg.push_str("  </g>\n");
    Ok(())
}

fn write_member_lines(svg: &mut String, lines: &[String], y: u32) -> fmt::Result {
    write!(svg, r#"    <text x="10" y="{y}" fill="{TEXT}" font-size="12">"#)?;
    for (idx, line) in lines.iter().enumerate() {
        let dy = if idx == 0 { 0 } else { MEMBER_LINE_HEIGHT };
        write!(svg, r#"<tspan x="10" dy="{dy}">{}</tspan>"#, escape_xml(line))?;
    }
    svg.push_str("</text>\n");
    Ok(())
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{escape_xml, render_svg};
    use crate::layout::layout_classes;
    use crate::model::RelationshipKind;
    use crate::ops::{add_attribute, add_relationship, initialize, rename_class};

    #[test]
    fn draws_one_box_per_class_and_one_line_per_relationship() {
        let diagram = initialize(&["Book", "Member", "Librarian"]);
        let ids: Vec<_> = diagram.classes().iter().map(|c| c.id().clone()).collect();
        let diagram =
            add_relationship(&diagram, &ids[2], &ids[1], RelationshipKind::Realization, "is a");
        let diagram =
            add_relationship(&diagram, &ids[0], &ids[1], RelationshipKind::Composition, "");

        let svg = render_svg(&diagram, &layout_classes(diagram.classes())).expect("svg");

        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<g transform=").count(), 3);
        assert_eq!(svg.matches("<line x1=\"").count(), 2 + 3 * 2);
        assert_eq!(svg.matches("stroke-dasharray").count(), 1);
        assert!(svg.contains(r#"marker-start="url(#diamond-filled)""#));
        assert!(svg.contains(r#"marker-end="url(#triangle)""#));
        assert!(svg.contains(">is a</text>"));
    }

    #[test]
    fn empty_names_use_placeholder_and_text_is_escaped() {
        let diagram = initialize(&["A"]);
        let a = diagram.classes()[0].id().clone();
        let diagram = rename_class(&diagram, &a, "");
        let diagram = add_attribute(&diagram, &a, "items: List<Item>");

        let svg = render_svg(&diagram, &layout_classes(diagram.classes())).expect("svg");

        assert!(svg.contains(">Class</text>"));
        assert!(svg.contains("items: List&lt;Item&gt;"));
    }

    #[test]
    fn escape_xml_handles_all_special_characters() {
        assert_eq!(escape_xml(r#"<a & 'b' "c">"#), "&lt;a &amp; &apos;b&apos; &quot;c&quot;&gt;");
    }
}
