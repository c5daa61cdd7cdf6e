// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Grid layout for class boxes.
//!
//! Placement depends only on the number and order of classes: class `i` goes to column
//! `i % columns`, row `i / columns`. Editing names or members never moves a box.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{ClassId, ClassNode};

/// Grid geometry in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayoutOptions {
    pub columns: u32,
    pub node_width: u32,
    pub node_height: u32,
    pub gap_x: u32,
    pub gap_y: u32,
    pub margin: u32,
}

impl Default for GridLayoutOptions {
    fn default() -> Self {
        Self {
            columns: 3,
            node_width: 220,
            node_height: 140,
            gap_x: 40,
            gap_y: 40,
            margin: 20,
        }
    }
}

impl GridLayoutOptions {
    /// Canvas size for `rows` rows of boxes, or `None` when it does not fit in `u32`.
    pub fn checked_canvas_size(&self, rows: u32) -> Option<(u32, u32)> {
        let edges = self.margin.checked_mul(2)?;
        let width =
            checked_span(self.columns.max(1), self.node_width, self.gap_x)?.checked_add(edges)?;
        let height = checked_span(rows.max(1), self.node_height, self.gap_y)?.checked_add(edges)?;
        Some((width, height))
    }
}

/// Length of `count` boxes of `size` separated by `gap`; `count` is at least 1.
fn checked_span(count: u32, size: u32, gap: u32) -> Option<u32> {
    count.checked_mul(size)?.checked_add((count - 1).checked_mul(gap)?)
}

fn saturating_span(count: u32, size: u32, gap: u32) -> u32 {
    count
        .saturating_mul(size)
        .saturating_add((count - 1).saturating_mul(gap))
}

/// Placement of one class box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeBox {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl NodeBox {
    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.x) + f64::from(self.w) / 2.0,
            f64::from(self.y) + f64::from(self.h) / 2.0,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassLayout {
    positions: BTreeMap<ClassId, NodeBox>,
    width: u32,
    height: u32,
}

impl ClassLayout {
    pub fn positions(&self) -> &BTreeMap<ClassId, NodeBox> {
        &self.positions
    }

    pub fn position(&self, class_id: &ClassId) -> Option<&NodeBox> {
        self.positions.get(class_id)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

pub fn layout_classes(classes: &[ClassNode]) -> ClassLayout {
    layout_classes_with(classes, &GridLayoutOptions::default())
}

/// Places `classes` on the grid.
///
/// The canvas is always as wide as a full row of `columns` boxes and at least one row tall.
/// Coordinates saturate at `u32::MAX` instead of overflowing.
pub fn layout_classes_with(classes: &[ClassNode], options: &GridLayoutOptions) -> ClassLayout {
    let columns = options.columns.max(1);
    let step_x = options.node_width.saturating_add(options.gap_x);
    let step_y = options.node_height.saturating_add(options.gap_y);

    let positions = classes
        .iter()
        .enumerate()
        .map(|(idx, class)| {
            let idx = u32::try_from(idx).unwrap_or(u32::MAX);
            let col = idx % columns;
            let row = idx / columns;
            let node = NodeBox {
                x: options.margin.saturating_add(col.saturating_mul(step_x)),
                y: options.margin.saturating_add(row.saturating_mul(step_y)),
                w: options.node_width,
                h: options.node_height,
            };
            (class.id().clone(), node)
        })
        .collect();

    let count = u32::try_from(classes.len()).unwrap_or(u32::MAX);
    let rows = count.div_ceil(columns).max(1);
    let edges = options.margin.saturating_mul(2);
    let width = saturating_span(columns, options.node_width, options.gap_x).saturating_add(edges);
    let height = saturating_span(rows, options.node_height, options.gap_y).saturating_add(edges);

    ClassLayout {
        positions,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{layout_classes, layout_classes_with, GridLayoutOptions, NodeBox};
    use crate::ops::{add_attribute, initialize, rename_class};

    #[rstest]
    #[case(0, 780, 180)]
    #[case(1, 780, 180)]
    #[case(3, 780, 180)]
    #[case(4, 780, 360)]
    #[case(7, 780, 540)]
    fn canvas_bounds_the_grid(#[case] count: usize, #[case] width: u32, #[case] height: u32) {
        let names: Vec<String> = (0..count).map(|i| format!("C{i}")).collect();
        let diagram = if count == 0 {
            crate::model::Diagram::default()
        } else {
            initialize(&names)
        };

        let layout = layout_classes(diagram.classes());

        assert_eq!(layout.positions().len(), count);
        assert_eq!((layout.width(), layout.height()), (width, height));
    }

    #[test]
    fn boxes_follow_row_major_order() {
        let diagram = initialize(&["A", "B", "C", "D"]);
        let layout = layout_classes(diagram.classes());

        let boxes: Vec<NodeBox> = diagram
            .classes()
            .iter()
            .map(|c| *layout.position(c.id()).expect("placed"))
            .collect();

        assert_eq!(boxes[0], NodeBox { x: 20, y: 20, w: 220, h: 140 });
        assert_eq!(boxes[1], NodeBox { x: 280, y: 20, w: 220, h: 140 });
        assert_eq!(boxes[2], NodeBox { x: 540, y: 20, w: 220, h: 140 });
        assert_eq!(boxes[3], NodeBox { x: 20, y: 200, w: 220, h: 140 });
        assert_eq!(boxes[0].center(), (130.0, 90.0));
    }

    #[test]
    fn editing_text_does_not_move_boxes() {
        let diagram = initialize(&["A", "B", "C"]);
        let a = diagram.classes()[0].id().clone();
        let edited = rename_class(&add_attribute(&diagram, &a, "x"), &a, "Renamed");

        assert_eq!(layout_classes(diagram.classes()), layout_classes(edited.classes()));
    }

    #[test]
    fn custom_options_change_geometry() {
        let diagram = initialize(&["A", "B"]);
        let options = GridLayoutOptions {
            columns: 1,
            node_width: 100,
            node_height: 50,
            gap_x: 10,
            gap_y: 10,
            margin: 5,
        };

        let layout = layout_classes_with(diagram.classes(), &options);

        let second = layout.position(diagram.classes()[1].id()).expect("placed");
        assert_eq!((second.x, second.y), (5, 65));
        assert_eq!((layout.width(), layout.height()), (110, 120));
    }

    #[test]
    fn checked_canvas_size_reports_overflow() {
        assert_eq!(GridLayoutOptions::default().checked_canvas_size(1), Some((780, 180)));
        assert_eq!(GridLayoutOptions::default().checked_canvas_size(3), Some((780, 540)));

        let wide = GridLayoutOptions {
            node_width: 4_000_000_000,
            ..Default::default()
        };
        assert_eq!(wide.checked_canvas_size(1), None);
    }

    #[test]
    fn oversized_geometry_saturates_instead_of_overflowing() {
        let diagram = initialize(&["A", "B", "C", "D"]);
        let options = GridLayoutOptions {
            node_width: 4_000_000_000,
            node_height: u32::MAX,
            ..Default::default()
        };

        let layout = layout_classes_with(diagram.classes(), &options);

        assert_eq!((layout.width(), layout.height()), (u32::MAX, u32::MAX));
        let last = layout.position(diagram.classes()[3].id()).expect("placed");
        assert_eq!((last.x, last.y), (20, u32::MAX));
        let second = layout.position(diagram.classes()[1].id()).expect("placed");
        assert_eq!(second.x, 4_000_000_060);
    }
}
