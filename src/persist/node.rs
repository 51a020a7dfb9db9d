//! Typed form of one `<object>` element
//!
//! Loading first gathers the recognized attributes into an [`ObjectNode`]
//! and only then applies them to the store, so attribute-name matching stays
//! in one place. Saving goes the other way: record → node → XML.

use roxmltree::Node;

use super::number::{format_decimal, format_flag, parse_flag, parse_u32_or, parse_usize_or};
use crate::models::{Record, NO_BACK_COLOR};
use crate::store::StoreGuard;

pub const ROOT_ELEMENT: &str = "objects";
pub const OBJECT_ELEMENT: &str = "object";

pub const ATTR_TAG: &str = "tag";
pub const ATTR_NAME: &str = "name";
pub const ATTR_PRIORITY_CLASS: &str = "priorityclass";
pub const ATTR_IO_PRIORITY_PLUS_ONE: &str = "iopriorityplusone";
pub const ATTR_BACK_COLOR: &str = "backcolor";
pub const ATTR_COLLAPSE: &str = "collapse";
pub const ATTR_AFFINITY: &str = "affinity";

/// Raw attribute text of one object element; `None` means the attribute was absent
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectNode {
    pub tag: Option<String>,
    pub name: Option<String>,
    pub priority_class: Option<String>,
    pub io_priority_plus_one: Option<String>,
    pub back_color: Option<String>,
    pub collapse: Option<String>,
    pub affinity: Option<String>,
    pub comment: String,
}

impl ObjectNode {
    /// Collect the recognized attributes and text of an element.
    ///
    /// Attribute names match ASCII case-insensitively; unknown ones are ignored.
    /// A repeated attribute keeps its last value.
    pub fn from_element(element: Node<'_, '_>) -> Self {
        let mut node = ObjectNode::default();

        for attr in element.attributes() {
            let slot = match attr.name().to_ascii_lowercase().as_str() {
                ATTR_TAG => &mut node.tag,
                ATTR_NAME => &mut node.name,
                ATTR_PRIORITY_CLASS => &mut node.priority_class,
                ATTR_IO_PRIORITY_PLUS_ONE => &mut node.io_priority_plus_one,
                ATTR_BACK_COLOR => &mut node.back_color,
                ATTR_COLLAPSE => &mut node.collapse,
                ATTR_AFFINITY => &mut node.affinity,
                _ => continue,
            };
            *slot = Some(attr.value().to_string());
        }

        // Text split by comments or processing instructions is joined back up
        node.comment = element
            .descendants()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect();
        node
    }

    pub fn from_record(record: &Record) -> Self {
        Self {
            tag: Some(format_decimal(record.tag)),
            name: Some(record.name.clone()),
            priority_class: Some(format_decimal(record.priority_class)),
            io_priority_plus_one: Some(format_decimal(record.io_priority_plus_one)),
            back_color: Some(format_decimal(record.back_color)),
            collapse: Some(format_flag(record.collapse)),
            affinity: Some(format_decimal(record.affinity_mask as u64)),
            comment: record.comment.clone(),
        }
    }

    /// Present attributes in document order
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (ATTR_TAG, &self.tag),
            (ATTR_NAME, &self.name),
            (ATTR_PRIORITY_CLASS, &self.priority_class),
            (ATTR_IO_PRIORITY_PLUS_ONE, &self.io_priority_plus_one),
            (ATTR_BACK_COLOR, &self.back_color),
            (ATTR_COLLAPSE, &self.collapse),
            (ATTR_AFFINITY, &self.affinity),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
    }

    /// Create or update the record this node describes.
    ///
    /// Nodes without both `tag` and `name` are skipped entirely, including
    /// any `backcolor`, `collapse`, or `affinity` they carry. Returns whether
    /// a record was written.
    pub fn apply(self, guard: &mut StoreGuard<'_>) -> bool {
        let ObjectNode {
            tag,
            name,
            priority_class,
            io_priority_plus_one,
            back_color,
            collapse,
            affinity,
            comment,
        } = self;

        let (Some(tag), Some(name)) = (tag, name) else {
            return false;
        };

        let record = guard.create_or_update(parse_u32_or(&tag, 0), &name, Some(comment));
        record.priority_class = priority_class.map_or(0, |v| parse_u32_or(&v, 0));
        record.io_priority_plus_one = io_priority_plus_one.map_or(0, |v| parse_u32_or(&v, 0));

        // Handled separately for compatibility with documents that predate them
        if let Some(back_color) = back_color {
            record.back_color = parse_u32_or(&back_color, NO_BACK_COLOR);
        }
        if let Some(collapse) = collapse {
            record.collapse = parse_flag(&collapse);
        }
        if let Some(affinity) = affinity {
            record.affinity_mask = parse_usize_or(&affinity, 0);
        }

        true
    }
}
