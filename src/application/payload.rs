//! Payload handed to the rendering layer.

use serde::Serialize;

use crate::application::services::SelectionState;
use crate::config::{Direction, DisplaySettings};
use crate::domain::Node;

/// Everything the tree widget needs: options, state and display flags.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetPayload<K> {
    pub name: String,
    pub state: SelectionState<K>,
    pub options: Vec<Node<K>>,
    pub searchable: bool,
    pub show_count: bool,
    pub placeholder: String,
    pub disabled_branch_node: bool,
    pub disabled: bool,
    pub is_single_select: bool,
    pub is_independent_nodes: bool,
    pub show_tags: bool,
    pub always_open: bool,
    pub clearable: bool,
    pub empty_text: String,
    pub expand_selected: bool,
    pub grouped: bool,
    pub open_level: u32,
    pub direction: Direction,
    pub rtl: bool,
}

impl<K> WidgetPayload<K> {
    pub fn new(
        name: impl Into<String>,
        state: SelectionState<K>,
        options: Vec<Node<K>>,
        display: &DisplaySettings,
        multiple: bool,
    ) -> Self {
        Self {
            name: name.into(),
            state,
            options,
            searchable: display.searchable,
            show_count: display.with_count,
            placeholder: display.placeholder.clone(),
            disabled_branch_node: !display.enable_branch_node,
            disabled: display.disabled,
            is_single_select: !multiple,
            is_independent_nodes: display.independent,
            show_tags: multiple,
            always_open: display.always_open,
            clearable: display.clearable,
            empty_text: display.empty_label.clone(),
            expand_selected: display.expand_selected,
            grouped: display.grouped,
            open_level: display.default_open_level,
            direction: display.direction,
            rtl: display.rtl,
        }
    }
}
