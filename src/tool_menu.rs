//! The sidebar tool-menu controller.
//!
//! [`ToolMenu`] owns the ordered registry of tool items, reconciles the
//! persisted display order against the master tool list, applies hardware
//! compatibility filters with a diff-based update (remove incompatible vs.
//! insert compatible), and writes the order back to the settings store on
//! teardown.
//!
//! The controller is toolkit-agnostic: rendering lives in `app::sidebar`,
//! and user actions arrive here as plain method calls.

use serde_json::json;
use tracing::warn;

use crate::events::{EventKind, MenuEvent, MenuEvents};
use crate::filter::ToolFilter;
use crate::i18n::Translator;
use crate::preferences::Preferences;
use crate::settings::{SharedSettings, KEY_TOOL_POSITIONS};
use crate::tools::Tool;

/// One entry of the tool menu: a tool kind plus its UI state.
#[derive(Debug, Clone)]
pub struct ToolMenuItem {
    pub tool: Tool,
    /// Translated display label, resolved at menu construction.
    pub label: String,
    /// Phosphor icon glyph.
    pub icon: &'static str,
    /// Whether the item is currently displayed in the sidebar.
    pub visible: bool,
    /// Detached items live in their own floating window and are exempt from
    /// the shared selection group.
    pub detached: bool,
    /// Whether a double click on the item detaches it (preference-driven).
    pub double_click_to_detach: bool,
}

/// Outcome of a click on a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The tool was selected; a `TOOL_SELECTED` event was emitted.
    Selected,
    /// The item is detached; the click should raise its window instead.
    Detached,
    /// The tool is not part of the menu.
    Unknown,
}

pub struct ToolMenu {
    /// Ordered registry. Order here *is* the display order.
    items: Vec<ToolMenuItem>,
    /// Count of currently displayed items.
    shown: usize,
    /// Identity of the hardware whose filter is currently applied.
    current_hw: Option<String>,
    settings: SharedSettings,
    events: MenuEvents,
}

impl ToolMenu {
    /// Build the menu: load the persisted position list, reconcile it against
    /// [`Tool::ALL`], and construct one (initially hidden) item per tool in
    /// that order.
    pub fn new(
        settings: SharedSettings,
        translator: &Translator,
        prefs: &Preferences,
        events: MenuEvents,
    ) -> Self {
        let positions = reconcile_positions(load_positions(&settings), Tool::ALL.len());
        let items = positions
            .iter()
            .filter_map(|&p| Tool::from_index(p))
            .map(|tool| ToolMenuItem {
                tool,
                label: translator.tr(tool.label_key()),
                icon: tool.icon(),
                visible: false,
                detached: false,
                double_click_to_detach: prefs.double_click_to_detach(),
            })
            .collect();
        Self {
            items,
            shown: 0,
            current_hw: None,
            settings,
            events,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    /// The item for a given tool kind, if tracked.
    pub fn item_for(&self, tool: Tool) -> Option<&ToolMenuItem> {
        self.items.iter().find(|it| it.tool == tool)
    }

    /// All tracked items in display order.
    pub fn items(&self) -> &[ToolMenuItem] {
        &self.items
    }

    /// Currently displayed items in display order.
    pub fn visible_items(&self) -> impl Iterator<Item = &ToolMenuItem> {
        self.items.iter().filter(|it| it.visible)
    }

    /// Number of currently displayed items.
    pub fn shown(&self) -> usize {
        self.shown
    }

    /// Display order as tool kinds (all tracked tools, visible or not).
    pub fn order(&self) -> Vec<Tool> {
        self.items.iter().map(|it| it.tool).collect()
    }

    /// Identity of the currently applied hardware filter.
    pub fn current_hw(&self) -> Option<&str> {
        self.current_hw.as_deref()
    }

    // ── Operations ───────────────────────────────────────────────────────────

    /// Apply a hardware compatibility filter, or clear the menu when `None`.
    ///
    /// Re-applying a filter with the same hardware identity is a no-op.
    /// Otherwise the tracked tools are partitioned into compatible and
    /// incompatible sets, and only one of the two updates is applied per
    /// call: if any displayed tool became incompatible those items are
    /// removed; else the compatible items are inserted at their recorded
    /// positions. Removal deliberately takes precedence over insertion.
    pub fn apply_filter(&mut self, filter: Option<&dyn ToolFilter>) {
        let Some(filter) = filter else {
            for item in &mut self.items {
                item.visible = false;
            }
            self.shown = 0;
            self.current_hw = None;
            self.events.emit(MenuEvent::new(EventKind::MENU_CLEARED));
            return;
        };

        if self.current_hw.as_deref() == Some(filter.hw_name()) {
            return;
        }
        self.current_hw = Some(filter.hw_name().to_string());

        let incompatible: Vec<usize> = (0..self.items.len())
            .filter(|&i| !filter.compatible(self.items[i].tool))
            .collect();
        let compatible: Vec<usize> = (0..self.items.len())
            .filter(|&i| filter.compatible(self.items[i].tool))
            .collect();

        if !incompatible.is_empty() && self.shown > 0 {
            for i in incompatible {
                self.items[i].visible = false;
            }
        } else {
            for i in compatible {
                self.items[i].visible = true;
            }
        }
        self.shown = self.items.iter().filter(|it| it.visible).count();

        let mut event = MenuEvent::new(EventKind::FILTER_APPLIED);
        event.hw_name = self.current_hw.clone();
        self.events.emit(event);
    }

    /// Handle a "moved" notification from the sidebar drag, carrying the
    /// item's old and new display index.
    ///
    /// The move only takes effect when every tracked tool is visible;
    /// while a filter hides some items the indices would not line up with
    /// the registry, so the move is ignored.
    pub fn handle_move(&mut self, from: usize, to: usize) -> bool {
        if self.shown != self.items.len() {
            return false;
        }
        if from >= self.items.len() || to >= self.items.len() || from == to {
            return false;
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);

        let mut event = MenuEvent::new(EventKind::ORDER_CHANGED);
        event.moved = Some((from, to));
        event.order = Some(self.order());
        self.events.emit(event);
        true
    }

    /// Handle a click on a tool item.
    pub fn select(&mut self, tool: Tool) -> SelectOutcome {
        match self.item_for(tool) {
            Some(item) if item.detached => SelectOutcome::Detached,
            Some(_) => {
                self.events
                    .emit(MenuEvent::new(EventKind::TOOL_SELECTED).with_tool(tool));
                SelectOutcome::Selected
            }
            None => SelectOutcome::Unknown,
        }
    }

    /// Detach an item from (or re-attach it to) the managed menu group.
    pub fn set_detached(&mut self, tool: Tool, detached: bool) {
        let Some(item) = self.items.iter_mut().find(|it| it.tool == tool) else {
            return;
        };
        if item.detached == detached {
            return;
        }
        item.detached = detached;
        let kind = if detached {
            EventKind::TOOL_DETACHED
        } else {
            EventKind::TOOL_ATTACHED
        };
        self.events.emit(MenuEvent::new(kind).with_tool(tool));
    }

    /// Refresh preference-driven item behavior.
    pub fn read_preferences(&mut self, prefs: &Preferences) {
        for item in &mut self.items {
            item.double_click_to_detach = prefs.double_click_to_detach();
        }
        self.events.emit(MenuEvent::new(EventKind::PREFERENCES_READ));
    }

    /// Write the current display order back to the settings store.
    pub fn save_state(&self) {
        let positions: Vec<usize> = self.items.iter().map(|it| it.tool.index()).collect();
        let mut store = self.settings.borrow_mut();
        store.set(KEY_TOOL_POSITIONS, json!(positions));
        if let Err(e) = store.flush() {
            warn!("failed to persist tool order: {e}");
        }
    }
}

impl Drop for ToolMenu {
    fn drop(&mut self) {
        self.save_state();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Position persistence helpers
// ─────────────────────────────────────────────────────────────────────────────

fn load_positions(settings: &SharedSettings) -> Vec<usize> {
    settings
        .borrow()
        .get(KEY_TOOL_POSITIONS)
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

/// Reconcile a persisted position list against the current tool count.
///
/// Out-of-range and duplicate indices are dropped first, then any missing
/// indices are appended in ascending order, so the result is always a
/// permutation of `0..total`.
pub(crate) fn reconcile_positions(mut positions: Vec<usize>, total: usize) -> Vec<usize> {
    let mut seen = vec![false; total];
    positions.retain(|&p| {
        if p >= total || seen[p] {
            return false;
        }
        seen[p] = true;
        true
    });
    for (i, taken) in seen.into_iter().enumerate() {
        if !taken {
            positions.push(i);
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_positions_become_identity() {
        assert_eq!(reconcile_positions(vec![], 4), vec![0, 1, 2, 3]);
    }

    #[test]
    fn short_list_gets_missing_indices_appended_ascending() {
        assert_eq!(reconcile_positions(vec![2, 0], 5), vec![2, 0, 1, 3, 4]);
    }

    #[test]
    fn out_of_range_and_duplicate_indices_are_dropped() {
        assert_eq!(reconcile_positions(vec![7, 1, 1, 3], 4), vec![1, 3, 0, 2]);
    }

    #[test]
    fn full_permutation_is_preserved() {
        let perm = vec![3, 1, 0, 2];
        assert_eq!(reconcile_positions(perm.clone(), 4), perm);
    }

    #[test]
    fn result_is_always_a_permutation() {
        for total in [1usize, 3, 12] {
            let got = reconcile_positions(vec![total + 1, 0, 0, 2], total);
            let mut sorted = got.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..total).collect::<Vec<_>>());
        }
    }
}
