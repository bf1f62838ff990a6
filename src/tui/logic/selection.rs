use crate::model::{Confidence, SelectableItem};
use std::collections::BTreeSet;

/// Rows shown at once in the review list.
pub const VISIBLE_ROWS: usize = 12;

pub struct WindowRow<'a> {
    pub filtered_index: usize,
    pub item: &'a SelectableItem,
    pub marked: bool,
    pub focused: bool,
}

/// Marks, filter and cursor over a list that never shrinks.
///
/// Marks are stored as backing indices, so they survive filter changes.
pub struct SelectionModel {
    items: Vec<SelectableItem>,
    marked: BTreeSet<usize>,
    filter: Option<Confidence>,
    view: Vec<usize>,
    cursor: usize,
    scroll: usize,
    // marks before the last select-all, while nothing else has changed them
    select_all_undo: Option<BTreeSet<usize>>,
}

impl SelectionModel {
    pub fn new(items: Vec<SelectableItem>) -> Self {
        let view = (0..items.len()).collect();
        Self {
            items,
            marked: BTreeSet::new(),
            filter: None,
            view,
            cursor: 0,
            scroll: 0,
            select_all_undo: None,
        }
    }

    pub fn items(&self) -> &[SelectableItem] {
        &self.items
    }

    pub fn filter(&self) -> Option<Confidence> {
        self.filter
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn filtered_len(&self) -> usize {
        self.view.len()
    }

    pub fn backing_index(&self, filtered_index: usize) -> Option<usize> {
        self.view.get(filtered_index).copied()
    }

    pub fn focused(&self) -> Option<&SelectableItem> {
        self.backing_index(self.cursor).map(|i| &self.items[i])
    }

    pub fn is_marked(&self, backing_index: usize) -> bool {
        self.marked.contains(&backing_index)
    }

    pub fn marked_indices(&self) -> &BTreeSet<usize> {
        &self.marked
    }

    pub fn marked_count(&self) -> usize {
        self.marked.len()
    }

    /// Backing order, independent of the filter.
    pub fn marked_items(&self) -> Vec<SelectableItem> {
        self.marked.iter().map(|&i| self.items[i].clone()).collect()
    }

    pub fn marked_size(&self) -> u64 {
        self.marked.iter().map(|&i| self.items[i].size).sum()
    }

    pub fn toggle_mark(&mut self, filtered_index: usize) {
        let Some(backing) = self.backing_index(filtered_index) else {
            return;
        };
        if !self.marked.remove(&backing) {
            self.marked.insert(backing);
        }
        self.select_all_undo = None;
    }

    pub fn toggle_focused(&mut self) {
        self.toggle_mark(self.cursor);
    }

    /// Marks every visible item, or unmarks them all when they already are.
    /// A second call right after restores the marks from before the first.
    pub fn toggle_select_all(&mut self) {
        if self.view.is_empty() {
            return;
        }

        if let Some(previous) = self.select_all_undo.take() {
            self.marked = previous;
            return;
        }

        let previous = self.marked.clone();
        let all_marked = self.view.iter().all(|i| self.marked.contains(i));
        if all_marked {
            for i in &self.view {
                self.marked.remove(i);
            }
        } else {
            self.marked.extend(self.view.iter().copied());
        }
        self.select_all_undo = Some(previous);
    }

    /// Selecting the active level again goes back to showing everything.
    pub fn set_filter(&mut self, level: Confidence) {
        let next = if self.filter == Some(level) {
            None
        } else {
            Some(level)
        };
        self.apply_filter(next);
    }

    pub fn clear_filter(&mut self) {
        self.apply_filter(None);
    }

    fn apply_filter(&mut self, filter: Option<Confidence>) {
        self.filter = filter;
        self.view = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| match filter {
                None => true,
                Some(level) => item.confidence == Some(level),
            })
            .map(|(i, _)| i)
            .collect();
        self.cursor = 0;
        self.scroll = 0;
        self.select_all_undo = None;
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.view.is_empty() {
            self.cursor = 0;
            self.scroll = 0;
            return;
        }

        let max = self.view.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);

        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + VISIBLE_ROWS {
            self.scroll = self.cursor + 1 - VISIBLE_ROWS;
        }
    }

    pub fn window(&self) -> Vec<WindowRow<'_>> {
        self.view
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(VISIBLE_ROWS)
            .map(|(filtered_index, &backing)| WindowRow {
                filtered_index,
                item: &self.items[backing],
                marked: self.marked.contains(&backing),
                focused: filtered_index == self.cursor,
            })
            .collect()
    }
}
