use std::ops::Range;

/// Highest row reachable with a modifier-digit shortcut.
pub const MAX_SHORTCUT_ROWS: usize = 9;

/// Ordered list of opaque identifiers with a cursor over selectable rows.
#[derive(Debug, Clone)]
pub struct ResultsView<I> {
    identifiers: Vec<I>,
    selectable: Vec<bool>,
    selected: Option<usize>,
    scroll_top: usize,
    current_search_term: String,
}

impl<I> Default for ResultsView<I> {
    fn default() -> Self {
        Self {
            identifiers: Vec::new(),
            selectable: Vec::new(),
            selected: None,
            scroll_top: 0,
            current_search_term: String::new(),
        }
    }
}

impl<I: Clone + PartialEq> ResultsView<I> {
    pub fn identifiers(&self) -> &[I] {
        &self.identifiers
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub fn current_search_term(&self) -> &str {
        &self.current_search_term
    }

    pub fn set_current_search_term(&mut self, term: impl Into<String>) {
        self.current_search_term = term.into();
    }

    /// Replaces the list and scrolls to the top.
    ///
    /// The selection stays put when the same identifier is still selectable
    /// at the same index; otherwise the first selectable row is selected.
    pub fn set_identifiers<F>(&mut self, identifiers: Vec<I>, can_select: F)
    where
        F: Fn(&I) -> bool,
    {
        let selectable: Vec<bool> = identifiers.iter().map(&can_select).collect();
        let preserved = self.selected.filter(|&row| {
            selectable.get(row).copied().unwrap_or(false)
                && self.identifiers.get(row) == identifiers.get(row)
        });

        self.identifiers = identifiers;
        self.selectable = selectable;
        self.selected = preserved.or_else(|| self.first_selectable_row());
        self.scroll_top = 0;
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_identifier(&self) -> Option<&I> {
        self.selected.and_then(|row| self.identifiers.get(row))
    }

    pub fn is_selectable(&self, row: usize) -> bool {
        self.selectable.get(row).copied().unwrap_or(false)
    }

    pub fn select_row(&mut self, row: usize) -> bool {
        if !self.is_selectable(row) || self.selected == Some(row) {
            return false;
        }
        self.selected = Some(row);
        true
    }

    pub fn select_next_selectable_row(&mut self) -> bool {
        let start = self.selected.map_or(0, |row| row + 1);
        let next = (start..self.identifiers.len()).find(|&row| self.is_selectable(row));
        match next {
            Some(row) => self.select_row(row),
            None => false,
        }
    }

    pub fn select_previous_selectable_row(&mut self) -> bool {
        let Some(current) = self.selected else {
            return false;
        };
        let previous = (0..current).rev().find(|&row| self.is_selectable(row));
        match previous {
            Some(row) => self.select_row(row),
            None => false,
        }
    }

    /// The identifier Return would activate, if any.
    pub fn row_action(&self) -> Option<I> {
        let row = self.selected?;
        if !self.is_selectable(row) {
            return None;
        }
        self.identifiers.get(row).cloned()
    }

    /// Selects the 1-based `index` row and returns it for activation.
    pub fn perform_shortcut_action(&mut self, index: usize) -> Option<I> {
        if index == 0 || index > MAX_SHORTCUT_ROWS.min(self.identifiers.len()) {
            return None;
        }
        let row = index - 1;
        if !self.is_selectable(row) {
            return None;
        }
        self.selected = Some(row);
        self.row_action()
    }

    /// 1-based shortcut digit shown next to `row`.
    pub fn shortcut_for_row(&self, row: usize) -> Option<usize> {
        (row < MAX_SHORTCUT_ROWS && self.is_selectable(row)).then_some(row + 1)
    }

    /// Rows to draw in a viewport of `height` rows, scrolled just enough to
    /// keep the selection visible.
    pub fn visible_range(&mut self, height: usize) -> Range<usize> {
        let total = self.identifiers.len();
        if height == 0 || total == 0 {
            return 0..0;
        }
        if let Some(selected) = self.selected {
            if selected < self.scroll_top {
                self.scroll_top = selected;
            } else if selected >= self.scroll_top + height {
                self.scroll_top = selected + 1 - height;
            }
        }
        self.scroll_top = self.scroll_top.min(total.saturating_sub(height));
        self.scroll_top..(self.scroll_top + height).min(total)
    }

    fn first_selectable_row(&self) -> Option<usize> {
        self.selectable.iter().position(|&selectable| selectable)
    }
}
