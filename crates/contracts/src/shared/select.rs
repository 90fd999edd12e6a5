//! State machine of the searchable single-select: closed -> open -> closed.

use super::form::FieldOption;

/// Options whose label contains `query`, ignoring case.
pub fn filter_options<'a>(options: &'a [FieldOption], query: &str) -> Vec<&'a FieldOption> {
    let needle = query.trim().to_lowercase();
    options
        .iter()
        .filter(|opt| needle.is_empty() || opt.label.to_lowercase().contains(&needle))
        .collect()
}

pub fn label_for<'a>(options: &'a [FieldOption], value: &str) -> Option<&'a str> {
    options
        .iter()
        .find(|opt| opt.value == value)
        .map(|opt| opt.label.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectKey {
    Enter,
    Escape,
    ArrowUp,
    ArrowDown,
    Other,
}

impl SelectKey {
    /// Maps `KeyboardEvent.key`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    Unchanged,
    /// The dropdown closed and the value must change to this one.
    Selected(String),
    /// The dropdown closed without a change.
    Closed,
}

impl SelectOutcome {
    /// The key or click closed an open dropdown. An Escape that did this
    /// must not also dismiss whatever dialog holds the select.
    pub fn closed_dropdown(&self) -> bool {
        matches!(self, Self::Selected(_) | Self::Closed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectState {
    open: bool,
    query: String,
    highlighted: Option<usize>,
}

impl SelectState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.highlighted = None;
    }

    /// Typing opens the list and restarts the highlight.
    pub fn set_query(&mut self, query: &str) {
        self.open = true;
        self.query = query.to_string();
        self.highlighted = None;
    }

    pub fn visible<'a>(&self, options: &'a [FieldOption]) -> Vec<&'a FieldOption> {
        filter_options(options, &self.query)
    }

    pub fn choose(&mut self, value: &str) -> SelectOutcome {
        self.close();
        SelectOutcome::Selected(value.to_string())
    }

    pub fn on_outside_click(&mut self) -> SelectOutcome {
        if self.open {
            self.close();
            SelectOutcome::Closed
        } else {
            SelectOutcome::Unchanged
        }
    }

    pub fn on_key(&mut self, key: SelectKey, options: &[FieldOption]) -> SelectOutcome {
        let count = self.visible(options).len();
        match key {
            SelectKey::Escape => {
                if self.open {
                    self.close();
                    SelectOutcome::Closed
                } else {
                    SelectOutcome::Unchanged
                }
            }
            SelectKey::ArrowDown | SelectKey::ArrowUp => {
                self.open = true;
                if count == 0 {
                    self.highlighted = None;
                    return SelectOutcome::Unchanged;
                }
                self.highlighted = Some(match (key, self.highlighted) {
                    (SelectKey::ArrowDown, None) => 0,
                    (SelectKey::ArrowDown, Some(i)) => (i + 1) % count,
                    (_, None) | (_, Some(0)) => count - 1,
                    (_, Some(i)) => (i - 1).min(count - 1),
                });
                SelectOutcome::Unchanged
            }
            SelectKey::Enter => {
                if !self.open {
                    self.open = true;
                    return SelectOutcome::Unchanged;
                }
                let visible = self.visible(options);
                let picked = self
                    .highlighted
                    .and_then(|i| visible.get(i).copied())
                    .or_else(|| visible.first().copied())
                    .map(|opt| opt.value.clone());
                match picked {
                    Some(value) => self.choose(&value),
                    None => SelectOutcome::Unchanged,
                }
            }
            SelectKey::Other => SelectOutcome::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<FieldOption> {
        vec![
            FieldOption::new("Paracetamol 500mg", "p500"),
            FieldOption::new("Amoxicillin", "amx"),
            FieldOption::new("Paracetamol Syrup", "psyr"),
        ]
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let opts = options();
        let hits: Vec<&str> = filter_options(&opts, "PARACET")
            .into_iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(hits, vec!["p500", "psyr"]);
        assert_eq!(filter_options(&opts, "").len(), 3);
        assert!(filter_options(&opts, "ibuprofen").is_empty());
    }

    #[test]
    fn test_enter_picks_first_filtered_when_nothing_highlighted() {
        let opts = options();
        let mut state = SelectState::default();
        state.set_query("syrup");
        assert_eq!(
            state.on_key(SelectKey::Enter, &opts),
            SelectOutcome::Selected("psyr".into())
        );
        assert!(!state.is_open());
        assert_eq!(state.query(), "");
    }

    #[test]
    fn test_arrows_wrap() {
        let opts = options();
        let mut state = SelectState::default();
        state.open();
        state.on_key(SelectKey::ArrowUp, &opts);
        assert_eq!(state.highlighted(), Some(2));
        state.on_key(SelectKey::ArrowDown, &opts);
        assert_eq!(state.highlighted(), Some(0));
        state.on_key(SelectKey::ArrowDown, &opts);
        state.on_key(SelectKey::ArrowDown, &opts);
        assert_eq!(
            state.on_key(SelectKey::Enter, &opts),
            SelectOutcome::Selected("psyr".into())
        );
    }

    #[test]
    fn test_escape_and_outside_click_close_without_change() {
        let opts = options();
        let mut state = SelectState::default();
        state.set_query("amo");
        assert_eq!(state.on_key(SelectKey::Escape, &opts), SelectOutcome::Closed);
        assert!(!state.is_open());

        state.open();
        let outcome = state.on_key(SelectKey::Escape, &opts);
        assert!(outcome.closed_dropdown());
        // A second Escape finds nothing open and is left to the dialog.
        let outcome = state.on_key(SelectKey::Escape, &opts);
        assert_eq!(outcome, SelectOutcome::Unchanged);
        assert!(!outcome.closed_dropdown());

        state.open();
        assert_eq!(state.on_outside_click(), SelectOutcome::Closed);
        assert_eq!(state.on_outside_click(), SelectOutcome::Unchanged);
    }

    #[test]
    fn test_enter_with_no_match_keeps_open() {
        let opts = options();
        let mut state = SelectState::default();
        state.set_query("zzz");
        assert_eq!(state.on_key(SelectKey::Enter, &opts), SelectOutcome::Unchanged);
        assert!(state.is_open());
    }

    #[test]
    fn test_label_for() {
        assert_eq!(label_for(&options(), "amx"), Some("Amoxicillin"));
        assert_eq!(label_for(&options(), "nope"), None);
    }
}
