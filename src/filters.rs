use crate::model::CATEGORIES;

/// Category restriction handed to the store. `All` is the match-all marker:
/// no restriction at all, distinct from an explicit empty selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Vec<String>),
}

/// One toggle per known category, in the fixed category order. All flags off
/// means the identity filter, not "match nothing".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    selections: Vec<bool>,
}

impl FilterState {
    pub fn new() -> Self {
        Self {
            selections: vec![false; CATEGORIES.len()],
        }
    }

    pub fn selections(&self) -> &[bool] {
        &self.selections
    }

    /// Flip exactly one flag. Out-of-range indexes are ignored; the screen
    /// layer only ever hands us indexes of chips it rendered.
    pub fn toggle(&mut self, index: usize) {
        match self.selections.get_mut(index) {
            Some(flag) => *flag = !*flag,
            None => {
                tracing::warn!(
                    target: "limone",
                    event = "filter_toggle_out_of_range",
                    index,
                    len = self.selections.len()
                );
            }
        }
    }

    pub fn active_categories(&self) -> CategoryFilter {
        if self.selections.iter().all(|flag| !flag) {
            return CategoryFilter::All;
        }
        CategoryFilter::Only(
            CATEGORIES
                .iter()
                .zip(&self.selections)
                .filter(|(_, &selected)| selected)
                .map(|(name, _)| name.to_string())
                .collect(),
        )
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_all_flags_off() {
        let state = FilterState::new();
        assert_eq!(state.selections(), &[false, false, false]);
        assert_eq!(state.active_categories(), CategoryFilter::All);
    }

    #[test]
    fn toggle_flips_exactly_one_flag() {
        let mut state = FilterState::new();
        state.toggle(1);
        assert_eq!(state.selections(), &[false, true, false]);
        state.toggle(1);
        assert_eq!(state.selections(), &[false, false, false]);
    }

    #[test]
    fn active_categories_names_only_selected_ones() {
        let mut state = FilterState::new();
        state.toggle(0);
        state.toggle(2);
        assert_eq!(
            state.active_categories(),
            CategoryFilter::Only(vec!["starters".to_string(), "desserts".to_string()])
        );
    }

    #[test]
    fn all_flags_on_is_an_explicit_selection_not_the_marker() {
        let mut state = FilterState::new();
        for index in 0..CATEGORIES.len() {
            state.toggle(index);
        }
        assert_eq!(
            state.active_categories(),
            CategoryFilter::Only(CATEGORIES.iter().map(|c| c.to_string()).collect())
        );
    }

    #[test]
    fn out_of_range_toggle_changes_nothing() {
        let mut state = FilterState::new();
        state.toggle(99);
        assert_eq!(state.selections(), &[false, false, false]);
    }
}
