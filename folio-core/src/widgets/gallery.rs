use std::ops::Range;

use crate::model::{ProjectCategory, ProjectFilter};

/// Cards rendered up front, before any "load more" click.
pub const INITIAL_PAGE_SIZE: usize = 6;
/// Cards appended per "load more" click.
pub const LOAD_MORE_STEP: usize = 3;

/// Project grid state: which cards are materialized and which of them
/// the active category filter shows.
///
/// Filtering and pagination are independent. Pagination appends
/// previously unshown cards in the unfiltered display order;
/// filtering toggles logical visibility of cards that already exist.
pub struct Gallery {
    categories: Vec<ProjectCategory>,
    filter: ProjectFilter,
    visible_count: usize,
}

impl Gallery {
    /// `categories` is the full project collection in display order
    /// (featured first).
    pub fn new(categories: Vec<ProjectCategory>) -> Self {
        let visible_count = categories.len().min(INITIAL_PAGE_SIZE);
        Self {
            categories,
            filter: ProjectFilter::All,
            visible_count,
        }
    }

    pub fn total(&self) -> usize {
        self.categories.len()
    }

    /// Number of materialized cards. Monotonically non-decreasing.
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn filter(&self) -> ProjectFilter {
        self.filter
    }

    /// Switches the active filter button; mutually exclusive by
    /// construction since only one filter is held.
    pub fn set_filter(&mut self, filter: ProjectFilter) {
        self.filter = filter;
    }

    /// Logical visibility of every materialized card under the active
    /// filter. Takes effect immediately; any hide transition is
    /// presentation only.
    pub fn visible(&self) -> Vec<bool> {
        self.categories[..self.visible_count]
            .iter()
            .map(|c| self.filter.matches(*c))
            .collect()
    }

    /// Materializes the next page and returns the index range of newly
    /// shown cards. Empty once everything is shown.
    pub fn load_more(&mut self) -> Range<usize> {
        let start = self.visible_count;
        let end = (start + LOAD_MORE_STEP).min(self.total());
        self.visible_count = end;
        start..end
    }

    /// Whether the "load more" control should show at all.
    pub fn has_more(&self) -> bool {
        self.visible_count < self.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProjectCategory::*;

    #[test]
    fn filter_shows_only_matching_categories() {
        let mut g = Gallery::new(vec![Web, Web, Mobile, Mobile, Design]);
        g.set_filter(ProjectFilter::Category(Mobile));
        assert_eq!(g.visible(), vec![false, false, true, true, false]);

        g.set_filter(ProjectFilter::All);
        assert_eq!(g.visible(), vec![true; 5]);
    }

    #[test]
    fn small_collections_start_fully_shown() {
        let g = Gallery::new(vec![Web, Other]);
        assert_eq!(g.visible_count(), 2);
        assert!(!g.has_more());
    }

    #[test]
    fn load_more_appends_in_initial_order() {
        let mut g = Gallery::new(vec![Web; 9]);
        assert_eq!(g.visible_count(), 6);
        assert!(g.has_more());

        // One click materializes the remaining three and hides the
        // control.
        assert_eq!(g.load_more(), 6..9);
        assert!(!g.has_more());

        // A second click has no further effect.
        assert_eq!(g.load_more(), 9..9);
        assert_eq!(g.visible_count(), 9);
    }

    #[test]
    fn load_more_steps_by_page_size() {
        let mut g = Gallery::new(vec![Design; 13]);
        assert_eq!(g.load_more(), 6..9);
        assert_eq!(g.load_more(), 9..12);
        assert_eq!(g.load_more(), 12..13);
        assert!(!g.has_more());
    }

    #[test]
    fn filter_applies_to_materialized_cards_only() {
        let mut g = Gallery::new(vec![Web, Mobile, Web, Mobile, Web, Mobile, Web, Mobile]);
        g.set_filter(ProjectFilter::Category(Web));
        assert_eq!(g.visible().len(), 6);

        g.load_more();
        assert_eq!(g.visible(), vec![true, false, true, false, true, false, true, false]);
    }
}
