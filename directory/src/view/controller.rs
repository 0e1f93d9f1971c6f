use crate::{
    directory::table::query::{filter, QueryMatch, QueryPersonData},
    model::person::Person,
};

use super::{
    pagination::{clamp_page, total_pages, Pagination},
    sort::sort_people,
    state::{SortKey, ViewMode, ViewState},
    stats::Stats,
};

/// Owns the list the user is looking at. Every event recomputes the filtered projection
/// from the full record list and clamps the current page into range.
pub struct ListViewController {
    state: ViewState,
    people: Vec<Person>,
    filtered: Vec<Person>,
}

impl ListViewController {
    pub fn new(page_size: usize) -> Self {
        Self::with_state(ViewState::new(page_size))
    }

    pub fn with_state(state: ViewState) -> Self {
        let mut controller = ListViewController {
            state,
            people: Vec::new(),
            filtered: Vec::new(),
        };

        controller.recompute();

        controller
    }

    pub fn new_test() -> Self {
        Self::with_state(ViewState::default())
    }

    /// Replaces the full record list, e.g. after the store changed. The page is kept and then clamped
    pub fn load(&mut self, people: Vec<Person>) {
        self.people = people;
        self.recompute();
    }

    pub fn set_search(&mut self, term: &str) {
        self.state.search = term.to_string();
        self.state.page = 1;
        self.recompute();
    }

    pub fn set_role_filter(&mut self, role: Option<String>) {
        self.state.role_filter = role.filter(|role| !role.is_empty());
        self.state.page = 1;
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.state.sort = sort;
        self.recompute();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.state.page_size = ViewState::new(page_size).page_size;
        self.state.page = 1;
        self.recompute();
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.state.view_mode = view_mode;
    }

    /// Returns false and leaves the page untouched when `page` is out of range
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }

        self.state.page = page;
        true
    }

    pub fn first_page(&mut self) -> bool {
        self.go_to_page(1)
    }

    pub fn previous_page(&mut self) -> bool {
        self.go_to_page(self.state.page.saturating_sub(1))
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.state.page + 1)
    }

    pub fn last_page(&mut self) -> bool {
        self.go_to_page(self.total_pages())
    }

    #[tracing::instrument(skip(self))]
    fn recompute(&mut self) {
        let query = QueryPersonData {
            term: QueryMatch::Value(self.state.search.clone()),
            role: QueryMatch::from_option(self.state.role_filter.clone()),
        };

        let mut filtered = filter(self.people.clone(), &query);
        sort_people(&mut filtered, self.state.sort);

        self.filtered = filtered;
        self.state.page = clamp_page(self.state.page, self.total_pages());

        log::debug!(
            "Recomputed view [Filtered: {}, Page: {}/{}]",
            self.filtered.len(),
            self.state.page,
            self.total_pages()
        );
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn current_page(&self) -> usize {
        self.state.page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), self.state.page_size)
    }

    /// Full filtered and sorted projection, this is what gets exported
    pub fn filtered(&self) -> &[Person] {
        &self.filtered
    }

    /// The slice for the current page
    pub fn visible(&self) -> &[Person] {
        let start = (self.state.page - 1) * self.state.page_size;
        let end = (start + self.state.page_size).min(self.filtered.len());

        self.filtered.get(start..end).unwrap_or(&[])
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.state.page, self.total_pages())
    }

    pub fn stats(&self) -> Stats {
        Stats::compute(&self.people, self.filtered.len())
    }

    /// Distinct roles across every record, for populating a role filter
    pub fn roles(&self) -> Vec<String> {
        let mut roles: Vec<String> = self.people.iter().map(|p| p.role.clone()).collect();
        roles.sort();
        roles.dedup();
        roles
    }
}
