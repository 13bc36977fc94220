use crate::query::{normalize_language, sanitize, SearchCriteria, SearchRequest};
use crate::types::{Preset, SortKey};
use chrono::{NaiveDate, Utc};

/// Sequence number a request was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Everything a search session remembers between user actions.
///
/// Handlers take `&mut self` and hand back the request to run, or `None`
/// when the action needs no fetch. The page only moves once a request is
/// issued.
#[derive(Debug, Clone)]
pub struct SearchState {
    criteria: SearchCriteria,
    per_page: u8,
    page: u32,
    last_query: String,
    issued: u64,
}

impl SearchState {
    pub fn new(criteria: SearchCriteria, per_page: u8) -> Self {
        SearchState {
            criteria,
            per_page,
            page: 1,
            last_query: String::new(),
            issued: 0,
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    /// Initial load: whatever the criteria say, page 1.
    pub fn load(&mut self) -> SearchRequest {
        self.request_for(1)
    }

    pub fn submit(&mut self, raw: &str) -> SearchRequest {
        self.criteria.text = sanitize(raw);
        self.request_for(1)
    }

    pub fn set_preset(&mut self, preset: Preset) -> SearchRequest {
        self.criteria.preset = preset;
        self.request_for(1)
    }

    pub fn set_sort(&mut self, sort: SortKey) -> SearchRequest {
        self.criteria.sort = sort;
        self.request_for(1)
    }

    pub fn set_language(&mut self, raw: &str) -> SearchRequest {
        self.criteria.language = normalize_language(raw);
        self.request_for(1)
    }

    pub fn next_page(&mut self) -> SearchRequest {
        self.request_for(self.page + 1)
    }

    pub fn prev_page(&mut self) -> Option<SearchRequest> {
        if self.page > 1 {
            Some(self.request_for(self.page - 1))
        } else {
            None
        }
    }

    /// Commit a request as the latest one and hand out its ticket.
    pub fn issue(&mut self, request: &SearchRequest) -> Ticket {
        self.issued += 1;
        self.page = request.page;
        self.last_query = request.query.clone();
        Ticket(self.issued)
    }

    /// Only the most recently issued request may render.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    fn request_for(&self, page: u32) -> SearchRequest {
        self.request_at(page, Utc::now().date_naive())
    }

    pub fn request_at(&self, page: u32, today: NaiveDate) -> SearchRequest {
        SearchRequest::new(&self.criteria, page, self.per_page, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SearchState {
        SearchState::new(SearchCriteria::default(), 9)
    }

    #[test]
    fn prev_on_first_page_is_a_no_op() {
        let mut s = state();
        let req = s.load();
        s.issue(&req);

        assert!(s.prev_page().is_none());
        assert_eq!(s.page(), 1);
    }

    #[test]
    fn next_then_prev_walks_pages() {
        let mut s = state();
        let req = s.load();
        s.issue(&req);

        let next = s.next_page();
        assert_eq!(next.page, 2);
        s.issue(&next);
        assert_eq!(s.page(), 2);

        let prev = s.prev_page().expect("page 2 can go back");
        assert_eq!(prev.page, 1);
        s.issue(&prev);
        assert_eq!(s.page(), 1);
    }

    #[test]
    fn page_moves_only_when_issued() {
        let mut s = state();
        let _ = s.next_page();
        assert_eq!(s.page(), 1);
    }

    #[test]
    fn preset_change_restarts_from_page_one() {
        let mut s = state();
        let req = s.next_page();
        s.issue(&req);
        let req = s.next_page();
        s.issue(&req);
        assert_eq!(s.page(), 3);

        let req = s.set_preset(Preset::Recent);
        assert_eq!(req.page, 1);
        assert_eq!(req.query, "pushed:>2023-01-01");
        assert_eq!(s.criteria().preset, Preset::Recent);
    }

    #[test]
    fn submit_sanitizes_and_records_last_query() {
        let mut s = state();
        let req = s.submit("  serde-json!! ");
        assert_eq!(req.query, "serdejson in:name,description");
        s.issue(&req);
        assert_eq!(s.last_query(), "serdejson in:name,description");
    }

    #[test]
    fn sort_and_language_feed_the_request() {
        let mut s = state();
        let req = s.set_sort(SortKey::Updated);
        assert_eq!(req.sort, SortKey::Updated);
        let req = s.set_language("Rust");
        assert!(req.query.ends_with(" language:Rust"));
        let req = s.set_language("");
        assert_eq!(req.query, "stars:>500");
    }

    #[test]
    fn stale_tickets_are_not_current() {
        let mut s = state();
        let req = s.load();
        let first = s.issue(&req);
        assert!(s.is_current(first));

        let req = s.next_page();
        let second = s.issue(&req);
        assert!(!s.is_current(first));
        assert!(s.is_current(second));
    }
}
