use std::collections::BTreeMap;

use common::listing::{filter_rows, paginate, Page, DEFAULT_PAGE_SIZE};
use common::reports::ReportRow;

use crate::session::SessionContext;
use crate::web::clock::today;

pub struct ReportScreen<R: ReportRow> {
    pub from: String,
    pub to: String,
    /// Free-text filter values keyed by `FilterSpec::key`.
    pub filters: BTreeMap<String, String>,
    pub rows: Vec<R>,
    pub search: String,
    pub page: usize,
    pub loading: bool,
    pub exporting: bool,
    /// Whether a search has run, to tell "no results" from "not searched".
    pub searched: bool,
    pub session: Option<SessionContext>,
}

impl<R: ReportRow> ReportScreen<R> {
    pub fn new(session: Option<SessionContext>) -> Self {
        let today = today();
        Self {
            from: today.clone(),
            to: today,
            filters: R::filters()
                .iter()
                .map(|f| (f.key.to_string(), String::new()))
                .collect(),
            rows: Vec::new(),
            search: String::new(),
            page: 1,
            loading: false,
            exporting: false,
            searched: false,
            session,
        }
    }

    pub fn filtered(&self) -> Vec<&R> {
        filter_rows(&self.rows, &self.search)
    }

    pub fn visible_page(&self) -> Page<&R> {
        paginate(&self.filtered(), self.page, DEFAULT_PAGE_SIZE)
    }
}
