use common::forms::{MasterFormState, MasterRecord};
use common::listing::{filter_rows, paginate, Page, DEFAULT_PAGE_SIZE};

use crate::session::SessionContext;

pub struct MasterScreen<M: MasterRecord> {
    /// Last list returned by the backend.
    pub rows: Vec<M>,
    pub form: MasterFormState<M>,
    pub search: String,
    /// 1-based; reset whenever the search text changes.
    pub page: usize,
    pub loading: bool,
    pub saving: bool,
    pub session: Option<SessionContext>,
}

impl<M: MasterRecord> MasterScreen<M> {
    pub fn new(session: Option<SessionContext>) -> Self {
        Self {
            rows: Vec::new(),
            form: MasterFormState::new(),
            search: String::new(),
            page: 1,
            loading: false,
            saving: false,
            session,
        }
    }

    pub fn visible_page(&self) -> Page<&M> {
        let filtered = filter_rows(&self.rows, &self.search);
        paginate(&filtered, self.page, DEFAULT_PAGE_SIZE)
    }
}
