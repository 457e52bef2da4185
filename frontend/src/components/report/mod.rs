//! Generic report screen.
//!
//! Filters and a date range go out as one POST; the answer replaces the
//! result set, which then drives the stat cards, the searchable table and
//! the Excel/PDF export of whatever rows the search currently leaves visible.

use common::reports::ReportRow;
use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::ReportScreen;

impl<R: ReportRow> Component for ReportScreen<R> {
    type Message = Msg<R>;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        ReportScreen::new(crate::session::from_context(ctx))
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
