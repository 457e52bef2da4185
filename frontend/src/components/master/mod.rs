//! Generic master-data screen: a create/edit form above a searchable table.
//!
//! One component serves every [`MasterRecord`]; the record type supplies the
//! field schema and endpoints. The list is fetched on first render and again
//! after each successful save.

use common::forms::MasterRecord;
use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::MasterScreen;

impl<M: MasterRecord> Component for MasterScreen<M> {
    type Message = Msg<M>;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        MasterScreen::new(crate::session::from_context(ctx))
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            ctx.link().send_message(Msg::Load);
        }
    }
}
