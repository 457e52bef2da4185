//! Label printing: pick item and lot, plan a batch of serials, print them one by one.
//!
//! The same component drives Transactions → FG Label Printing and the
//! existing-data labels screen; [`LabelSource`] picks the endpoint family.
//! Printing is one `print-insert` call per serial and stops at the first
//! failure. Labels already printed stay printed.

use common::model::transactions::LabelSource;
use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::LabelScreen;

#[derive(Properties, PartialEq)]
pub struct LabelProps {
    pub source: LabelSource,
}

impl Component for LabelScreen {
    type Message = Msg;
    type Properties = LabelProps;

    fn create(ctx: &Context<Self>) -> Self {
        LabelScreen::new(crate::session::from_context(ctx))
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            ctx.link().send_message(Msg::LoadItems);
        }
    }
}
