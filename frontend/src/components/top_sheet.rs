use uuid::Uuid;
use yew::{html, AttrValue, Component, Context, Html, NodeRef, Properties};

/// Confirmation panel that slides down from the top of the viewport.
///
/// Hidden by default; [`open_top_sheet`] and [`close_top_sheet`] toggle the
/// `show` class on the element behind `node_ref`.
pub struct TopSheet {
    id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub title: AttrValue,
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
}

impl Component for TopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("sheet-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={props.node_ref.clone()}>
                <h3 class="top-sheet-title">{ props.title.clone() }</h3>
                { props.children.clone() }
            </div>
        }
    }
}

fn set_shown(sheet: &NodeRef, shown: bool) {
    if let Some(element) = sheet.cast::<web_sys::HtmlElement>() {
        let classes = element.class_list();
        let _ = if shown {
            classes.add_1("show")
        } else {
            classes.remove_1("show")
        };
    }
}

pub fn open_top_sheet(sheet: &NodeRef) {
    set_shown(sheet, true);
}

pub fn close_top_sheet(sheet: &NodeRef) {
    set_shown(sheet, false);
}
