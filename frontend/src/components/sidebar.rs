use std::collections::HashSet;

use common::menu::{filter_menu, VisibleMenu, WEB_MENU};
use common::route::AppRoute;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub access: Vec<u32>,
    pub current: AppRoute,
    pub on_navigate: Callback<AppRoute>,
}

pub enum Msg {
    ToggleGroup(&'static str),
}

/// Navigation tree restricted to the user's web access codes.
pub struct Sidebar {
    collapsed: HashSet<&'static str>,
}

impl Component for Sidebar {
    type Message = Msg;
    type Properties = SidebarProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            collapsed: HashSet::new(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ToggleGroup(label) => {
                if !self.collapsed.remove(label) {
                    self.collapsed.insert(label);
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let menu = filter_menu(WEB_MENU, &ctx.props().access);
        html! {
            <nav class="sidebar">
                <div class="brand">{"WMS Console"}</div>
                <ul class="menu">
                    { for menu.iter().map(|node| self.node(ctx, node)) }
                </ul>
            </nav>
        }
    }
}

impl Sidebar {
    fn node(&self, ctx: &Context<Self>, node: &VisibleMenu) -> Html {
        match node.route {
            Some(route) => leaf(ctx, node, route),
            None => {
                let label = node.label;
                let open = !self.collapsed.contains(label);
                html! {
                    <li class="menu-group">
                        <button class="menu-group-header" onclick={ctx.link().callback(move |_| Msg::ToggleGroup(label))}>
                            <span class="material-symbols-outlined">{ node.icon }</span>
                            <span class="menu-label">{ label }</span>
                            <span class="material-symbols-outlined chevron">
                                { if open { "expand_less" } else { "expand_more" } }
                            </span>
                        </button>
                        if open {
                            <ul class="submenu">
                                { for node.children.iter().map(|child| self.node(ctx, child)) }
                            </ul>
                        }
                    </li>
                }
            }
        }
    }
}

fn leaf(ctx: &Context<Sidebar>, node: &VisibleMenu, route: AppRoute) -> Html {
    let on_navigate = ctx.props().on_navigate.clone();
    let onclick = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        on_navigate.emit(route);
    });
    let active = ctx.props().current == route;
    html! {
        <li class={classes!("menu-item", active.then_some("active"))}>
            <a href={route.to_path()} {onclick}>
                <span class="material-symbols-outlined">{ node.icon }</span>
                <span class="menu-label">{ node.label }</span>
            </a>
        </li>
    }
}
