use std::rc::Rc;

use common::auth::SessionUser;
use common::theme::{Mode, ThemeId, ALL_THEMES};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TopBarProps {
    pub user: Rc<SessionUser>,
    pub theme: ThemeId,
    pub mode: Mode,
    pub on_theme: Callback<ThemeId>,
    pub on_toggle_mode: Callback<()>,
    pub on_change_password: Callback<()>,
    pub on_logout: Callback<()>,
}

/// Header with the signed-in user, theme picker and account actions.
pub struct TopBar;

impl Component for TopBar {
    type Message = ();
    type Properties = TopBarProps;

    fn create(_ctx: &Context<Self>) -> Self {
        TopBar
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let on_theme = props.on_theme.clone();
        let onchange = Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            if let Ok(theme) = value.parse::<ThemeId>() {
                on_theme.emit(theme);
            }
        });
        let mode_icon = match props.mode {
            Mode::Light => "dark_mode",
            Mode::Dark => "light_mode",
        };

        html! {
            <header class="top-bar">
                <div class="user">
                    <span class="material-symbols-outlined">{"account_circle"}</span>
                    <span class="user-name">{ props.user.name.clone() }</span>
                    <span class="user-role">{ props.user.role.clone() }</span>
                </div>
                <div class="actions">
                    <select class="theme-picker" {onchange} title="Theme">
                        { for ALL_THEMES.iter().map(|theme| html! {
                            <option value={theme.as_str()} selected={*theme == props.theme}>{ theme.label() }</option>
                        }) }
                    </select>
                    <button class="icon-btn" title="Toggle dark mode" onclick={props.on_toggle_mode.reform(|_: MouseEvent| ())}>
                        <span class="material-symbols-outlined">{ mode_icon }</span>
                    </button>
                    <button class="icon-btn" title="Change password" onclick={props.on_change_password.reform(|_: MouseEvent| ())}>
                        <span class="material-symbols-outlined">{"key"}</span>
                    </button>
                    <button class="icon-btn" title="Sign out" onclick={props.on_logout.reform(|_: MouseEvent| ())}>
                        <span class="material-symbols-outlined">{"logout"}</span>
                    </button>
                </div>
            </header>
        }
    }
}
