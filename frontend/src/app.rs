//! Root component: owns the route, the session and the theme.
//!
//! Screens receive the session through [`SessionContext`] and ask for
//! navigation and logout through its callbacks, so every route change passes
//! the same guard.

use std::rc::Rc;

use common::auth::SessionUser;
use common::model::master::{Company, ItemPacking, SessionConfig, Uom, UserRole, WarehouseCategory};
use common::model::reports::{FgLabelPrintingRow, FgMovementRow, MaterialReceiptRow, MaterialReturnRow};
use common::model::transactions::LabelSource;
use common::route::AppRoute;
use common::theme::{Mode, ThemeId};
use gloo_console::log;
use yew::prelude::*;

use crate::components::change_password::ChangePassword;
use crate::components::dashboard::Dashboard;
use crate::components::grn::GrnReceipt;
use crate::components::idle_watcher::IdleWatcher;
use crate::components::labels::LabelScreen;
use crate::components::login::Login;
use crate::components::master::MasterScreen;
use crate::components::report::ReportScreen;
use crate::components::sidebar::Sidebar;
use crate::components::stock_transfer::StockTransfer;
use crate::components::top_bar::TopBar;
use crate::session::{self, Restored, SessionContext};
use crate::web::router::{self, PopStateListener};
use crate::web::{clock, cookie, theme};

pub enum Msg {
    Navigate(AppRoute),
    /// Back/forward moved the browser to this route.
    PopState(AppRoute),
    RefreshSession,
    Logout(Option<String>),
    SetTheme(ThemeId),
    ToggleMode,
}

pub struct App {
    route: AppRoute,
    user: Option<Rc<SessionUser>>,
    loading: bool,
    /// Shown on the login screen after a forced logout.
    notice: Option<String>,
    theme: ThemeId,
    mode: Mode,
    _popstate: Option<PopStateListener>,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (theme, mode) = theme::load();
        theme::apply(theme, mode);
        ctx.link().send_message(Msg::RefreshSession);

        Self {
            route: router::current_route(),
            user: None,
            loading: true,
            notice: None,
            theme,
            mode,
            _popstate: PopStateListener::register(ctx.link().callback(Msg::PopState)),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::RefreshSession => {
                let token = cookie::token();
                self.user = match session::restore(token.as_deref(), clock::now_secs()) {
                    Restored::User(user) => Some(Rc::new(user)),
                    Restored::Anonymous => None,
                    Restored::Invalid(reason) => {
                        session::end_session();
                        self.notice = Some(reason);
                        None
                    }
                };
                self.loading = false;
                if let Some(redirect) = router::guard(self.route, self.user.is_some()) {
                    router::replace(redirect);
                    self.route = redirect;
                }
                true
            }
            Msg::Navigate(target) => {
                let route = router::guard(target, self.user.is_some()).unwrap_or(target);
                if route != self.route {
                    router::push(route);
                    self.route = route;
                }
                true
            }
            Msg::PopState(target) => {
                self.route = match router::guard(target, self.user.is_some()) {
                    Some(redirect) => {
                        router::replace(redirect);
                        redirect
                    }
                    None => target,
                };
                true
            }
            Msg::Logout(reason) => {
                log!("Ending session");
                session::end_session();
                self.user = None;
                self.notice = reason;
                router::push(AppRoute::Login);
                self.route = AppRoute::Login;
                true
            }
            Msg::SetTheme(theme) => {
                self.theme = theme;
                theme::apply(self.theme, self.mode);
                theme::save(self.theme, self.mode);
                true
            }
            Msg::ToggleMode => {
                self.mode = self.mode.toggled();
                theme::apply(self.theme, self.mode);
                theme::save(self.theme, self.mode);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let context = SessionContext {
            user: self.user.clone(),
            loading: self.loading,
            refresh_session: link.callback(|_| Msg::RefreshSession),
            logout: link.callback(Msg::Logout),
            navigate: link.callback(Msg::Navigate),
        };

        html! {
            <ContextProvider<SessionContext> {context}>
                { self.body(ctx) }
            </ContextProvider<SessionContext>>
        }
    }
}

impl App {
    fn body(&self, ctx: &Context<Self>) -> Html {
        if self.loading {
            return html! { <div class="loading full">{"Loading..."}</div> };
        }
        let Some(user) = self.user.clone() else {
            return match self.route {
                AppRoute::NotFound => not_found(),
                _ => html! { <Login notice={self.notice.clone()} /> },
            };
        };

        let link = ctx.link();
        html! {
            <div class="app-shell">
                <Sidebar
                    access={user.web_menu_access.clone()}
                    current={self.route}
                    on_navigate={link.callback(Msg::Navigate)}
                />
                <div class="main">
                    <TopBar
                        user={user.clone()}
                        theme={self.theme}
                        mode={self.mode}
                        on_theme={link.callback(Msg::SetTheme)}
                        on_toggle_mode={link.callback(|_| Msg::ToggleMode)}
                        on_change_password={link.callback(|_| Msg::Navigate(AppRoute::ChangePassword))}
                        on_logout={link.callback(|_| Msg::Logout(None))}
                    />
                    <main class="content">
                        if self.route.is_allowed(&user.web_menu_access) {
                            { screen(self.route) }
                        } else {
                            { access_denied() }
                        }
                    </main>
                </div>
                <IdleWatcher user={user.clone()} on_expire={link.callback(|reason| Msg::Logout(Some(reason)))} />
            </div>
        }
    }
}

fn screen(route: AppRoute) -> Html {
    match route {
        AppRoute::Login | AppRoute::Dashboard => html! { <Dashboard /> },
        AppRoute::ChangePassword => html! { <ChangePassword /> },
        AppRoute::CompanyMaster => html! { <MasterScreen<Company> /> },
        AppRoute::UomMaster => html! { <MasterScreen<Uom> /> },
        AppRoute::WarehouseCategoryMaster => html! { <MasterScreen<WarehouseCategory> /> },
        AppRoute::ItemPackingMaster => html! { <MasterScreen<ItemPacking> /> },
        AppRoute::SessionMaster => html! { <MasterScreen<SessionConfig> /> },
        AppRoute::UserRoleMaster => html! { <MasterScreen<UserRole> /> },
        AppRoute::LabelPrinting => html! {
            <LabelScreen key="fg-label-printing" source={LabelSource::FgLabelPrinting} />
        },
        AppRoute::ExistingDataLabels => html! {
            <LabelScreen key="existing-data" source={LabelSource::ExistingData} />
        },
        AppRoute::GrnReceipt => html! { <GrnReceipt /> },
        AppRoute::StockTransfer => html! { <StockTransfer /> },
        AppRoute::FgLabelPrintingReport => html! { <ReportScreen<FgLabelPrintingRow> /> },
        AppRoute::MaterialReceiptReport => html! { <ReportScreen<MaterialReceiptRow> /> },
        AppRoute::MaterialReturnReport => html! { <ReportScreen<MaterialReturnRow> /> },
        AppRoute::FgMovementReport => html! { <ReportScreen<FgMovementRow> /> },
        AppRoute::NotFound => not_found(),
    }
}

fn access_denied() -> Html {
    html! {
        <section class="screen message-page">
            <span class="material-symbols-outlined big">{"block"}</span>
            <h2>{"Access denied"}</h2>
            <p>{"Your role does not include this screen. Ask an administrator to grant access."}</p>
        </section>
    }
}

fn not_found() -> Html {
    html! {
        <section class="screen message-page">
            <h2>{"Page not found"}</h2>
            <a href={AppRoute::auth_success_redirect().to_path()}>{"Go to dashboard"}</a>
        </section>
    }
}
