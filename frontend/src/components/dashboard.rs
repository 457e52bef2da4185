use common::model::dashboard::{bar_percentages, DashboardMetric, DASHBOARD_ENDPOINT};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::table::format_stat;
use crate::session::{self, SessionContext};
use crate::web::http::{self, ApiError};

pub enum Msg {
    Loaded(Result<Vec<DashboardMetric>, ApiError>),
}

pub struct Dashboard {
    metrics: Vec<DashboardMetric>,
    loading: bool,
    session: Option<SessionContext>,
}

impl Component for Dashboard {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            metrics: Vec::new(),
            loading: true,
            session: session::from_context(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(metrics) => self.metrics = metrics,
                    Err(e) => session::report(self.session.as_ref(), &e),
                }
                true
            }
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = http::get_json(DASHBOARD_ENDPOINT, &[]).await;
                link.send_message(Msg::Loaded(result));
            });
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        let user = self.session.as_ref().and_then(|s| s.user.clone());
        let bars = bar_percentages(&self.metrics);

        html! {
            <section class="screen">
                <h2>{"Dashboard"}</h2>
                if let Some(user) = user {
                    <div class="card user-card">
                        <div><strong>{ user.name.clone() }</strong>{ format!(" ({})", user.id) }</div>
                        <div>{ format!("Role: {}", user.role) }</div>
                        <div>{ format!("Plant: {}  Company: {}", user.plant_code, user.company_code) }</div>
                    </div>
                }
                if self.loading {
                    <div class="loading">{"Loading..."}</div>
                } else if self.metrics.is_empty() {
                    <div class="empty">{"No activity to show yet."}</div>
                } else {
                    <div class="stat-cards">
                        { for self.metrics.iter().map(|m| html! {
                            <div class="stat-card">
                                <div class="stat-value">{ format_stat(m.value) }</div>
                                <div class="stat-label">{ m.label.clone() }</div>
                            </div>
                        }) }
                    </div>
                    <div class="card bar-chart">
                        { for self.metrics.iter().zip(bars).map(|(m, pct)| html! {
                            <div class="bar-row">
                                <span class="bar-label">{ m.label.clone() }</span>
                                <div class="bar-track">
                                    <div class="bar" style={format!("width: {}%;", pct)}></div>
                                </div>
                                <span class="bar-value">{ format_stat(m.value) }</span>
                            </div>
                        }) }
                    </div>
                }
            </section>
        }
    }
}
