use common::model::envelope::{LoginRequest, LoginResponse};
use common::route::AppRoute;
use gloo_console::log;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::session::{self, SessionContext};
use crate::web::http::{self, ApiError};

pub const LOGIN_ENDPOINT: &str = "/api/admin/check-credentials";

#[derive(Properties, PartialEq)]
pub struct LoginProps {
    /// Why the previous session ended, if it was ended for the user.
    #[prop_or_default]
    pub notice: Option<String>,
}

pub enum Msg {
    SetUserId(String),
    SetPassword(String),
    Submit,
    Answered(Result<LoginResponse, ApiError>),
}

pub struct Login {
    user_id: String,
    password: String,
    submitting: bool,
    error: Option<String>,
    session: Option<SessionContext>,
}

impl Component for Login {
    type Message = Msg;
    type Properties = LoginProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            user_id: String::new(),
            password: String::new(),
            submitting: false,
            error: None,
            session: session::from_context(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetUserId(value) => {
                self.user_id = value;
                self.error = None;
                true
            }
            Msg::SetPassword(value) => {
                self.password = value;
                self.error = None;
                true
            }
            Msg::Submit => {
                if self.submitting {
                    return false;
                }
                let request = LoginRequest {
                    user_id: self.user_id.trim().to_string(),
                    user_password: self.password.clone(),
                };
                if let Err(message) = request.validate() {
                    self.error = Some(message);
                    return true;
                }
                self.submitting = true;
                let link = ctx.link().clone();
                spawn_local(async move {
                    let answer = http::post_json(LOGIN_ENDPOINT, &request).await;
                    link.send_message(Msg::Answered(answer));
                });
                true
            }
            Msg::Answered(answer) => {
                self.submitting = false;
                match answer {
                    Ok(response) if response.accepted_token().is_some() => {
                        log!(format!("Signed in as {}", self.user_id.trim()));
                        self.password.clear();
                        if let Some(session) = &self.session {
                            session.refresh_session.emit(());
                            session.navigate.emit(if response.is_change_password {
                                AppRoute::ChangePassword
                            } else {
                                AppRoute::auth_success_redirect()
                            });
                        }
                    }
                    Ok(response) => {
                        self.error = Some(if response.message.trim().is_empty() {
                            "Invalid user ID or password".to_string()
                        } else {
                            response.message
                        });
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });
        let notice = ctx.props().notice.clone();

        html! {
            <div class="login-page">
                <form class="card login-card" {onsubmit}>
                    <h1>{"WMS Console"}</h1>
                    if let Some(notice) = notice {
                        <div class="notice">{ notice }</div>
                    }
                    <label>{"User ID"}
                        <input
                            type="text"
                            autocomplete="username"
                            value={self.user_id.clone()}
                            oninput={link.callback(|e: InputEvent| Msg::SetUserId(e.target_unchecked_into::<HtmlInputElement>().value()))}
                        />
                    </label>
                    <label>{"Password"}
                        <input
                            type="password"
                            autocomplete="current-password"
                            value={self.password.clone()}
                            oninput={link.callback(|e: InputEvent| Msg::SetPassword(e.target_unchecked_into::<HtmlInputElement>().value()))}
                        />
                    </label>
                    if let Some(error) = &self.error {
                        <div class="field-error">{ error.clone() }</div>
                    }
                    <button class="btn primary" type="submit" disabled={self.submitting}>
                        { if self.submitting { "Signing in..." } else { "Sign in" } }
                    </button>
                </form>
            </div>
        }
    }
}
