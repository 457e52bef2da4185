use common::model::envelope::{ChangePasswordRequest, MIN_PASSWORD_LEN};
use common::route::AppRoute;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::toast::{show_error, show_toast};
use crate::session::{self, SessionContext};
use crate::web::http::{self, ApiError, Method};

pub const CHANGE_PASSWORD_ENDPOINT: &str = "/api/admin/change-password";

#[derive(Clone, Copy)]
pub enum Field {
    Old,
    New,
    Confirm,
}

pub enum Msg {
    Set(Field, String),
    Submit,
    Done(Result<String, ApiError>),
}

pub struct ChangePassword {
    old: String,
    new: String,
    confirm: String,
    saving: bool,
    session: Option<SessionContext>,
}

impl Component for ChangePassword {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            old: String::new(),
            new: String::new(),
            confirm: String::new(),
            saving: false,
            session: session::from_context(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Set(field, value) => {
                match field {
                    Field::Old => self.old = value,
                    Field::New => self.new = value,
                    Field::Confirm => self.confirm = value,
                }
                true
            }
            Msg::Submit => {
                let user_id = self
                    .session
                    .as_ref()
                    .map(SessionContext::user_id)
                    .unwrap_or_default();
                let request =
                    match ChangePasswordRequest::build(&user_id, &self.old, &self.new, &self.confirm) {
                        Ok(request) => request,
                        Err(message) => {
                            show_error(&message);
                            return false;
                        }
                    };
                self.saving = true;
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = http::mutate(Method::Post, CHANGE_PASSWORD_ENDPOINT, &request).await;
                    link.send_message(Msg::Done(result));
                });
                true
            }
            Msg::Done(result) => {
                self.saving = false;
                match result {
                    Ok(message) => {
                        show_toast(&message);
                        self.old.clear();
                        self.new.clear();
                        self.confirm.clear();
                        if let Some(session) = &self.session {
                            session.navigate.emit(AppRoute::Dashboard);
                        }
                    }
                    Err(e) => session::report(self.session.as_ref(), &e),
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let input = |label: &'static str, field: Field, value: &str, autocomplete: &'static str| {
            html! {
                <label>{ label }
                    <input
                        type="password"
                        autocomplete={autocomplete}
                        value={value.to_string()}
                        oninput={link.callback(move |e: InputEvent| Msg::Set(field, e.target_unchecked_into::<HtmlInputElement>().value()))}
                    />
                </label>
            }
        };
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <section class="screen narrow">
                <h2>{"Change Password"}</h2>
                <form class="card form-grid single" {onsubmit}>
                    { input("Current password", Field::Old, &self.old, "current-password") }
                    { input("New password", Field::New, &self.new, "new-password") }
                    { input("Confirm new password", Field::Confirm, &self.confirm, "new-password") }
                    <p class="hint">{ format!("At least {} characters, different from the current one.", MIN_PASSWORD_LEN) }</p>
                    <button class="btn primary" type="submit" disabled={self.saving}>{"Update password"}</button>
                </form>
            </section>
        }
    }
}
