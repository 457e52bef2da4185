use common::auth::{join_menu_access, parse_menu_access};
use common::forms::MasterRecord;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::toast::{show_error, show_toast};
use crate::session;
use crate::web::http::{self, Method};

use super::messages::Msg;
use super::state::MasterScreen;

pub fn update<M: MasterRecord>(
    component: &mut MasterScreen<M>,
    ctx: &Context<MasterScreen<M>>,
    msg: Msg<M>,
) -> bool {
    match msg {
        Msg::Load => {
            component.loading = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = http::get_json::<Vec<M>>(&M::list_url(), &[]).await;
                link.send_message(Msg::Loaded(result));
            });
            true
        }
        Msg::Loaded(result) => {
            component.loading = false;
            match result {
                Ok(rows) => component.rows = rows,
                Err(e) => session::report(component.session.as_ref(), &e),
            }
            true
        }
        Msg::SetField(key, value) => {
            component.form.set(key, value);
            true
        }
        Msg::ToggleAccess(key, code) => {
            let toggled = toggle_code(component.form.value(key), code);
            component.form.set(key, toggled);
            true
        }
        Msg::Edit(row) => {
            component.form.begin_edit(&row);
            true
        }
        Msg::Cancel => {
            component.form.cancel();
            true
        }
        Msg::Submit => {
            if component.saving {
                return false;
            }
            let actor = component
                .session
                .as_ref()
                .map(|s| s.user_id())
                .unwrap_or_default();
            let method = if component.form.is_editing() {
                Method::Put
            } else {
                Method::Post
            };
            match component.form.submission(&actor) {
                Err(errors) => {
                    if let Some(first) = errors.first() {
                        show_error(&first.to_string());
                    }
                }
                Ok(submission) => {
                    component.saving = true;
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        let result =
                            http::mutate(method, &submission.url, &submission.record).await;
                        link.send_message(Msg::Submitted(result));
                    });
                }
            }
            true
        }
        Msg::Submitted(result) => {
            component.saving = false;
            match result {
                Ok(message) => {
                    show_toast(&message);
                    component.form.cancel();
                    ctx.link().send_message(Msg::Load);
                }
                Err(e) => session::report(component.session.as_ref(), &e),
            }
            true
        }
        Msg::Search(text) => {
            component.search = text;
            component.page = 1;
            true
        }
        Msg::Page(page) => {
            component.page = page;
            true
        }
    }
}

/// Adds `code` to a comma-joined access list, or removes it when present.
fn toggle_code(raw: &str, code: u32) -> String {
    let mut codes = parse_menu_access(raw);
    match codes.iter().position(|c| *c == code) {
        Some(index) => {
            codes.remove(index);
        }
        None => codes.push(code),
    }
    join_menu_access(&codes)
}

#[cfg(test)]
mod tests {
    use super::toggle_code;

    #[test]
    fn toggling_adds_then_removes() {
        assert_eq!(toggle_code("", 10), "10");
        assert_eq!(toggle_code("1,10", 11), "1,10,11");
        assert_eq!(toggle_code("1,10,11", 10), "1,11");
    }
}
