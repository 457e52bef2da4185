//! Ends the session on token expiry or inactivity.
//!
//! Token expiry is polled every `IdlePolicy::poll_interval_ms`. Inactivity
//! runs on its own one-shot timer armed for the remaining idle window; user
//! input anywhere in the window only moves the activity clock, and the timer
//! re-arms itself from it when it fires early. The verdicts come from
//! `common::session`.

use std::cell::Cell;
use std::rc::Rc;

use common::auth::SessionUser;
use common::session::{IdlePolicy, SessionVerdict};
use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::prelude::*;
use yew::prelude::*;

use crate::web::clock::now_ms;

const ACTIVITY_EVENTS: [&str; 5] = ["mousemove", "keydown", "click", "scroll", "touchstart"];

#[derive(Properties, PartialEq)]
pub struct IdleWatcherProps {
    pub user: Rc<SessionUser>,
    /// Receives the message to show on the login screen.
    pub on_expire: Callback<String>,
}

pub enum Msg {
    Tick,
    IdleDue,
}

pub struct IdleWatcher {
    policy: IdlePolicy,
    last_activity: Rc<Cell<u64>>,
    activity: Closure<dyn Fn()>,
    interval: Option<Interval>,
    idle_timer: Option<Timeout>,
}

impl Component for IdleWatcher {
    type Message = Msg;
    type Properties = IdleWatcherProps;

    fn create(ctx: &Context<Self>) -> Self {
        let policy = IdlePolicy::default();
        let last_activity = Rc::new(Cell::new(now_ms()));

        let clock = last_activity.clone();
        let activity = Closure::<dyn Fn()>::new(move || clock.set(now_ms()));
        if let Some(window) = web_sys::window() {
            for event in ACTIVITY_EVENTS {
                let _ = window
                    .add_event_listener_with_callback(event, activity.as_ref().unchecked_ref());
            }
        }

        let link = ctx.link().clone();
        let interval = Interval::new(policy.poll_interval_ms, move || link.send_message(Msg::Tick));

        let mut watcher = Self {
            policy,
            last_activity,
            activity,
            interval: Some(interval),
            idle_timer: None,
        };
        watcher.arm_idle_timer(ctx);
        watcher
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Tick => {
                let verdict = self.policy.token_verdict(&ctx.props().user, now_ms());
                self.finish_if_ended(ctx, verdict);
                false
            }
            Msg::IdleDue => {
                let verdict =
                    self.policy
                        .evaluate(&ctx.props().user, now_ms(), self.last_activity.get());
                if verdict == SessionVerdict::Active {
                    self.arm_idle_timer(ctx);
                } else {
                    self.finish_if_ended(ctx, verdict);
                }
                false
            }
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {}
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.interval = None;
        self.idle_timer = None;
        if let Some(window) = web_sys::window() {
            for event in ACTIVITY_EVENTS {
                let _ = window
                    .remove_event_listener_with_callback(event, self.activity.as_ref().unchecked_ref());
            }
        }
    }
}

impl IdleWatcher {
    fn arm_idle_timer(&mut self, ctx: &Context<Self>) {
        let delay = self
            .policy
            .idle_timer_delay_ms(now_ms(), self.last_activity.get());
        let link = ctx.link().clone();
        self.idle_timer = Some(Timeout::new(delay, move || link.send_message(Msg::IdleDue)));
    }

    fn finish_if_ended(&mut self, ctx: &Context<Self>, verdict: SessionVerdict) {
        if verdict == SessionVerdict::Active {
            return;
        }
        self.interval = None;
        self.idle_timer = None;
        if let Some(reason) = verdict.logout_reason() {
            ctx.props().on_expire.emit(reason.to_string());
        }
    }
}
