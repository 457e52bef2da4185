use crate::app::App;

mod app;
mod components;
mod session;
mod web;

fn main() {
    yew::Renderer::<App>::new().render();
}
