//! Meal Planner Frontend Entry Point

mod app;
mod clipboard;
mod components;
mod context;
mod store;

use app::App;
use leptos::prelude::*;
use planner_core::ClientConfig;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_logger::init(ClientConfig::build_log_level()) {
        web_sys::console::error_1(&format!("Logger already installed: {err}").into());
    }
    mount_to_body(App);
}
