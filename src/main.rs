#![allow(warnings)]
//! Brand Kit Frontend Entry Point

mod models;
mod tracker;
mod layout;
mod admin;
mod brand;
mod html;
mod todoist;
mod forms;
mod transfer;
mod changes;
mod error;
mod storage;
mod context;
mod store;
mod components;
mod app;

use app::App;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    spawn_local(async {
        match storage::ensure_install_defaults().await {
            Ok(true) => log::info!("[APP] First start, defaults written"),
            Ok(false) => {}
            Err(e) => log::warn!("[APP] Could not check install defaults: {}", e),
        }
    });

    mount_to_body(App);
}
