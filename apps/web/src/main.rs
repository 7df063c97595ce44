//! Browser entry point of the user management console. Only the configuration
//! helpers build natively, so their tests run with the rest of the workspace.

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
#[path = "lib/mod.rs"]
mod app_lib;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod features;
#[cfg(target_arch = "wasm32")]
mod routes;

fn main() {
    #[cfg(target_arch = "wasm32")]
    leptos::mount::mount_to_body(app::App);
}
