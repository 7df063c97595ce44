//! The single console view: the login form until credentials are accepted,
//! the user table afterwards.

use super::{login::LoginView, users::UsersView};
use crate::{components::AppShell, features::console::use_console};
use leptos::prelude::*;
use user_api::console::ConsoleState;

#[component]
pub fn ConsolePage() -> impl IntoView {
    let store = use_console().store;
    let authenticated = move || store.with(ConsoleState::is_authenticated);

    view! {
        <AppShell>
            <Show when=authenticated fallback=|| view! { <LoginView /> }>
                <UsersView />
            </Show>
        </AppShell>
    }
}
