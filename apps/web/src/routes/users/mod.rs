//! Authenticated part of the console: toolbar, user table and the dialogs.

mod list;
mod password;
mod user_form;

use crate::{
    components::{Button, ButtonKind, Spinner},
    features::console::use_console,
};
use leptos::prelude::*;
use list::UserTable;
use password::PasswordDialog;
use user_api::console::ConsoleState;
use user_form::UserFormDialog;

#[component]
pub fn UsersView() -> impl IntoView {
    let console = use_console();
    let store = console.store;
    let loading = Signal::derive(move || store.with(ConsoleState::is_loading));
    let user_form_open = move || store.with(|state| state.user_form().is_some());
    let password_open = move || store.with(|state| state.password_form().is_some());

    view! {
        <div class="space-y-6">
            <div class="flex flex-wrap items-center justify-between gap-4">
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Benutzer"</h1>
                <div class="flex gap-2">
                    <Button
                        kind=ButtonKind::Secondary
                        disabled=loading
                        on_click=Callback::new(move |()| {
                            console.spawn(|console| async move { console.reload().await });
                        })
                    >
                        "Aktualisieren"
                    </Button>
                    <Button on_click=Callback::new(move |()| console.update(ConsoleState::open_create))>
                        "Neuer Benutzer"
                    </Button>
                </div>
            </div>
            {move || loading.get().then(|| view! { <Spinner /> })}
            <UserTable />
            <Show when=user_form_open>
                <UserFormDialog />
            </Show>
            <Show when=password_open>
                <PasswordDialog />
            </Show>
        </div>
    }
}
