//! Credential form. Submitting probes the credentials with one list request;
//! the outcome shows up in the banners.

use crate::{
    components::{Button, Spinner, TextField},
    features::console::use_console,
};
use leptos::{ev::SubmitEvent, prelude::*};
use user_api::console::ConsoleState;

#[component]
pub fn LoginView() -> impl IntoView {
    let console = use_console();
    let store = console.store;
    let loading = Signal::derive(move || store.with(ConsoleState::is_loading));

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        if loading.get_untracked() {
            return;
        }
        console.spawn(|console| async move { console.login().await });
    };

    view! {
        <div class="max-w-sm mx-auto space-y-6">
            <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Anmelden"</h1>
            <form on:submit=on_submit>
                <TextField
                    id="username"
                    label="Benutzername"
                    autocomplete="username"
                    required=true
                    value=Signal::derive(move || store.with(|state| state.login.username.clone()))
                    on_input=Callback::new(move |value: String| console.update(|state| state.login.username = value))
                />
                <TextField
                    id="password"
                    label="Passwort"
                    input_type="password"
                    autocomplete="current-password"
                    required=true
                    value=Signal::derive(move || store.with(|state| state.login.password.clone()))
                    on_input=Callback::new(move |value: String| console.update(|state| state.login.password = value))
                />
                <Button button_type="submit" disabled=loading>
                    "Anmelden"
                </Button>
                {move || loading.get().then(|| view! { <div class="mt-4"><Spinner label="Anmeldung läuft" /></div> })}
            </form>
        </div>
    }
}
