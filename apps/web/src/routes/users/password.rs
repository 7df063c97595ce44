//! Password change dialog for one user.

use crate::{
    components::{Button, ButtonKind, Modal, TextField},
    features::console::use_console,
};
use leptos::{ev::SubmitEvent, prelude::*};
use user_api::console::{ConsoleState, PasswordForm};

#[component]
pub fn PasswordDialog() -> impl IntoView {
    let console = use_console();
    let store = console.store;
    let title = Signal::derive(move || {
        store.with(|state| {
            state
                .password_form()
                .map(PasswordForm::title)
                .unwrap_or_default()
        })
    });
    let loading = Signal::derive(move || store.with(ConsoleState::is_loading));
    let close = Callback::new(move |()| console.update(ConsoleState::close_dialog));

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        console.spawn(|console| async move { console.submit_password().await });
    };

    view! {
        <Modal title=title on_close=close>
            <form on:submit=on_submit>
                <TextField
                    id="new-password"
                    label="Neues Passwort"
                    input_type="password"
                    autocomplete="new-password"
                    required=true
                    value=Signal::derive(move || {
                        store.with(|state| {
                            state
                                .password_form()
                                .map(|form| form.new_password.clone())
                                .unwrap_or_default()
                        })
                    })
                    on_input=Callback::new(move |value: String| console.update(|state| state.set_new_password(value)))
                />
                <div class="flex justify-end gap-2">
                    <Button kind=ButtonKind::Secondary on_click=close>
                        "Abbrechen"
                    </Button>
                    <Button button_type="submit" disabled=loading>
                        "Passwort ändern"
                    </Button>
                </div>
            </form>
        </Modal>
    }
}
