//! Create and edit dialog. The username is fixed once a user exists and the
//! password field only appears when creating.

use crate::{
    components::{Button, ButtonKind, Modal, TextField},
    features::console::use_console,
};
use leptos::{ev::SubmitEvent, prelude::*};
use user_api::console::{ConsoleState, UserField, UserForm};

#[component]
pub fn UserFormDialog() -> impl IntoView {
    let console = use_console();
    let store = console.store;
    let editing = Memo::new(move |_| {
        store.with(|state| state.user_form().is_some_and(UserForm::is_edit))
    });
    let loading = Signal::derive(move || store.with(ConsoleState::is_loading));

    let value = move |field: UserField| {
        Signal::derive(move || {
            store.with(|state| {
                state
                    .user_form()
                    .map(|form| form.draft.field(field).to_string())
                    .unwrap_or_default()
            })
        })
    };
    let set = move |field: UserField| {
        Callback::new(move |value: String| {
            console.update(|state| state.set_user_field(field, value));
        })
    };
    let close = Callback::new(move |()| console.update(ConsoleState::close_dialog));

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        console.spawn(|console| async move { console.submit_user_form().await });
    };

    let title = Signal::derive(move || {
        store.with(|state| {
            state
                .user_form()
                .map(|form| form.title().to_string())
                .unwrap_or_default()
        })
    });

    view! {
        <Modal title=title on_close=close>
            <form on:submit=on_submit>
                <TextField
                    id="user-username"
                    label="Benutzername"
                    required=true
                    readonly=editing
                    value=value(UserField::Username)
                    on_input=set(UserField::Username)
                />
                {move || {
                    (!editing.get())
                        .then(|| {
                            view! {
                                <TextField
                                    id="user-password"
                                    label="Passwort"
                                    input_type="password"
                                    autocomplete="new-password"
                                    required=true
                                    value=value(UserField::Password)
                                    on_input=set(UserField::Password)
                                />
                            }
                        })
                }}
                <TextField
                    id="user-mail"
                    label="E-Mail"
                    input_type="email"
                    required=true
                    value=value(UserField::Mail)
                    on_input=set(UserField::Mail)
                />
                <TextField
                    id="user-first-name"
                    label="Vorname"
                    value=value(UserField::FirstName)
                    on_input=set(UserField::FirstName)
                />
                <TextField
                    id="user-last-name"
                    label="Nachname"
                    value=value(UserField::LastName)
                    on_input=set(UserField::LastName)
                />
                <TextField
                    id="user-phone"
                    label="Telefon"
                    input_type="tel"
                    value=value(UserField::Phone)
                    on_input=set(UserField::Phone)
                />
                <div class="flex justify-end gap-2">
                    <Button kind=ButtonKind::Secondary on_click=close>
                        "Abbrechen"
                    </Button>
                    <Button button_type="submit" disabled=loading>
                        {move || if editing.get() { "Speichern" } else { "Erstellen" }}
                    </Button>
                </div>
            </form>
        </Modal>
    }
}
