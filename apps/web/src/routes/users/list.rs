//! User table with per-row actions. Rows render from the last successful
//! list fetch.

use crate::features::console::use_console;
use leptos::prelude::*;
use user_api::{console::ConsoleState, User};

const HEADER_CLASS: &str =
    "px-4 py-3 text-left text-xs font-medium text-gray-500 dark:text-gray-400 uppercase tracking-wider";
const CELL_CLASS: &str = "px-4 py-3 whitespace-nowrap text-sm text-gray-500 dark:text-gray-400";
const ACTION_CLASS: &str = "px-2 py-1 text-xs font-medium rounded border border-gray-200 hover:bg-gray-100 dark:border-gray-600 dark:hover:bg-gray-700";
const DANGER_CLASS: &str = "px-2 py-1 text-xs font-medium rounded border border-red-200 text-red-700 hover:bg-red-50 dark:border-red-400 dark:text-red-300 dark:hover:bg-red-900/30";

const COLUMNS: [&str; 8] = [
    "ID",
    "Benutzername",
    "E-Mail",
    "Telefon",
    "Name",
    "Fehlversuche",
    "Status",
    "Aktionen",
];

#[component]
pub fn UserTable() -> impl IntoView {
    let store = use_console().store;
    let users = Memo::new(move |_| store.with(|state: &ConsoleState| state.users().to_vec()));

    view! {
        <div class="overflow-x-auto bg-white dark:bg-gray-800 shadow-sm border border-gray-200 dark:border-gray-700 rounded-lg">
            <table class="min-w-full divide-y divide-gray-200 dark:divide-gray-700">
                <thead class="bg-gray-50 dark:bg-gray-900/50">
                    <tr>
                        {COLUMNS
                            .into_iter()
                            .map(|column| view! { <th scope="col" class=HEADER_CLASS>{column}</th> })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-200 dark:divide-gray-700">
                    {move || {
                        let users = users.get();
                        if users.is_empty() {
                            view! {
                                <tr>
                                    <td colspan="8" class="px-4 py-12 text-center text-sm text-gray-500 dark:text-gray-400">
                                        "Keine Benutzer gefunden"
                                    </td>
                                </tr>
                            }
                                .into_any()
                        } else {
                            users
                                .into_iter()
                                .map(|user| view! { <UserRow user=user /> })
                                .collect_view()
                                .into_any()
                        }
                    }}
                </tbody>
            </table>
        </div>
    }
}

fn status_label(active: Option<bool>) -> &'static str {
    match active {
        Some(true) => "Aktiv",
        Some(false) => "Inaktiv",
        None => "-",
    }
}

fn confirm_delete(user: &User) -> bool {
    let message = format!("Benutzer \"{}\" wirklich löschen?", user.username);
    web_sys::window()
        .and_then(|window| window.confirm_with_message(&message).ok())
        .unwrap_or(false)
}

#[component]
fn UserRow(user: User) -> impl IntoView {
    let console = use_console();
    let id = user.user_id;
    let wrong_password = user.wrong_password.unwrap_or(0);
    // Unknown status offers both toggles.
    let can_activate = user.active != Some(true);
    let can_deactivate = user.active != Some(false);

    view! {
        <tr class="hover:bg-gray-50 dark:hover:bg-gray-700/50 transition-colors">
            <td class=CELL_CLASS>{id}</td>
            <td class="px-4 py-3 whitespace-nowrap text-sm font-medium text-gray-900 dark:text-white">
                {user.username.clone()}
            </td>
            <td class=CELL_CLASS>{user.mail.clone().unwrap_or_default()}</td>
            <td class=CELL_CLASS>{user.phone.clone().unwrap_or_default()}</td>
            <td class=CELL_CLASS>{user.display_name()}</td>
            <td class=CELL_CLASS>{wrong_password}</td>
            <td class=CELL_CLASS>{status_label(user.active)}</td>
            <td class="px-4 py-3 whitespace-nowrap">
                <div class="flex flex-wrap gap-1">
                    <button
                        type="button"
                        class=ACTION_CLASS
                        on:click=move |_| console.update(|state| {
                            state.open_edit(id);
                        })
                    >
                        "Bearbeiten"
                    </button>
                    <button
                        type="button"
                        class=ACTION_CLASS
                        on:click=move |_| console.update(|state| {
                            state.open_change_password(id);
                        })
                    >
                        "Passwort"
                    </button>
                    {can_activate
                        .then(|| {
                            view! {
                                <button
                                    type="button"
                                    class=ACTION_CLASS
                                    on:click=move |_| {
                                        console.spawn(move |console| async move { console.set_active(id, true).await });
                                    }
                                >
                                    "Aktivieren"
                                </button>
                            }
                        })}
                    {can_deactivate
                        .then(|| {
                            view! {
                                <button
                                    type="button"
                                    class=ACTION_CLASS
                                    on:click=move |_| {
                                        console.spawn(move |console| async move { console.set_active(id, false).await });
                                    }
                                >
                                    "Deaktivieren"
                                </button>
                            }
                        })}
                    {(wrong_password > 0)
                        .then(|| {
                            view! {
                                <button
                                    type="button"
                                    class=ACTION_CLASS
                                    on:click=move |_| {
                                        console.spawn(move |console| async move { console.reset_wrong_password(id).await });
                                    }
                                >
                                    "Fehlversuche zurücksetzen"
                                </button>
                            }
                        })}
                    <button
                        type="button"
                        class=DANGER_CLASS
                        on:click=move |_| {
                            console.spawn(move |console| async move { console.delete_user(id, confirm_delete).await });
                        }
                    >
                        "Löschen"
                    </button>
                </div>
            </td>
        </tr>
    }
}
