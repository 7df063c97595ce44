//! Shared layout wrapper with the header, the banners and the content
//! container. The header shows who is logged in and offers logout.

use crate::app_lib::build_info;
use crate::features::console::{use_console, NoticeBanners};
use leptos::prelude::*;

/// Wraps routes with a header and main content container.
#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let console = use_console();
    let store = console.store;
    let username = Memo::new(move |_| {
        store.with(|state| {
            state
                .credentials()
                .map(|credentials| credentials.username().to_string())
        })
    });

    view! {
        <div class="min-h-screen flex flex-col">
            <header class="border-b border-gray-200 bg-white dark:border-gray-700 dark:bg-gray-900">
                <div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4">
                    <span class="text-xl font-semibold whitespace-nowrap text-gray-900 dark:text-white">
                        "Benutzerverwaltung"
                    </span>
                    {move || {
                        username
                            .get()
                            .map(|username| {
                                view! {
                                    <div class="flex items-center gap-4 text-sm">
                                        <span class="text-gray-500 dark:text-gray-400">
                                            "Angemeldet als "
                                            <span class="font-medium text-gray-900 dark:text-white">
                                                {username}
                                            </span>
                                        </span>
                                        <button
                                            type="button"
                                            class="py-2 px-3 text-gray-900 rounded hover:bg-gray-100 dark:text-white dark:hover:bg-gray-700"
                                            on:click=move |_| console.logout()
                                        >
                                            "Abmelden"
                                        </button>
                                    </div>
                                }
                            })
                    }}
                </div>
            </header>
            <main class="flex-1">
                <div class="container mx-auto p-4 mt-6 space-y-4">
                    <NoticeBanners />
                    {children()}
                </div>
            </main>
            <footer class="p-4 text-center text-xs text-gray-400 dark:text-gray-500">
                {format!("{} · {}", env!("CARGO_PKG_VERSION"), build_info::short_commit_hash())}
            </footer>
        </div>
    }
}
