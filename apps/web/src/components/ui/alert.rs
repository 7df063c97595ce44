//! Alert banners for success and error messages. Messages must be safe to render
//! and should never include secrets or credentials.

use leptos::prelude::*;

#[derive(Clone, Copy)]
/// Supported alert styles.
pub enum AlertKind {
    Error,
    Success,
}

/// Renders a styled alert banner, with a close button when `on_close` is set.
#[component]
pub fn Alert(
    kind: AlertKind,
    message: String,
    #[prop(optional)] on_close: Option<Callback<()>>,
) -> impl IntoView {
    let class = match kind {
        AlertKind::Error => {
            "flex items-start justify-between gap-4 rounded-lg border border-red-200 bg-red-50 px-4 py-3 text-sm text-red-700 dark:border-red-400 dark:bg-red-900/30 dark:text-red-200"
        }
        AlertKind::Success => {
            "flex items-start justify-between gap-4 rounded-lg border border-emerald-200 bg-emerald-50 px-4 py-3 text-sm text-emerald-700 dark:border-emerald-400 dark:bg-emerald-900/30 dark:text-emerald-200"
        }
    };

    view! {
        <div class=class role="alert">
            <span>{message}</span>
            {on_close
                .map(|on_close| {
                    view! {
                        <button
                            type="button"
                            class="font-semibold opacity-70 hover:opacity-100"
                            aria-label="Schließen"
                            on:click=move |_| on_close.run(())
                        >
                            "×"
                        </button>
                    }
                })}
        </div>
    }
}
