use leptos::prelude::*;

/// Busy indicator shown while requests are in flight.
#[component]
pub fn Spinner(#[prop(optional)] label: Option<&'static str>) -> impl IntoView {
    let label = label.unwrap_or("Lädt");

    view! {
        <span class="inline-flex items-center gap-2 text-sm text-gray-500 dark:text-gray-400" role="status" aria-live="polite">
            <span class="h-5 w-5 animate-spin rounded-full border-2 border-gray-200 border-t-blue-600"></span>
            <span class="sr-only">{label}</span>
        </span>
    }
}
