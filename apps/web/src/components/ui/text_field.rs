//! Labelled text input bound to console state through a signal and a
//! callback.

use leptos::prelude::*;

const INPUT_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500";

#[component]
pub fn TextField(
    id: &'static str,
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] autocomplete: Option<&'static str>,
    #[prop(optional)] required: bool,
    #[prop(optional, into, default = Signal::from(false))] readonly: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="mb-5">
            <label for=id class="block mb-2 text-sm font-medium text-gray-900 dark:text-white">
                {label}
            </label>
            <input
                id=id
                type=input_type.unwrap_or("text")
                class=INPUT_CLASS
                class:opacity-60=move || readonly.get()
                autocomplete=autocomplete.unwrap_or("off")
                required=required
                readonly=move || readonly.get()
                prop:value=move || value.get()
                on:input=move |event| on_input.run(event_target_value(&event))
            />
        </div>
    }
}
