use crate::features::console::ConsoleProvider;
use crate::routes::AppRoutes;
use leptos::prelude::*;
use leptos_router::components::Router;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ConsoleProvider>
            <Router>
                <AppRoutes />
            </Router>
        </ConsoleProvider>
    }
}
