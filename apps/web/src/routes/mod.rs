mod console;
mod login;
mod not_found;
mod users;

pub(crate) use console::ConsolePage;
pub(crate) use not_found::NotFoundPage;

use leptos::prelude::*;
use leptos_router::components::{Route, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=ConsolePage />
            <Route path=path!("/*any") view=NotFoundPage />
        </Routes>
    }
}
