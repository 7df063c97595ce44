//! Console state held in a single `RwSignal`. Workflows from
//! `user_api::console` write through [`SignalStore`]; views read it with
//! [`SignalStore::with`] so they re-render on change. The API client is
//! built once from [`AppConfig`] when the provider mounts.

use crate::app_lib::AppConfig;
use leptos::{prelude::*, task::spawn_local};
use std::future::Future;
use user_api::{
    console::{Console, ConsoleState, ConsoleStore},
    UserClient,
};

/// `RwSignal` adapter for the console workflows.
#[derive(Clone, Copy)]
pub struct SignalStore(RwSignal<ConsoleState>);

impl SignalStore {
    fn new() -> Self {
        Self(RwSignal::new(ConsoleState::new()))
    }

    /// Tracked read for views and memos.
    pub fn with<R>(&self, f: impl FnOnce(&ConsoleState) -> R) -> R {
        self.0.with(f)
    }
}

impl ConsoleStore for SignalStore {
    fn read<R>(&self, f: impl FnOnce(&ConsoleState) -> R) -> R {
        self.0.with_untracked(f)
    }

    fn update<R>(&self, f: impl FnOnce(&mut ConsoleState) -> R) -> R {
        f(&mut *self.0.write())
    }
}

pub type WebConsole = Console<UserClient, SignalStore>;

/// Console context shared through Leptos.
#[derive(Clone, Copy)]
pub struct ConsoleContext {
    pub store: SignalStore,
    client: StoredValue<Option<UserClient>, LocalStorage>,
}

impl ConsoleContext {
    fn console(&self) -> Option<WebConsole> {
        self.client
            .get_value()
            .map(|client| Console::new(client, self.store))
    }

    /// Runs a workflow in the background. Nothing happens when the API URL
    /// is unusable; that error is already on screen.
    pub fn spawn<F, Fut>(&self, task: F)
    where
        F: FnOnce(WebConsole) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        if let Some(console) = self.console() {
            spawn_local(task(console));
        }
    }

    /// Synchronous state change, such as typing into a form.
    pub fn update(&self, f: impl FnOnce(&mut ConsoleState)) {
        self.store.update(f);
    }

    pub fn logout(&self) {
        match self.console() {
            Some(console) => console.logout(),
            None => self.store.update(ConsoleState::logout),
        }
    }
}

fn build_client(config: &AppConfig) -> Result<UserClient, user_api::ApiError> {
    UserClient::new(&config.api_base_url)
}

/// Provides the console context for the whole app.
#[component]
pub fn ConsoleProvider(children: Children) -> impl IntoView {
    let store = SignalStore::new();
    let config = AppConfig::load();

    let client = match build_client(&config) {
        Ok(client) => {
            tracing::debug!(api_base_url = %config.api_base_url, "user API configured");
            Some(client)
        }
        Err(err) => {
            tracing::error!("invalid API base URL: {err}");
            store.update(|state| state.report_error(err.to_string()));
            None
        }
    };

    let context = ConsoleContext {
        store,
        client: StoredValue::new_local(client),
    };
    provide_context(context);
    super::notices::arm_notice_timers(store);

    view! { {children()} }
}

/// Returns the console context or a detached one without an API client.
pub fn use_console() -> ConsoleContext {
    use_context::<ConsoleContext>().unwrap_or_else(|| ConsoleContext {
        store: SignalStore::new(),
        client: StoredValue::new_local(None),
    })
}
