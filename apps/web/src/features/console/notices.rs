//! Success and error banners. Banners marked as expiring get a one-shot
//! timer per notice id; a timer only clears the banner it was armed for, so a
//! newer message of the same kind stays visible.

use super::{store::SignalStore, use_console};
use crate::components::{Alert, AlertKind};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use user_api::console::{ConsoleState, ConsoleStore, NoticeId, NOTICE_TIMEOUT_MS};

pub(super) fn arm_notice_timers(store: SignalStore) {
    let expiring = Memo::new(move |_| store.with(ConsoleState::expiring_notices));
    let armed = StoredValue::new(Vec::<NoticeId>::new());

    Effect::new(move |_| {
        let current = expiring.get();
        armed.update_value(|armed| armed.retain(|id| current.contains(id)));

        for id in current {
            if armed.with_value(|armed| armed.contains(&id)) {
                continue;
            }
            armed.update_value(|armed| armed.push(id));
            let timeout = Timeout::new(NOTICE_TIMEOUT_MS, move || {
                store.update(|state| state.expire(id));
            });
            let _ = timeout.forget();
        }
    });
}

/// Renders the current error and success banners with dismiss buttons.
#[component]
pub fn NoticeBanners() -> impl IntoView {
    let console = use_console();
    let store = console.store;

    view! {
        {move || {
            store
                .with(|state| state.error().map(|notice| notice.message.clone()))
                .map(|message| {
                    view! {
                        <Alert
                            kind=AlertKind::Error
                            message=message
                            on_close=Callback::new(move |()| console.update(ConsoleState::dismiss_error))
                        />
                    }
                })
        }}
        {move || {
            store
                .with(|state| state.success().map(|notice| notice.message.clone()))
                .map(|message| {
                    view! {
                        <Alert
                            kind=AlertKind::Success
                            message=message
                            on_close=Callback::new(move |()| console.update(ConsoleState::dismiss_success))
                        />
                    }
                })
        }}
    }
}
