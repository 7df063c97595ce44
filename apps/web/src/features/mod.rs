//! Feature modules wiring the console state machine into Leptos.

pub(crate) mod console;
