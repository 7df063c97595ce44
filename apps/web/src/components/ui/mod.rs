mod alert;
mod button;
mod modal;
mod spinner;
mod text_field;

pub(crate) use alert::{Alert, AlertKind};
pub(crate) use button::{Button, ButtonKind};
pub(crate) use modal::Modal;
pub(crate) use spinner::Spinner;
pub(crate) use text_field::TextField;
