//! Renderer-independent state of the admin console: login form, session
//! credentials, the last fetched user list, the open dialog and the banners.
//! Transitions are plain methods so any view layer can drive them.

use crate::{
    client::Credentials,
    error::ApiError,
    model::{CreateUserRequest, UpdateUserRequest, User, UserId},
};
use tracing::debug;

/// How long success banners and the login error stay visible.
pub const NOTICE_TIMEOUT_MS: u32 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Unauthenticated,
    Authenticated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoticeId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A banner message. `expires` marks banners that a timer should clear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub kind: NoticeKind,
    pub message: String,
    pub expires: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserField {
    Username,
    Password,
    Mail,
    FirstName,
    LastName,
    Phone,
}

/// Form draft for creating or editing a user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub username: String,
    pub password: String,
    pub mail: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl UserDraft {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            password: String::new(),
            mail: user.mail.clone().unwrap_or_default(),
            first_name: user.first_name.clone().unwrap_or_default(),
            last_name: user.last_name.clone().unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn field(&self, field: UserField) -> &str {
        match field {
            UserField::Username => &self.username,
            UserField::Password => &self.password,
            UserField::Mail => &self.mail,
            UserField::FirstName => &self.first_name,
            UserField::LastName => &self.last_name,
            UserField::Phone => &self.phone,
        }
    }

    fn field_mut(&mut self, field: UserField) -> &mut String {
        match field {
            UserField::Username => &mut self.username,
            UserField::Password => &mut self.password,
            UserField::Mail => &mut self.mail,
            UserField::FirstName => &mut self.first_name,
            UserField::LastName => &mut self.last_name,
            UserField::Phone => &mut self.phone,
        }
    }

    #[must_use]
    pub fn to_create_request(&self) -> CreateUserRequest {
        CreateUserRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            mail: self.mail.trim().to_string(),
            phone: self.phone.clone(),
            user_uid: None,
        }
    }

    #[must_use]
    pub fn to_update_request(&self) -> UpdateUserRequest {
        UpdateUserRequest {
            mail: self.mail.trim().to_string(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            user_uid: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserForm {
    /// `None` while creating, the edited user's id otherwise.
    pub editing: Option<UserId>,
    pub draft: UserDraft,
}

impl UserForm {
    #[must_use]
    pub const fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        if self.is_edit() {
            "Benutzer bearbeiten"
        } else {
            "Neuer Benutzer"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordForm {
    pub user_id: UserId,
    pub username: String,
    pub new_password: String,
}

impl PasswordForm {
    #[must_use]
    pub fn title(&self) -> String {
        format!("Passwort ändern: {}", self.username)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dialog {
    UserForm(UserForm),
    ChangePassword(PasswordForm),
}

#[derive(Clone, Debug, Default)]
pub struct ConsoleState {
    pub login: LoginForm,
    session: Option<Credentials>,
    users: Vec<User>,
    dialog: Option<Dialog>,
    error: Option<Notice>,
    success: Option<Notice>,
    in_flight: u32,
    next_notice: u64,
    session_epoch: u64,
}

/// An authenticated request in flight, tied to the session that started it.
#[derive(Clone, Debug)]
pub struct PendingRequest {
    credentials: Credentials,
    session_epoch: u64,
}

impl PendingRequest {
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl ConsoleState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        if self.session.is_some() {
            Mode::Authenticated
        } else {
            Mode::Unauthenticated
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub const fn credentials(&self) -> Option<&Credentials> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.user_id == id)
    }

    #[must_use]
    pub const fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    #[must_use]
    pub fn user_form(&self) -> Option<&UserForm> {
        match &self.dialog {
            Some(Dialog::UserForm(form)) => Some(form),
            _ => None,
        }
    }

    #[must_use]
    pub fn password_form(&self) -> Option<&PasswordForm> {
        match &self.dialog {
            Some(Dialog::ChangePassword(form)) => Some(form),
            _ => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&Notice> {
        self.error.as_ref()
    }

    #[must_use]
    pub const fn success(&self) -> Option<&Notice> {
        self.success.as_ref()
    }

    /// True while at least one request is unresolved.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Starts the login probe and returns the credentials to probe with.
    pub fn begin_login(&mut self) -> Credentials {
        self.in_flight += 1;
        self.error = None;
        Credentials::new(self.login.username.trim(), self.login.password.clone())
    }

    /// Applies the probe result. The probe's list becomes the displayed list.
    pub fn finish_login(&mut self, credentials: Credentials, result: Result<Vec<User>, ApiError>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            Ok(users) => {
                let message = format!("Erfolgreich als {} angemeldet!", credentials.username());
                self.session = Some(credentials);
                self.session_epoch += 1;
                self.users = users;
                self.push_notice(NoticeKind::Success, message, true);
            }
            Err(err) => {
                self.push_notice(
                    NoticeKind::Error,
                    format!("Login fehlgeschlagen: {err}"),
                    true,
                );
            }
        }
    }

    /// Drops credentials, the list, any dialog and banners. The username stays
    /// in the login form.
    pub fn logout(&mut self) {
        self.session = None;
        self.session_epoch += 1;
        self.users.clear();
        self.dialog = None;
        self.error = None;
        self.success = None;
        self.login.password.clear();
    }

    /// Starts an authenticated request; `None` when logged out.
    pub fn begin_request(&mut self) -> Option<PendingRequest> {
        let credentials = self.session.clone()?;
        self.in_flight += 1;
        self.error = None;
        Some(PendingRequest {
            credentials,
            session_epoch: self.session_epoch,
        })
    }

    /// True while the session that started `request` is still the current one.
    fn is_current(&self, request: &PendingRequest) -> bool {
        self.is_authenticated() && request.session_epoch == self.session_epoch
    }

    /// Applies a list refresh. Responses for an ended session are dropped.
    pub fn finish_reload(
        &mut self,
        request: &PendingRequest,
        result: Result<Vec<User>, ApiError>,
    ) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if !self.is_current(request) {
            debug!("dropping list response of an ended session");
            return;
        }
        match result {
            Ok(users) => self.users = users,
            Err(err) => self.push_notice(NoticeKind::Error, err.to_string(), false),
        }
    }

    /// Applies a mutation result and returns whether the list must be reloaded.
    /// Failures leave the dialog and the list untouched.
    pub fn finish_mutation(
        &mut self,
        request: &PendingRequest,
        result: Result<(), ApiError>,
        success_message: &str,
    ) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        if !self.is_current(request) {
            debug!("dropping mutation response of an ended session");
            return false;
        }
        match result {
            Ok(()) => {
                self.push_notice(NoticeKind::Success, success_message.to_string(), true);
                self.dialog = None;
                true
            }
            Err(err) => {
                self.push_notice(NoticeKind::Error, err.to_string(), false);
                false
            }
        }
    }

    pub fn open_create(&mut self) {
        self.dialog = Some(Dialog::UserForm(UserForm {
            editing: None,
            draft: UserDraft::default(),
        }));
    }

    /// Opens the edit dialog prefilled from the displayed list.
    pub fn open_edit(&mut self, id: UserId) -> bool {
        let Some(user) = self.user(id) else {
            return false;
        };
        let draft = UserDraft::from_user(user);
        self.dialog = Some(Dialog::UserForm(UserForm {
            editing: Some(id),
            draft,
        }));
        true
    }

    pub fn open_change_password(&mut self, id: UserId) -> bool {
        let Some(user) = self.user(id) else {
            return false;
        };
        let form = PasswordForm {
            user_id: id,
            username: user.username.clone(),
            new_password: String::new(),
        };
        self.dialog = Some(Dialog::ChangePassword(form));
        true
    }

    /// Cancels the open dialog, discarding its draft.
    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// Edits the user form draft. The username is fixed once a user exists.
    pub fn set_user_field(&mut self, field: UserField, value: String) {
        if let Some(Dialog::UserForm(form)) = &mut self.dialog {
            if field == UserField::Username && form.is_edit() {
                return;
            }
            *form.draft.field_mut(field) = value;
        }
    }

    pub fn set_new_password(&mut self, value: String) {
        if let Some(Dialog::ChangePassword(form)) = &mut self.dialog {
            form.new_password = value;
        }
    }

    /// Shows an error that did not come from a request, such as a bad API URL.
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.push_notice(NoticeKind::Error, message.into(), false);
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn dismiss_success(&mut self) {
        self.success = None;
    }

    /// Clears the banner armed with `id`; newer banners are left alone.
    pub fn expire(&mut self, id: NoticeId) {
        if self.error.as_ref().is_some_and(|notice| notice.id == id) {
            self.error = None;
        }
        if self.success.as_ref().is_some_and(|notice| notice.id == id) {
            self.success = None;
        }
    }

    /// Ids of the visible banners that should be cleared by a timer.
    #[must_use]
    pub fn expiring_notices(&self) -> Vec<NoticeId> {
        [self.error.as_ref(), self.success.as_ref()]
            .into_iter()
            .flatten()
            .filter(|notice| notice.expires)
            .map(|notice| notice.id)
            .collect()
    }

    fn push_notice(&mut self, kind: NoticeKind, message: String, expires: bool) {
        self.next_notice += 1;
        let notice = Notice {
            id: NoticeId(self.next_notice),
            kind,
            message,
            expires,
        };
        match kind {
            NoticeKind::Success => self.success = Some(notice),
            NoticeKind::Error => self.error = Some(notice),
        }
    }
}
