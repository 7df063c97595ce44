//! Console workflows: every UI action is an API call followed by a state
//! transition. The state lives behind [`ConsoleStore`] so the same workflows
//! drive a reactive signal in the browser and a `RefCell` in tests. No borrow
//! of the state is held across an `.await`; overlapping actions are not
//! serialized.

mod state;

pub use state::{
    ConsoleState, Dialog, LoginForm, Mode, Notice, NoticeId, NoticeKind, PasswordForm,
    PendingRequest, UserDraft, UserField, UserForm, NOTICE_TIMEOUT_MS,
};

use crate::{
    client::UserApi,
    error::ApiError,
    model::{User, UserId},
};
use std::{cell::RefCell, rc::Rc};
use tracing::{debug, info, instrument};

const USER_CREATED: &str = "Benutzer erfolgreich erstellt!";
const USER_UPDATED: &str = "Benutzer erfolgreich aktualisiert!";
const USER_DELETED: &str = "Benutzer erfolgreich gelöscht!";
const USER_ACTIVATED: &str = "Benutzer erfolgreich aktiviert!";
const USER_DEACTIVATED: &str = "Benutzer erfolgreich deaktiviert!";
const PASSWORD_CHANGED: &str = "Passwort erfolgreich geändert!";
const WRONG_PASSWORD_RESET: &str = "Fehlversuche erfolgreich zurückgesetzt!";

/// Access to the console state owned by the view layer.
pub trait ConsoleStore {
    fn read<R>(&self, f: impl FnOnce(&ConsoleState) -> R) -> R;

    fn update<R>(&self, f: impl FnOnce(&mut ConsoleState) -> R) -> R;
}

impl ConsoleStore for Rc<RefCell<ConsoleState>> {
    fn read<R>(&self, f: impl FnOnce(&ConsoleState) -> R) -> R {
        f(&self.borrow())
    }

    fn update<R>(&self, f: impl FnOnce(&mut ConsoleState) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

#[derive(Clone, Debug)]
pub struct Console<A, S> {
    api: A,
    store: S,
}

impl<A: UserApi, S: ConsoleStore> Console<A, S> {
    pub const fn new(api: A, store: S) -> Self {
        Self { api, store }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Probes the login form credentials with one list request.
    #[instrument(skip(self))]
    pub async fn login(&self) {
        let credentials = self.store.update(ConsoleState::begin_login);
        info!(username = credentials.username(), "probing credentials");

        let result = self.api.list_users(&credentials).await;
        if let Err(err) = &result {
            info!(status = err.status(), "login rejected");
        }
        self.store
            .update(|state| state.finish_login(credentials, result));
    }

    pub fn logout(&self) {
        self.store.update(ConsoleState::logout);
        info!("logged out");
    }

    /// Replaces the displayed list with a fresh fetch.
    #[instrument(skip(self))]
    pub async fn reload(&self) {
        let Some(request) = self.store.update(ConsoleState::begin_request) else {
            return;
        };
        let result = self.api.list_users(request.credentials()).await;
        if let Ok(users) = &result {
            debug!(count = users.len(), "user list refreshed");
        }
        self.store
            .update(|state| state.finish_reload(&request, result));
    }

    /// Submits the create/edit dialog.
    #[instrument(skip(self))]
    pub async fn submit_user_form(&self) {
        let Some(form) = self.store.read(|state| state.user_form().cloned()) else {
            return;
        };
        let Some(request) = self.store.update(ConsoleState::begin_request) else {
            return;
        };

        let credentials = request.credentials();
        let (result, message) = match form.editing {
            Some(id) => {
                let body = form.draft.to_update_request();
                let result = self.api.update_user(credentials, id, &body).await;
                (result.map(drop), USER_UPDATED)
            }
            None => {
                let body = form.draft.to_create_request();
                let result = self.api.create_user(credentials, &body).await;
                (result.map(drop), USER_CREATED)
            }
        };
        self.complete_mutation(&request, result, message).await;
    }

    /// Submits the change-password dialog.
    #[instrument(skip(self))]
    pub async fn submit_password(&self) {
        let Some(form) = self.store.read(|state| state.password_form().cloned()) else {
            return;
        };
        let Some(request) = self.store.update(ConsoleState::begin_request) else {
            return;
        };

        let result = self
            .api
            .change_password(request.credentials(), form.user_id, &form.new_password)
            .await;
        self.complete_mutation(&request, result, PASSWORD_CHANGED).await;
    }

    /// Deletes a listed user once `confirm` approves; a refusal issues no request.
    #[instrument(skip(self, confirm))]
    pub async fn delete_user(&self, id: UserId, confirm: impl FnOnce(&User) -> bool) {
        let Some(user) = self.store.read(|state| state.user(id).cloned()) else {
            debug!("user is not listed, nothing to delete");
            return;
        };
        if !confirm(&user) {
            debug!(username = %user.username, "delete cancelled");
            return;
        }
        let Some(request) = self.store.update(ConsoleState::begin_request) else {
            return;
        };

        let result = self.api.delete_user(request.credentials(), id).await;
        self.complete_mutation(&request, result, USER_DELETED).await;
    }

    #[instrument(skip(self))]
    pub async fn set_active(&self, id: UserId, active: bool) {
        let Some(request) = self.store.update(ConsoleState::begin_request) else {
            return;
        };

        let (result, message) = if active {
            let result = self.api.activate_user(request.credentials(), id).await;
            (result.map(drop), USER_ACTIVATED)
        } else {
            let result = self.api.deactivate_user(request.credentials(), id).await;
            (result.map(drop), USER_DEACTIVATED)
        };
        self.complete_mutation(&request, result, message).await;
    }

    #[instrument(skip(self))]
    pub async fn reset_wrong_password(&self, id: UserId) {
        let Some(request) = self.store.update(ConsoleState::begin_request) else {
            return;
        };

        let result = self.api.reset_wrong_password(request.credentials(), id).await;
        self.complete_mutation(&request, result, WRONG_PASSWORD_RESET).await;
    }

    async fn complete_mutation(
        &self,
        request: &PendingRequest,
        result: Result<(), ApiError>,
        message: &str,
    ) {
        let reload = self
            .store
            .update(|state| state.finish_mutation(request, result, message));
        if reload {
            self.reload().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::Credentials,
        model::{CreateUserRequest, UpdateUserRequest},
    };

    fn user(id: UserId, username: &str) -> User {
        User {
            user_id: id,
            username: username.to_string(),
            user_uid: None,
            first_name: None,
            last_name: None,
            mail: Some(format!("{username}@example.com")),
            phone: None,
            wrong_password: None,
            active: Some(true),
        }
    }

    /// Records every call and fails the operations listed in `failing`.
    #[derive(Default)]
    struct MockApi {
        users: RefCell<Vec<User>>,
        calls: RefCell<Vec<String>>,
        failing: RefCell<Vec<&'static str>>,
    }

    impl MockApi {
        fn with_users(users: Vec<User>) -> Self {
            let api = Self::default();
            *api.users.borrow_mut() = users;
            api
        }

        fn fail(&self, operation: &'static str) {
            self.failing.borrow_mut().push(operation);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn count(&self, operation: &str) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|call| call.starts_with(operation))
                .count()
        }

        fn record(&self, call: String) -> Result<(), ApiError> {
            let operation = call.split(':').next().unwrap_or_default().to_string();
            self.calls.borrow_mut().push(call);
            if self.failing.borrow().iter().any(|name| *name == operation) {
                Err(ApiError::Server {
                    status: 400,
                    message: format!("{operation} abgelehnt"),
                })
            } else {
                Ok(())
            }
        }
    }

    impl UserApi for MockApi {
        async fn list_users(&self, _: &Credentials) -> Result<Vec<User>, ApiError> {
            self.record("list".to_string())?;
            Ok(self.users.borrow().clone())
        }

        async fn get_user(&self, _: &Credentials, id: UserId) -> Result<User, ApiError> {
            self.record(format!("get:{id}"))?;
            Ok(user(id, "anna"))
        }

        async fn get_user_by_username(
            &self,
            _: &Credentials,
            username: &str,
        ) -> Result<User, ApiError> {
            self.record(format!("get_by_username:{username}"))?;
            Ok(user(1, username))
        }

        async fn create_user(
            &self,
            _: &Credentials,
            request: &CreateUserRequest,
        ) -> Result<User, ApiError> {
            self.record(format!("create:{}", request.username))?;
            let created = user(100, &request.username);
            self.users.borrow_mut().push(created.clone());
            Ok(created)
        }

        async fn update_user(
            &self,
            _: &Credentials,
            id: UserId,
            request: &UpdateUserRequest,
        ) -> Result<User, ApiError> {
            self.record(format!("update:{id}:{}", request.mail))?;
            Ok(user(id, "anna"))
        }

        async fn delete_user(&self, _: &Credentials, id: UserId) -> Result<(), ApiError> {
            self.record(format!("delete:{id}"))?;
            self.users.borrow_mut().retain(|user| user.user_id != id);
            Ok(())
        }

        async fn activate_user(&self, _: &Credentials, id: UserId) -> Result<Option<User>, ApiError> {
            self.record(format!("activate:{id}"))?;
            Ok(None)
        }

        async fn deactivate_user(
            &self,
            _: &Credentials,
            id: UserId,
        ) -> Result<Option<User>, ApiError> {
            self.record(format!("deactivate:{id}"))?;
            Ok(None)
        }

        async fn change_password(
            &self,
            _: &Credentials,
            id: UserId,
            new_password: &str,
        ) -> Result<(), ApiError> {
            self.record(format!("change_password:{id}:{new_password}"))
        }

        async fn reset_wrong_password(&self, _: &Credentials, id: UserId) -> Result<(), ApiError> {
            self.record(format!("reset_wrong_password:{id}"))
        }

        async fn list_users_by_role(
            &self,
            _: &Credentials,
            role: &str,
        ) -> Result<Vec<User>, ApiError> {
            self.record(format!("by_role:{role}"))?;
            Ok(Vec::new())
        }
    }

    type TestConsole = Console<MockApi, Rc<RefCell<ConsoleState>>>;

    fn console(users: Vec<User>) -> TestConsole {
        let mut state = ConsoleState::new();
        state.login = LoginForm {
            username: "superadmin".to_string(),
            password: "admin123".to_string(),
        };
        Console::new(MockApi::with_users(users), Rc::new(RefCell::new(state)))
    }

    async fn logged_in(users: Vec<User>) -> TestConsole {
        let console = console(users);
        console.login().await;
        assert_eq!(console.store().read(ConsoleState::mode), Mode::Authenticated);
        console.api().calls.borrow_mut().clear();
        console
    }

    #[tokio::test]
    async fn login_issues_exactly_one_list_fetch() {
        let console = console(vec![user(1, "anna"), user(2, "ben")]);
        console.login().await;

        assert_eq!(console.api().calls(), vec!["list".to_string()]);
        console.store().read(|state| {
            assert_eq!(state.mode(), Mode::Authenticated);
            assert_eq!(state.users().len(), 2);
            assert!(!state.is_loading());
        });
    }

    #[tokio::test]
    async fn login_failure_shows_translated_error() {
        let console = console(vec![]);
        console.api().fail("list");
        console.login().await;

        console.store().read(|state| {
            assert_eq!(state.mode(), Mode::Unauthenticated);
            assert_eq!(
                state.error().map(|notice| notice.message.as_str()),
                Some("Login fehlgeschlagen: list abgelehnt")
            );
        });
    }

    #[tokio::test]
    async fn create_calls_once_then_refreshes_and_closes_dialog() {
        let console = logged_in(vec![user(1, "anna")]).await;
        console.store().update(|state| {
            state.open_create();
            state.set_user_field(UserField::Username, "ben".to_string());
            state.set_user_field(UserField::Password, "pw".to_string());
            state.set_user_field(UserField::Mail, "ben@example.com".to_string());
        });

        console.submit_user_form().await;

        assert_eq!(
            console.api().calls(),
            vec!["create:ben".to_string(), "list".to_string()]
        );
        console.store().read(|state| {
            assert!(state.dialog().is_none());
            assert_eq!(state.users().len(), 2);
            assert_eq!(
                state.success().map(|notice| notice.message.as_str()),
                Some(USER_CREATED)
            );
        });
    }

    #[tokio::test]
    async fn edit_sends_update_for_edited_user() {
        let console = logged_in(vec![user(1, "anna")]).await;
        console.store().update(|state| {
            assert!(state.open_edit(1));
            state.set_user_field(UserField::Mail, "anna@neu.example".to_string());
        });

        console.submit_user_form().await;

        assert_eq!(
            console.api().calls(),
            vec!["update:1:anna@neu.example".to_string(), "list".to_string()]
        );
    }

    #[tokio::test]
    async fn declined_delete_issues_no_request() {
        let console = logged_in(vec![user(1, "anna")]).await;
        console.delete_user(1, |_| false).await;

        assert!(console.api().calls().is_empty());
        assert_eq!(console.store().read(|state| state.users().len()), 1);
    }

    #[tokio::test]
    async fn confirmed_delete_removes_and_refreshes() {
        let console = logged_in(vec![user(1, "anna"), user(2, "ben")]).await;
        let mut prompted = None;
        console
            .delete_user(2, |user| {
                prompted = Some(user.username.clone());
                true
            })
            .await;

        assert_eq!(prompted.as_deref(), Some("ben"));
        assert_eq!(
            console.api().calls(),
            vec!["delete:2".to_string(), "list".to_string()]
        );
        assert_eq!(console.store().read(|state| state.users().len()), 1);
    }

    #[tokio::test]
    async fn failed_mutation_keeps_dialog_open_and_list_unchanged() {
        let console = logged_in(vec![user(1, "anna")]).await;
        console.api().fail("change_password");
        console.store().update(|state| {
            assert!(state.open_change_password(1));
            state.set_new_password("neu".to_string());
        });

        console.submit_password().await;

        assert_eq!(console.api().count("list"), 0);
        console.store().read(|state| {
            assert_eq!(
                state.password_form().map(|form| form.new_password.as_str()),
                Some("neu")
            );
            assert_eq!(state.users().len(), 1);
            assert_eq!(
                state.error().map(|notice| notice.message.as_str()),
                Some("change_password abgelehnt")
            );
        });
    }

    #[tokio::test]
    async fn failed_create_keeps_draft() {
        let console = logged_in(vec![user(1, "anna")]).await;
        console.api().fail("create");
        console.store().update(|state| {
            state.open_create();
            state.set_user_field(UserField::Username, "ben".to_string());
        });

        console.submit_user_form().await;

        assert_eq!(console.api().calls(), vec!["create:ben".to_string()]);
        console.store().read(|state| {
            assert_eq!(
                state.user_form().map(|form| form.draft.username.as_str()),
                Some("ben")
            );
            assert_eq!(state.users().len(), 1);
        });
    }

    #[tokio::test]
    async fn activation_and_reset_follow_mutation_pattern() {
        let console = logged_in(vec![user(1, "anna")]).await;
        console.set_active(1, false).await;
        console.set_active(1, true).await;
        console.reset_wrong_password(1).await;

        assert_eq!(
            console.api().calls(),
            vec![
                "deactivate:1".to_string(),
                "list".to_string(),
                "activate:1".to_string(),
                "list".to_string(),
                "reset_wrong_password:1".to_string(),
                "list".to_string(),
            ]
        );
        assert_eq!(
            console
                .store()
                .read(|state| state.success().map(|notice| notice.message.clone())),
            Some(WRONG_PASSWORD_RESET.to_string())
        );
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_list() {
        let console = logged_in(vec![user(1, "anna")]).await;
        console.api().fail("list");
        console.reload().await;

        console.store().read(|state| {
            assert_eq!(state.users().len(), 1);
            assert!(state.error().is_some_and(|notice| !notice.expires));
        });
    }

    #[tokio::test]
    async fn logout_clears_list_and_credentials() {
        let console = logged_in(vec![user(1, "anna")]).await;
        console.logout();

        console.store().read(|state| {
            assert_eq!(state.mode(), Mode::Unauthenticated);
            assert!(state.users().is_empty());
            assert!(state.credentials().is_none());
        });

        console.reload().await;
        console.set_active(1, false).await;
        assert!(console.api().calls().is_empty());
    }
}
