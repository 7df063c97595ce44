use std::fmt;
use thiserror::Error;

/// The REST action a request belongs to; selects the fallback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListUsers,
    GetUser,
    GetUserByUsername,
    CreateUser,
    UpdateUser,
    DeleteUser,
    ActivateUser,
    DeactivateUser,
    ChangePassword,
    ResetWrongPassword,
    ListUsersByRole,
}

impl Operation {
    /// Localized message shown when the server gives no usable error message.
    #[must_use]
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::ListUsers | Self::ListUsersByRole => "Fehler beim Abrufen der Benutzer",
            Self::GetUser | Self::GetUserByUsername => "Benutzer nicht gefunden",
            Self::CreateUser => "Fehler beim Erstellen des Benutzers",
            Self::UpdateUser => "Fehler beim Aktualisieren des Benutzers",
            Self::DeleteUser => "Fehler beim Löschen des Benutzers",
            Self::ActivateUser => "Fehler beim Aktivieren des Benutzers",
            Self::DeactivateUser => "Fehler beim Deaktivieren des Benutzers",
            Self::ChangePassword => "Fehler beim Ändern des Passworts",
            Self::ResetWrongPassword => "Fehler beim Zurücksetzen der Fehlversuche",
        }
    }

    /// Short machine name used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListUsers => "list_users",
            Self::GetUser => "get_user",
            Self::GetUserByUsername => "get_user_by_username",
            Self::CreateUser => "create_user",
            Self::UpdateUser => "update_user",
            Self::DeleteUser => "delete_user",
            Self::ActivateUser => "activate_user",
            Self::DeactivateUser => "deactivate_user",
            Self::ChangePassword => "change_password",
            Self::ResetWrongPassword => "reset_wrong_password",
            Self::ListUsersByRole => "list_users_by_role",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Failure of a single API call. `Display` renders the text shown to operators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a `{ "message": ... }` payload.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// No server message was available (transport error, empty or non-JSON body).
    #[error("{}", operation.fallback_message())]
    Fallback {
        operation: Operation,
        status: Option<u16>,
    },
    #[error("Ungültige Konfiguration: {0}")]
    Config(String),
}

impl ApiError {
    #[must_use]
    pub const fn fallback(operation: Operation, status: Option<u16>) -> Self {
        Self::Fallback { operation, status }
    }

    /// HTTP status of the failed response, if one was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Fallback { status, .. } => *status,
            Self::Config(_) => None,
        }
    }

    /// Whether the message came from the server rather than a local fallback.
    #[must_use]
    pub const fn has_server_message(&self) -> bool {
        matches!(self, Self::Server { .. })
    }
}
