use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use user_api::{Credentials, UserClient};

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub username: String,
    pub password: SecretString,
    pub json: bool,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            username: String::new(),
            password: SecretString::default(),
            json: false,
        }
    }

    pub fn set_credentials(&mut self, username: String, password: SecretString) {
        self.username = username;
        self.password = password;
    }

    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.expose_secret())
    }

    /// Build the API client for `api_url`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built or the URL is invalid.
    pub fn client(&self) -> Result<UserClient> {
        let http = reqwest::Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        UserClient::with_http_client(http, &self.api_url)
            .with_context(|| format!("Invalid API URL: {}", self.api_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new("http://localhost:8080/api/users".to_string());
        assert_eq!(args.api_url, "http://localhost:8080/api/users");
        assert_eq!(args.password.expose_secret(), "");
        assert!(!args.json);
    }

    #[test]
    fn credentials_carry_username_and_password() {
        let mut args = GlobalArgs::new("http://localhost:8080/api/users".to_string());
        args.set_credentials("superadmin".to_string(), SecretString::from("admin123"));

        let credentials = args.credentials();
        assert_eq!(credentials.username(), "superadmin");
        assert_eq!(credentials.password().expose_secret(), "admin123");
        assert!(!format!("{args:?}").contains("admin123"));
    }

    #[test]
    fn client_rejects_invalid_url() {
        let args = GlobalArgs::new("ftp://example.com/users".to_string());
        assert!(args.client().is_err());
    }
}
