#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;
use std::{cell::RefCell, net::TcpListener, rc::Rc};
use user_api::{
    console::{Console, ConsoleState, ConsoleStore, Mode, UserField},
    UserClient,
};
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type HttpConsole = Console<UserClient, Rc<RefCell<ConsoleState>>>;

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn console(server: &MockServer) -> HttpConsole {
    let client = UserClient::new(&format!("{}/api/users", server.uri())).unwrap();
    let state = Rc::new(RefCell::new(ConsoleState::new()));
    state.update(|state| {
        state.login.username = "superadmin".to_string();
        state.login.password = "admin123".to_string();
    });
    Console::new(client, state)
}

async fn mount_list(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(basic_auth("superadmin", "admin123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"userId": 1, "username": "anna", "mail": "anna@example.com"},
            {"userId": 2, "username": "ben", "mail": "ben@example.com"}
        ])))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_fetches_list_once() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_list(&server, 1).await;

    let console = console(&server);
    console.login().await;

    console.store().read(|state| {
        assert_eq!(state.mode(), Mode::Authenticated);
        assert_eq!(state.users().len(), 2);
    });
}

#[tokio::test]
async fn rejected_login_reports_server_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Ungültige Anmeldedaten"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let console = console(&server);
    console.login().await;

    console.store().read(|state| {
        assert_eq!(state.mode(), Mode::Unauthenticated);
        assert_eq!(
            state.error().map(|notice| notice.message.as_str()),
            Some("Login fehlgeschlagen: Ungültige Anmeldedaten")
        );
    });
}

#[tokio::test]
async fn create_then_refresh_over_http() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_list(&server, 2).await;
    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"userId": 3, "username": "carla"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let console = console(&server);
    console.login().await;
    console.store().update(|state| {
        state.open_create();
        state.set_user_field(UserField::Username, "carla".to_string());
        state.set_user_field(UserField::Password, "geheim".to_string());
        state.set_user_field(UserField::Mail, "carla@example.com".to_string());
    });
    console.submit_user_form().await;

    assert!(console.store().read(|state| state.dialog().is_none()));
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_list(&server, 1).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let console = console(&server);
    console.login().await;
    console.delete_user(2, |_| false).await;

    assert_eq!(console.store().read(|state| state.users().len()), 2);
}

#[tokio::test]
async fn failed_update_keeps_dialog() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_list(&server, 1).await;
    Mock::given(method("PUT"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let console = console(&server);
    console.login().await;
    console.store().update(|state| {
        assert!(state.open_edit(1));
    });
    console.submit_user_form().await;

    console.store().read(|state| {
        assert!(state.user_form().is_some());
        assert_eq!(state.users().len(), 2);
        assert_eq!(
            state.error().map(|notice| notice.message.as_str()),
            Some("Fehler beim Aktualisieren des Benutzers")
        );
    });
}
