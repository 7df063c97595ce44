use crate::cli::globals::GlobalArgs;
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use dialoguer::Confirm;
use std::io::{self, Write};
use tracing::{debug, info};
use user_api::{CreateUserRequest, Credentials, UpdateUserRequest, User, UserApi, UserId};
use uuid::Uuid;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub command: UserCommand,
}

/// Optional profile fields given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mail: Option<String>,
    pub phone: Option<String>,
    pub user_uid: Option<Uuid>,
}

impl ProfileChanges {
    /// Overlay the given fields on the current record; the rest is kept.
    #[must_use]
    pub fn apply(&self, current: &User) -> UpdateUserRequest {
        let pick = |change: &Option<String>, existing: &Option<String>| {
            change.clone().or_else(|| existing.clone()).unwrap_or_default()
        };
        UpdateUserRequest {
            mail: pick(&self.mail, &current.mail),
            first_name: pick(&self.first_name, &current.first_name),
            last_name: pick(&self.last_name, &current.last_name),
            phone: pick(&self.phone, &current.phone),
            user_uid: self.user_uid.or(current.user_uid),
        }
    }

    fn into_create_request(self, username: String, password: &SecretString) -> CreateUserRequest {
        CreateUserRequest {
            username,
            password: password.expose_secret().to_string(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            mail: self.mail.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            user_uid: self.user_uid,
        }
    }
}

#[derive(Debug)]
pub enum UserCommand {
    List,
    Get {
        id: UserId,
    },
    Lookup {
        username: String,
    },
    ByRole {
        role: String,
    },
    Create {
        username: String,
        password: SecretString,
        profile: ProfileChanges,
    },
    Update {
        id: UserId,
        profile: ProfileChanges,
    },
    Delete {
        id: UserId,
        yes: bool,
    },
    Activate {
        id: UserId,
    },
    Deactivate {
        id: UserId,
    },
    ChangePassword {
        id: UserId,
        new_password: SecretString,
    },
    ResetWrongPassword {
        id: UserId,
    },
}

/// Execute a user API command against `--url` and print the result on stdout.
/// # Errors
/// Returns the translated API error, or an I/O error while printing.
pub async fn execute(args: Args) -> Result<()> {
    let client = args.globals.client()?;
    let credentials = args.globals.credentials();
    debug!(url = %client.base_url(), username = credentials.username(), "user command");

    let mut out = io::stdout();
    run(
        &client,
        &credentials,
        args.command,
        args.globals.json,
        &mut out,
        confirm_on_terminal,
    )
    .await
}

/// Run `command` with `api`, writing the output to `out`.
///
/// `confirm` is asked before a delete without `--yes`; a refusal sends nothing.
/// # Errors
/// Returns the translated API error, or an I/O error while printing.
pub async fn run<A, W, C>(
    api: &A,
    credentials: &Credentials,
    command: UserCommand,
    json: bool,
    out: &mut W,
    confirm: C,
) -> Result<()>
where
    A: UserApi,
    W: Write,
    C: FnOnce(UserId) -> Result<bool>,
{
    match command {
        UserCommand::List => {
            let users = api.list_users(credentials).await?;
            print_users(out, &users, json)?;
        }
        UserCommand::Get { id } => {
            let user = api.get_user(credentials, id).await?;
            print_user(out, &user, json)?;
        }
        UserCommand::Lookup { username } => {
            let user = api.get_user_by_username(credentials, &username).await?;
            print_user(out, &user, json)?;
        }
        UserCommand::ByRole { role } => {
            let users = api.list_users_by_role(credentials, &role).await?;
            print_users(out, &users, json)?;
        }
        UserCommand::Create {
            username,
            password,
            profile,
        } => {
            let request = profile.into_create_request(username, &password);
            let user = api.create_user(credentials, &request).await?;
            info!(user_id = user.user_id, "user created");
            if json {
                print_json(out, &user)?;
            } else {
                writeln!(out, "User {} created with id {}", user.username, user.user_id)?;
            }
        }
        UserCommand::Update { id, profile } => {
            let current = api.get_user(credentials, id).await?;
            let request = profile.apply(&current);
            let user = api.update_user(credentials, id, &request).await?;
            info!(user_id = id, "user updated");
            if json {
                print_json(out, &user)?;
            } else {
                writeln!(out, "User {id} updated")?;
            }
        }
        UserCommand::Delete { id, yes } => {
            if !yes && !confirm(id)? {
                writeln!(out, "Aborted, user {id} was not deleted")?;
                return Ok(());
            }
            api.delete_user(credentials, id).await?;
            info!(user_id = id, "user deleted");
            if !json {
                writeln!(out, "User {id} deleted")?;
            }
        }
        UserCommand::Activate { id } => {
            let user = api.activate_user(credentials, id).await?;
            print_toggled(out, id, user.as_ref(), "activated", json)?;
        }
        UserCommand::Deactivate { id } => {
            let user = api.deactivate_user(credentials, id).await?;
            print_toggled(out, id, user.as_ref(), "deactivated", json)?;
        }
        UserCommand::ChangePassword { id, new_password } => {
            api.change_password(credentials, id, new_password.expose_secret())
                .await?;
            info!(user_id = id, "password changed");
            if !json {
                writeln!(out, "Password of user {id} changed")?;
            }
        }
        UserCommand::ResetWrongPassword { id } => {
            api.reset_wrong_password(credentials, id).await?;
            if !json {
                writeln!(out, "Failed login counter of user {id} reset")?;
            }
        }
    }

    Ok(())
}

fn delete_prompt(id: UserId) -> String {
    format!("Delete user {id}?")
}

fn confirm_on_terminal(id: UserId) -> Result<bool> {
    Confirm::new()
        .with_prompt(delete_prompt(id))
        .default(false)
        .interact()
        .context("prompt failed")
}

fn print_json<W: Write, T: serde::Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn print_toggled<W: Write>(
    out: &mut W,
    id: UserId,
    user: Option<&User>,
    verb: &str,
    json: bool,
) -> Result<()> {
    info!(user_id = id, "user {verb}");
    match (json, user) {
        (true, Some(user)) => print_json(out, user),
        (true, None) => Ok(()),
        (false, _) => {
            writeln!(out, "User {id} {verb}")?;
            Ok(())
        }
    }
}

fn print_user<W: Write>(out: &mut W, user: &User, json: bool) -> Result<()> {
    if json {
        return print_json(out, user);
    }

    let uid = user.user_uid.map(|uid| uid.to_string());
    let wrong_password = user.wrong_password.map(|count| count.to_string());
    let rows = [
        ("id", Some(user.user_id.to_string())),
        ("username", Some(user.username.clone())),
        ("name", Some(user.display_name())),
        ("mail", user.mail.clone()),
        ("phone", user.phone.clone()),
        ("uid", uid),
        ("wrong password", wrong_password),
        ("active", user.active.map(|active| yes_no(active).to_string())),
    ];
    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, value) in rows {
        let value = value.filter(|value| !value.is_empty());
        writeln!(out, "{key:<width$}  {}", value.as_deref().unwrap_or("-"))?;
    }
    Ok(())
}

fn print_users<W: Write>(out: &mut W, users: &[User], json: bool) -> Result<()> {
    if json {
        return print_json(out, &users);
    }
    if users.is_empty() {
        writeln!(out, "No users found")?;
        return Ok(());
    }
    out.write_all(render_table(users).as_bytes())?;
    Ok(())
}

const fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => "-".to_string(),
    }
}

fn render_table(users: &[User]) -> String {
    const HEADER: [&str; 7] = ["ID", "USERNAME", "NAME", "MAIL", "PHONE", "WRONG PW", "ACTIVE"];

    let rows: Vec<[String; 7]> = users
        .iter()
        .map(|user| {
            [
                user.user_id.to_string(),
                user.username.clone(),
                or_dash(Some(&user.display_name())),
                or_dash(user.mail.as_deref()),
                or_dash(user.phone.as_deref()),
                user.wrong_password
                    .map_or_else(|| "-".to_string(), |count| count.to_string()),
                user.active
                    .map_or_else(|| "-".to_string(), |active| yes_no(active).to_string()),
            ]
        })
        .collect();

    let mut widths = HEADER.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut table = String::new();
    let mut push_line = |cells: Vec<&str>| {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        table.push_str(line.trim_end());
        table.push('\n');
    };
    push_line(HEADER.to_vec());
    for row in &rows {
        push_line(row.iter().map(String::as_str).collect());
    }
    table
}
