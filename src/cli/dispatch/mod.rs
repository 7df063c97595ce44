//! Maps parsed command-line arguments to an [`Action`].

use crate::cli::{
    actions::{
        serve,
        users::{self, ProfileChanges, UserCommand},
        Action,
    },
    commands::{api, serve as serve_args, users as user_args},
    globals::GlobalArgs,
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;
use std::path::PathBuf;
use user_api::UserId;

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let api_url = matches
        .get_one::<String>(api::ARG_URL)
        .cloned()
        .context("missing required argument: --url")?;

    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| anyhow!("missing subcommand, see --help"))?;

    if name == serve_args::CMD_SERVE {
        return Ok(Action::Serve(serve::Args {
            port: sub
                .get_one::<u16>(serve_args::ARG_PORT)
                .copied()
                .unwrap_or(3000),
            dist: sub
                .get_one::<String>(serve_args::ARG_DIST)
                .map_or_else(|| PathBuf::from("apps/web/dist"), PathBuf::from),
            api_url: sub
                .get_one::<String>(serve_args::ARG_PUBLIC_API_URL)
                .cloned()
                .unwrap_or(api_url),
        }));
    }

    let username = matches
        .get_one::<String>(api::ARG_USERNAME)
        .cloned()
        .context("missing required argument: --username (or USERMGMT_USERNAME)")?;
    let password = matches
        .get_one::<String>(api::ARG_PASSWORD)
        .cloned()
        .context("missing required argument: --password (or USERMGMT_PASSWORD)")?;

    let mut globals = GlobalArgs::new(api_url);
    globals.set_credentials(username, SecretString::from(password));
    globals.json = matches.get_flag(api::ARG_JSON);

    let command = user_command(name, sub)?;

    Ok(Action::Users(users::Args { globals, command }))
}

fn user_command(name: &str, sub: &ArgMatches) -> Result<UserCommand> {
    let command = match name {
        user_args::CMD_LIST => UserCommand::List,
        user_args::CMD_GET => UserCommand::Get { id: id(sub)? },
        user_args::CMD_LOOKUP => UserCommand::Lookup {
            username: required(sub, user_args::ARG_LOGIN)?,
        },
        user_args::CMD_BY_ROLE => UserCommand::ByRole {
            role: required(sub, user_args::ARG_ROLE)?,
        },
        user_args::CMD_CREATE => UserCommand::Create {
            username: required(sub, user_args::ARG_LOGIN)?,
            password: SecretString::from(required(sub, user_args::ARG_INITIAL_PASSWORD)?),
            profile: profile(sub),
        },
        user_args::CMD_UPDATE => UserCommand::Update {
            id: id(sub)?,
            profile: profile(sub),
        },
        user_args::CMD_DELETE => UserCommand::Delete {
            id: id(sub)?,
            yes: sub.get_flag(user_args::ARG_YES),
        },
        user_args::CMD_ACTIVATE => UserCommand::Activate { id: id(sub)? },
        user_args::CMD_DEACTIVATE => UserCommand::Deactivate { id: id(sub)? },
        user_args::CMD_CHANGE_PASSWORD => UserCommand::ChangePassword {
            id: id(sub)?,
            new_password: SecretString::from(required(sub, user_args::ARG_NEW_PASSWORD)?),
        },
        user_args::CMD_RESET_WRONG_PASSWORD => UserCommand::ResetWrongPassword { id: id(sub)? },
        other => return Err(anyhow!("unknown subcommand: {other}")),
    };
    Ok(command)
}

fn id(sub: &ArgMatches) -> Result<UserId> {
    sub.get_one::<UserId>(user_args::ARG_ID)
        .copied()
        .context("missing required argument: <id>")
}

fn required(sub: &ArgMatches, arg: &str) -> Result<String> {
    sub.get_one::<String>(arg)
        .cloned()
        .with_context(|| format!("missing required argument: {arg}"))
}

fn profile(sub: &ArgMatches) -> ProfileChanges {
    let text = |arg: &str| sub.get_one::<String>(arg).cloned();
    ProfileChanges {
        first_name: text(user_args::ARG_FIRST_NAME),
        last_name: text(user_args::ARG_LAST_NAME),
        mail: text(user_args::ARG_MAIL),
        phone: text(user_args::ARG_PHONE),
        user_uid: sub.get_one::<uuid::Uuid>(user_args::ARG_UID).copied(),
    }
}
