//! Subcommands mapping one-to-one onto the `/api/users` endpoints.

use clap::{Arg, ArgAction, Command};

pub const CMD_LIST: &str = "list";
pub const CMD_GET: &str = "get";
pub const CMD_LOOKUP: &str = "lookup";
pub const CMD_BY_ROLE: &str = "by-role";
pub const CMD_CREATE: &str = "create";
pub const CMD_UPDATE: &str = "update";
pub const CMD_DELETE: &str = "delete";
pub const CMD_ACTIVATE: &str = "activate";
pub const CMD_DEACTIVATE: &str = "deactivate";
pub const CMD_CHANGE_PASSWORD: &str = "change-password";
pub const CMD_RESET_WRONG_PASSWORD: &str = "reset-wrong-password";

pub const ARG_ID: &str = "id";
pub const ARG_LOGIN: &str = "login";
pub const ARG_ROLE: &str = "role";
pub const ARG_INITIAL_PASSWORD: &str = "initial-password";
pub const ARG_NEW_PASSWORD: &str = "new-password";
pub const ARG_FIRST_NAME: &str = "first-name";
pub const ARG_LAST_NAME: &str = "last-name";
pub const ARG_MAIL: &str = "mail";
pub const ARG_PHONE: &str = "phone";
pub const ARG_UID: &str = "uid";
pub const ARG_YES: &str = "yes";

fn id_arg() -> Arg {
    Arg::new(ARG_ID)
        .help("Numeric user id")
        .required(true)
        .value_parser(clap::value_parser!(i64))
}

fn profile_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_FIRST_NAME)
                .long("first-name")
                .help("First name"),
        )
        .arg(Arg::new(ARG_LAST_NAME).long("last-name").help("Last name"))
        .arg(Arg::new(ARG_MAIL).long("mail").help("E-mail address"))
        .arg(Arg::new(ARG_PHONE).long("phone").help("Phone number"))
        .arg(
            Arg::new(ARG_UID)
                .long("uid")
                .help("External user UID")
                .value_parser(clap::value_parser!(uuid::Uuid)),
        )
}

#[must_use]
pub fn subcommands() -> Vec<Command> {
    vec![
        Command::new(CMD_LIST).about("List all users"),
        Command::new(CMD_GET)
            .about("Show a single user")
            .arg(id_arg()),
        Command::new(CMD_LOOKUP)
            .about("Show a user by username")
            .arg(
                Arg::new(ARG_LOGIN)
                    .help("Username to look up")
                    .required(true),
            ),
        Command::new(CMD_BY_ROLE)
            .about("List users holding a role")
            .arg(Arg::new(ARG_ROLE).help("Role name").required(true)),
        profile_args(
            Command::new(CMD_CREATE)
                .about("Create a user")
                .arg(
                    Arg::new(ARG_LOGIN)
                        .help("Username of the new account")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_INITIAL_PASSWORD)
                        .long("initial-password")
                        .help("Password of the new account")
                        .required(true),
                ),
        ),
        profile_args(
            Command::new(CMD_UPDATE)
                .about("Update profile fields; omitted fields keep their current value")
                .arg(id_arg()),
        ),
        Command::new(CMD_DELETE)
            .about("Delete a user")
            .arg(id_arg())
            .arg(
                Arg::new(ARG_YES)
                    .short('y')
                    .long("yes")
                    .help("Skip the confirmation prompt")
                    .action(ArgAction::SetTrue),
            ),
        Command::new(CMD_ACTIVATE)
            .about("Activate a user")
            .arg(id_arg()),
        Command::new(CMD_DEACTIVATE)
            .about("Deactivate a user")
            .arg(id_arg()),
        Command::new(CMD_CHANGE_PASSWORD)
            .about("Set a new password for a user")
            .arg(id_arg())
            .arg(
                Arg::new(ARG_NEW_PASSWORD)
                    .long("new-password")
                    .help("The new password")
                    .required(true),
            ),
        Command::new(CMD_RESET_WRONG_PASSWORD)
            .about("Reset the failed login counter of a user")
            .arg(id_arg()),
    ]
}
