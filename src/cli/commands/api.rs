use clap::{Arg, ArgAction, Command};

pub const ARG_URL: &str = "url";
pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_JSON: &str = "json";

/// Connection and output flags shared by every API subcommand.
#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_URL)
                .long("url")
                .help("Base URL of the user API, example: https://host.tld/api/users")
                .env("USERMGMT_API_URL")
                .default_value(user_api::DEFAULT_BASE_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_USERNAME)
                .short('u')
                .long("username")
                .help("Username sent with HTTP Basic auth")
                .env("USERMGMT_USERNAME")
                .global(true),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long("password")
                .help("Password sent with HTTP Basic auth")
                .env("USERMGMT_PASSWORD")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_JSON)
                .long("json")
                .help("Print raw JSON instead of a table")
                .global(true)
                .action(ArgAction::SetTrue),
        )
}
