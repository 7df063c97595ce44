pub mod api;
pub mod logging;
pub mod serve;
pub mod users;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("usermgmt")
        .about("User management console and CLI")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommands(users::subcommands())
        .subcommand(serve::subcommand());

    let command = api::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "usermgmt");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("User management console and CLI".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
        command.debug_assert();
    }

    #[test]
    fn test_globals_after_subcommand() {
        temp_env::with_vars(
            [
                ("USERMGMT_API_URL", None::<&str>),
                ("USERMGMT_USERNAME", None),
                ("USERMGMT_PASSWORD", None),
            ],
            || {
                let matches = new().get_matches_from(vec![
                    "usermgmt",
                    "get",
                    "7",
                    "--url",
                    "https://api.tld/api/users",
                    "--username",
                    "superadmin",
                    "--password",
                    "admin123",
                    "--json",
                ]);

                assert_eq!(
                    matches.get_one::<String>(api::ARG_URL).cloned(),
                    Some("https://api.tld/api/users".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>(api::ARG_USERNAME).cloned(),
                    Some("superadmin".to_string())
                );
                assert!(matches.get_flag(api::ARG_JSON));

                let (name, sub) = matches.subcommand().unwrap();
                assert_eq!(name, users::CMD_GET);
                assert_eq!(sub.get_one::<i64>(users::ARG_ID).copied(), Some(7));
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("USERMGMT_API_URL", Some("https://api.tld/api/users")),
                ("USERMGMT_USERNAME", Some("superadmin")),
                ("USERMGMT_PASSWORD", Some("admin123")),
                ("USERMGMT_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["usermgmt", "list"]);
                assert_eq!(
                    matches.get_one::<String>(api::ARG_URL).cloned(),
                    Some("https://api.tld/api/users".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>(api::ARG_PASSWORD).cloned(),
                    Some("admin123".to_string())
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_default_url() {
        temp_env::with_vars([("USERMGMT_API_URL", None::<&str>)], || {
            let matches = new().get_matches_from(vec!["usermgmt", "list"]);
            assert_eq!(
                matches.get_one::<String>(api::ARG_URL).cloned(),
                Some(user_api::DEFAULT_BASE_URL.to_string())
            );
        });
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("USERMGMT_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["usermgmt", "list"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5_usize {
            temp_env::with_vars([("USERMGMT_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["usermgmt".to_string(), "list".to_string()];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_serve_env() {
        temp_env::with_vars(
            [
                ("USERMGMT_PORT", Some("8443")),
                ("USERMGMT_DIST", Some("/srv/console")),
                ("USERMGMT_PUBLIC_API_URL", Some("https://api.tld/api/users")),
            ],
            || {
                let matches = new().get_matches_from(vec!["usermgmt", "serve"]);
                let sub = matches.subcommand_matches(serve::CMD_SERVE).unwrap();
                assert_eq!(sub.get_one::<u16>(serve::ARG_PORT).copied(), Some(8443));
                assert_eq!(
                    sub.get_one::<String>(serve::ARG_DIST).cloned(),
                    Some("/srv/console".to_string())
                );
                assert_eq!(
                    sub.get_one::<String>(serve::ARG_PUBLIC_API_URL).cloned(),
                    Some("https://api.tld/api/users".to_string())
                );
            },
        );
    }

    #[test]
    fn test_serve_defaults() {
        temp_env::with_vars(
            [
                ("USERMGMT_PORT", None::<&str>),
                ("USERMGMT_DIST", None),
                ("USERMGMT_PUBLIC_API_URL", None),
            ],
            || {
                let matches = new().get_matches_from(vec!["usermgmt", "serve"]);
                let sub = matches.subcommand_matches(serve::CMD_SERVE).unwrap();
                assert_eq!(sub.get_one::<u16>(serve::ARG_PORT).copied(), Some(3000));
                assert_eq!(
                    sub.get_one::<String>(serve::ARG_DIST).cloned(),
                    Some("apps/web/dist".to_string())
                );
                assert_eq!(sub.get_one::<String>(serve::ARG_PUBLIC_API_URL), None);
            },
        );
    }

    #[test]
    fn test_invalid_id_is_rejected() {
        let result = new().try_get_matches_from(vec!["usermgmt", "delete", "abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_change_password_requires_new_password() {
        let result = new().try_get_matches_from(vec!["usermgmt", "change-password", "3"]);
        assert!(result.is_err());
    }
}
