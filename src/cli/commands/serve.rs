use clap::{Arg, Command};

pub const CMD_SERVE: &str = "serve";
pub const ARG_PORT: &str = "port";
pub const ARG_DIST: &str = "dist";
pub const ARG_PUBLIC_API_URL: &str = "api-url";

#[must_use]
pub fn subcommand() -> Command {
    Command::new(CMD_SERVE)
        .about("Serve the web console")
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("3000")
                .env("USERMGMT_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_DIST)
                .long("dist")
                .help("Directory containing the built web console")
                .default_value("apps/web/dist")
                .env("USERMGMT_DIST"),
        )
        .arg(
            Arg::new(ARG_PUBLIC_API_URL)
                .long("api-url")
                .help("API base URL handed to browsers (default: --url)")
                .env("USERMGMT_PUBLIC_API_URL"),
        )
}
