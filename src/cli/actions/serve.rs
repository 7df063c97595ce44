use crate::usermgmt::{self, WebConfig};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dist: PathBuf,
    pub api_url: String,
}

/// Execute the serve action.
/// # Errors
/// Returns an error if the API URL is invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let api_base_url = user_api::client::parse_base_url(&args.api_url)
        .with_context(|| format!("Invalid API URL: {}", args.api_url))?;

    if !args.dist.join("index.html").is_file() {
        warn!(
            "No index.html in {}, build the console with `trunk build --release` in apps/web",
            args.dist.display()
        );
    }

    log_startup_args(&args);

    let config = WebConfig {
        api_base_url: api_base_url.to_string(),
    };
    usermgmt::new(args.port, args.dist, config).await
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("dist", args.dist.display().to_string()),
        ("api_url", args.api_url.clone()),
    ];
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!(
        "{} {} - {}\n\nStartup configuration:",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        short_commit(crate::GIT_COMMIT_HASH)
    );
    for (key, value) in &entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn short_commit(hash: &str) -> String {
    let trimmed = hash.trim();
    if trimmed.len() > 7 {
        trimmed[..7].to_string()
    } else {
        trimmed.to_string()
    }
}
