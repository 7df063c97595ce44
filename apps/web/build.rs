use std::{env, process::Command};

const SHA_ENV: &str = "USERMGMT_WEB_GIT_SHA";

fn git_head() -> Option<String> {
    let output = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let sha = String::from_utf8(output.stdout).ok()?;
    let sha = sha.trim();
    (!sha.is_empty()).then(|| sha.to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
    println!("cargo:rerun-if-env-changed={SHA_ENV}");
    println!("cargo:rerun-if-env-changed=USERMGMT_API_BASE_URL");

    // Release builds from a source tarball pass the commit in explicitly.
    let sha = env::var(SHA_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env={SHA_ENV}={sha}");
}
