//! Build script for plotsort-web
//!
//! Exposes build identification to the binary (logged at startup):
//! - `PLOTSORT_GIT_HASH`: short commit hash, or "unknown" outside a checkout
//! - `PLOTSORT_BUILD_TIME`: UTC build timestamp
//! - `PLOTSORT_BUILD_PROFILE`: cargo profile
//!
//! Emits no rerun directives, so cargo runs it on every build and the hash
//! and time never go stale.

use std::process::Command;

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    Some(hash.trim().to_string())
}

fn main() {
    let git_hash = git_short_hash().unwrap_or_else(|| "unknown".to_string());
    let build_time = chrono::Utc::now().format("%Y-%m-%d %H:%M:%SZ");
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=PLOTSORT_GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=PLOTSORT_BUILD_TIME={}", build_time);
    println!("cargo:rustc-env=PLOTSORT_BUILD_PROFILE={}", profile);
}
