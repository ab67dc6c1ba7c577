use std::process::Command;

// Exposes the build's short commit hash as GIT_HASH for the /status route.
// An already set GIT_HASH wins, for builds outside a git checkout.
fn main() {
    println!("cargo:rerun-if-env-changed=GIT_HASH");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");

    let git_hash = std::env::var("GIT_HASH").ok().or_else(|| {
        Command::new("git")
            .args(["rev-parse", "--short", "HEAD"])
            .output()
            .ok()
            .filter(|o| o.status.success())
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .map(|s| s.trim().to_string())
    });

    println!(
        "cargo:rustc-env=GIT_HASH={}",
        git_hash.unwrap_or_else(|| "unknown".to_string())
    );
}
