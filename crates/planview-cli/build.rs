use std::process::Command;

fn short_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

fn main() {
    println!("cargo::rerun-if-changed=../../.git/HEAD");
    println!("cargo::rerun-if-env-changed=PLANVIEW_COMMIT");

    let commit = std::env::var("PLANVIEW_COMMIT")
        .ok()
        .filter(|s| !s.is_empty())
        .or_else(short_commit)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo::rustc-env=PLANVIEW_COMMIT={}", commit);
}
