use std::process::Command;

fn main() {
    // get the git short rev so we can embed it in the web page.
    // fall back to the crate version when building outside a checkout
    let version = Command::new("git")
        .args(&["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|rev| rev.trim().to_string())
        .filter(|rev| !rev.is_empty())
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    // this is how you pass an env var to Cargo at build time:
    // https://doc.rust-lang.org/cargo/reference/build-scripts.html#rustc-env
    println!("cargo:rustc-env={}={}", "APP_VERSION", version);

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");

    // the model settings are baked in with option_env!
    for var in &["GEMINI_API_KEY", "GEMINI_MODEL", "GEMINI_ENDPOINT"] {
        println!("cargo:rerun-if-env-changed={}", var);
    }
}
