use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "color-realm"])
        .status()
        .expect("failed to invoke cargo check for color-realm CLI binary");

    assert!(status.success(), "cargo check --bin color-realm should succeed");
}

#[test]
fn cli_help_lists_gameplay_flags() {
    let output = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["run", "--quiet", "--bin", "color-realm", "--", "--help"])
        .output()
        .expect("failed to invoke color-realm --help");

    assert!(output.status.success(), "color-realm --help should succeed");
    let help = String::from_utf8_lossy(&output.stdout);
    for flag in ["--seed", "--puzzles", "--assets", "--vsync", "--log-level"] {
        assert!(help.contains(flag), "help text should mention {flag}");
    }
}
