use std::process::Command;

#[test]
fn test_version_flag() {
    let binary_path = env!("CARGO_BIN_EXE_usagemon");

    let output = Command::new(binary_path)
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success(), "Version flag should exit with code 0");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), format!("usagemon {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_flag_exits_with_usage() {
    let output = Command::new(env!("CARGO_BIN_EXE_usagemon"))
        .arg("--bogus")
        .output()
        .expect("Failed to execute binary");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--bogus"));
    assert!(stderr.contains("USAGE"));
}
