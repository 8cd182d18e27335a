use placecodec::{Direction, ErrorPolicy};
use placecodec_cli::{ConvertOptions, InputFormat, run_convert_command};
use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn placecodec_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("placecodec"))
}

#[test]
fn test_convert_single_value_to_android() {
    let output = placecodec_cmd()
        .args(["convert", "-d", "to-android", "--value", "%.0f%@ (apparent: %.0f)"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "%1$.0f%2$s (apparent: %3$.0f)\n"
    );
}

#[test]
fn test_convert_single_value_mixed_numbering_fails() {
    let output = placecodec_cmd()
        .args(["convert", "-d", "android-out", "--value", "some %d second %2$f"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("numbered and non-numbered"), "{}", stderr);
    assert!(stderr.contains("some %d second %2$f"), "{}", stderr);
}

#[test]
fn test_convert_single_value_with_newline_stays_one_value() {
    let output = placecodec_cmd()
        .args(["convert", "-d", "to-android", "--value", "Dear %@,\nyou owe %d"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Dear %1$s,\nyou owe %2$d\n"
    );

    let output = placecodec_cmd()
        .args(["convert", "-d", "to-android", "--value", "first %d\nsecond %2$d"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("numbered and non-numbered"));
}

#[test]
fn test_convert_lines_file_to_flash() {
    let temp_dir = TempDir::new().unwrap();
    let input_file = temp_dir.path().join("values.txt");
    let output_file = temp_dir.path().join("values.flash.txt");
    fs::write(&input_file, "Hello %@!\n%1$d of %2$d\nno placeholders\n").unwrap();

    let output = placecodec_cmd()
        .args([
            "convert",
            "-d",
            "to-flash",
            "-i",
            input_file.to_str().unwrap(),
            "-o",
            output_file.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        fs::read_to_string(&output_file).unwrap(),
        "Hello {0}!\n{0} of {1}\nno placeholders\n"
    );
}

#[test]
fn test_convert_json_from_stdin_with_skip() {
    let mut child = placecodec_cmd()
        .args(["convert", "-d", "to-android", "--format", "json", "--on-error", "skip"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"{"greeting": "Hi %@, 100% done", "broken": "%d %1$d"}"#)
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["greeting"], "Hi %s, 100%% done");
    assert!(parsed.get("broken").is_none());
    assert!(String::from_utf8_lossy(&output.stderr).contains("broken"));
}

#[test]
fn test_convert_from_flash_and_android() {
    let output = placecodec_cmd()
        .args(["convert", "-d", "flash-in", "--value", "{0} and {42}"])
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "%@ and %@\n");

    let output = placecodec_cmd()
        .args(["convert", "-d", "from-android", "--value", "%1$s has 50%%"])
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "%1$@ has 50%%\n");
}

#[test]
fn test_unknown_direction_is_rejected() {
    let output = placecodec_cmd()
        .args(["convert", "-d", "sideways", "--value", "x"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("sideways"));
}

#[test]
fn test_inspect_text_output() {
    let output = placecodec_cmd()
        .args(["inspect", "--value", "If 70% and %@"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Specifiers: 1 (numbered: 0)"), "{}", stdout);
    assert!(stdout.contains("bare-percent"), "{}", stdout);
    assert!(stdout.contains("to-android: If 70%% and %s"), "{}", stdout);
}

#[test]
fn test_inspect_json_output() {
    let output = placecodec_cmd()
        .args(["inspect", "--value", "%s", "--convention", "printf", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["tokens"][0]["specifier"]["conversion"], "s");
}

#[test]
fn test_run_convert_command_keep_writes_original() {
    let temp_dir = TempDir::new().unwrap();
    let input_file = temp_dir.path().join("in.txt");
    let output_file = temp_dir.path().join("out.txt");
    fs::write(&input_file, "%d and %2$d\n%@ and %@\n").unwrap();

    let mut options = ConvertOptions::new(Direction::ToAndroid);
    options.input = Some(input_file.to_string_lossy().to_string());
    options.output = Some(output_file.to_string_lossy().to_string());
    options.format = InputFormat::Lines;
    options.on_error = ErrorPolicy::Keep;
    run_convert_command(options).unwrap();

    assert_eq!(
        fs::read_to_string(&output_file).unwrap(),
        "%d and %2$d\n%1$s and %2$s\n"
    );
}

#[test]
fn test_run_convert_command_missing_input() {
    let mut options = ConvertOptions::new(Direction::FromFlash);
    options.input = Some("/definitely/not/here.txt".to_string());
    let err = run_convert_command(options).unwrap_err();
    assert!(err.contains("Error reading input"));
}
