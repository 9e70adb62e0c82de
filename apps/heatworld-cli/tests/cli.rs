use std::io::Write;
use std::process::{Command, Output, Stdio};

const SCENARIO: &str = "HeatWorld v0
3 3 1 0
0 0 0
0 1 0
0 0 0
1 1 1
1 0 1
1 1 1
";

fn heatworld(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_heatworld"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn step_reads_stdin_and_writes_stdout() {
    let out = heatworld(&["step"], SCENARIO.as_bytes());
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let text = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "HeatWorld v0");
    let centre: f32 = lines[3].split_whitespace().nth(1).unwrap().parse().unwrap();
    let expected = 0.975f32 / (0.975 + 0.4);
    assert!((centre - expected).abs() < 1e-6, "centre {centre}");
    assert_eq!(lines[2], "0 0 0");
}

#[test]
fn step_binary_output_reloads() {
    let tmp = tempfile::tempdir().unwrap();
    let bin = tmp.path().join("out.bin");
    let bin_str = bin.to_str().unwrap();

    let out = heatworld(&["step", "0.1", "5", "1", "-o", bin_str], SCENARIO.as_bytes());
    assert!(out.status.success());
    let data = std::fs::read(&bin).unwrap();
    assert!(data.starts_with(b"HeatWorldBinary v0\n"));

    let out = heatworld(&["inspect", "-i", bin_str, "--json"], b"");
    assert!(out.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(summary["width"], 3);
    let t = summary["time"].as_f64().unwrap();
    assert!((t - 0.5).abs() < 1e-6);
}

#[test]
fn make_then_render() {
    let tmp = tempfile::tempdir().unwrap();
    let world = tmp.path().join("world.txt");
    let world_str = world.to_str().unwrap();

    let out = heatworld(
        &[
            "make", "--width", "8", "--height", "5", "--sources", "2", "--insulators", "3", "-o",
            world_str,
        ],
        b"",
    );
    assert!(out.status.success());

    let out = heatworld(&["render", "-i", world_str], b"");
    assert!(out.status.success());
    let art = String::from_utf8(out.stdout).unwrap();
    let rows: Vec<&str> = art.lines().collect();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0], "########");
    assert_eq!(art.matches('%').count(), 3);
}

#[test]
fn malformed_input_exits_with_code_one() {
    let out = heatworld(&["step"], b"not a world\n");
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("failed to load world"), "stderr: {stderr}");
}

#[test]
fn unflagged_boundary_exits_with_code_one() {
    let bad = SCENARIO.replace("1 0 1", "0 0 1");
    let out = heatworld(&["step"], bad.as_bytes());
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("boundary cell"));
}
