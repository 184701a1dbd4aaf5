use assert_cmd::prelude::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    let path = repo_root().join("fixtures").join("bouts").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("boutline-cli"));
    cmd.current_dir(repo_root()).env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("run cli");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("json stdout")
}

#[test]
fn cli_parse_reports_boxers_and_row_stats() {
    let json = stdout_json(cli().arg(fixture("basic.csv")));
    assert_eq!(json["stats"]["accepted"], 19);
    assert_eq!(json["stats"]["skipped"], 3);
    assert_eq!(json["boxers"].as_array().unwrap().len(), 5);
    assert_eq!(json["boxers"][0]["name"], "Oleksandr Usyk");
}

#[test]
fn cli_align_honours_mode_and_order_flags() {
    let json = stdout_json(cli().args([
        "align",
        "--mode",
        "date",
        "--order",
        "desc",
        fixture("basic.csv").to_string_lossy().as_ref(),
    ]));
    assert_eq!(json["mode"], "date");
    let names: Vec<&str> = json["trajectories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["displayName"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        [
            "Tyson Fury",
            "Daniel Dubois",
            "Anthony Joshua (2)",
            "Anthony Joshua (1)"
        ]
    );
    assert_eq!(json["trajectories"][0]["targetY"], 20.0);
    assert_eq!(json["trajectories"][3]["targetY"], -20.0);
}

#[test]
fn cli_align_reads_reference_from_stdin_input() {
    let csv = fs::read_to_string(fixture("basic.csv")).unwrap();
    let mut child = cli()
        .args(["align", "--reference", "Tyson Fury", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn cli");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(csv.as_bytes())
        .expect("write stdin");
    let output = child.wait_with_output().expect("run cli");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["reference"], "Tyson Fury");
    let names: Vec<&str> = json["trajectories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["displayName"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Deontay Wilder", "Oleksandr Usyk"]);
}

#[test]
fn cli_render_writes_svg_with_selection() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("chart.svg");

    cli()
        .args([
            "render",
            "--seed",
            "7",
            "--select",
            "Daniel Dubois",
            "--out",
            out.to_string_lossy().as_ref(),
            fixture("basic.csv").to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains(">Facing the Usyk Filter</text>"));
    assert!(svg.contains(r#"data-boxer="Daniel Dubois" data-selected="true""#));
    assert_eq!(svg.matches("text-decoration: underline").count(), 1);
}

#[test]
fn cli_render_applies_config_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("chart.json");
    fs::write(
        &config,
        r#"{ "chart": { "title": "Custom Title", "width": 900 }, "reference": { "label": "Cat" } }"#,
    )
    .unwrap();

    let output = cli()
        .args([
            "render",
            "--config",
            config.to_string_lossy().as_ref(),
            fixture("basic.csv").to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let svg = String::from_utf8(output.stdout).unwrap();
    assert!(svg.contains(">Custom Title</text>"));
    assert!(svg.contains(r#"viewBox="0 0 900 800""#));
    assert!(svg.contains(">Cat</text>"));
}

#[test]
fn cli_renders_png_smoke() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("out.png");

    cli()
        .args([
            "render",
            "--format",
            "png",
            "--scale",
            "0.5",
            "--background",
            "#111111",
            "--out",
            out.to_string_lossy().as_ref(),
            fixture("basic.csv").to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read png");
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "output is not a PNG"
    );
    let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    let reader = decoder.read_info().expect("png header");
    let info = reader.info();
    assert_eq!((info.width, info.height), (600, 400));
}

#[test]
fn cli_renders_png_with_default_out_path_for_file_input() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let tmp_fixture = tmp.path().join("basic.csv");
    fs::copy(fixture("basic.csv"), &tmp_fixture).expect("copy fixture");

    cli()
        .args([
            "render",
            "--format",
            "png",
            tmp_fixture.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(tmp_fixture.with_extension("png")).expect("read png");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn cli_exits_3_when_reference_is_missing() {
    let output = cli()
        .args(["render", fixture("no_reference.csv").to_string_lossy().as_ref()])
        .output()
        .expect("run cli");
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Oleksandr Usyk"), "{stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn cli_exits_2_on_usage_errors() {
    cli().args(["render", "--mode", "spiral"]).assert().code(2);
    cli().args(["--bogus"]).assert().code(2);
    cli().args(["a.csv", "b.csv"]).assert().code(2);
}

#[test]
fn cli_exits_1_on_unreadable_input() {
    cli()
        .args(["parse", "does/not/exist.csv"])
        .assert()
        .code(1);
}
