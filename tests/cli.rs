use assert_cmd::prelude::*;
use once_cell::sync::Lazy;
use predicates::str::contains;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

static MAP_XML: Lazy<String> = Lazy::new(|| {
    "<map>\n  <climate>2</climate>\n  <weather>0</weather>\n  <unit>\n    <id>1</id>\n    <type>7</type>\n    <health>100</health>\n  </unit>\n  <object>\n    <id>1</id>\n    <type>3</type>\n  </object>\n  <item>\n    <id>5</id>\n  </item>\n</map>\n"
        .to_string()
});

fn write_file(contents: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("temp file");
    tmp.write_all(contents.as_bytes()).expect("write temp file");
    tmp
}

fn sample_map() -> NamedTempFile {
    write_file(&MAP_XML)
}

#[test]
fn cli_runs_scripts_and_prints_final_state() {
    let map = sample_map();
    let script = write_file(
        r#"
sethour(10)
setminute(0)
weather(1)
find(23, 3)
heal(1, 1, 10)
consume(-5, 0, 0, 0)
"#,
    );

    let mut cmd = Command::cargo_bin("stranded-runtime").expect("binary exists");
    cmd.arg(map.path()).arg("--script").arg(script.path());
    cmd.assert()
        .success()
        .stdout(contains("Loaded map with 3 entities (1 units)"))
        .stdout(contains(" - unit #1 (type 7)"))
        .stdout(contains("Launched 1 script(s)"))
        .stdout(contains(" - day 1 time 10:00 climate Sun weather Rain"))
        .stdout(contains(" - entities: 1 objects, 1 units, 1 items, 0 infos"))
        .stdout(contains(" - player: energy -5.0 hunger 0.0 thirst 0.0 exhaustion 0.0"))
        .stdout(contains("   item #23 x3"))
        .stdout(contains(" - menu: Game"));
}

#[test]
fn cli_quit_returns_to_the_main_menu() {
    let map = sample_map();
    let script = write_file("quit()");

    let mut cmd = Command::cargo_bin("stranded-runtime").expect("binary exists");
    cmd.arg(map.path()).arg("--script").arg(script.path());
    cmd.assert()
        .success()
        .stdout(contains("Quit requested; returning to main menu"))
        .stdout(contains(" - menu: Main"));
}

#[test]
fn cli_rejects_a_broken_map() {
    let map = write_file("<scene></scene>");
    let mut cmd = Command::cargo_bin("stranded-runtime").expect("binary exists");
    cmd.arg(map.path());
    cmd.assert()
        .failure()
        .stderr(contains("failed to parse map XML"));
}

#[test]
fn cli_without_arguments_prints_usage() {
    let mut cmd = Command::cargo_bin("stranded-runtime").expect("binary exists");
    cmd.assert().failure().stderr(contains("Usage:"));
}
