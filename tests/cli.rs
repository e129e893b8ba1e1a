use assert_cmd::prelude::*;
use comex_viz::palette::PaletteName;
use predicates::prelude::*;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::process::Command;
use std::thread;
use tempfile::tempdir;

/// Answer one HTTP request with `body`; returns the base URL.
fn serve_once(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap() > 2 {
            line.clear();
        }
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
    });
    base
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("comexviz").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("comexviz"))
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn theme_set_persists_in_prefs_dir() {
    let dir = tempdir().unwrap();

    let mut set = Command::cargo_bin("comexviz").unwrap();
    set.args(["theme", "set", "dark"]).arg("--prefs-dir").arg(dir.path());
    set.assert().success().stdout(predicate::str::contains("dark"));

    let mut get = Command::cargo_bin("comexviz").unwrap();
    get.args(["theme", "get"]).arg("--prefs-dir").arg(dir.path());
    get.assert().success().stdout(predicate::str::diff("dark\n"));

    let mut toggle = Command::cargo_bin("comexviz").unwrap();
    toggle.args(["theme", "toggle"]).arg("--prefs-dir").arg(dir.path());
    toggle.assert().success().stdout(predicate::str::diff("light\n"));
}

#[test]
fn theme_override_does_not_hide_a_save() {
    let dir = tempdir().unwrap();

    let mut set = Command::cargo_bin("comexviz").unwrap();
    set.args(["--theme", "light", "theme", "set", "dark"])
        .arg("--prefs-dir")
        .arg(dir.path());
    set.assert().success().stdout(predicate::str::diff("dark\n"));

    let mut get = Command::cargo_bin("comexviz").unwrap();
    get.args(["theme", "get"]).arg("--prefs-dir").arg(dir.path());
    get.assert().success().stdout(predicate::str::diff("dark\n"));

    let mut toggle = Command::cargo_bin("comexviz").unwrap();
    toggle
        .args(["--theme", "dark", "theme", "toggle"])
        .arg("--prefs-dir")
        .arg(dir.path());
    toggle.assert().success().stdout(predicate::str::diff("light\n"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("theme")).unwrap(),
        "light"
    );
}

#[test]
fn palette_flag_recolours_every_chart() {
    let base = serve_once(
        r#"{"kpis": {"total_fob": 1500.0}, "charts": {"country_chart": "{\"data\": [{\"type\": \"bar\", \"y\": [1]}]}"}}"#,
    );
    let dir = tempdir().unwrap();
    let out = dir.path().join("charts.json");

    let mut cmd = Command::cargo_bin("comexviz").unwrap();
    cmd.args(["dashboard", "--palette", "gray", "--api-url", &base])
        .arg("--prefs-dir")
        .arg(dir.path())
        .arg("--out")
        .arg(&out);
    cmd.assert().success();

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let colors = &saved["country_chart"]["data"][0]["marker"]["color"];
    assert_eq!(colors[0], PaletteName::Gray.colors()[0]);
}

#[test]
fn unknown_palette_is_rejected() {
    let mut cmd = Command::cargo_bin("comexviz").unwrap();
    cmd.args(["countries", "--palette", "purple"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown palette"));
}

#[test]
fn country_without_name_fails_before_fetching() {
    let mut cmd = Command::cargo_bin("comexviz").unwrap();
    cmd.args(["country", "--pais", " ", "--api-url", "http://127.0.0.1:9"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("select a country"));
}

// Live test (opt-in): COMEX_API_URL=http://host:port cargo test --features online
#[cfg(feature = "online")]
#[test]
fn dashboard_online() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("comexviz").unwrap();
    cmd.args(["dashboard", "--year", "2024", "--month", "12"])
        .arg("--out")
        .arg(dir.path().join("charts.json"));
    cmd.assert().success().stdout(predicate::str::contains("total_fob"));
}
