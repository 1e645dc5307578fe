//! Integration tests for the plugin binary

use assert_cmd::Command;
use plugin_test_utils::catalog::TestCatalog;
use predicates::prelude::*;

/// Get a Command for the plugin binary
fn plugin_cmd() -> Command {
    Command::cargo_bin("plugin").expect("Failed to find plugin binary")
}

#[test]
fn test_no_command_shows_hint() {
    plugin_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("plugin --help"));
}

#[test]
fn test_infos_prints_canonical_text() {
    plugin_cmd()
        .args(["infos", "https://example.com/b b,https://example.com/a a"])
        .assert()
        .success()
        .stdout("https://example.com/a a, https://example.com/b b\n");
}

#[test]
fn test_infos_reports_position() {
    plugin_cmd()
        .args(["infos", "https://example.com/path bad/name"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("Invalid character '/' at 28"));
}

#[test]
fn test_aliases_prints_canonical_text() {
    plugin_cmd()
        .args(["aliases", "zeta, short long"])
        .assert()
        .success()
        .stdout("short long, zeta\n");
}

#[test]
fn test_aliases_rejects_duplicate_target() {
    plugin_cmd()
        .args(["aliases", "x a, y a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Aliases x and y both refer to a"));
}

#[test]
fn test_merge_renames_by_url() {
    plugin_cmd()
        .args([
            "merge",
            "--aliases",
            "X A",
            "--infos",
            "https://example.com/u1 A, https://example.com/u2 B",
        ])
        .assert()
        .success()
        .stdout("https://example.com/u1 X\n");
}

#[test]
fn test_list_marks_ambiguous() {
    let catalog = TestCatalog::new();
    let path = catalog.sample();
    plugin_cmd()
        .args(["list", "--catalog"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Available Plugins"))
        .stdout(predicate::str::contains("to-date"))
        .stdout(predicate::str::contains("(ambiguous)"))
        .stdout(predicate::str::contains("hidden").not())
        .stdout(predicate::str::contains("1 ambiguous."));
}

#[test]
fn test_resolve_prints_tree() {
    let catalog = TestCatalog::new();
    let path = catalog.sample();
    plugin_cmd()
        .args(["resolve", "--catalog"])
        .arg(&path)
        .arg(r#"collection(to-date("yyyy-mm-dd"), $locale)"#)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "collection [core] https://example.com/core/collection\n",
        ))
        .stdout(predicate::str::contains(
            "  string-to-local-date [dates] https://example.com/dates/string-to-local-date\n    \"yyyy-mm-dd\"\n",
        ))
        .stdout(predicate::str::contains("  \"en-AU\"\n"));
}

#[test]
fn test_resolve_ambiguous_name_fails() {
    let catalog = TestCatalog::new();
    let path = catalog.sample();
    plugin_cmd()
        .args(["resolve", "--catalog"])
        .arg(&path)
        .arg("dup")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown dup"));
}

#[test]
fn test_missing_catalog_fails() {
    let catalog = TestCatalog::new();
    plugin_cmd()
        .args(["list", "--catalog"])
        .arg(catalog.root().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let catalog = TestCatalog::new();
    let path = catalog.sample();
    plugin_cmd()
        .args(["--verbose", "list", "--catalog"])
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("loaded plugin catalog"));
}

#[test]
fn test_rust_log_keeps_stdout_to_command_output() {
    plugin_cmd()
        .env("RUST_LOG", "debug")
        .args(["infos", "https://example.com/a a"])
        .assert()
        .success()
        .stdout("https://example.com/a a\n")
        .stderr(predicate::str::contains("logging to stderr"));
}

#[test]
fn test_invalid_rust_log_fails() {
    plugin_cmd()
        .env("RUST_LOG", "plugin_core=loud")
        .args(["infos", "https://example.com/a a"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("invalid log filter"));
}

fn fixture(file_name: &str) -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/catalogs")
        .join(file_name)
}

#[test]
fn test_list_fixture_without_ambiguity() {
    plugin_cmd()
        .args(["list", "--catalog"])
        .arg(fixture("converters.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("local-date"))
        .stdout(predicate::str::contains("0 ambiguous."));
}

#[test]
fn test_resolve_alias_with_declared_parameters() {
    plugin_cmd()
        .args(["resolve", "--catalog"])
        .arg(fixture("converters.yaml"))
        .arg("local-date")
        .assert()
        .success()
        .stdout(
            "string-to-local-date [locale] https://example.com/locale/string-to-local-date\n  \"dd/mm/yyyy\"\n",
        );
}

#[test]
fn test_resolve_unknown_environment_value() {
    plugin_cmd()
        .args(["resolve", "--catalog"])
        .arg(fixture("formatters.json"))
        .arg("percent($missing)")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown environment value missing"));
}
