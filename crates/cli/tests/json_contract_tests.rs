// Integration tests enforcing the --json stdout contract and the exit-code registry.
//
// These tests guarantee that stdout from --json commands is:
//   1. Valid JSON
//   2. Exactly one JSON value (no extra lines, no banners, no colors)
//   3. The correct shape for its command type
//
// Run with: cargo test -p buyerscope-cli --test json_contract_tests -- --nocapture

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

fn catalog_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../discovery/tests/fixtures/catalog.json")
}

/// Isolated from any user config: config dir points into `home`.
fn bscope(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bscope"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd.env("XDG_CONFIG_HOME", home.path());
    cmd.env_remove("BSCOPE_CONFIG");
    cmd.env_remove("BSCOPE_LEXICON");
    cmd.env_remove("BSCOPE_LOG");
    cmd
}

fn run(args: &[&str]) -> Output {
    let home = TempDir::new().unwrap();
    bscope(&home).args(args).output().expect("run bscope")
}

/// Assert stdout is a single, parseable JSON value with no extra lines.
fn assert_single_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "exit code: {:?}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let trimmed = stdout.trim();
    assert!(!trimmed.is_empty(), "stdout should not be empty");

    serde_json::from_str(trimmed).unwrap_or_else(|e| {
        panic!("stdout must be valid JSON.\nParse error: {}\nstdout:\n{}", e, trimmed)
    })
}

fn assert_exit(output: &Output, code: i32) {
    assert_eq!(
        output.status.code(),
        Some(code),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stdout.is_empty(), "stdout must stay empty on error");
}

// ===========================================================================
// bscope interpret --json
// ===========================================================================

#[test]
fn interpret_json_shape() {
    let out = run(&["interpret", "pepper", "ASTA", "500", "Europe", "180d", "--json"]);
    let val = assert_single_json(&out);

    assert_eq!(val["runnable"], true);
    let a = &val["assumptions"];
    assert_eq!(a["hs"][0]["code"], "0904");
    assert_eq!(a["hs"][0]["confidence"], 0.9);
    assert_eq!(a["markets"], serde_json::json!(["EU"]));
    assert_eq!(a["grade"], "ASTA 500");
    assert_eq!(a["lookback_days"], 180);
}

#[test]
fn interpret_unknown_text_is_not_runnable_but_succeeds() {
    let out = run(&["interpret", "hello", "world", "--json"]);
    let val = assert_single_json(&out);
    assert_eq!(val["runnable"], false);
    assert_eq!(val["assumptions"]["hs"], serde_json::json!([]));
}

#[test]
fn interpret_applies_edits() {
    let out = run(&[
        "interpret",
        "pepper",
        "--edit",
        r#"{"op":"add_cert","code":"haccp"}"#,
        "--edit",
        r#"{"op":"set_lookback","days":30}"#,
        "--json",
    ]);
    let val = assert_single_json(&out);
    assert_eq!(val["assumptions"]["certs"], serde_json::json!(["HACCP"]));
    assert_eq!(val["assumptions"]["lookback_days"], 30);
}

#[test]
fn interpret_invalid_edit_exits_7() {
    let out = run(&["interpret", "pepper", "--edit", r#"{"op":"set_lookback","days":0}"#]);
    assert_exit(&out, 7);

    let out = run(&["interpret", "pepper", "--edit", "not json"]);
    assert_exit(&out, 7);
}

// ===========================================================================
// bscope rank --json
// ===========================================================================

#[test]
fn rank_json_end_to_end() {
    let catalog = catalog_fixture();
    let out = run(&[
        "rank",
        "--catalog",
        catalog.to_str().unwrap(),
        "--query",
        "pepper Europe 180d",
        "--json",
    ]);
    let val = assert_single_json(&out);

    assert_eq!(val["total_candidates"], 2);
    assert_eq!(val["results_shown"], 2);
    assert_eq!(val["partial"], false);
    let results = val["results"].as_array().expect("results must be array");
    assert_eq!(results[0]["company"]["id"], "cmp-001");
    assert!(results[0]["breakdown"].is_object());
    assert_eq!(val["refine_suggestions"], serde_json::json!([]));
    let broaden = val["broaden_suggestions"].as_array().unwrap();
    assert_eq!(broaden.len(), 1);
    assert_eq!(broaden[0]["field"], "market");
    assert_eq!(broaden[0]["candidates_after"], 3);
}

#[test]
fn rank_from_interpret_output() {
    let home = TempDir::new().unwrap();
    let assumptions = home.path().join("assumptions.json");
    let out = bscope(&home)
        .args(["interpret", "black", "pepper", "--json"])
        .output()
        .unwrap();
    std::fs::write(&assumptions, &out.stdout).unwrap();

    let catalog = catalog_fixture();
    let out = bscope(&home)
        .args([
            "rank",
            "--catalog",
            catalog.to_str().unwrap(),
            "--assumptions",
            assumptions.to_str().unwrap(),
            "--limit",
            "1",
            "--json",
        ])
        .output()
        .unwrap();
    let val = assert_single_json(&out);
    assert_eq!(val["total_candidates"], 3);
    assert_eq!(val["results"].as_array().unwrap().len(), 1);
}

#[test]
fn rank_output_file_matches_stdout() {
    let home = TempDir::new().unwrap();
    let target = home.path().join("ranked.json");
    let catalog = catalog_fixture();
    let out = bscope(&home)
        .args([
            "rank",
            "--catalog",
            catalog.to_str().unwrap(),
            "--query",
            "turmeric",
            "--output",
            target.to_str().unwrap(),
            "--json",
        ])
        .output()
        .unwrap();
    let val = assert_single_json(&out);
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(val, written);
}

#[test]
fn rank_without_product_exits_5() {
    let catalog = catalog_fixture();
    let out = run(&["rank", "--catalog", catalog.to_str().unwrap(), "--query", "europe", "--json"]);
    assert_exit(&out, 5);
    assert!(String::from_utf8_lossy(&out.stderr).contains("hint:"));
}

#[test]
fn rank_zero_limit_exits_2() {
    let catalog = catalog_fixture();
    let out = run(&[
        "rank",
        "--catalog",
        catalog.to_str().unwrap(),
        "--query",
        "pepper",
        "--limit",
        "0",
    ]);
    assert_exit(&out, 2);
}

#[test]
fn rank_bad_catalog_exits_4() {
    let home = TempDir::new().unwrap();
    let bad = home.path().join("catalog.json");
    std::fs::write(&bad, r#"[{"id": "a", "name": "A"}, {"id": "a", "name": "B"}]"#).unwrap();
    let out = bscope(&home)
        .args(["rank", "--catalog", bad.to_str().unwrap(), "--query", "pepper"])
        .output()
        .unwrap();
    assert_exit(&out, 4);
    assert!(String::from_utf8_lossy(&out.stderr).contains("duplicate company id"));
}

#[test]
fn rank_missing_catalog_exits_2() {
    let out = run(&["rank", "--catalog", "/nonexistent/catalog.json", "--query", "pepper"]);
    assert_exit(&out, 2);
}

// ===========================================================================
// bscope resolve --json
// ===========================================================================

#[test]
fn resolve_json_shape() {
    let home = TempDir::new().unwrap();
    let rows = home.path().join("rows.json");
    std::fs::write(
        &rows,
        r#"[
            {"name": "Malabar Trading Company", "crm_id": 41},
            {"name": "Nowhere Imports"},
            {"email": "x@example.com"}
        ]"#,
    )
    .unwrap();
    let catalog = catalog_fixture();
    let out = bscope(&home)
        .args([
            "resolve",
            "--catalog",
            catalog.to_str().unwrap(),
            "--rows",
            rows.to_str().unwrap(),
            "--json",
        ])
        .output()
        .unwrap();
    let val = assert_single_json(&out);

    assert_eq!(val["summary"]["total_rows"], 3);
    assert_eq!(val["summary"]["matched"], 1);
    assert_eq!(val["summary"]["new"], 1);
    assert_eq!(val["summary"]["unresolved"], 1);

    let rows = val["rows"].as_array().unwrap();
    assert_eq!(rows[0]["crm_id"], 41);
    assert_eq!(rows[0]["resolution"]["status"], "matched");
    assert_eq!(rows[0]["resolution"]["matched_company_id"], "cmp-002");
    assert_eq!(rows[1]["resolution"]["status"], "new");
    assert_eq!(rows[2]["resolution"]["status"], "unresolved");
}

#[test]
fn resolve_malformed_rows_exits_4() {
    let home = TempDir::new().unwrap();
    let rows = home.path().join("rows.json");
    std::fs::write(&rows, r#"{"name": "not an array"}"#).unwrap();
    let catalog = catalog_fixture();
    let out = bscope(&home)
        .args(["resolve", "--catalog", catalog.to_str().unwrap(), "--rows", rows.to_str().unwrap()])
        .output()
        .unwrap();
    assert_exit(&out, 4);
}

// ===========================================================================
// bscope estimate --json
// ===========================================================================

#[test]
fn estimate_json_shape() {
    let catalog = catalog_fixture();
    let out = run(&[
        "estimate",
        "--catalog",
        catalog.to_str().unwrap(),
        "--ids",
        "cmp-001,cmp-002,cmp-003",
        "--json",
    ]);
    let val = assert_single_json(&out);
    let est = &val["estimate"];
    assert_eq!(est["total_credits"], 6);
    assert_eq!(est["contact_credits"], 2);
    assert_eq!(est["profile_credits"], 4);
    assert_eq!(est["breakdown"].as_array().unwrap().len(), 3);
    assert!(val.get("transitions").is_none());
}

#[test]
fn estimate_unknown_company_exits_6() {
    let catalog = catalog_fixture();
    let out = run(&["estimate", "--catalog", catalog.to_str().unwrap(), "--ids", "cmp-001,ghost"]);
    assert_exit(&out, 6);
}

#[test]
fn estimate_commit_writes_queued_catalog() {
    let home = TempDir::new().unwrap();
    let next = home.path().join("catalog.next.json");
    let catalog = catalog_fixture();
    let out = bscope(&home)
        .args([
            "estimate",
            "--catalog",
            catalog.to_str().unwrap(),
            "--ids",
            "cmp-002,cmp-004",
            "--commit",
            next.to_str().unwrap(),
            "--json",
        ])
        .output()
        .unwrap();
    let val = assert_single_json(&out);
    let transitions = val["transitions"].as_array().unwrap();
    assert_eq!(transitions.len(), 1);
    assert_eq!(transitions[0]["company_id"], "cmp-004");
    assert_eq!(transitions[0]["to"], "queued");

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&next).unwrap()).unwrap();
    let companies = written.as_array().unwrap();
    assert_eq!(companies.len(), 4);
    let cmp4 = companies.iter().find(|c| c["id"] == "cmp-004").unwrap();
    assert_eq!(cmp4["enrichment"]["status"], "queued");
}

#[test]
fn estimate_follows_config_file() {
    let home = TempDir::new().unwrap();
    let policy = home.path().join("policy.toml");
    std::fs::write(&policy, "[enrichment]\nprofile_credit_rate = 10\n").unwrap();
    let catalog = catalog_fixture();
    let out = bscope(&home)
        .args([
            "estimate",
            "--config",
            policy.to_str().unwrap(),
            "--catalog",
            catalog.to_str().unwrap(),
            "--ids",
            "cmp-003",
            "--json",
        ])
        .output()
        .unwrap();
    let val = assert_single_json(&out);
    assert_eq!(val["estimate"]["profile_credits"], 10);
}

// ===========================================================================
// bscope config
// ===========================================================================

#[test]
fn config_show_prints_defaults_as_toml() {
    let out = run(&["config", "show"]);
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    let parsed: toml::Value = toml::from_str(&text).expect("config show must print TOML");
    assert_eq!(parsed["resolution"]["match_threshold"].as_float(), Some(0.88));
    assert_eq!(parsed["enrichment"]["max_contacts_per_company"].as_integer(), Some(2));
}

#[test]
fn config_show_reads_user_config_dir() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("buyerscope");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("policy.toml"), "[ranking]\nmax_suggestions = 9\n").unwrap();

    let out = bscope(&home).args(["config", "show"]).output().unwrap();
    assert!(out.status.success());
    let parsed: toml::Value = toml::from_str(&String::from_utf8_lossy(&out.stdout)).unwrap();
    assert_eq!(parsed["ranking"]["max_suggestions"].as_integer(), Some(9));
}

#[test]
fn config_validate_rejects_bad_file() {
    let home = TempDir::new().unwrap();
    let policy = home.path().join("policy.toml");
    std::fs::write(&policy, "[resolution]\nmatch_threshold = 1.5\n").unwrap();
    let out = bscope(&home)
        .args(["config", "validate", policy.to_str().unwrap()])
        .output()
        .unwrap();
    assert_exit(&out, 3);

    std::fs::write(&policy, "[resolution]\nmatch_threshold = 0.9\n").unwrap();
    let out = bscope(&home)
        .args(["config", "validate", policy.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(out.status.success());
}

#[test]
fn lexicon_extension_adds_commodity() {
    let home = TempDir::new().unwrap();
    let ext = home.path().join("lexicon.toml");
    std::fs::write(
        &ext,
        "[[commodity]]\nkeyword = \"tellicherry\"\nhs_code = \"090411\"\nconfidence = 0.97\n",
    )
    .unwrap();
    let out = bscope(&home)
        .args(["interpret", "tellicherry", "--lexicon", ext.to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    let val = assert_single_json(&out);
    assert_eq!(val["assumptions"]["hs"][0]["code"], "090411");
    assert_eq!(val["assumptions"]["hs"][0]["confidence"], 0.97);
}
