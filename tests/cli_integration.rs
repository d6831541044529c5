//! CLI integration tests against the compiled `lx` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lx(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lx").unwrap();
    cmd.arg("--cwd").arg(root);
    // Keep host configuration out of the tests.
    cmd.env_remove("LC_RESOURCES_DIR");
    cmd.env("LEXROOT_CONFIG", root.join("nonexistent-global.toml"));
    cmd
}

fn write(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn seed_lexicon(root: &Path) {
    write(
        &root
            .join("data")
            .join("processed")
            .join("arabic")
            .join("arabic_words_binary_roots.jsonl"),
        concat!(
            "{\"lemma\":\"كتاب\",\"root_norm\":\"كتب\",\"binary_root\":\"كت\",\"gloss_plain\":\"book\"}\n",
            "{\"lemma\":\"كتابة\",\"root_norm\":\"كتب\",\"binary_root\":\"كت\",\"gloss_plain\":\"book writing\"}\n",
            "{\"lemma\":\"قلم\",\"root_norm\":\"قلم\",\"binary_root\":\"قل\",\"gloss_plain\":\"pen\"}\n",
        ),
    );
}

#[test]
fn help_lists_the_commands() {
    Command::cargo_bin("lx")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ingest"))
        .stdout(predicate::str::contains("cluster"))
        .stdout(predicate::str::contains("graph"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn ingest_list_shows_the_step_names() {
    let dir = TempDir::new().unwrap();
    lx(dir.path())
        .args(["ingest", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("arabic:ingest_quran_morphology"))
        .stdout(predicate::str::contains("arabic:build_binary_root_lexicon"));
}

#[test]
fn ingest_on_an_empty_project_skips_and_succeeds() {
    let dir = TempDir::new().unwrap();
    lx(dir.path())
        .args(["ingest", "--no-manifest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 skipped"));
}

#[test]
fn ingest_require_inputs_exits_with_code_two() {
    let dir = TempDir::new().unwrap();
    lx(dir.path())
        .args(["ingest", "--require-inputs", "--no-manifest"])
        .assert()
        .code(2);
}

#[test]
fn ingest_runs_the_csv_steps_end_to_end() {
    let dir = TempDir::new().unwrap();
    write(
        &dir.path()
            .join("data")
            .join("raw")
            .join("arabic")
            .join("word_root_map.csv"),
        "word,root\nكتاب,كتب\nقلم,قلم\n",
    );

    lx(dir.path()).arg("ingest").assert().success();

    let filtered = dir
        .path()
        .join("data")
        .join("processed")
        .join("arabic")
        .join("word_root_map_filtered.jsonl");
    assert!(filtered.exists());

    let manifests = dir.path().join("outputs").join("manifests");
    assert_eq!(fs::read_dir(&manifests).unwrap().count(), 1);
}

#[test]
fn cluster_writes_both_artifacts() {
    let dir = TempDir::new().unwrap();
    seed_lexicon(dir.path());

    lx(dir.path())
        .arg("cluster")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 binary-root groups"));

    let clusters = dir.path().join("outputs").join("clusters");
    assert!(clusters.join("binary_root_lemma_clusters.jsonl").exists());
    assert!(clusters.join("binary_root_similarity_edges.csv").exists());
}

#[test]
fn cluster_rejects_out_of_range_thresholds() {
    let dir = TempDir::new().unwrap();
    seed_lexicon(dir.path());

    lx(dir.path())
        .args(["cluster", "--form-threshold", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0.0 and 1.0"));
}

#[test]
fn graph_exports_after_clustering() {
    let dir = TempDir::new().unwrap();
    seed_lexicon(dir.path());

    lx(dir.path()).arg("cluster").assert().success();
    lx(dir.path())
        .args(["graph", "--with-similarity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 lemmas"));

    let graph_path = dir
        .path()
        .join("outputs")
        .join("graph")
        .join("lexicon_graph.json");
    let body = fs::read_to_string(&graph_path).unwrap();
    assert!(body.contains("\"lemma:كتاب\""));
    assert!(body.contains("similar_form"));
}

#[test]
fn validate_reports_clean_and_strict_failure() {
    let dir = TempDir::new().unwrap();
    seed_lexicon(dir.path());

    lx(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("No findings"));

    // Break a row: binary root not derived from the root.
    let lexicon = dir
        .path()
        .join("data")
        .join("processed")
        .join("arabic")
        .join("arabic_words_binary_roots.jsonl");
    let mut body = fs::read_to_string(&lexicon).unwrap();
    body.push_str("{\"lemma\":\"علم\",\"root_norm\":\"علم\",\"binary_root\":\"قل\"}\n");
    fs::write(&lexicon, body).unwrap();

    lx(dir.path()).arg("validate").assert().success();
    lx(dir.path())
        .args(["validate", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("findings"));
}

#[test]
fn stats_ranks_buckets() {
    let dir = TempDir::new().unwrap();
    seed_lexicon(dir.path());

    lx(dir.path())
        .args(["stats", "--top", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 binary-root buckets"))
        .stdout(predicate::str::contains("كت"));
}

#[test]
fn config_set_then_get_round_trips() {
    let dir = TempDir::new().unwrap();

    lx(dir.path())
        .args(["config", "set", "cluster.form_threshold", "0.7"])
        .assert()
        .success();
    assert!(dir.path().join("lexroot.toml").exists());

    lx(dir.path())
        .args(["config", "get", "cluster.form_threshold"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.7"));

    lx(dir.path())
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cluster.form_threshold = 0.7"));
}

#[test]
fn config_rejects_unknown_keys() {
    let dir = TempDir::new().unwrap();
    lx(dir.path())
        .args(["config", "set", "no.such.key", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown config key"));
}

#[test]
fn quiet_suppresses_normal_output() {
    let dir = TempDir::new().unwrap();
    lx(dir.path())
        .args(["--quiet", "ingest", "--no-manifest"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn completion_generates_a_bash_script() {
    let dir = TempDir::new().unwrap();
    lx(dir.path())
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lexroot"));
}
