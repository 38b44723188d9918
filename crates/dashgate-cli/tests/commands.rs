//! End-to-end command runs over the sample snapshot

use clap::Parser;
use dashgate_cli::{run, Cli, CliConfig, Outcome};
use dashgate_testkit::{init_test_tracing, reference_now, write_sample_snapshot};
use tempfile::TempDir;

struct Harness {
    dir: TempDir,
}

impl Harness {
    fn new() -> Self {
        init_test_tracing();
        let dir = tempfile::tempdir().unwrap();
        write_sample_snapshot(dir.path()).unwrap();
        Self { dir }
    }

    fn config(&self) -> CliConfig {
        CliConfig {
            data_dir: self.dir.path().to_path_buf(),
            evaluate_at: Some(reference_now()),
            ..CliConfig::default()
        }
    }

    fn run(&self, args: &[&str]) -> (Outcome, String) {
        let cli = Cli::try_parse_from(std::iter::once("dashgate").chain(args.iter().copied())).unwrap();
        let mut out = Vec::new();
        let outcome = run(&cli.command, &self.config(), &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }
}

#[test]
fn check_reports_allowed_and_denied() {
    let harness = Harness::new();

    let (outcome, out) = harness.run(&["check", "-u", "u-stth", "-d", "d-overview"]);
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(out, "allowed\n");

    let (outcome, out) = harness.run(&["check", "-u", "u-leaver", "-d", "d-overview"]);
    assert_eq!(outcome, Outcome::Denied);
    assert_eq!(out, "denied\n");
}

#[test]
fn explain_prints_provenance() {
    let harness = Harness::new();

    let (_, out) = harness.run(&["explain", "-u", "u-sales", "-d", "d-pipeline"]);
    assert_eq!(out, "allowed (layer1_direct: group sales)\n");

    let (_, out) = harness.run(&["explain", "-u", "u-mod", "-d", "d-ops"]);
    assert_eq!(out, "allowed (layer2_company: group ops (in STTN))\n");

    let (outcome, out) = harness.run(&["explain", "-u", "u-guest", "-d", "d-ops", "--json"]);
    assert_eq!(outcome, Outcome::Denied);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json, serde_json::json!({ "hasAccess": false, "reason": "expired" }));
}

#[test]
fn list_honours_folder_filter() {
    let harness = Harness::new();

    let (_, out) = harness.run(&["list", "-u", "u-admin"]);
    let ids: Vec<&str> = out.lines().filter_map(|line| line.split('\t').next()).collect();
    assert_eq!(ids, ["d-overview", "d-pipeline", "d-old", "d-ops"]);

    let (_, out) = harness.run(&["list", "-u", "u-admin", "--folder", "sales"]);
    assert_eq!(out, "d-old\tRetired KPIs\n");
}

#[test]
fn who_lists_sorted_uids() {
    let harness = Harness::new();

    let (_, out) = harness.run(&["who", "-d", "d-overview"]);
    assert_eq!(out, "u-admin\nu-owner\nu-stth\n");
}

#[test]
fn card_shows_capabilities_or_denies() {
    let harness = Harness::new();

    let (outcome, out) = harness.run(&["card", "-u", "u-owner", "-d", "d-overview"]);
    assert_eq!(outcome, Outcome::Success);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["dashboardId"], "d-overview");
    assert_eq!(json["capabilities"]["isOwner"], true);
    assert_eq!(json["capabilities"]["canManageAccess"], false);

    let (outcome, out) = harness.run(&["card", "-u", "u-sales", "-d", "d-overview"]);
    assert_eq!(outcome, Outcome::Denied);
    assert_eq!(out, "denied\n");
}

#[test]
fn folders_show_paths() {
    let harness = Harness::new();

    let (_, out) = harness.run(&["folders", "-u", "u-sales"]);
    assert_eq!(
        out,
        "root\tCompany\t0\nsales\tCompany / Sales\t0\nsales-emea\tCompany / Sales / Sales EMEA\t1\n"
    );
}

#[test]
fn unknown_ids_are_errors() {
    let harness = Harness::new();
    let cli = Cli::try_parse_from(["dashgate", "check", "-u", "nobody", "-d", "d-overview"]).unwrap();

    let error = run(&cli.command, &harness.config(), &mut Vec::new()).unwrap_err();
    assert!(error.to_string().contains("nobody"));
}

#[test]
fn missing_snapshot_is_an_error() {
    let harness = Harness::new();
    let config = CliConfig {
        data_dir: harness.dir.path().join("absent"),
        ..harness.config()
    };
    let cli = Cli::try_parse_from(["dashgate", "who", "-d", "d-overview"]).unwrap();

    let error = run(&cli.command, &config, &mut Vec::new()).unwrap_err();
    assert!(format!("{error:#}").contains("absent"));
}
