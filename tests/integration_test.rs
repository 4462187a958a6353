use std::fs;

use assert_fs::prelude::*;
use predicates::prelude::*;
use reap::cli::{Commands, RuleArgs, RulesAction};
use reap::error::ReapError;
use reap::rules::ExclusionMode;

mod common;

use common::{DAY, TestTree};

fn scan(tree: &TestTree, rules: RuleArgs) -> Commands {
    Commands::Scan {
        root: tree.root(),
        rules,
    }
}

fn clean(tree: &TestTree, rules: RuleArgs) -> Commands {
    Commands::Clean {
        root: tree.root(),
        rules,
        dry_run: false,
        yes: true,
        prune_empty: false,
        no_log: false,
    }
}

fn photo_rules() -> RuleArgs {
    RuleArgs::builder()
        .extensions("jpg,png")
        .max_size("1mb")
        .older_than("7days")
        .exclude("vendor")
        .build()
}

#[test]
fn test_scan_selects_only_old_small_unexcluded_photos() {
    let tree = TestTree::new();
    tree.file("a.jpg", 500, DAY * 10);
    tree.file("b.png", 2 * 1024 * 1024, DAY * 10);
    tree.file("c.png", 500, DAY);
    tree.file("notes.txt", 10, DAY * 10);
    tree.file("vendor/d.jpg", 500, DAY * 10);

    let output = tree.run(scan(&tree, photo_rules()), "").unwrap();

    let listed: Vec<&str> = output.lines().collect();
    assert_eq!(listed.len(), 1, "{output}");
    assert!(listed[0].ends_with("a.jpg"));

    // Scanning never deletes
    tree.child("a.jpg").assert(predicate::path::exists());
}

#[test]
fn test_clean_deletes_matches_and_writes_log() {
    let tree = TestTree::new();
    let old = tree.file("a.jpg", 500, DAY * 10);
    let large = tree.file("b.png", 2 * 1024 * 1024, DAY * 10);
    let vendored = tree.file("vendor/c.jpg", 500, DAY * 10);

    tree.run(clean(&tree, photo_rules()), "").unwrap();

    old.assert(predicate::path::missing());
    large.assert(predicate::path::exists());
    vendored.assert(predicate::path::exists());

    let log = fs::read_to_string(tree.log_path()).unwrap();
    let fields: Vec<&str> = log.trim_end().split('\t').collect();
    assert_eq!(fields.len(), 4, "{log}");
    assert!(fields[0].parse::<u64>().is_ok());
    assert_eq!(fields[1], "deleted");
    assert_eq!(fields[2], "500");
    assert!(fields[3].ends_with("a.jpg"));
}

#[test]
fn test_clean_asks_before_deleting() {
    let tree = TestTree::new();
    let file = tree.file("old.log", 10, DAY * 3);
    let command = || Commands::Clean {
        root: tree.root(),
        rules: RuleArgs::builder().extensions("log").build(),
        dry_run: false,
        yes: false,
        prune_empty: false,
        no_log: true,
    };

    let output = tree.run(command(), "no\n").unwrap();
    assert!(output.contains("[y/N]"));
    file.assert(predicate::path::exists());

    tree.run(command(), "Y\n").unwrap();
    file.assert(predicate::path::missing());
    assert!(!tree.log_path().exists());
}

#[test]
fn test_clean_dry_run_touches_nothing() {
    let tree = TestTree::new();
    let file = tree.file("old.log", 10, DAY * 3);
    let hollow = tree.dir("hollow/inner");

    let command = Commands::Clean {
        root: tree.root(),
        rules: RuleArgs::default(),
        dry_run: true,
        yes: false,
        prune_empty: true,
        no_log: false,
    };
    let output = tree.run(command, "").unwrap();

    assert!(output.contains("old.log"));
    file.assert(predicate::path::exists());
    hollow.assert(predicate::path::is_dir());
    assert!(!tree.log_path().exists());
}

#[test]
fn test_clean_empty_dirs_only() {
    let tree = TestTree::new();
    let hollow = tree.dir("a/b/c");
    let sibling = tree.dir("a/d");
    tree.file("keep/file.txt", 1, DAY);
    let root_file = tree.file("top.txt", 1, DAY);

    let rules = RuleArgs::builder().empty_dirs_only(true).build();
    let output = tree.run(clean(&tree, rules), "").unwrap();

    assert_eq!(output.lines().count(), 4, "{output}");
    hollow.assert(predicate::path::missing());
    sibling.assert(predicate::path::missing());
    tree.child("a").assert(predicate::path::missing());
    tree.child("keep/file.txt").assert(predicate::path::exists());
    root_file.assert(predicate::path::exists());
    assert!(tree.root().is_dir());
}

#[test]
fn test_clean_prune_empty_removes_emptied_parents() {
    let tree = TestTree::new();
    tree.file("cache/x/y/junk.tmp", 100, DAY);
    tree.file("cache/keep.md", 100, DAY);

    let command = Commands::Clean {
        root: tree.root(),
        rules: RuleArgs::builder().extensions(".TMP").build(),
        dry_run: false,
        yes: true,
        prune_empty: true,
        no_log: false,
    };
    tree.run(command, "").unwrap();

    tree.child("cache/x").assert(predicate::path::missing());
    tree.child("cache/keep.md").assert(predicate::path::exists());

    let log = fs::read_to_string(tree.log_path()).unwrap();
    assert_eq!(log.lines().filter(|l| l.contains("\tdeleted-dir\t")).count(), 2);
    assert_eq!(log.lines().filter(|l| l.contains("\tdeleted\t")).count(), 1);
}

#[test]
fn test_glob_exclusions() {
    let tree = TestTree::new();
    tree.file("src/main.rs", 1, DAY);
    tree.file("target/debug/app.rs", 1, DAY);
    tree.file("docs/target-notes.rs", 1, DAY);

    let substring = RuleArgs::builder().extensions("rs").exclude("target").build();
    let output = tree.run(scan(&tree, substring), "").unwrap();
    assert_eq!(output.lines().count(), 1, "{output}");

    let glob = RuleArgs::builder()
        .extensions("rs")
        .exclude("target")
        .exclude_mode(ExclusionMode::Glob)
        .build();
    let output = tree.run(scan(&tree, glob), "").unwrap();
    assert_eq!(output.lines().count(), 2, "{output}");
    assert!(output.contains("target-notes.rs"));
}

#[test]
fn test_saved_rules_apply_until_reset() {
    let tree = TestTree::new();
    tree.file("a.log", 10, DAY);
    tree.file("b.txt", 10, DAY);

    let save = Commands::Rules {
        action: RulesAction::Save {
            rules: RuleArgs::builder().extensions("log").build(),
        },
    };
    tree.run(save, "").unwrap();
    assert!(tree.rules_path().exists());

    let shown = tree
        .run(
            Commands::Rules {
                action: RulesAction::Show,
            },
            "",
        )
        .unwrap();
    assert!(predicate::str::contains("\"extensions\": \"log\"").eval(&shown));

    let output = tree.run(scan(&tree, RuleArgs::default()), "").unwrap();
    assert!(output.contains("a.log"));
    assert!(!output.contains("b.txt"));

    // Flags win over saved values
    let output = tree
        .run(scan(&tree, RuleArgs::builder().extensions("txt").build()), "")
        .unwrap();
    assert!(output.contains("b.txt"));
    assert!(!output.contains("a.log"));

    let ignored = RuleArgs::builder().no_saved_rules(true).build();
    let output = tree.run(scan(&tree, ignored), "").unwrap();
    assert_eq!(output.lines().count(), 2);

    tree.run(
        Commands::Rules {
            action: RulesAction::Reset,
        },
        "",
    )
    .unwrap();
    assert!(!tree.rules_path().exists());
}

#[test]
fn test_missing_root_is_an_error() {
    let tree = TestTree::new();
    let command = Commands::Scan {
        root: tree.root().join("does-not-exist"),
        rules: RuleArgs::default(),
    };

    let result = tree.run(command, "");
    assert!(matches!(result, Err(ReapError::WalkRoot { .. })));
}

#[test]
fn test_invalid_rule_values_are_errors() {
    let tree = TestTree::new();

    let result = tree.run(scan(&tree, RuleArgs::builder().min_size("10").build()), "");
    assert!(matches!(result, Err(ReapError::InvalidSize { .. })));

    let result = tree.run(scan(&tree, RuleArgs::builder().older_than("3fortnights").build()), "");
    assert!(matches!(result, Err(ReapError::InvalidAge { .. })));

    let inverted = RuleArgs::builder().min_size("2mb").max_size("1mb").build();
    let result = tree.run(scan(&tree, inverted), "");
    assert!(matches!(result, Err(ReapError::InvalidSizeRange { .. })));
}

#[test]
fn test_prune_empty_respects_exclusions() {
    let tree = TestTree::new();
    tree.file("cache/junk.tmp", 10, DAY);
    let kept = tree.dir("vendor/keep_me");

    let command = Commands::Clean {
        root: tree.root(),
        rules: RuleArgs::builder().extensions("tmp").exclude("vendor").build(),
        dry_run: false,
        yes: true,
        prune_empty: true,
        no_log: true,
    };
    tree.run(command, "").unwrap();

    tree.child("cache").assert(predicate::path::missing());
    kept.assert(predicate::path::is_dir());
}

#[test]
fn test_flag_overrides_saved_empty_dirs_mode() {
    let tree = TestTree::new();
    tree.file("a.log", 10, DAY);
    tree.dir("hollow");

    let save = Commands::Rules {
        action: RulesAction::Save {
            rules: RuleArgs::builder().empty_dirs_only(true).build(),
        },
    };
    tree.run(save, "").unwrap();

    let output = tree.run(scan(&tree, RuleArgs::default()), "").unwrap();
    assert!(output.contains("hollow"));
    assert!(!output.contains("a.log"));

    let files = RuleArgs::builder().empty_dirs_only(false).build();
    let output = tree.run(scan(&tree, files), "").unwrap();
    assert!(output.contains("a.log"));
    assert!(!output.contains("hollow"));
}
