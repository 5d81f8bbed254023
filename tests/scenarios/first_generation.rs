//! Scenario: First Generation
//!
//! Journey: A user writes `weaver.toml` and a schema, then runs
//! `weaver generate` in the project directory.
//!
//! Success Criteria:
//! - One file per selected table, named by the filename outlet
//! - Content assembled from nested outlets via mergepoints
//! - Checksums of the source recorded in the cache directory

use crate::common::*;

/// SCENARIO: Generate entity classes from a schema
#[test]
fn scenario_generates_one_file_per_table() {
    let env = library_project();

    let result = env.run(&["generate"]);
    assert!(result.success, "Generate failed: {}", result.combined_output());

    assert_eq!(
        list_all_files(&env.path("generated")),
        vec!["AuthorProfile.java", "Book.java"]
    );
    insta::assert_snapshot!(env.read_file("generated/Book.java"), @r"
package com.acme.library;

public class Book {
    private String bookId;
    private String title;
}
");
    assert!(env
        .read_file("generated/AuthorProfile.java")
        .contains("private String fullName;"));

    assert!(result.stdout.contains("library: 2 file(s) written, 0 skipped"));
}

/// SCENARIO: Source checksums are stored for the next run
#[test]
fn scenario_records_source_checksums() {
    let env = library_project();
    assert!(env.run(&["generate"]).success);

    let checksums = env.read_file(".weaver/last-source-changes.checksums");
    let lines: Vec<&str> = checksums.lines().collect();
    assert_eq!(lines.len(), 1, "unexpected checksums:\n{checksums}");
    assert!(
        lines[0].ends_with("library.json"),
        "record should end with the source path: {}",
        lines[0]
    );
    assert!(lines[0].contains("-library:"), "key should start with the template set");
}

/// SCENARIO: Explicit config path, run from another directory
#[test]
fn scenario_relative_paths_follow_the_unit_file() {
    let env = TestEnv::new()
        .with_file("project/weaver.toml", LIBRARY_UNIT)
        .with_file("project/schema/library.json", LIBRARY_SCHEMA);

    let result = env.run(&["generate", "--config", "project/weaver.toml"]);
    assert!(result.success, "Generate failed: {}", result.combined_output());
    assert!(env.path("project/generated/Book.java").exists());
    assert!(!env.path("generated").exists());
}
