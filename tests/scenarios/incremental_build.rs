//! Scenario: Incremental Build
//!
//! Journey: With `run_only_on_source_change`, a second run leaves
//! unchanged sources alone; editing a source or forcing regeneration
//! brings the output back.

use crate::common::*;

/// SCENARIO: Unchanged sources are skipped
#[test]
fn scenario_second_run_skips_unchanged_source() {
    let env = library_project();
    assert!(env.run(&["generate"]).success);

    // a skipped source must not regenerate a deleted target
    env.remove_file("generated/Book.java");
    let result = env.run(&["generate"]);
    assert!(result.success, "Generate failed: {}", result.combined_output());
    assert!(!env.path("generated/Book.java").exists());
    assert!(result.stdout.contains("library: 0 file(s) written, 1 skipped"));
    assert!(result.stdout.contains("Nothing to generate."));
}

/// SCENARIO: Editing the source regenerates its outputs
#[test]
fn scenario_changed_source_is_regenerated() {
    let env = library_project();
    assert!(env.run(&["generate"]).success);

    env.write_file(
        "schema/library.json",
        &LIBRARY_SCHEMA.replace("\"title\"", "\"subtitle\""),
    );
    let result = env.run(&["generate"]);
    assert!(result.success, "Generate failed: {}", result.combined_output());
    assert!(env
        .read_file("generated/Book.java")
        .contains("private String subtitle;"));
}

/// SCENARIO: --force-regenerate ignores the recorded checksums
#[test]
fn scenario_force_regenerate() {
    let env = library_project();
    assert!(env.run(&["generate"]).success);
    env.remove_file("generated/Book.java");

    let result = env.run(&["generate", "--force-regenerate"]);
    assert!(result.success, "Generate failed: {}", result.combined_output());
    assert!(env.path("generated/Book.java").exists());
}

/// SCENARIO: The environment can switch incremental mode off
#[test]
fn scenario_env_disables_incremental_mode() {
    let env = library_project();
    assert!(env.run(&["generate"]).success);
    env.remove_file("generated/Book.java");

    let result = env.run_with_env(
        &["generate"],
        &[("WEAVER_RUN_ONLY_ON_SOURCE_CHANGE", "false")],
    );
    assert!(result.success, "Generate failed: {}", result.combined_output());
    assert!(env.path("generated/Book.java").exists());
}
