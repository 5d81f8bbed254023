//! Scenario: Existing Targets
//!
//! Journey: Some targets already exist, hand-written or edited. The
//! output's existing-target strategy decides what happens to them.

use crate::common::*;

/// SCENARIO: skipExisting leaves present targets untouched
#[test]
fn scenario_skip_existing_keeps_hand_written_file() {
    let env = TestEnv::new()
        .with_file(
            "weaver.toml",
            &LIBRARY_UNIT.replace(
                "filename_outlet = \"filename\"",
                "filename_outlet = \"filename\"\nexisting_target_strategy = \"skipExisting\"",
            ),
        )
        .with_file("schema/library.json", LIBRARY_SCHEMA)
        .with_file("generated/Book.java", "// hand written\n");

    let result = env.run(&["generate"]);
    assert!(result.success, "Generate failed: {}", result.combined_output());

    assert_eq!(env.read_file("generated/Book.java"), "// hand written\n");
    assert!(env.path("generated/AuthorProfile.java").exists());
    assert!(result.stdout.contains("library: 1 file(s) written, 1 skipped"));
}

/// SCENARIO: merge keeps user regions of the previous file
#[test]
fn scenario_merge_preserves_user_regions() {
    let unit = LIBRARY_UNIT
        .replace(
            "template = \"package {{option:package}};\\n\\npublic class {{attr:name|pascal}} {\\n{{mergepoint:fields}}}\\n\"",
            "template = \"class {{attr:name|pascal}} {\\n    // weaver:user-begin body\\n    // weaver:user-end body\\n}\\n\"",
        )
        .replace(
            "filename_outlet = \"filename\"",
            "filename_outlet = \"filename\"\nexisting_target_strategy = \"merge\"",
        );
    let env = TestEnv::new()
        .with_file("weaver.toml", &unit)
        .with_file("schema/library.json", LIBRARY_SCHEMA)
        .with_file(
            "generated/Book.java",
            "class Old {\n    // weaver:user-begin body\n    int custom;\n    // weaver:user-end body\n}\n",
        );

    let result = env.run(&["generate"]);
    assert!(result.success, "Generate failed: {}", result.combined_output());

    assert_eq!(
        env.read_file("generated/Book.java"),
        "class Book {\n    // weaver:user-begin body\n    int custom;\n    // weaver:user-end body\n}\n"
    );
}

/// SCENARIO: append adds to the existing file
#[test]
fn scenario_append_extends_existing_file() {
    let env = TestEnv::new()
        .with_file(
            "weaver.toml",
            &ORDER_UNIT.replace(
                "filename = \"order.txt\"",
                "filename = \"order.txt\"\nexisting_target_strategy = \"append\"",
            ),
        )
        .with_file("order.txt", "start:");

    let result = env.run(&["generate"]);
    assert!(result.success, "Generate failed: {}", result.combined_output());
    assert_eq!(env.read_file("order.txt"), "start:[BC]");
}
