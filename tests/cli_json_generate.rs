mod common;

use common::*;

#[test]
fn test_generate_json_emits_ndjson_event_stream() {
    let env = library_project();

    let result = env.run(&["--json", "generate"]);
    assert!(result.success, "Generate failed: {}", result.combined_output());

    let lines = result.json_lines();
    let events: Vec<&str> = lines.iter().map(|l| l["event"].as_str().unwrap()).collect();
    assert_eq!(
        events,
        vec![
            "start",
            "unit_start",
            "output_start",
            "file_written",
            "file_written",
            "unit_complete",
            "complete",
        ]
    );

    let written: Vec<&str> = lines
        .iter()
        .filter(|l| l["event"] == "file_written")
        .map(|l| l["path"].as_str().unwrap())
        .collect();
    assert!(written[0].ends_with("Book.java"));
    assert!(written[1].ends_with("AuthorProfile.java"));

    let complete = lines.last().unwrap();
    assert_eq!(complete["written"], 2);
    assert_eq!(complete["skipped"], 0);
}

#[test]
fn test_generate_json_reports_skipped_sources() {
    let env = library_project();
    assert!(env.run(&["generate"]).success);

    let result = env.run(&["generate", "--json"]);
    assert!(result.success, "Generate failed: {}", result.combined_output());

    let lines = result.json_lines();
    let skipped = lines
        .iter()
        .find(|l| l["event"] == "source_skipped")
        .expect("expected a source_skipped event");
    assert_eq!(skipped["output"], "lib.entities");
    assert_eq!(lines.last().unwrap()["skipped"], 1);
}

#[test]
fn test_generate_json_failure_is_reported_as_event() {
    let env = TestEnv::new()
        .with_file(
            "weaver.toml",
            &LIBRARY_UNIT.replace("{{attr:name|camel}}", "{{attr:type}}"),
        )
        .with_file("schema/library.json", LIBRARY_SCHEMA);

    let result = env.run(&["generate", "--json"]);
    assert_eq!(result.exit_code, 4);

    let lines = result.json_lines();
    let last = lines.last().unwrap();
    assert_eq!(last["event"], "unit_complete");
    assert_eq!(last["status"], "failed");
}
