//! Scenario: Mergepoint Order
//!
//! Journey: An outlet maps one mergepoint to several outlets. The result
//! follows the mapping order, not the declaration order of the outlets.

use crate::common::*;

/// SCENARIO: `body = [b, c]` renders B then C
#[test]
fn scenario_mapping_order_wins_over_declaration_order() {
    let env = TestEnv::new().with_file("weaver.toml", ORDER_UNIT);

    let result = env.run(&["generate"]);
    assert!(result.success, "Generate failed: {}", result.combined_output());
    assert_eq!(env.read_file("order.txt"), "[BC]");
}

/// SCENARIO: Reversing the mapping reverses the output
#[test]
fn scenario_reversed_mapping() {
    let env = TestEnv::new().with_file(
        "weaver.toml",
        &ORDER_UNIT.replace("outlets = [\"b\", \"c\"]", "outlets = [\"c\", \"b\"]"),
    );

    assert!(env.run(&["generate"]).success);
    assert_eq!(env.read_file("order.txt"), "[CB]");
}
