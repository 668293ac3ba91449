//! End-to-end properties of the transform pipeline.

use crate::{Mode, Order, transform};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[rstest]
#[case::plain_list("---\ntags:\n  - a\n---\nbody\n", Order::Preserve)]
#[case::scalar_field("---\ntags: a\n---\nbody\n", Order::Preserve)]
#[case::no_block("just a body\n", Order::Preserve)]
#[case::alpha_order("---\nzzz: 1\ntags:\n  - b\n---\nbody\n", Order::Alpha)]
#[case::crlf("---\r\ntags:\r\n  - a\r\n---\r\nbody\r\n", Order::Preserve)]
fn adding_twice_equals_adding_once(#[case] input: &str, #[case] order: Order) {
    let requested = tags(&["x", "y"]);
    let once = transform(input, &requested, Mode::Add, order).unwrap();
    let twice = transform(&once, &requested, Mode::Add, order).unwrap();
    assert_eq!(twice, once);
}

#[rstest]
#[case(Order::Preserve)]
#[case(Order::Alpha)]
fn unrelated_fields_survive_mutation(#[case] order: Order) {
    let input = "---\ntitle: My Note\naliases:\n  - old name\nrating: 5\ntags:\n  - a\n---\nbody\n";
    let output = transform(input, &tags(&["b"]), Mode::Add, order).unwrap();

    assert!(output.contains("title: My Note"));
    assert!(output.contains("rating: 5"));
    assert!(output.contains("- old name"));
    assert!(output.ends_with("---\nbody\n"));
}

#[test]
fn no_op_add_is_byte_identical() {
    let input = "---\ntags:\n  - a\ntitle: x\n---\nbody\n";
    let output = transform(input, &tags(&["a"]), Mode::Add, Order::Preserve).unwrap();
    assert_eq!(output, input);
}

#[test]
fn removing_sole_tag_drops_block_without_leading_blank() {
    let input = "---\ntags:\n  - solo\n---\nbody\n";
    let output = transform(input, &tags(&["solo"]), Mode::Remove, Order::Preserve).unwrap();
    assert_eq!(output, "body\n");
    assert!(!output.starts_with('\n'));
}

#[test]
fn scalar_tags_render_as_block_list_after_add() {
    let input = "---\ntags: alpha\n---\nbody\n";
    let output = transform(input, &tags(&["beta"]), Mode::Add, Order::Preserve).unwrap();
    assert_eq!(output, "---\ntags:\n  - alpha\n  - beta\n---\nbody\n");
}

#[test]
fn marker_prefixed_duplicate_is_a_no_op() {
    let input = "---\ntags:\n  - alpha\n---\nbody\n";
    let output = transform(input, &tags(&["#alpha"]), Mode::Add, Order::Preserve).unwrap();
    assert_eq!(output, input);
}

#[test]
fn stored_tags_never_carry_the_marker() {
    let input = "---\ntags:\n  - '#old'\n---\nbody\n";
    let output = transform(input, &tags(&["#new"]), Mode::Add, Order::Preserve).unwrap();
    assert_eq!(output, "---\ntags:\n  - old\n  - new\n---\nbody\n");
}

#[test]
fn alpha_order_is_deterministic() {
    let input = "---\nzzz: 1\ntags:\n  - b\n  - a\naliases:\n  - z\n  - a\n---\nbody\n";
    let output = transform(input, &tags(&["c"]), Mode::Add, Order::Alpha).unwrap();
    assert_eq!(
        output,
        "---\naliases:\n  - a\n  - z\ntags:\n  - a\n  - b\n  - c\nzzz: 1\n---\nbody\n"
    );
}

#[test]
fn alpha_rewrites_even_when_tags_are_untouched() {
    // The tag is already present, but the unsorted keys still get sorted.
    let input = "---\nzzz: 1\naaa: 2\ntags:\n  - x\n---\nbody\n";
    let output = transform(input, &tags(&["x"]), Mode::Add, Order::Alpha).unwrap();
    assert_eq!(output, "---\naaa: 2\ntags:\n  - x\nzzz: 1\n---\nbody\n");
}

#[test]
fn alpha_on_sorted_document_is_a_no_op() {
    let input = "---\naaa: 2\ntags:\n  - x\nzzz: 1\n---\nbody\n";
    let output = transform(input, &tags(&["x"]), Mode::Add, Order::Alpha).unwrap();
    assert_eq!(output, input);
}

#[test]
fn remove_then_add_restores_the_tag() {
    let input = "---\ntags:\n  - keep\n  - drop\n---\nbody\n";
    let removed = transform(input, &tags(&["drop"]), Mode::Remove, Order::Preserve).unwrap();
    assert_eq!(removed, "---\ntags:\n  - keep\n---\nbody\n");
    let restored = transform(&removed, &tags(&["drop"]), Mode::Add, Order::Preserve).unwrap();
    assert_eq!(restored, input);
}

#[test]
fn body_is_preserved_verbatim() {
    let body = "# Heading\n\nSome *markdown* with --- dashes\nand trailing spaces  \n";
    let input = format!("---\ntags:\n  - a\n---\n{body}");
    let output = transform(&input, &tags(&["b"]), Mode::Add, Order::Preserve).unwrap();
    assert!(output.ends_with(body));
}

#[test]
fn empty_block_gains_tags_on_add() {
    let input = "---\n---\nbody\n";
    let output = transform(input, &tags(&["a"]), Mode::Add, Order::Preserve).unwrap();
    assert_eq!(output, "---\ntags:\n  - a\n---\nbody\n");
}

#[test]
fn flow_list_is_left_alone_when_nothing_changes() {
    let input = "---\ntags: [a, b]\n---\nbody\n";
    let output = transform(input, &tags(&["a"]), Mode::Add, Order::Preserve).unwrap();
    assert_eq!(output, input);
}

#[test]
fn flow_list_becomes_block_list_when_rewritten() {
    let input = "---\ntags: [a]\n---\nbody\n";
    let output = transform(input, &tags(&["b"]), Mode::Add, Order::Preserve).unwrap();
    assert_eq!(output, "---\ntags:\n  - a\n  - b\n---\nbody\n");
}

#[test]
fn multiple_tags_apply_in_one_pass() {
    let input = "---\ntags:\n  - a\n---\nbody\n";
    let output = transform(input, &tags(&["b", "a", "c"]), Mode::Add, Order::Preserve).unwrap();
    assert_eq!(output, "---\ntags:\n  - a\n  - b\n  - c\n---\nbody\n");

    let output = transform(&output, &tags(&["a", "c"]), Mode::Remove, Order::Preserve).unwrap();
    assert_eq!(output, "---\ntags:\n  - b\n---\nbody\n");
}
