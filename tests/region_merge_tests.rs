//! Contract tests for the guarded-region extractor and merger, including
//! property tests over arbitrary free text.

use attrgen::region::{REGION_BEGIN, REGION_END, Span, segment};
use attrgen::{GuardedRegion, extract_regions, merge};
use proptest::prelude::*;

fn block(name: &str, body: &str) -> String {
    format!("{REGION_BEGIN}{name}\n{body}{REGION_END}{name}\n")
}

fn region(name: &str, body: &str) -> GuardedRegion {
    GuardedRegion {
        name: name.to_string(),
        block_text: block(name, body),
    }
}

#[test]
fn free_text_outside_the_region_survives_character_for_character() {
    let prologue = "// dear maintainer\n#include \"MyCustomInclude.h\"\n\n";
    let epilogue = "\nnamespace CustomNamespace\n{\n\tconstexpr float kCustomConstant = 100.0f;\n}\n";
    let existing = format!("{prologue}{}{epilogue}", block("AttributeSet", "old body\n"));

    let outcome = merge(&existing, &[region("AttributeSet", "fresh body\n")]);

    assert!(outcome.text.starts_with(prologue));
    assert!(outcome.text.ends_with(epilogue));
    assert!(outcome.text.contains("fresh body"));
    assert!(!outcome.text.contains("old body"));
}

#[test]
fn merging_a_region_absent_from_the_file_changes_nothing() {
    let existing = format!("start\n{}end\n", block("Known", "keep\n"));
    let outcome = merge(&existing, &[region("Foo", "never inserted\n")]);
    assert_eq!(outcome.text, existing);
    assert_eq!(outcome.skipped, vec!["Foo".to_string()]);
}

#[test]
fn merge_is_idempotent_for_identical_regions() {
    let existing = format!("a\n{}b\n{}c\n", block("One", "1\n"), block("Two", "2\n"));
    let regions = vec![region("One", "1\n"), region("Two", "2\n")];
    let once = merge(&existing, &regions);
    let twice = merge(&once.text, &regions);
    assert_eq!(once.text, existing);
    assert_eq!(twice.text, existing);
}

#[test]
fn extraction_roundtrips_through_merge() {
    let original = format!(
        "prefix\n{}between\n{}suffix\n",
        block("Alpha", "a\n"),
        block("Beta", "b\n")
    );
    let (regions, complete) = extract_regions(&original);
    assert!(complete);
    let outcome = merge(&original, &regions);
    assert_eq!(outcome.text, original);
    assert_eq!(outcome.replaced.len(), 2);
}

#[test]
fn unterminated_region_stops_extraction_at_the_break() {
    let text = format!(
        "{}{}{REGION_BEGIN}Dangling\nno end marker\n",
        block("First", "1\n"),
        block("Second", "2\n")
    );
    let (regions, complete) = extract_regions(&text);
    assert!(!complete);
    assert_eq!(regions.len(), 2);
    assert_eq!(regions[1].name, "Second");
}

#[test]
fn end_marker_must_carry_the_exact_region_name() {
    let text = format!("{REGION_BEGIN}Alpha\nbody\n{REGION_END}Beta\n{REGION_END}Alpha\n");
    let (regions, complete) = extract_regions(&text);
    assert!(complete);
    assert_eq!(regions.len(), 1);
    // The mismatched end marker line is swallowed into the block.
    assert!(regions[0].block_text.contains("Beta"));
    assert!(regions[0].block_text.ends_with(&format!("{REGION_END}Alpha\n")));
}

#[test]
fn later_replacements_are_unaffected_by_earlier_length_changes() {
    let existing = format!(
        "head\n{}mid\n{}tail\n",
        block("Grow", "x\n"),
        block("Shrink", "a much longer original body\nspanning lines\n")
    );
    let outcome = merge(
        &existing,
        &[
            region("Grow", "now much much longer than before\nindeed\n"),
            region("Shrink", "s\n"),
        ],
    );
    assert_eq!(
        outcome.text,
        format!(
            "head\n{}mid\n{}tail\n",
            block("Grow", "now much much longer than before\nindeed\n"),
            block("Shrink", "s\n")
        )
    );
}

proptest! {
    // Text with no marker signature is pure free text: merge must be the
    // identity no matter what regions are offered.
    #[test]
    fn merge_without_markers_is_identity(existing in "[a-zA-Z0-9 \t.;{}\n]{0,400}") {
        let outcome = merge(&existing, &[region("Foo", "body\n")]);
        prop_assert_eq!(outcome.text, existing);
    }

    // Segmentation is an exact partition: concatenating the spans always
    // rebuilds the input, marker soup or not.
    #[test]
    fn segmentation_partitions_any_input(text in any::<String>()) {
        let rebuilt: String = segment(&text)
            .spans
            .iter()
            .map(|span| match span {
                Span::Free(free) => free.as_str(),
                Span::Region(region) => region.block_text.as_str(),
            })
            .collect();
        prop_assert_eq!(rebuilt, text);
    }

    // Merging a file against its own extracted regions is the identity.
    #[test]
    fn self_merge_is_identity(body in "[a-z \n]{0,100}", free in "[A-Z .\n]{0,100}") {
        let text = format!("{free}{}", block("Gen", &format!("{body}\n")));
        let (regions, _) = extract_regions(&text);
        let outcome = merge(&text, &regions);
        prop_assert_eq!(outcome.text, text);
    }
}
