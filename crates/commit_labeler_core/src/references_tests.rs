use super::*;

#[test]
fn test_fixes_reference_in_any_case() {
    for message in ["Fixes #12", "fixes #12", "FIXES #12", "fIxEs #12"] {
        assert!(
            extract_closed_references(message).contains(&12),
            "'{message}' should reference #12"
        );
    }
}

#[test]
fn test_separator_variants() {
    for message in [
        "Fixes #12",
        "Fixes#12",
        "Fixes: #12",
        "Fixes:#12",
        "Fixes :  #12",
        "Fixes\t#12",
        "Fixes\n#12",
    ] {
        assert_eq!(
            extract_closed_references(message),
            vec![12],
            "'{message}' should reference #12 exactly once"
        );
    }
}

#[test]
fn test_all_keywords_are_recognised() {
    for keyword in CLOSE_KEYWORDS {
        let message = format!("{keyword} #4");
        assert_eq!(
            extract_closed_references(&message),
            vec![4],
            "'{message}' should reference #4"
        );
    }
}

#[test]
fn test_no_keyword_returns_empty() {
    assert!(extract_closed_references("").is_empty());
    assert!(extract_closed_references("Refactor the parser").is_empty());
    assert!(extract_closed_references("See #12 for details").is_empty());
    assert!(extract_closed_references("Fixes issue #12").is_empty());
    assert!(extract_closed_references("Fixes #").is_empty());
    assert!(extract_closed_references("Fixes ##12").is_empty());
}

#[test]
fn test_multiple_matches_for_one_keyword() {
    assert_eq!(
        extract_closed_references("fixes #1 and fixes #2 and fixes #3"),
        vec![1, 2, 3]
    );
}

#[test]
fn test_results_are_grouped_by_keyword_order() {
    // "resolves" comes after "closes" and "fix" in the keyword list
    let refs = extract_closed_references("resolves #30\n\ncloses #10, fix #20");

    assert_eq!(refs, vec![10, 20, 30]);
}

#[test]
fn test_duplicates_across_keywords_are_kept() {
    let refs = extract_closed_references("fixes #1, closes #1");

    assert_eq!(refs, vec![1, 1]);
}

#[test]
fn test_keyword_embedded_in_longer_word_still_matches() {
    // Patterns are not anchored to a word boundary before the keyword
    assert_eq!(extract_closed_references("hotfix #8"), vec![8]);
}

#[test]
fn test_leading_zeros_are_parsed_as_decimal() {
    assert_eq!(extract_closed_references("closes #007"), vec![7]);
}

#[test]
fn test_overflowing_number_is_dropped() {
    let refs = extract_closed_references("fixes #99999999999999999999999 and fixes #5");

    assert_eq!(refs, vec![5]);
}
