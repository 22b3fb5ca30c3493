use code_review_engine::analysis::{analyze, Category};

fn sample() -> String {
    std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/test_data/sample.py"))
        .expect("sample source")
}

#[test]
fn tree_findings_come_first_in_traversal_order() {
    let report = analyze(&sample(), "python", &[]);
    let head: Vec<_> = report
        .issues
        .iter()
        .take(2)
        .map(|i| (i.title.as_str(), i.line_number))
        .collect();
    assert_eq!(head, vec![("Bare Except Clause", 30), ("High Complexity Function", 33)]);
    assert_eq!(
        report.issues[1].description,
        "Function 'classify' has complexity 13"
    );
}

#[test]
fn sample_scores_stay_in_range() {
    let report = analyze(&sample(), "py", &[]);
    for score in [
        report.quality_score,
        report.maintainability_score,
        report.security_summary.security_score,
        report.performance_summary.performance_score,
    ] {
        assert!((0.0..=10.0).contains(&score), "score out of range: {score}");
    }
    assert!(report.security_summary.total_security_issues >= 3);
    assert!(report
        .issues
        .iter()
        .any(|i| i.category == Category::Performance && i.line_number == 20));
}

#[test]
fn generic_language_skips_tree_rules() {
    let report = analyze(&sample(), "text", &[]);
    assert!(report
        .issues
        .iter()
        .all(|i| i.title != "Bare Except Clause" && i.title != "High Complexity Function"));
}
