use code_review_engine::analysis::review::{CodeReviewer, ReviewRequest};
use code_review_engine::analysis::{analyze, Category, Finding, Severity};
use code_review_engine::providers::Advisory;

fn external(severity: Severity, category: Category) -> Finding {
    Finding::new(
        1,
        severity,
        category,
        "AI Review Finding",
        "reported by reviewer",
        "Review and address this finding",
        "",
    )
}

#[test]
fn empty_source_has_no_findings_and_zero_quality() {
    let report = analyze("", "python", &[]);
    assert_eq!(report.quality_score, 0.0);
    assert!(report.issues.is_empty());
    assert!(report.suggestions.is_empty());
    assert_eq!(report.security_summary.security_score, 10.0);
    assert_eq!(report.security_summary.total_security_issues, 0);
    assert_eq!(report.performance_summary.performance_score, 10.0);
    assert_eq!(report.maintainability_score, 10.0);
}

#[test]
fn trivial_function_scores_at_ceiling() {
    let report = analyze("def f(): return 1", "python", &[]);
    assert!(report.issues.is_empty(), "{:?}", report.issues);
    assert_eq!(report.quality_score, 10.0);
    assert_eq!(report.maintainability_score, 10.0);
}

#[test]
fn many_critical_findings_clamp_quality_at_zero() {
    let findings: Vec<_> = (0..25)
        .map(|_| external(Severity::Critical, Category::Bug))
        .collect();
    let report = analyze("x = 1\n", "python", &findings);
    assert_eq!(report.issues.len(), 25);
    assert_eq!(report.quality_score, 0.0);
    assert_eq!(report.security_summary.security_score, 10.0);

    let security: Vec<_> = (0..8)
        .map(|_| external(Severity::Critical, Category::Security))
        .collect();
    let report = analyze("x = 1\n", "python", &security);
    assert_eq!(report.security_summary.security_score, 0.0);
    assert_eq!(report.security_summary.critical_issues, 8);
}

#[test]
fn findings_keep_detection_order() {
    let code = concat!(
        "def f():\n",
        "    try:\n",
        "        pass\n",
        "    except:\n",
        "        pass\n",
        "password = \"hunter2\"\n",
        "for i in range(len(xs)):\n",
        "    pass\n",
    );
    let report = analyze(code, "python", &[external(Severity::Medium, Category::BestPractice)]);
    let order: Vec<_> = report
        .issues
        .iter()
        .map(|i| (i.title.as_str(), i.line_number))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Bare Except Clause", 4),
            ("Potential Hardcoded Secrets", 6),
            ("Performance Issue: Inefficient Loop", 7),
            ("Missing Docstring", 1),
            ("AI Review Finding", 1),
        ]
    );
    assert_eq!(report.issues[0].severity, Severity::Medium);
    assert_eq!(report.issues[0].category, Category::BestPractice);
    // 10 - 1.0 - 1.0 - 0.5 - 0.5 - 1.0 + 0.3 (try/except)
    assert!((report.quality_score - 6.3).abs() < 1e-9);
    assert_eq!(report.maintainability_score, 9.5);
}

#[test]
fn typed_except_is_not_flagged() {
    let code = "try:\n    run()\nexcept (ValueError, KeyError) as e:\n    log(e)\n";
    let report = analyze(code, "python", &[]);
    assert!(report.issues.iter().all(|i| i.title != "Bare Except Clause"));
}

#[test]
fn security_and_long_line_are_not_deduplicated() {
    let code = format!("password = \"{}\"", "s".repeat(90));
    let report = analyze(&code, "python", &[]);
    let titles: Vec<_> = report.issues.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Potential Hardcoded Secrets", "Line Too Long"]);
    assert!(report.issues.iter().all(|i| i.line_number == 1));
}

#[test]
fn duplicate_external_findings_are_counted_twice() {
    let dup = external(Severity::High, Category::Security);
    let report = analyze("x = 1", "python", &[dup.clone(), dup]);
    assert_eq!(report.issues.len(), 2);
    assert_eq!(report.security_summary.security_score, 6.0);
    assert_eq!(report.quality_score, 7.0);
}

#[test]
fn syntax_error_degrades_to_finding_and_scanners_still_run() {
    let code = "def broken(:\n    password = 'x'\n";
    let report = analyze(code, "python", &[]);
    let first = &report.issues[0];
    assert_eq!(first.title, "Syntax Error");
    assert_eq!(first.severity, Severity::High);
    assert_eq!(first.category, Category::Bug);
    assert_eq!(first.suggestion, "Fix the syntax error");
    assert!(first.description.starts_with("Syntax error: "));
    assert!(first.line_number >= 1 && first.line_number <= 3);
    assert!(report.issues.iter().any(|i| i.category == Category::Security));
    assert_eq!(
        report
            .issues
            .iter()
            .filter(|i| i.title == "Syntax Error")
            .count(),
        1
    );
}

#[test]
fn malformed_source_for_generic_language_has_no_syntax_error() {
    let report = analyze("def broken(:\n", "ruby", &[]);
    assert!(report.issues.iter().all(|i| i.title != "Syntax Error"));
}

#[test]
fn whitespace_only_source_has_zero_quality() {
    assert_eq!(analyze("   \n\n", "python", &[]).quality_score, 0.0);
    let report = analyze("   \n\t\n", "text", &[]);
    assert_eq!(report.quality_score, 0.0);
    assert!(report.issues.is_empty());
    assert_eq!(report.maintainability_score, 10.0);
}

#[test]
fn review_is_idempotent() {
    let code = "def f(x):\n    if x and x > 1:\n        return eval(x)\n    return open(base + x)\n";
    let first = serde_json::to_string(&analyze(code, "python", &[])).unwrap();
    let second = serde_json::to_string(&analyze(code, "python", &[])).unwrap();
    assert_eq!(first, second);
}

#[test]
fn advisory_suggestions_are_passed_through() {
    let advisory = Advisory::new(
        vec![external(Severity::Low, Category::Style)],
        vec!["Consider adding type hints".to_string()],
    );
    let report = CodeReviewer::global().review("x = 1", "python", Some(&advisory));
    assert_eq!(report.suggestions, vec!["Consider adding type hints".to_string()]);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.maintainability_score, 9.5);
}

#[test]
fn empty_source_still_merges_advisory() {
    let advisory = Advisory::failed("timeout");
    let report = CodeReviewer::global().review("", "python", Some(&advisory));
    assert!(report.issues.is_empty());
    assert_eq!(report.suggestions, vec!["AI review failed: timeout".to_string()]);
    assert_eq!(report.quality_score, 0.0);
}

#[test]
fn batch_matches_sequential_reviews() {
    let requests = vec![
        ReviewRequest::new("password = 'abc'", "python"),
        ReviewRequest::new("", "python"),
        ReviewRequest::new("eval(input)", "javascript")
            .with_advisory(Advisory::new(Vec::new(), vec!["ok".to_string()])),
    ];
    let reviewer = CodeReviewer::global();
    let batch = reviewer.review_batch(&requests);
    assert_eq!(batch.len(), 3);
    for (req, bundle) in requests.iter().zip(&batch) {
        let single = reviewer.review(&req.source, &req.language, req.advisory.as_ref());
        assert_eq!(&single, bundle);
    }
}

fn syntax_error(code: &str) -> Option<(usize, String)> {
    analyze(code, "python", &[])
        .issues
        .into_iter()
        .find(|i| i.title == "Syntax Error")
        .map(|i| (i.line_number, i.description))
}

#[test]
fn header_without_indented_body_is_a_syntax_error() {
    let expected = Some((2, "Syntax error: expected an indented block".to_string()));
    assert_eq!(syntax_error("def f():\nreturn 1"), expected);
    assert_eq!(syntax_error("if x:\npass"), expected);
}

#[test]
fn unexpected_indent_is_a_syntax_error() {
    assert_eq!(
        syntax_error("x = 1\n    y = 2\n"),
        Some((2, "Syntax error: unexpected indent".to_string()))
    );
}

#[test]
fn python2_statements_are_syntax_errors() {
    assert_eq!(
        syntax_error("print \"hello\"\n"),
        Some((1, "Syntax error: missing parentheses in call to 'print'".to_string()))
    );
    assert_eq!(
        syntax_error("exec \"x = 1\"\n"),
        Some((1, "Syntax error: missing parentheses in call to 'exec'".to_string()))
    );
}

#[test]
fn recovered_tree_is_not_visited() {
    let code = "def f():\nreturn 1\ntry:\n    pass\nexcept:\n    pass\n";
    let report = analyze(code, "python", &[]);
    assert_eq!(report.issues[0].title, "Syntax Error");
    assert!(report.issues.iter().all(|i| i.title != "Bare Except Clause"));
}

#[test]
fn valid_layouts_are_not_syntax_errors() {
    let code = concat!(
        "x = 1; y = 2\n",
        "if x: y = 3\n",
        "class Empty: pass\n",
        "def f():\n",
        "        # comment deeper than the body\n",
        "    return (1,\n",
        "  2)\n",
        "print(\"hello\")\n",
    );
    assert_eq!(syntax_error(code), None);
}

#[test]
fn empty_advisory_matches_no_advisory() {
    let code = "password = 'abc'\n";
    let reviewer = CodeReviewer::global();
    let with_empty = reviewer.review(code, "python", Some(&Advisory::default()));
    assert!(Advisory::default().is_empty());
    assert_eq!(with_empty, reviewer.review(code, "python", None));
}
