//! Integration tests for survey response extraction.

use reportdoc::extract::{
    chart_block, find_question, resolve_answer, table_block, ExtractOptions, MatchTier,
};
use reportdoc::{
    extract_histogram, BlockContent, BlockKind, Cell, ChartType, Editor, Error, Question,
    ResponseCorpus, ResponseRecord, SurveyScope,
};
use serde_json::json;

fn corpus_of(survey: &str, answers: Vec<serde_json::Value>) -> ResponseCorpus {
    let mut corpus = ResponseCorpus::new();
    corpus.insert(survey, answers.into_iter().map(ResponseRecord::new).collect());
    corpus
}

#[test]
fn test_yes_no_histogram_and_table() {
    let corpus = corpus_of(
        "employee",
        vec![
            json!({"Q1": "Yes"}),
            json!({"Q1": "No"}),
            json!({"Q1": "Yes"}),
        ],
    );
    let question = Question::new(1, "Q1");
    let hist = extract_histogram(&question, &corpus, &SurveyScope::All);

    let entries: Vec<(&str, u64)> = hist
        .entries()
        .iter()
        .map(|e| (e.name.as_str(), e.count))
        .collect();
    assert_eq!(entries, vec![("Yes", 2), ("No", 1)]);

    let table = hist.to_table();
    assert_eq!(table.headers, vec!["Response", "Count", "Percentage"]);
    assert_eq!(
        table.rows,
        vec![
            vec![Cell::text("Yes"), Cell::Int(2), Cell::text("66.7%")],
            vec![Cell::text("No"), Cell::Int(1), Cell::text("33.3%")],
        ]
    );
    assert_eq!(
        serde_json::to_value(&table.rows).unwrap(),
        json!([["Yes", 2, "66.7%"], ["No", 1, "33.3%"]])
    );
}

#[test]
fn test_text_key_beats_id_key() {
    let question = Question::new(7, "How satisfied are you?");
    let answers = json!({"7": "Low", "How satisfied are you?": "High"});

    let (tier, value) = resolve_answer(&question, &answers).unwrap();
    assert_eq!(tier, MatchTier::ExactText);
    assert_eq!(value, &json!("High"));

    let corpus = corpus_of("employee", vec![answers.clone()]);
    let hist = extract_histogram(&question, &corpus, &SurveyScope::All);
    assert_eq!(hist.count_of("High"), Some(1));
    assert_eq!(hist.count_of("Low"), None);
}

#[test]
fn test_tier_cascade_order() {
    let question = Question::new("12", "Team size").with_order(4);

    let cases = [
        (json!({"team size": "a"}), MatchTier::CaseInsensitiveText),
        (json!({"12": "b"}), MatchTier::NumericId),
        (json!({"5": "c"}), MatchTier::Position),
        (
            json!([{"question_id": 12, "answer": "d"}]),
            MatchTier::SequenceEntry,
        ),
    ];
    for (answers, expected) in cases {
        let (tier, _) = resolve_answer(&question, &answers).unwrap();
        assert_eq!(tier, expected, "answers: {}", answers);
    }

    let padded = Question::new("x7", "Unrelated");
    let (tier, _) = resolve_answer(&padded, &json!({"x7": "e"})).unwrap();
    assert_eq!(tier, MatchTier::StringId);
}

#[test]
fn test_sequence_answers_fall_back_to_value() {
    let question = Question::new(3, "Department");
    let answers = json!([
        {"question": "other", "answer": "skip"},
        {"question": "DEPARTMENT", "value": "Sales"}
    ]);
    let (_, value) = resolve_answer(&question, &answers).unwrap();
    assert_eq!(value, &json!("Sales"));
}

#[test]
fn test_structured_and_list_answers() {
    let question = Question::new(1, "Q");
    let corpus = corpus_of(
        "employee",
        vec![
            json!({"Q": {"YES/NO": "Yes", "comment": "fine"}}),
            json!({"Q": ["a", "b"]}),
            json!({"Q": []}),
            json!({"Q": "   "}),
        ],
    );
    let hist = extract_histogram(&question, &corpus, &SurveyScope::All);
    assert_eq!(hist.count_of("Yes"), Some(1));
    assert_eq!(hist.count_of("a,b"), Some(1));
    assert_eq!(hist.total(), 2);
}

#[test]
fn test_survey_scope_limits_records() {
    let mut corpus = corpus_of("employee", vec![json!({"Q": "x"})]);
    corpus.insert("manager", vec![ResponseRecord::new(json!({"Q": "y"}))]);
    let question = Question::new(1, "Q");

    let employee = extract_histogram(&question, &corpus, &SurveyScope::only("employee"));
    assert_eq!(employee.count_of("x"), Some(1));
    assert_eq!(employee.count_of("y"), None);

    let all = extract_histogram(&question, &corpus, &SurveyScope::All);
    assert_eq!(all.total(), 2);

    let missing = extract_histogram(&question, &corpus, &SurveyScope::only("vendor"));
    assert!(missing.is_empty());
    assert!(missing.to_table().rows.is_empty());
}

#[test]
fn test_find_question() {
    let questions = vec![Question::new(1, "A"), Question::new("007", "B")];
    assert_eq!(find_question(&questions, "7").unwrap().text, "B");
    assert!(matches!(
        find_question(&questions, "9"),
        Err(Error::QuestionNotFound(_))
    ));
}

#[test]
fn test_numeric_question_summary() {
    let question = Question::new(1, "Score").numeric();
    let corpus = corpus_of(
        "employee",
        vec![json!({"Score": 2}), json!({"Score": 4}), json!({"Score": 4})],
    );
    let hist = extract_histogram(&question, &corpus, &SurveyScope::All);
    let summary = hist.numeric_summary().unwrap();
    assert_eq!(summary.count, 3);
    assert!((summary.mean - 10.0 / 3.0).abs() < 1e-9);
    assert_eq!(summary.min, 2.0);
    assert_eq!(summary.max, 4.0);
}

#[test]
fn test_integral_float_answers_share_a_category() {
    let question = Question::new(5, "Score");
    let corpus = ResponseCorpus::from_json(
        r#"{"employee": [
            {"answers": {"Score": 4}},
            {"answers": {"Score": 4.0}},
            {"answers": {"Score": 2.5}}
        ]}"#,
    )
    .unwrap();
    let hist = extract_histogram(&question, &corpus, &SurveyScope::All);

    assert_eq!(hist.count_of("4"), Some(2));
    assert_eq!(hist.count_of("4.0"), None);
    assert_eq!(hist.count_of("2.5"), Some(1));
    assert_eq!(hist.entries().len(), 2);
    assert_eq!(hist.numeric_summary().unwrap().count, 3);
}

#[test]
fn test_max_order_question_does_not_panic() {
    let question: Question =
        serde_json::from_value(json!({"id": "x", "text": "nope", "order": i64::MAX})).unwrap();
    let corpus = corpus_of(
        "employee",
        vec![json!({"x": "hit"}), json!({"-9223372036854775808": "wrapped"})],
    );
    let hist = extract_histogram(&question, &corpus, &SurveyScope::All);
    assert_eq!(hist.count_of("hit"), Some(1));
    assert_eq!(hist.count_of("wrapped"), None);
}

#[test]
fn test_extracted_blocks_insert_into_editor() {
    let corpus = corpus_of("employee", vec![json!({"Q1": "Yes"}), json!({"Q1": "No"})]);
    let question = Question::new(1, "Q1");
    let hist = extract_histogram(&question, &corpus, &SurveyScope::All);

    let mut editor = Editor::default();
    let chart = editor.insert_content(chart_block(&question, &hist, ChartType::Pie), None);
    let table = editor.insert_content(table_block(&question, &hist), Some(&chart));

    let doc = editor.document();
    assert_eq!(doc.block_count(), 4);
    assert_eq!(doc.get(&chart).unwrap().kind(), BlockKind::Chart);
    assert_eq!(doc.blocks[3].id, table);
    match &doc.blocks[2].content {
        BlockContent::Chart(c) => {
            assert_eq!(c.chart_type, ChartType::Pie);
            assert_eq!(c.total(), 2);
        }
        other => panic!("expected chart, got {:?}", other.kind()),
    }
}

#[test]
fn test_corpus_from_json_keeps_survey_order() {
    let corpus = ResponseCorpus::from_json(
        r#"{"manager": [{"answers": {"Q": "m"}}], "employee": [{"id": 1, "answers": {"Q": "e"}, "submittedAt": "2024-01-01"}]}"#,
    )
    .unwrap();
    assert_eq!(corpus.survey_types().collect::<Vec<_>>(), vec!["manager", "employee"]);
    assert_eq!(corpus.len(), 2);

    let records = corpus.records(&SurveyScope::only("employee"));
    assert_eq!(records[0].id, Some(json!(1)));
    assert!(records[0].extra.contains_key("submittedAt"));
}

#[test]
fn test_sequential_option_matches_default() {
    let answers = (0..300).map(|i| json!({"Q": format!("v{}", i % 4)})).collect();
    let corpus = corpus_of("employee", answers);
    let question = Question::new(1, "Q");

    let default = extract_histogram(&question, &corpus, &SurveyScope::All);
    let sequential = reportdoc::extract::extract_histogram_with_options(
        &question,
        &corpus,
        &SurveyScope::All,
        &ExtractOptions::new().sequential(),
    );
    assert_eq!(default, sequential);
    assert_eq!(default.entries()[0].name, "v0");
}
