//! Survey response extraction.
//!
//! Turns a question plus the loaded response corpus into a [`Histogram`]
//! and from there into chart or table block payloads that the editor can
//! insert. A question with no matching answers yields an empty histogram.
//!
//! # Example
//!
//! ```
//! use reportdoc::extract::{extract_histogram, Question, ResponseCorpus, ResponseRecord, SurveyScope};
//! use serde_json::json;
//!
//! let mut corpus = ResponseCorpus::new();
//! corpus.insert("employee", vec![
//!     ResponseRecord::new(json!({"Q1": "Yes"})),
//!     ResponseRecord::new(json!({"Q1": "No"})),
//!     ResponseRecord::new(json!({"Q1": "Yes"})),
//! ]);
//!
//! let question = Question::new(1, "Q1");
//! let hist = extract_histogram(&question, &corpus, &SurveyScope::only("employee"));
//! assert_eq!(hist.count_of("Yes"), Some(2));
//! ```

mod histogram;
mod matcher;
mod options;
mod question;

pub use histogram::{Histogram, HistogramEntry, NumericSummary, TABLE_HEADERS};
pub use matcher::{answer_label, resolve_answer, MatchTier, YES_NO_FIELD};
pub use options::ExtractOptions;
pub use question::{
    find_question, Question, QuestionId, ResponseCorpus, ResponseRecord, SurveyScope,
};

use crate::model::{BlockContent, ChartPayload, ChartType, TablePayload};

/// Build the answer histogram for `question` over the records in `scope`.
pub fn extract_histogram(
    question: &Question,
    corpus: &ResponseCorpus,
    scope: &SurveyScope,
) -> Histogram {
    extract_histogram_with_options(question, corpus, scope, &ExtractOptions::default())
}

/// Build the answer histogram with custom options.
pub fn extract_histogram_with_options(
    question: &Question,
    corpus: &ResponseCorpus,
    scope: &SurveyScope,
    options: &ExtractOptions,
) -> Histogram {
    let records = corpus.records(scope);
    histogram_from_records(question, &records, options)
}

/// Build the answer histogram over an explicit record list.
pub fn histogram_from_records(
    question: &Question,
    records: &[&ResponseRecord],
    options: &ExtractOptions,
) -> Histogram {
    let resolved = resolve_all(question, records, options);

    let mut misses = 0usize;
    let mut tier_hits = [0usize; 6];
    let labels = resolved.into_iter().filter_map(|hit| match hit {
        Some((tier, label)) => {
            tier_hits[tier as usize] += 1;
            label
        }
        None => {
            misses += 1;
            None
        }
    });
    let histogram = Histogram::from_labels(labels);

    log::debug!(
        "extract: question {} over {} record(s): {} label(s), tier hits {:?}, {} miss(es)",
        question.id,
        records.len(),
        histogram.len(),
        tier_hits,
        misses
    );
    histogram
}

type Resolved = Option<(MatchTier, Option<String>)>;

fn resolve_one(question: &Question, record: &ResponseRecord) -> Resolved {
    resolve_answer(question, &record.answers).map(|(tier, value)| (tier, answer_label(value)))
}

#[cfg(feature = "parallel")]
fn resolve_all(
    question: &Question,
    records: &[&ResponseRecord],
    options: &ExtractOptions,
) -> Vec<Resolved> {
    use rayon::prelude::*;

    if options.use_parallel(records.len()) {
        return records
            .par_iter()
            .map(|record| resolve_one(question, record))
            .collect();
    }
    records.iter().map(|record| resolve_one(question, record)).collect()
}

#[cfg(not(feature = "parallel"))]
fn resolve_all(
    question: &Question,
    records: &[&ResponseRecord],
    _options: &ExtractOptions,
) -> Vec<Resolved> {
    records.iter().map(|record| resolve_one(question, record)).collect()
}

/// Chart block payload for a question's histogram (encounter order).
pub fn chart_block(question: &Question, histogram: &Histogram, chart_type: ChartType) -> BlockContent {
    BlockContent::Chart(ChartPayload::new(
        chart_type,
        question.text.clone(),
        histogram.to_chart_data(),
    ))
}

/// Table block payload for a question's histogram (sorted by count).
pub fn table_block(question: &Question, histogram: &Histogram) -> BlockContent {
    BlockContent::Table(TablePayload::new(histogram.to_table()).with_title(question.text.clone()))
}
