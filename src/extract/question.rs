//! Question descriptors and survey response records.
//!
//! Both are read-only inputs owned by the caller; extraction never mutates them.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Question identifier as delivered by the backend (number or string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    /// Numeric id
    Int(i64),
    /// String id
    Text(String),
}

impl QuestionId {
    /// The id converted to a number and back to a key, if it is numeric.
    ///
    /// `"007"` and `7` both yield `"7"`; non-numeric text yields `None`.
    pub fn numeric_key(&self) -> Option<String> {
        match self {
            QuestionId::Int(n) => Some(n.to_string()),
            QuestionId::Text(s) => {
                let n: f64 = s.trim().parse().ok()?;
                n.is_finite().then(|| number_key(n))
            }
        }
    }

    /// The id as a key string, verbatim.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Int(n) => write!(f, "{}", n),
            QuestionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for QuestionId {
    fn from(n: i64) -> Self {
        QuestionId::Int(n)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        QuestionId::Text(s.to_string())
    }
}

/// Render a number the way it appears as an object key (`2.0` -> `"2"`).
pub(crate) fn number_key(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// A survey question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Question id
    pub id: QuestionId,

    /// Question text, also the preferred answer key
    pub text: String,

    /// Zero-based position within the survey template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,

    /// Whether answers are numeric
    #[serde(default)]
    pub is_numeric: bool,

    /// Section heading the question belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl Question {
    /// Create a question with only id and text.
    pub fn new(id: impl Into<QuestionId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            order: None,
            is_numeric: false,
            section: None,
        }
    }

    /// Set the template position.
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    /// Mark the question as numeric.
    pub fn numeric(mut self) -> Self {
        self.is_numeric = true;
        self
    }

    /// Set the section.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Check whether `id` names this question (verbatim or numerically).
    pub fn matches_id(&self, id: &str) -> bool {
        if self.id.key() == id {
            return true;
        }
        match (self.id.numeric_key(), QuestionId::from(id).numeric_key()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// Look up a question by id string.
pub fn find_question<'a>(questions: &'a [Question], id: &str) -> Result<&'a Question> {
    questions
        .iter()
        .find(|q| q.matches_id(id))
        .ok_or_else(|| Error::QuestionNotFound(id.to_string()))
}

/// One submitted survey response.
///
/// `answers` is kept as raw JSON: depending on the template generation it is
/// either a map keyed by question text/id/position or a sequence of
/// `{question_id, question_text, question, answer}` entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Response id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// Raw answers payload
    #[serde(default)]
    pub answers: Value,

    /// Any other fields of the record
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ResponseRecord {
    /// Create a record from an answers payload.
    pub fn new(answers: Value) -> Self {
        Self {
            answers,
            ..Default::default()
        }
    }
}

/// Which response records take part in an extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SurveyScope {
    /// Every loaded survey type
    #[default]
    All,
    /// Only the named survey type
    Only(String),
}

impl SurveyScope {
    /// Scope limited to one survey type.
    pub fn only(survey_type: impl Into<String>) -> Self {
        SurveyScope::Only(survey_type.into())
    }
}

/// Loaded responses, grouped by survey type in load order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseCorpus {
    by_survey: IndexMap<String, Vec<ResponseRecord>>,
}

impl ResponseCorpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a corpus from a JSON object of `survey type -> [record]`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add records for a survey type (appending to existing ones).
    pub fn insert(&mut self, survey_type: impl Into<String>, records: Vec<ResponseRecord>) {
        self.by_survey
            .entry(survey_type.into())
            .or_default()
            .extend(records);
    }

    /// Survey types in load order.
    pub fn survey_types(&self) -> impl Iterator<Item = &str> {
        self.by_survey.keys().map(String::as_str)
    }

    /// Check whether responses exist for a survey type.
    pub fn contains(&self, survey_type: &str) -> bool {
        self.by_survey.contains_key(survey_type)
    }

    /// Records within `scope`, in load order. Unknown survey types are empty.
    pub fn records(&self, scope: &SurveyScope) -> Vec<&ResponseRecord> {
        match scope {
            SurveyScope::All => self.by_survey.values().flatten().collect(),
            SurveyScope::Only(survey_type) => match self.by_survey.get(survey_type) {
                Some(records) => records.iter().collect(),
                None => {
                    log::debug!("no responses loaded for survey type {}", survey_type);
                    Vec::new()
                }
            },
        }
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.by_survey.values().map(Vec::len).sum()
    }

    /// Check if no records are loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
