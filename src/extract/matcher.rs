//! Answer lookup across historical answer-key encodings.
//!
//! Response payloads were written by several template generations, each
//! keying answers differently. The lookup tries a fixed sequence of tiers and
//! stops at the first one that yields a non-null value. The order matters for
//! records carrying more than one encoding and must not be rearranged.

use super::question::{number_key, Question};
use serde_json::{Map, Value};

/// Sub-field preferred when an answer is a structured object.
pub const YES_NO_FIELD: &str = "YES/NO";

/// The lookup tier that produced an answer, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    /// Key equals the question text
    ExactText,
    /// Key equals the question text ignoring case
    CaseInsensitiveText,
    /// Key equals the question id converted to a number
    NumericId,
    /// Key equals the question id as a string
    StringId,
    /// Key equals the 1-based template position (`order + 1`)
    Position,
    /// Answers are a sequence; an entry names the question
    SequenceEntry,
}

/// Locate the raw answer value for `question` in one answers payload.
///
/// Returns `None` when no tier matches or the payload is neither a map nor
/// a sequence.
pub fn resolve_answer<'a>(question: &Question, answers: &'a Value) -> Option<(MatchTier, &'a Value)> {
    match answers {
        Value::Object(map) => resolve_in_map(question, map),
        Value::Array(entries) => resolve_in_sequence(question, entries)
            .map(|value| (MatchTier::SequenceEntry, value)),
        Value::Null => None,
        other => {
            log::warn!(
                "answers payload is neither map nor sequence ({}), skipping",
                json_kind(other)
            );
            None
        }
    }
}

fn resolve_in_map<'a>(question: &Question, map: &'a Map<String, Value>) -> Option<(MatchTier, &'a Value)> {
    if let Some(v) = present(map.get(&question.text)) {
        return Some((MatchTier::ExactText, v));
    }

    let wanted = question.text.to_lowercase();
    if let Some(v) = present(
        map.iter()
            .find(|(k, _)| k.to_lowercase() == wanted)
            .map(|(_, v)| v),
    ) {
        return Some((MatchTier::CaseInsensitiveText, v));
    }

    if let Some(key) = question.id.numeric_key() {
        if let Some(v) = present(map.get(&key)) {
            return Some((MatchTier::NumericId, v));
        }
    }

    if let Some(v) = present(map.get(&question.id.key())) {
        return Some((MatchTier::StringId, v));
    }

    if let Some(position) = question.order.and_then(|order| order.checked_add(1)) {
        if let Some(v) = present(map.get(&position.to_string())) {
            return Some((MatchTier::Position, v));
        }
    }

    None
}

fn resolve_in_sequence<'a>(question: &Question, entries: &'a [Value]) -> Option<&'a Value> {
    let wanted = question.text.to_lowercase();
    let id_key = question.id.key();
    let id_numeric = question.id.numeric_key();

    entries.iter().filter_map(Value::as_object).find_map(|entry| {
        let by_id = entry.get("question_id").and_then(key_of).is_some_and(|k| {
            k == id_key || id_numeric.as_deref() == Some(k.as_str())
        });
        let by_text = entry
            .get("question_text")
            .and_then(Value::as_str)
            .is_some_and(|t| t == question.text);
        let by_label = entry
            .get("question")
            .and_then(Value::as_str)
            .is_some_and(|t| t.to_lowercase() == wanted);

        if by_id || by_text || by_label {
            present(entry.get("answer")).or_else(|| present(entry.get("value")))
        } else {
            None
        }
    })
}

/// Turn a resolved answer into a histogram label.
///
/// Objects prefer their `YES/NO` field and otherwise serialize to JSON;
/// sequences join their elements with commas. Null, blank strings and empty
/// containers produce no label.
pub fn answer_label(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => (!s.trim().is_empty()).then(|| s.clone()),
        Value::Number(n) => Some(number_label(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            if items.is_empty() {
                return None;
            }
            let parts: Vec<String> = items
                .iter()
                .map(|item| match item {
                    Value::Null => String::new(),
                    Value::String(s) => s.clone(),
                    Value::Number(n) => number_label(n),
                    other => other.to_string(),
                })
                .collect();
            Some(parts.join(","))
        }
        Value::Object(map) => {
            if let Some(yes_no) = present(map.get(YES_NO_FIELD)) {
                return answer_label(yes_no);
            }
            if map.is_empty() {
                return None;
            }
            Some(Value::Object(map.clone()).to_string())
        }
    }
}

/// Integral floats label like integers, so `4` and `4.0` share a category.
fn number_label(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() => number_key(f),
        _ => n.to_string(),
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn key_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => n.as_f64().map(number_key),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
