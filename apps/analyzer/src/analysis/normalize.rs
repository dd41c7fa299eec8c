//! Normalizes the backend's weakly-typed answer into a canonical report.
//!
//! The analysis service has no fixed response contract. Observed variants
//! return a bare array of ranked entries, an object wrapping that array
//! under different keys, or a single entry where an array was expected;
//! field spellings drift between snake_case and camelCase; scores arrive
//! as numbers or numeric strings; suitability arrives as a bool or as
//! "Yes"/"No". Normalization is therefore a best-effort mapper built from
//! named alias tables tried in priority order, never a strict decode.
//!
//! Failure here is always recoverable: the caller surfaces a generic
//! message and the warn-level log keeps the drift diagnosable.

use std::cmp::Ordering;

use serde_json::Value;
use tracing::warn;

use crate::errors::SchemaError;
use crate::models::document::Mode;
use crate::models::report::{
    AnalysisReport, BatchReport, CandidateReport, RankedCandidate, Recommendations,
};

// ────────────────────────────────────────────────────────────────────────────
// Field alias tables (observed backend spellings, tried in order)
// ────────────────────────────────────────────────────────────────────────────

const RANKING_FIELDS: &[&str] = &["ranking", "rankedCandidates", "ranked_candidates", "results"];
const FILE_NAME_FIELDS: &[&str] = &["fileName", "file_name", "filename"];
const SCORE_FIELDS: &[&str] = &["score", "comparison_score"];
const CANDIDATE_NAME_FIELDS: &[&str] = &["candidate_name", "candidateName", "name"];
const SUMMARY_FIELDS: &[&str] = &["summary"];
const STRONG_POINT_FIELDS: &[&str] = &["strong_points", "strongPoints"];
const WEAK_POINT_FIELDS: &[&str] = &["weak_points", "weakPoints"];
const SUGGESTION_FIELDS: &[&str] = &[
    "improvement_suggestions",
    "improvementSuggestions",
    "suggestions",
];
const SUITABILITY_FIELDS: &[&str] = &["suited_for_role", "suitable_for_role", "suitableForRole"];
const BEST_SUMMARY_FIELDS: &[&str] = &["best_summary", "bestSummary"];
const BEST_RESUME_FIELDS: &[&str] = &["bestResume", "best_resume"];
const ONLINE_COURSE_FIELDS: &[&str] = &["onlineCourses", "online_courses"];
const YOUTUBE_CHANNEL_FIELDS: &[&str] = &["youtubeChannels", "youtube_channels"];
const CAREER_GUIDE_FIELDS: &[&str] = &["careerGuides", "career_guides"];
const ALTERNATIVE_ROLE_FIELDS: &[&str] = &["alternativeRoles", "alternative_roles"];
const SKILL_FIELDS: &[&str] = &["skillsToLearn", "skills_to_learn"];

/// Normalizes a raw backend payload into the canonical report for `mode`.
pub fn normalize(mode: Mode, raw: &Value) -> Result<AnalysisReport, SchemaError> {
    match mode {
        Mode::Candidate => normalize_candidate(raw).map(AnalysisReport::Candidate),
        Mode::Company => normalize_batch(raw).map(AnalysisReport::Batch),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Candidate mode
// ────────────────────────────────────────────────────────────────────────────

fn normalize_candidate(raw: &Value) -> Result<CandidateReport, SchemaError> {
    if !raw.is_object() {
        warn!("candidate payload is not an object: {}", shape_of(raw));
        return Err(SchemaError(format!(
            "expected an object payload, got {}",
            shape_of(raw)
        )));
    }

    let recommendations = pluck(raw, &["recommendations"]);

    Ok(CandidateReport {
        candidate_name: string_field(raw, CANDIDATE_NAME_FIELDS).unwrap_or_default(),
        suitable_for_role: suitability(pluck(raw, SUITABILITY_FIELDS)),
        strong_points: string_list(pluck(raw, STRONG_POINT_FIELDS)),
        weak_points: string_list(pluck(raw, WEAK_POINT_FIELDS)),
        improvement_suggestions: string_list(pluck(raw, SUGGESTION_FIELDS)),
        recommendations: Recommendations {
            online_courses: nested_list(recommendations, ONLINE_COURSE_FIELDS),
            youtube_channels: nested_list(recommendations, YOUTUBE_CHANNEL_FIELDS),
            career_guides: nested_list(recommendations, CAREER_GUIDE_FIELDS),
            alternative_roles: nested_list(recommendations, ALTERNATIVE_ROLE_FIELDS),
            skills_to_learn: nested_list(recommendations, SKILL_FIELDS),
        },
    })
}

/// True iff the field is boolean true, or a string equal to "yes" ignoring
/// case. Anything else (missing, "No", junk) is not suitable.
fn suitability(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("yes"),
        _ => false,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Company mode
// ────────────────────────────────────────────────────────────────────────────

fn normalize_batch(raw: &Value) -> Result<BatchReport, SchemaError> {
    let entries = resolve_ranking_entries(raw)?;

    let mut ranking: Vec<RankedCandidate> = entries
        .iter()
        .filter_map(|entry| {
            if entry.is_object() {
                Some(ranked_entry(entry))
            } else {
                warn!("skipping non-object ranking entry: {}", shape_of(entry));
                None
            }
        })
        .collect();

    // Descending score; the sort is stable so ties keep their input order.
    // Backend-supplied rank/index values are ignored entirely.
    ranking.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    for (i, entry) in ranking.iter_mut().enumerate() {
        entry.rank = i + 1;
    }

    Ok(BatchReport {
        best_summary: best_summary(raw),
        ranking,
    })
}

/// Locates the ranking sequence inside whatever shape the backend chose:
/// 1. the payload itself is an array;
/// 2. an array under one of the known wrapper keys;
/// 3. a lone entry object (recognized by a file-name-shaped field),
///    wrapped as a single-element sequence.
fn resolve_ranking_entries(raw: &Value) -> Result<Vec<Value>, SchemaError> {
    if let Some(items) = raw.as_array() {
        return Ok(items.clone());
    }

    if let Some(items) = pluck(raw, RANKING_FIELDS).and_then(Value::as_array) {
        return Ok(items.clone());
    }

    if raw.is_object() && pluck(raw, FILE_NAME_FIELDS).is_some() {
        return Ok(vec![raw.clone()]);
    }

    warn!("no ranking data in batch payload: {}", shape_of(raw));
    Err(SchemaError("no ranking data".to_string()))
}

fn ranked_entry(entry: &Value) -> RankedCandidate {
    RankedCandidate {
        rank: 0, // reassigned after sorting
        candidate_name: string_field(entry, CANDIDATE_NAME_FIELDS)
            .unwrap_or_else(|| "Unnamed".to_string()),
        file_name: string_field(entry, FILE_NAME_FIELDS).unwrap_or_default(),
        score: score(pluck(entry, SCORE_FIELDS)),
        summary: string_field(entry, SUMMARY_FIELDS).unwrap_or_default(),
        strong_points: string_list(pluck(entry, STRONG_POINT_FIELDS)),
        improvement_suggestions: string_list(pluck(entry, SUGGESTION_FIELDS)),
    }
}

/// Score as number or numeric string, clamped to [0, 100]. Anything
/// unusable scores zero rather than failing the whole report.
fn score(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() => n.clamp(0.0, 100.0),
        _ => {
            if value.is_some() {
                warn!("unusable score value: {:?}", value);
            }
            0.0
        }
    }
}

/// `best_summary` as a plain string, or the name nested under the
/// `bestResume` object shape one variant returns.
fn best_summary(raw: &Value) -> Option<String> {
    string_field(raw, BEST_SUMMARY_FIELDS).or_else(|| {
        pluck(raw, BEST_RESUME_FIELDS).and_then(|best| string_field(best, CANDIDATE_NAME_FIELDS))
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction helpers
// ────────────────────────────────────────────────────────────────────────────

/// First non-null value under any of the aliases. `None` unless `value`
/// is an object.
fn pluck<'a>(value: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    let obj = value.as_object()?;
    aliases
        .iter()
        .find_map(|key| obj.get(*key))
        .filter(|v| !v.is_null())
}

/// Non-empty trimmed string under any of the aliases.
fn string_field(value: &Value, aliases: &[&str]) -> Option<String> {
    pluck(value, aliases)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Array-or-wrap-or-empty: an array keeps its string-able items, a
/// non-empty scalar becomes a one-element sequence, everything else is
/// an empty sequence.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_string).collect(),
        Some(scalar) => scalar_string(scalar).into_iter().collect(),
        None => Vec::new(),
    }
}

fn nested_list(parent: Option<&Value>, aliases: &[&str]) -> Vec<String> {
    string_list(parent.and_then(|p| pluck(p, aliases)))
}

/// Strings (non-blank) and numbers render as list items; objects, nulls,
/// and booleans are dropped.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Short shape description for logs and schema errors; never payload data.
fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
