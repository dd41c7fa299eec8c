//! Canonical result models, independent of whatever shape the backend
//! actually returned. The rendering surface consumes these and nothing else.

use serde::{Deserialize, Serialize};

/// Learning-path recommendations for a candidate. Every field defaults to
/// empty after normalization, never null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    #[serde(default)]
    pub online_courses: Vec<String>,
    #[serde(default)]
    pub youtube_channels: Vec<String>,
    #[serde(default)]
    pub career_guides: Vec<String>,
    #[serde(default)]
    pub alternative_roles: Vec<String>,
    #[serde(default)]
    pub skills_to_learn: Vec<String>,
}

/// Canonical single-candidate evaluation (Candidate mode).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateReport {
    #[serde(default)]
    pub candidate_name: String,
    pub suitable_for_role: bool,
    #[serde(default)]
    pub strong_points: Vec<String>,
    #[serde(default)]
    pub weak_points: Vec<String>,
    #[serde(default)]
    pub improvement_suggestions: Vec<String>,
    #[serde(default)]
    pub recommendations: Recommendations,
}

/// One entry of the canonical ranking (Company mode).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    /// 1-based, contiguous, always recomputed locally from the score order.
    pub rank: usize,
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub file_name: String,
    /// Clamped to [0, 100].
    pub score: f64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub strong_points: Vec<String>,
    #[serde(default)]
    pub improvement_suggestions: Vec<String>,
}

/// Canonical ranked batch comparison (Company mode). `ranking` is sorted by
/// descending score with ties keeping their original relative order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_summary: Option<String>,
    #[serde(default)]
    pub ranking: Vec<RankedCandidate>,
}

/// The normalized outcome of one analysis attempt, whichever mode ran.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisReport {
    Candidate(CandidateReport),
    Batch(BatchReport),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_report_serializes_camel_case() {
        let report = CandidateReport {
            candidate_name: "Ada".to_string(),
            suitable_for_role: true,
            strong_points: vec!["Systems design".to_string()],
            ..Default::default()
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["candidateName"], "Ada");
        assert_eq!(json["suitableForRole"], true);
        assert_eq!(json["strongPoints"][0], "Systems design");
        // empty sequences serialize as [], never null
        assert!(json["weakPoints"].as_array().unwrap().is_empty());
        assert!(json["recommendations"]["onlineCourses"]
            .as_array()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_batch_report_omits_absent_best_summary() {
        let report = BatchReport::default();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("bestSummary").is_none());
    }

    #[test]
    fn test_ranked_candidate_round_trips() {
        let entry = RankedCandidate {
            rank: 1,
            candidate_name: "Unnamed".to_string(),
            file_name: "a.pdf".to_string(),
            score: 87.0,
            summary: String::new(),
            strong_points: vec![],
            improvement_suggestions: vec![],
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: RankedCandidate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
