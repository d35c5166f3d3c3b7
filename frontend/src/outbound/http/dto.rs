//! DTOs for decoding the recommendation backend's JSON responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into domain
//! read models in one pass. Unknown fields are ignored.

use serde::Deserialize;

use crate::domain::{HistoryEntry, Recommendation, RecommendationSet, SubmissionHistory};

/// Ratings come out of a dataframe on the backend and are often serialised
/// as floats (`1200.0`).
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum RatingDto {
    Integer(i64),
    Float(f64),
}

impl RatingDto {
    fn into_rating(self, field: &str) -> Result<i64, String> {
        match self {
            Self::Integer(value) => Ok(value),
            Self::Float(value) => float_rating(value)
                .ok_or_else(|| format!("{field} is not a representable rating: {value}")),
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is rounded and range-checked before the cast"
)]
fn float_rating(value: f64) -> Option<i64> {
    const BOUND: f64 = 9_007_199_254_740_992.0; // 2^53
    let rounded = value.round();
    (rounded.is_finite() && (-BOUND..=BOUND).contains(&rounded)).then_some(rounded as i64)
}

#[derive(Debug, Deserialize)]
pub(super) struct RecommendResponseDto {
    recommendations: Vec<RecommendationDto>,
    #[serde(default)]
    mode_rating: Option<RatingDto>,
    #[serde(default)]
    strong_topics: Vec<String>,
    #[serde(default)]
    weak_topics: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RecommendationDto {
    name: String,
    rating: RatingDto,
    #[serde(default)]
    tags: Vec<String>,
}

impl RecommendResponseDto {
    pub(super) fn into_domain(self) -> Result<RecommendationSet, String> {
        let recommendations = self
            .recommendations
            .into_iter()
            .map(RecommendationDto::into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        let mode_rating = self
            .mode_rating
            .map(|rating| rating.into_rating("mode_rating"))
            .transpose()?
            .unwrap_or_default();
        Ok(RecommendationSet {
            recommendations,
            mode_rating,
            strong_topics: self.strong_topics,
            weak_topics: self.weak_topics,
        })
    }
}

impl RecommendationDto {
    fn into_domain(self) -> Result<Recommendation, String> {
        let rating = self
            .rating
            .into_rating(&format!("rating of problem `{}`", self.name))?;
        Ok(Recommendation {
            name: self.name,
            rating,
            tags: self.tags,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct HistoryResponseDto {
    history: Vec<HistoryEntryDto>,
}

#[derive(Debug, Deserialize)]
struct HistoryEntryDto {
    name: String,
    verdict: String,
}

impl HistoryResponseDto {
    pub(super) fn into_domain(self) -> SubmissionHistory {
        SubmissionHistory {
            history: self
                .history
                .into_iter()
                .map(|entry| HistoryEntry {
                    name: entry.name,
                    verdict: entry.verdict,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn decode_recommend(body: &str) -> Result<RecommendationSet, String> {
        serde_json::from_str::<RecommendResponseDto>(body)
            .map_err(|error| error.to_string())
            .and_then(RecommendResponseDto::into_domain)
    }

    #[rstest]
    #[case::integer("1200", 1200)]
    #[case::integral_float("1200.0", 1200)]
    #[case::rounds_up("1499.6", 1500)]
    #[case::negative("-3", -3)]
    fn accepts_integer_and_float_ratings(#[case] raw: &str, #[case] expected: i64) {
        let body = format!(r#"{{"recommendations":[{{"name":"A","rating":{raw},"tags":["dp"]}}]}}"#);
        let set = decode_recommend(&body).expect("payload should decode");
        assert_eq!(set.recommendations.first().map(|p| p.rating), Some(expected));
    }

    #[test]
    fn rejects_out_of_range_float_rating() {
        let body = r#"{"recommendations":[{"name":"A","rating":1e300,"tags":[]}]}"#;
        let error = decode_recommend(body).expect_err("rating should be rejected");
        assert!(error.contains("rating of problem `A`"), "unexpected error: {error}");
    }

    #[test]
    fn profile_fields_default_when_absent() {
        let set = decode_recommend(r#"{"recommendations":[]}"#).expect("payload should decode");
        assert_eq!(set, RecommendationSet::default());
    }

    #[test]
    fn decodes_profile_fields_and_ignores_unknown_ones() {
        let body = r#"{
            "recommendations": [
                {"name": "B", "rating": 1600, "tags": ["graphs", "dfs and similar"], "contestId": 1}
            ],
            "mode_rating": 1500.0,
            "strong_topics": ["math"],
            "weak_topics": ["graphs"],
            "extra": true
        }"#;
        let set = decode_recommend(body).expect("payload should decode");
        assert_eq!(set.mode_rating, 1500);
        assert_eq!(set.strong_topics, vec!["math".to_owned()]);
        assert_eq!(set.weak_topics, vec!["graphs".to_owned()]);
        assert_eq!(
            set.recommendations.first().map(Recommendation::summary_line),
            Some("B - Rating: 1600 - Tags: graphs, dfs and similar".to_owned())
        );
    }

    #[test]
    fn missing_recommendations_field_is_an_error() {
        assert!(decode_recommend(r#"{"mode_rating": 1200}"#).is_err());
    }

    #[test]
    fn decodes_history_in_backend_order() {
        let body = r#"{"history":[
            {"name":"Watermelon","verdict":"OK","rating":800},
            {"name":"Theatre Square","verdict":"TIME_LIMIT_EXCEEDED"}
        ]}"#;
        let history = serde_json::from_str::<HistoryResponseDto>(body)
            .expect("payload should decode")
            .into_domain();
        let names: Vec<_> = history.history.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Watermelon", "Theatre Square"]);
    }
}
