//! Read models returned by the recommendation backend.
//!
//! Sequences keep the order the backend produced; nothing here sorts.

/// One recommended problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    /// Problem title.
    pub name: String,
    /// Difficulty rating.
    pub rating: i64,
    /// Topic tags in backend order.
    pub tags: Vec<String>,
}

impl Recommendation {
    /// Render the problem as a single list line.
    ///
    /// # Examples
    /// ```
    /// use recommender_frontend::domain::Recommendation;
    ///
    /// let problem = Recommendation {
    ///     name: "A".to_owned(),
    ///     rating: 1200,
    ///     tags: vec!["dp".to_owned()],
    /// };
    /// assert_eq!(problem.summary_line(), "A - Rating: 1200 - Tags: dp");
    /// ```
    pub fn summary_line(&self) -> String {
        format!(
            "{} - Rating: {} - Tags: {}",
            self.name,
            self.rating,
            self.tags.join(", ")
        )
    }
}

/// Payload of a successful recommend call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecommendationSet {
    /// Recommended problems in backend order.
    pub recommendations: Vec<Recommendation>,
    /// Most frequent rating among accepted submissions, `0` when unknown.
    pub mode_rating: i64,
    /// Tags the user solves reliably.
    pub strong_topics: Vec<String>,
    /// Tags the user struggles with.
    pub weak_topics: Vec<String>,
}

/// One past submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Problem title.
    pub name: String,
    /// Judge verdict label, e.g. `OK` or `WRONG_ANSWER`.
    pub verdict: String,
}

impl HistoryEntry {
    /// Render the submission as a single list line.
    pub fn summary_line(&self) -> String {
        format!("{} - Verdict: {}", self.name, self.verdict)
    }
}

/// Payload of a successful history call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionHistory {
    /// Submissions in backend order.
    pub history: Vec<HistoryEntry>,
}
