//! Recommendations page controller.

use async_trait::async_trait;

use super::{LoadOutcome, NO_IDENTITY_MESSAGE, PageController, PageFetch, PageView, ViewLine};
use crate::domain::{
    FetchError, FetchState, IdentityStore, Location, RecommendationClient, RecommendationSet,
    UserHandle,
};

const LOADING_MESSAGE: &str = "Loading recommendations...";
const SERVER_ERROR_MESSAGE: &str = "Error fetching recommendations.";

fn describe(error: &FetchError) -> String {
    match error {
        FetchError::ServerError { .. } => SERVER_ERROR_MESSAGE.to_owned(),
        other => other.message().to_owned(),
    }
}

/// Loads and renders the recommendations for the committed handle.
pub struct RecommendationsController {
    client: RecommendationClient,
    fetch: PageFetch<RecommendationSet>,
}

impl RecommendationsController {
    /// Mount the page, snapshotting `identity`.
    pub fn mount(client: RecommendationClient, identity: &IdentityStore) -> Self {
        Self {
            client,
            fetch: PageFetch::mount(identity),
        }
    }

    /// Handle captured at mount.
    pub fn handle(&self) -> Option<&UserHandle> {
        self.fetch.handle()
    }

    /// Fetch lifecycle for this mount.
    pub fn state(&self) -> &FetchState<RecommendationSet> {
        self.fetch.state()
    }

    fn push_profile(view: &mut PageView, set: &RecommendationSet) {
        if set.mode_rating != 0 {
            view.push(ViewLine::Text(format!("Target rating: {}", set.mode_rating)));
        }
        if !set.strong_topics.is_empty() {
            view.push(ViewLine::Text(format!(
                "Strong topics: {}",
                set.strong_topics.join(", ")
            )));
        }
        if !set.weak_topics.is_empty() {
            view.push(ViewLine::Text(format!(
                "Weak topics: {}",
                set.weak_topics.join(", ")
            )));
        }
    }
}

#[async_trait]
impl PageController for RecommendationsController {
    fn location(&self) -> Location {
        Location::Recommendations
    }

    async fn load(&mut self) -> LoadOutcome {
        let client = self.client.clone();
        self.fetch
            .run(
                Location::Recommendations,
                move |handle| async move { client.validate_and_fetch_recommendations(&handle).await },
                describe,
            )
            .await
    }

    fn view(&self) -> PageView {
        let Some(handle) = self.fetch.handle() else {
            return PageView::error_only(NO_IDENTITY_MESSAGE);
        };
        let mut view = PageView::titled(format!("Problem Recommendations for {handle}"));
        match self.fetch.state() {
            FetchState::Idle | FetchState::Loading => {
                view.push(ViewLine::Text(LOADING_MESSAGE.to_owned()));
            }
            FetchState::Success(set) => {
                Self::push_profile(&mut view, set);
                for problem in &set.recommendations {
                    view.push(ViewLine::Item(problem.summary_line()));
                }
            }
            FetchState::Error(message) => view.push(ViewLine::Error(message.clone())),
        }
        view
    }

    fn unmount(&self) {
        self.fetch.mount_handle().cancel();
    }
}
