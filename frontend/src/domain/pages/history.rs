//! Submission history page controller.

use async_trait::async_trait;

use super::{LoadOutcome, NO_IDENTITY_MESSAGE, PageController, PageFetch, PageView, ViewLine};
use crate::domain::{
    FetchError, FetchState, IdentityStore, Location, RecommendationClient, SubmissionHistory,
    UserHandle,
};

const LOADING_MESSAGE: &str = "Loading history...";
const ERROR_MESSAGE: &str = "Error fetching history.";
/// Rendered when the backend returns an empty history.
pub const EMPTY_HISTORY_MESSAGE: &str = "No history data found.";

fn describe(_error: &FetchError) -> String {
    ERROR_MESSAGE.to_owned()
}

/// Loads and renders the submission history for the committed handle.
pub struct HistoryController {
    client: RecommendationClient,
    fetch: PageFetch<SubmissionHistory>,
}

impl HistoryController {
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
    pub fn state(&self) -> &FetchState<SubmissionHistory> {
        self.fetch.state()
    }
}

#[async_trait]
impl PageController for HistoryController {
    fn location(&self) -> Location {
        Location::History
    }

    async fn load(&mut self) -> LoadOutcome {
        let client = self.client.clone();
        self.fetch
            .run(
                Location::History,
                move |handle| async move { client.fetch_history(&handle).await },
                describe,
            )
            .await
    }

    fn view(&self) -> PageView {
        let Some(handle) = self.fetch.handle() else {
            return PageView::error_only(NO_IDENTITY_MESSAGE);
        };
        let mut view = PageView::titled(format!("Submission History for {handle}"));
        match self.fetch.state() {
            FetchState::Idle | FetchState::Loading => {
                view.push(ViewLine::Text(LOADING_MESSAGE.to_owned()));
            }
            FetchState::Success(snapshot) if snapshot.history.is_empty() => {
                view.push(ViewLine::Text(EMPTY_HISTORY_MESSAGE.to_owned()));
            }
            FetchState::Success(snapshot) => {
                for entry in &snapshot.history {
                    view.push(ViewLine::Item(entry.summary_line()));
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
