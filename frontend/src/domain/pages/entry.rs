//! Entry page: collects a handle, validates it, and commits the identity.

use super::{Mount, PageView, ViewLine};
use crate::domain::{
    FetchError, IdentityStore, Location, Navigator, RecommendationClient, UserHandle,
};

/// Title rendered at the top of the entry page.
pub const ENTRY_TITLE: &str = "Codeforces Recommender";
/// Prompt rendered under the title.
pub const ENTRY_PROMPT: &str = "Enter Codeforces Username";

/// Lifecycle of the entry form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EntryState {
    /// Waiting for input.
    #[default]
    Editing,
    /// A validation request for this handle is in flight.
    Validating(UserHandle),
    /// The last submission failed; the user may resubmit.
    Failed(FetchError),
    /// The handle was validated and committed.
    Accepted(UserHandle),
}

/// Result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The handle was validated, committed, and the navigator moved on.
    Accepted(UserHandle),
    /// The submission failed with this classified error.
    Rejected(FetchError),
    /// The entry page was unmounted before validation finished.
    Cancelled,
}

/// Controller for the entry page.
pub struct EntryController {
    client: RecommendationClient,
    identity: IdentityStore,
    state: EntryState,
    mount: Mount,
}

impl EntryController {
    /// Mount the entry page.
    pub fn new(client: RecommendationClient, identity: IdentityStore) -> Self {
        Self {
            client,
            identity,
            state: EntryState::Editing,
            mount: Mount::new(),
        }
    }

    /// Current form state.
    pub fn state(&self) -> &EntryState {
        &self.state
    }

    /// Message to show under the form, if the last submission failed.
    pub fn error_message(&self) -> Option<&'static str> {
        match &self.state {
            EntryState::Failed(error) => Some(error.message()),
            _ => None,
        }
    }

    /// Submit `input` as a handle.
    ///
    /// Blank input fails with [`FetchError::InputValidation`] without any
    /// network call. Otherwise exactly one validation call is issued with the
    /// raw input; on success the handle is committed to the identity store and
    /// `navigator` moves to [`Location::Recommendations`].
    pub async fn submit(&mut self, input: &str, navigator: &mut Navigator) -> SubmitOutcome {
        let Ok(handle) = UserHandle::new(input) else {
            return self.reject(FetchError::InputValidation);
        };

        self.state = EntryState::Validating(handle.clone());
        let validation = self.client.validate_and_fetch_recommendations(&handle);
        let Some(result) = self.mount.guard(validation).await else {
            self.state = EntryState::Editing;
            return SubmitOutcome::Cancelled;
        };

        match result {
            Ok(_) => {
                self.identity.set(handle.clone());
                navigator.navigate(Location::Recommendations);
                self.state = EntryState::Accepted(handle.clone());
                SubmitOutcome::Accepted(handle)
            }
            Err(error) => self.reject(error),
        }
    }

    fn reject(&mut self, error: FetchError) -> SubmitOutcome {
        self.state = EntryState::Failed(error.clone());
        SubmitOutcome::Rejected(error)
    }

    /// Render the form.
    pub fn view(&self) -> PageView {
        let mut view = PageView::titled(ENTRY_TITLE);
        view.push(ViewLine::Text(ENTRY_PROMPT.to_owned()));
        match &self.state {
            EntryState::Validating(handle) => {
                view.push(ViewLine::Text(format!("Checking {handle}...")));
            }
            EntryState::Failed(error) => view.push(ViewLine::Error(error.message().to_owned())),
            EntryState::Editing | EntryState::Accepted(_) => {}
        }
        view
    }

    /// End the mount. A validation still in flight will not commit.
    pub fn unmount(&self) {
        self.mount.cancel();
    }
}
