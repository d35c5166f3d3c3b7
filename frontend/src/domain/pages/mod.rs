//! Page controllers and their shared lifecycle plumbing.
//!
//! Each controller owns one [`Mount`]. The mount carries a cancellation token
//! tied to the controller's lifetime: unmounting (or dropping) the controller
//! cancels it, and a fetch that resolves afterwards is discarded instead of
//! writing into a page nobody is looking at.

mod entry;
mod history;
mod recommendations;

pub use entry::{EntryController, EntryState, SubmitOutcome};
pub use history::HistoryController;
pub use recommendations::RecommendationsController;

use std::future::Future;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::{FetchError, FetchState, IdentityStore, Location, UserHandle};

/// Message rendered by guarded pages when no handle has been committed.
pub const NO_IDENTITY_MESSAGE: &str = "No username provided.";

/// One rendered line of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewLine {
    /// Plain informational text.
    Text(String),
    /// Inline error message.
    Error(String),
    /// Entry of a rendered list.
    Item(String),
}

/// Transport-neutral rendering of a page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageView {
    /// Optional page heading.
    pub heading: Option<String>,
    /// Body lines in display order.
    pub lines: Vec<ViewLine>,
}

impl PageView {
    /// Build a view with a heading and no lines yet.
    pub fn titled(heading: impl Into<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            lines: Vec::new(),
        }
    }

    /// View made of a single error line and no heading.
    pub fn error_only(message: impl Into<String>) -> Self {
        Self {
            heading: None,
            lines: vec![ViewLine::Error(message.into())],
        }
    }

    /// Append a line.
    pub fn push(&mut self, line: ViewLine) {
        self.lines.push(line);
    }

    /// Return whether any line renders exactly `text`.
    pub fn contains(&self, text: &str) -> bool {
        self.heading.as_deref() == Some(text)
            || self.lines.iter().any(|line| match line {
                ViewLine::Text(value) | ViewLine::Error(value) | ViewLine::Item(value) => {
                    value == text
                }
            })
    }
}

/// Outcome of asking a page controller to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetch completed and its result was recorded.
    Settled,
    /// No handle was present at mount; nothing was fetched.
    NoIdentity,
    /// The fetch for this mount was already started.
    AlreadyStarted,
    /// The controller was unmounted before the fetch resolved.
    Cancelled,
}

/// Lifetime of one controller mount.
///
/// # Examples
/// ```
/// use recommender_frontend::domain::pages::Mount;
///
/// let mount = Mount::new();
/// let token = mount.token();
/// drop(mount);
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Default)]
pub struct Mount {
    token: CancellationToken,
}

impl Mount {
    /// Start a new mount.
    pub fn new() -> Self {
        Self::default()
    }

    /// Token observing this mount. Cancelled when the mount ends.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// End the mount.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Return whether the mount has ended.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drive `future` unless the mount ends first. Returns `None` when the
    /// mount ended, even if `future` became ready in the same poll.
    pub async fn guard<F>(&self, future: F) -> Option<F::Output>
    where
        F: Future,
    {
        let output = tokio::select! {
            biased;
            () = self.token.cancelled() => None,
            output = future => Some(output),
        };
        output.filter(|_| !self.token.is_cancelled())
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Common surface of the guarded pages, used by inbound adapters.
#[async_trait]
pub trait PageController: Send {
    /// Location this controller renders.
    fn location(&self) -> Location;

    /// Run the page's single fetch for this mount.
    async fn load(&mut self) -> LoadOutcome;

    /// Render the current state.
    fn view(&self) -> PageView;

    /// End the mount, cancelling any in-flight fetch.
    fn unmount(&self);
}

/// Fetch lifecycle shared by the Recommendations and History controllers.
#[derive(Debug)]
pub(crate) struct PageFetch<T> {
    handle: Option<UserHandle>,
    state: FetchState<T>,
    mount: Mount,
}

impl<T> PageFetch<T> {
    /// Snapshot the identity store at mount time.
    pub(crate) fn mount(identity: &IdentityStore) -> Self {
        Self {
            handle: identity.get(),
            state: FetchState::Idle,
            mount: Mount::new(),
        }
    }

    pub(crate) fn handle(&self) -> Option<&UserHandle> {
        self.handle.as_ref()
    }

    pub(crate) fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub(crate) fn mount_handle(&self) -> &Mount {
        &self.mount
    }

    /// Run `fetch` once for this mount. `describe` turns a classified error
    /// into the message the page renders.
    pub(crate) async fn run<F, Fut>(
        &mut self,
        location: Location,
        fetch: F,
        describe: fn(&FetchError) -> String,
    ) -> LoadOutcome
    where
        F: FnOnce(UserHandle) -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let Some(handle) = self.handle.clone() else {
            debug!(%location, "no identity at mount; skipping fetch");
            return LoadOutcome::NoIdentity;
        };
        if let Err(error) = self.state.begin() {
            debug!(%location, %error, "fetch already started for this mount");
            return LoadOutcome::AlreadyStarted;
        }

        let Some(result) = self.mount.guard(fetch(handle)).await else {
            debug!(%location, "discarding response for unmounted page");
            return LoadOutcome::Cancelled;
        };

        let outcome = result.map_err(|error| describe(&error));
        match self.state.settle(outcome) {
            Ok(()) => LoadOutcome::Settled,
            Err(error) => {
                debug!(%location, %error, "fetch result rejected");
                LoadOutcome::AlreadyStarted
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Mount and shared lifecycle coverage.

    use super::*;
    use std::future;

    fn store_with(raw: &str) -> IdentityStore {
        let store = IdentityStore::new();
        store.set(UserHandle::new(raw).expect("fixture handle"));
        store
    }

    fn describe(error: &FetchError) -> String {
        error.message().to_owned()
    }

    #[tokio::test]
    async fn guard_returns_output_while_mounted() {
        let mount = Mount::new();
        assert_eq!(mount.guard(async { 5 }).await, Some(5));
    }

    #[tokio::test]
    async fn guard_prefers_cancellation_over_ready_output() {
        let mount = Mount::new();
        mount.cancel();
        assert_eq!(mount.guard(async { 5 }).await, None);
    }

    #[tokio::test]
    async fn run_skips_fetch_without_identity() {
        let mut fetch = PageFetch::<u8>::mount(&IdentityStore::new());
        let outcome = fetch
            .run(
                Location::History,
                |_| future::ready(Ok::<u8, FetchError>(9)),
                describe,
            )
            .await;
        assert_eq!(outcome, LoadOutcome::NoIdentity);
        assert_eq!(fetch.state(), &FetchState::Idle);
    }

    #[tokio::test]
    async fn run_fetches_once_per_mount() {
        let mut fetch = PageFetch::<u8>::mount(&store_with("tourist"));
        let first = fetch
            .run(Location::History, |_| async { Ok(1) }, describe)
            .await;
        let second = fetch
            .run(Location::History, |_| async { Ok(2) }, describe)
            .await;
        assert_eq!(first, LoadOutcome::Settled);
        assert_eq!(second, LoadOutcome::AlreadyStarted);
        assert_eq!(fetch.state(), &FetchState::Success(1));
    }

    #[tokio::test]
    async fn run_renders_error_with_page_description() {
        let mut fetch = PageFetch::<u8>::mount(&store_with("tourist"));
        let outcome = fetch
            .run(
                Location::Recommendations,
                |_| async { Err(FetchError::NoData) },
                describe,
            )
            .await;
        assert_eq!(outcome, LoadOutcome::Settled);
        assert_eq!(
            fetch.state().error_message(),
            Some("No submissions found for this user.")
        );
    }

    #[tokio::test]
    async fn unmount_during_fetch_leaves_state_loading() {
        let mut fetch = PageFetch::<u8>::mount(&store_with("tourist"));
        let token = fetch.mount_handle().token();
        let (outcome, ()) = tokio::join!(
            fetch.run(
                Location::History,
                |_| future::pending::<Result<u8, FetchError>>(),
                describe,
            ),
            async move { token.cancel() },
        );
        assert_eq!(outcome, LoadOutcome::Cancelled);
        assert_eq!(fetch.state(), &FetchState::Loading);
    }

    #[test]
    fn identity_is_snapshotted_at_mount() {
        let store = IdentityStore::new();
        let fetch = PageFetch::<u8>::mount(&store);
        store.set(UserHandle::new("late").expect("fixture handle"));
        assert!(fetch.handle().is_none());
    }

    #[test]
    fn view_contains_checks_heading_and_lines() {
        let mut view = PageView::titled("Heading");
        view.push(ViewLine::Item("A".to_owned()));
        assert!(view.contains("Heading"));
        assert!(view.contains("A"));
        assert!(!view.contains("B"));
    }
}
