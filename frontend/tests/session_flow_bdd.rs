//! Behaviour tests for end-to-end terminal sessions.
//!
//! Each scenario scripts the backend, feeds a sequence of input lines to the
//! shell, and inspects the printed pages, the final location, the committed
//! identity, and the calls the backend received.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use tokio::runtime::Builder;

use recommender_frontend::domain::ports::{
    FixtureRecommendationSource, RecommendationSource, RecommendationSourceError,
};
use recommender_frontend::domain::{
    HistoryEntry, IdentityStore, Location, Recommendation, RecommendationClient,
    RecommendationSet, SubmissionHistory, UserHandle,
};
use recommender_frontend::inbound::terminal::TerminalShell;

type Scripted<T> = Mutex<HashMap<String, Result<T, RecommendationSourceError>>>;

/// Source double answering from per-handle tables and recording every call.
///
/// Handles missing from the tables are rejected (recommend) or fail with a
/// server error (history), unless the fixture fallback is enabled.
#[derive(Default)]
struct ScriptedSource {
    recommendations: Scripted<RecommendationSet>,
    histories: Scripted<SubmissionHistory>,
    fallback: Mutex<Option<FixtureRecommendationSource>>,
    calls: Mutex<Vec<(&'static str, String)>>,
}

impl ScriptedSource {
    fn record(&self, operation: &'static str, handle: &UserHandle) {
        self.calls
            .lock()
            .expect("calls lock")
            .push((operation, handle.as_ref().to_owned()));
    }

    fn calls(&self) -> Vec<(&'static str, String)> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn fallback(&self) -> Option<FixtureRecommendationSource> {
        *self.fallback.lock().expect("fallback lock")
    }
}

#[async_trait]
impl RecommendationSource for ScriptedSource {
    async fn recommend(
        &self,
        handle: &UserHandle,
    ) -> Result<RecommendationSet, RecommendationSourceError> {
        self.record("recommend", handle);
        let scripted = self
            .recommendations
            .lock()
            .expect("recommendations lock")
            .get(handle.as_ref())
            .cloned();
        match (scripted, self.fallback()) {
            (Some(result), _) => result,
            (None, Some(fixture)) => fixture.recommend(handle).await,
            (None, None) => Err(RecommendationSourceError::invalid_handle()),
        }
    }

    async fn history(
        &self,
        handle: &UserHandle,
    ) -> Result<SubmissionHistory, RecommendationSourceError> {
        self.record("history", handle);
        let scripted = self
            .histories
            .lock()
            .expect("histories lock")
            .get(handle.as_ref())
            .cloned();
        match (scripted, self.fallback()) {
            (Some(result), _) => result,
            (None, Some(fixture)) => fixture.history(handle).await,
            (None, None) => Err(RecommendationSourceError::unexpected_status(
                500_u16,
                "history unavailable",
            )),
        }
    }
}

/// What a finished session left behind.
#[derive(Debug, Clone)]
struct SessionOutcome {
    output: String,
    current: Location,
    committed: Option<String>,
}

#[derive(Default, ScenarioState)]
struct SessionWorld {
    source: Slot<Arc<ScriptedSource>>,
    script: Slot<Vec<String>>,
    outcome: Slot<SessionOutcome>,
}

impl SessionWorld {
    fn source(&self) -> Arc<ScriptedSource> {
        if let Some(source) = self.source.get() {
            return source;
        }
        let source = Arc::new(ScriptedSource::default());
        self.source.set(source.clone());
        source
    }

    fn push_line(&self, line: &str) {
        let mut script = self.script.get().unwrap_or_default();
        script.push(line.to_owned());
        self.script.set(script);
    }

    /// Run the scripted session on first use and reuse the result.
    fn outcome(&self) -> SessionOutcome {
        if let Some(outcome) = self.outcome.get() {
            return outcome;
        }

        let input: String = self
            .script
            .get()
            .unwrap_or_default()
            .iter()
            .map(|line| format!("{line}\n"))
            .collect();
        let port: Arc<dyn RecommendationSource> = self.source();
        let identity = IdentityStore::new();
        let mut shell =
            TerminalShell::new(RecommendationClient::new(port), identity.clone(), Vec::new());

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("create runtime");
        runtime
            .block_on(shell.run(input.as_bytes()))
            .expect("in-memory session should not fail");

        let current = shell.navigator().current();
        let outcome = SessionOutcome {
            output: String::from_utf8(shell.into_output()).expect("output is UTF-8"),
            current,
            committed: identity.get().map(String::from),
        };
        self.outcome.set(outcome.clone());
        outcome
    }
}

#[fixture]
fn world() -> SessionWorld {
    SessionWorld::default()
}

// -----------------------------------------------------------------------------
// Given Steps
// -----------------------------------------------------------------------------

#[given("the backend recommends problem {name} for {handle}")]
fn the_backend_recommends_problem(world: &SessionWorld, name: String, handle: String) {
    let set = RecommendationSet {
        recommendations: vec![Recommendation {
            name,
            rating: 1200,
            tags: vec!["dp".to_owned()],
        }],
        mode_rating: 1500,
        strong_topics: vec!["dp".to_owned()],
        weak_topics: Vec::new(),
    };
    world
        .source()
        .recommendations
        .lock()
        .expect("recommendations lock")
        .insert(handle, Ok(set));
}

#[given("the backend has no submissions for {handle}")]
fn the_backend_has_no_submissions(world: &SessionWorld, handle: String) {
    world
        .source()
        .recommendations
        .lock()
        .expect("recommendations lock")
        .insert(handle, Err(RecommendationSourceError::no_data()));
}

#[given("the backend has history entry {name} with verdict {verdict} for {handle}")]
fn the_backend_has_history_entry(
    world: &SessionWorld,
    name: String,
    verdict: String,
    handle: String,
) {
    let source = world.source();
    let mut histories = source.histories.lock().expect("histories lock");
    let entry = histories
        .entry(handle)
        .or_insert_with(|| Ok(SubmissionHistory::default()));
    if let Ok(history) = entry {
        history.history.push(HistoryEntry { name, verdict });
    }
}

#[given("the backend answers every other handle with empty results")]
fn the_backend_answers_with_empty_results(world: &SessionWorld) {
    *world.source().fallback.lock().expect("fallback lock") = Some(FixtureRecommendationSource);
}

// -----------------------------------------------------------------------------
// When Steps
// -----------------------------------------------------------------------------

#[when("the user types the handle {handle}")]
fn the_user_types_the_handle(world: &SessionWorld, handle: String) {
    world.push_line(&handle);
}

#[when("the user submits an empty line")]
fn the_user_submits_an_empty_line(world: &SessionWorld) {
    world.push_line("");
}

#[when("the user opens {route}")]
fn the_user_opens(world: &SessionWorld, route: String) {
    world.push_line(&route);
}

#[when("the user ends the session")]
fn the_user_ends_the_session(world: &SessionWorld) {
    world.push_line("/quit");
}

// -----------------------------------------------------------------------------
// Then Steps
// -----------------------------------------------------------------------------

fn has_line(output: &str, expected: &str) -> bool {
    output.lines().any(|line| line.trim_start() == expected)
}

#[then("the output shows {text}")]
fn the_output_shows(world: &SessionWorld, text: String) {
    let outcome = world.outcome();
    assert!(
        has_line(&outcome.output, &text),
        "expected a line '{text}' in:\n{}",
        outcome.output
    );
}

#[then("the output never shows {text}")]
fn the_output_never_shows(world: &SessionWorld, text: String) {
    let outcome = world.outcome();
    assert!(
        !has_line(&outcome.output, &text),
        "unexpected line '{text}' in:\n{}",
        outcome.output
    );
}

#[then("the no-username notice appears {count} times")]
fn the_no_username_notice_appears(world: &SessionWorld, count: usize) {
    let outcome = world.outcome();
    let notices = outcome
        .output
        .lines()
        .filter(|line| *line == "No username provided.")
        .count();
    assert_eq!(notices, count, "{}", outcome.output);
}

#[then("the current page is {route}")]
fn the_current_page_is(world: &SessionWorld, route: String) {
    let expected = Location::from_path(&route).expect("scenario uses a known route");
    assert_eq!(world.outcome().current, expected);
}

#[then("the committed handle is {handle}")]
fn the_committed_handle_is(world: &SessionWorld, handle: String) {
    assert_eq!(world.outcome().committed, Some(handle));
}

#[then("no handle is committed")]
fn no_handle_is_committed(world: &SessionWorld) {
    assert_eq!(world.outcome().committed, None);
}

#[then("the backend received no calls")]
fn the_backend_received_no_calls(world: &SessionWorld) {
    world.outcome();
    assert!(world.source().calls().is_empty());
}

#[then("the backend calls were {calls}")]
fn the_backend_calls_were(world: &SessionWorld, calls: String) {
    world.outcome();
    let expected: Vec<(String, String)> = calls
        .split(", ")
        .map(|call| {
            let (operation, handle) = call.split_once(' ').expect("`<operation> <handle>`");
            (operation.to_owned(), handle.to_owned())
        })
        .collect();
    let actual: Vec<(String, String)> = world
        .source()
        .calls()
        .into_iter()
        .map(|(operation, handle)| (operation.to_owned(), handle))
        .collect();
    assert_eq!(actual, expected);
}

#[then("the last backend call was {operation} for {handle}")]
fn the_last_backend_call_was(world: &SessionWorld, operation: String, handle: String) {
    world.outcome();
    let calls = world.source().calls();
    let last = calls.last().expect("at least one backend call");
    assert_eq!((last.0, last.1.as_str()), (operation.as_str(), handle.as_str()));
}

// -----------------------------------------------------------------------------
// Scenario Bindings
// -----------------------------------------------------------------------------

#[scenario(
    path = "tests/features/session_flow.feature",
    name = "Logging in and browsing every page"
)]
fn logging_in_and_browsing_every_page(world: SessionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/session_flow.feature",
    name = "Failed logins keep the user on the entry page"
)]
fn failed_logins_keep_the_user_on_the_entry_page(world: SessionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/session_flow.feature",
    name = "Guarded pages without a login never fetch"
)]
fn guarded_pages_without_a_login_never_fetch(world: SessionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/session_flow.feature",
    name = "Empty results render page-specific text"
)]
fn empty_results_render_page_specific_text(world: SessionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/session_flow.feature",
    name = "A failing history endpoint renders the history error"
)]
fn a_failing_history_endpoint_renders_the_history_error(world: SessionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/session_flow.feature",
    name = "Logging in again switches the identity for later pages"
)]
fn logging_in_again_switches_the_identity(world: SessionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/session_flow.feature",
    name = "Command words are ordinary handles"
)]
fn command_words_are_ordinary_handles(world: SessionWorld) {
    let _ = world;
}
