//! Search/display controller.
//!
//! Holds the typed username and the outcome of the latest lookup. Each call
//! to `search` takes a new generation number; fetches run on their own task
//! and only the one matching the current generation is applied when it
//! comes back.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::github::{FetchError, Profile, ProfileSource};

/// Shown when searching with an empty username
pub const EMPTY_QUERY: &str = "Please enter a username.";

/// Result of the latest search attempt. Error and profile are exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    None,
    Error(String),
    Found(Profile),
}

impl Outcome {
    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Outcome::Found(profile) => Some(profile),
            _ => None,
        }
    }
}

/// A finished fetch, tagged with the generation that started it
#[derive(Debug)]
struct Completion {
    generation: u64,
    result: Result<Profile, FetchError>,
}

pub struct SearchState {
    username: String,
    outcome: Outcome,
    generation: u64,
    source: Arc<dyn ProfileSource>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl SearchState {
    pub fn new(source: Arc<dyn ProfileSource>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            username: String::new(),
            outcome: Outcome::None,
            generation: 0,
            source,
            tx,
            rx,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Replace the query text as-is (no trimming)
    pub fn set_username(&mut self, text: impl Into<String>) {
        self.username = text.into();
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a lookup for the current username.
    ///
    /// Must be called from within a tokio runtime. Any lookup still in
    /// flight becomes stale and its result will be dropped.
    pub fn search(&mut self) {
        self.generation += 1;
        self.outcome = Outcome::None;

        if self.username.is_empty() {
            self.outcome = Outcome::Error(EMPTY_QUERY.to_string());
            return;
        }

        let generation = self.generation;
        let username = self.username.clone();
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();

        tracing::info!("Looking up {:?} (request #{})", username, generation);

        tokio::spawn(async move {
            let result = source.fetch_profile(&username).await;
            // Send only fails once the app is gone
            let _ = tx.send(Completion { generation, result });
        });
    }

    /// Apply any finished lookups without blocking.
    /// Returns true if the outcome changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.rx.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    fn apply(&mut self, completion: Completion) -> bool {
        if completion.generation != self.generation {
            tracing::debug!(
                "Dropping stale result #{} (current #{})",
                completion.generation,
                self.generation
            );
            return false;
        }

        self.outcome = match completion.result {
            Ok(profile) => {
                tracing::info!("Found {}", profile.login);
                Outcome::Found(profile)
            }
            Err(e) => {
                if let FetchError::Status(status) = &e {
                    tracing::debug!("Lookup failed with status {}", status);
                }
                Outcome::Error(e.to_string())
            }
        };
        true
    }

    /// Wait for the next finished lookup and apply it
    #[cfg(test)]
    pub async fn settle(&mut self) -> bool {
        match self.rx.recv().await {
            Some(completion) => self.apply(completion),
            None => false,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::github::tests::octocat;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Clone)]
    pub(crate) enum Canned {
        Found(Profile),
        Status(u16),
        Garbage,
    }

    /// In-memory profile source that records every lookup
    #[derive(Default)]
    pub(crate) struct FakeSource {
        pub calls: Mutex<Vec<String>>,
        responses: HashMap<String, (Canned, Duration)>,
    }

    impl FakeSource {
        pub fn with(mut self, username: &str, canned: Canned) -> Self {
            self.responses.insert(username.to_string(), (canned, Duration::ZERO));
            self
        }

        pub fn with_delay(mut self, username: &str, canned: Canned, delay: Duration) -> Self {
            self.responses.insert(username.to_string(), (canned, delay));
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProfileSource for FakeSource {
        async fn fetch_profile(&self, username: &str) -> Result<Profile, FetchError> {
            self.calls.lock().unwrap().push(username.to_string());

            let (canned, delay) = self
                .responses
                .get(username)
                .cloned()
                .unwrap_or((Canned::Status(404), Duration::ZERO));

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match canned {
                Canned::Found(profile) => Ok(profile),
                Canned::Status(code) => Err(FetchError::Status(
                    StatusCode::from_u16(code).unwrap(),
                )),
                Canned::Garbage => Err(serde_json::from_str::<Profile>("<html>").unwrap_err().into()),
            }
        }
    }

    fn state_with(source: FakeSource) -> (SearchState, Arc<FakeSource>) {
        let source = Arc::new(source);
        (SearchState::new(source.clone()), source)
    }

    #[tokio::test]
    async fn test_empty_username_sets_error_without_request() {
        let (mut state, source) = state_with(FakeSource::default());

        state.search();

        assert_eq!(state.outcome(), &Outcome::Error("Please enter a username.".to_string()));
        tokio::task::yield_now().await;
        assert!(!state.poll());
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_found_profile_replaces_previous_error() {
        let (mut state, source) =
            state_with(FakeSource::default().with("octocat", Canned::Found(octocat())));

        state.search();
        assert!(state.outcome().error().is_some());

        state.set_username("octocat");
        state.search();
        // Cleared as soon as the attempt starts
        assert_eq!(state.outcome(), &Outcome::None);

        assert!(state.settle().await);
        assert_eq!(state.outcome().profile(), Some(&octocat()));
        assert_eq!(state.outcome().error(), None);
        assert_eq!(source.calls(), vec!["octocat".to_string()]);
    }

    #[tokio::test]
    async fn test_not_found() {
        let (mut state, _) = state_with(FakeSource::default());
        state.set_username("doesnotexist999");
        state.search();
        state.settle().await;

        assert_eq!(state.outcome(), &Outcome::Error("User not found".to_string()));
    }

    #[tokio::test]
    async fn test_rate_limit_and_server_error_read_the_same() {
        let (mut state, _) = state_with(
            FakeSource::default()
                .with("limited", Canned::Status(403))
                .with("broken", Canned::Status(502)),
        );

        for name in ["limited", "broken"] {
            state.set_username(name);
            state.search();
            state.settle().await;
            assert_eq!(state.outcome().error(), Some("User not found"));
        }
    }

    #[tokio::test]
    async fn test_parse_failure_surfaces_its_message() {
        let (mut state, _) = state_with(FakeSource::default().with("weird", Canned::Garbage));
        state.set_username("weird");
        state.search();
        state.settle().await;

        let msg = state.outcome().error().unwrap();
        assert!(!msg.is_empty());
        assert_ne!(msg, "User not found");
    }

    #[tokio::test]
    async fn test_found_clears_on_next_search() {
        let (mut state, _) =
            state_with(FakeSource::default().with("octocat", Canned::Found(octocat())));
        state.set_username("octocat");
        state.search();
        state.settle().await;
        assert!(state.outcome().profile().is_some());

        state.search();
        assert_eq!(state.outcome(), &Outcome::None);
    }

    #[tokio::test]
    async fn test_latest_search_wins_over_slow_earlier_one() {
        let mut fast = octocat();
        fast.login = "fast".to_string();
        let mut slow = octocat();
        slow.login = "slow".to_string();

        let (mut state, _) = state_with(
            FakeSource::default()
                .with_delay("slow", Canned::Found(slow), Duration::from_millis(100))
                .with("fast", Canned::Found(fast.clone())),
        );

        state.set_username("slow");
        state.search();
        state.set_username("fast");
        state.search();
        assert_eq!(state.generation(), 2);

        // fast lands first and is applied
        assert!(state.settle().await);
        assert_eq!(state.outcome().profile(), Some(&fast));

        // slow lands later and is dropped
        assert!(!state.settle().await);
        assert_eq!(state.outcome().profile(), Some(&fast));
    }

    #[tokio::test]
    async fn test_empty_search_discards_in_flight_lookup() {
        let (mut state, source) = state_with(FakeSource::default().with_delay(
            "octocat",
            Canned::Found(octocat()),
            Duration::from_millis(20),
        ));

        state.set_username("octocat");
        state.search();
        state.set_username("");
        state.search();

        assert!(!state.settle().await);
        assert_eq!(state.outcome().error(), Some(EMPTY_QUERY));
        assert_eq!(source.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_username_kept_verbatim() {
        let (mut state, source) = state_with(FakeSource::default());
        state.set_username(" octo cat ");
        assert_eq!(state.username(), " octo cat ");

        state.search();
        state.settle().await;
        assert_eq!(source.calls(), vec![" octo cat ".to_string()]);
    }
}
