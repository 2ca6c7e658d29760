//! The fetch state machine: one outstanding list fetch per source, exposed
//! as a tri-state value observable through a watch channel.

use std::sync::{Arc, Mutex};

use rand::seq::IndexedRandom as _;
use tokio::{sync::watch, task::JoinHandle};
use tracing::warn;

use crate::source::PhotoSource;

// ─── State ───────────────────────────────────────────────────────────────────

/// Lifecycle of one collection fetch.
///
/// Exactly one variant is active at any time; values are published whole
/// through a watch channel, so observers can never see a torn state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<R> {
  /// A fetch is in flight; nothing to show yet.
  Loading,
  /// The last fetch succeeded against a nonempty list.
  Success {
    /// Human-readable description of the result, e.g.
    /// "Success: 30 Mars photos retrieved".
    summary:  String,
    /// One record chosen uniformly at random from the fetched list. Fixed
    /// until the next fetch completes.
    selected: R,
  },
  /// The last fetch failed: transport error, decode error, non-2xx status,
  /// or an empty list. No detail is carried; retry is user-driven via
  /// [`PhotoFeed::refresh`].
  Error,
}

impl<R> FetchState<R> {
  pub fn is_loading(&self) -> bool {
    matches!(self, FetchState::Loading)
  }

  pub fn is_success(&self) -> bool {
    matches!(self, FetchState::Success { .. })
  }

  pub fn is_error(&self) -> bool {
    matches!(self, FetchState::Error)
  }
}

// ─── Feed ────────────────────────────────────────────────────────────────────

/// Owns the Loading → Success/Error lifecycle for one photo source.
///
/// Construction issues the initial fetch immediately. [`refresh`] re-enters
/// the same procedure from any state: the state returns to Loading
/// synchronously and a new fetch task is spawned. A superseded in-flight
/// fetch is aborted, and a generation check keeps its result out even if it
/// had already completed the network call — observers always see the newest
/// request's outcome.
///
/// Dropping the feed aborts the in-flight task.
///
/// [`refresh`]: PhotoFeed::refresh
pub struct PhotoFeed<S: PhotoSource> {
  source: Arc<S>,
  tx:     Arc<watch::Sender<FetchState<S::Record>>>,

  /// Generation of the newest `refresh` call. A fetch task may only
  /// publish while its generation is still current; the lock also
  /// serializes publication against the Loading transition in `refresh`.
  generation: Arc<Mutex<u64>>,

  /// Handle of the in-flight fetch task, if any.
  task: Mutex<Option<JoinHandle<()>>>,
}

impl<S> PhotoFeed<S>
where
  S: PhotoSource + 'static,
{
  /// Create a feed and issue the initial fetch.
  ///
  /// Must be called from within a tokio runtime.
  pub fn new(source: S) -> Self {
    let (tx, _rx) = watch::channel(FetchState::Loading);
    let feed = Self {
      source: Arc::new(source),
      tx: Arc::new(tx),
      generation: Arc::new(Mutex::new(0)),
      task: Mutex::new(None),
    };
    feed.refresh();
    feed
  }

  /// Snapshot of the current state.
  pub fn state(&self) -> FetchState<S::Record> {
    self.tx.borrow().clone()
  }

  /// Subscribe to state transitions.
  pub fn subscribe(&self) -> watch::Receiver<FetchState<S::Record>> {
    self.tx.subscribe()
  }

  /// Discard whatever is in flight and start a new fetch.
  ///
  /// Publishes `Loading` before returning; the Success/Error transition
  /// happens asynchronously when the new fetch resolves. Failures never
  /// propagate to the caller — they are logged and folded into the Error
  /// state.
  pub fn refresh(&self) {
    let my_generation = {
      let mut generation = self.generation.lock().expect("generation lock poisoned");
      *generation += 1;
      self.tx.send_replace(FetchState::Loading);
      *generation
    };

    // Abort the superseded fetch, if any. The generation check below covers
    // the window where it had already resolved but not yet published.
    if let Some(task) = self.task.lock().expect("task lock poisoned").take() {
      task.abort();
    }

    let source = Arc::clone(&self.source);
    let tx = Arc::clone(&self.tx);
    let generation = Arc::clone(&self.generation);

    let handle = tokio::spawn(async move {
      let next = match source.fetch_all().await {
        Ok(photos) => match photos.choose(&mut rand::rng()) {
          Some(selected) => FetchState::Success {
            summary:  format!(
              "Success: {} {} retrieved",
              photos.len(),
              source.label()
            ),
            selected: selected.clone(),
          },
          None => {
            warn!(label = source.label(), "fetch returned an empty list");
            FetchState::Error
          }
        },
        Err(e) => {
          warn!(label = source.label(), error = %e, "photo fetch failed");
          FetchState::Error
        }
      };

      let generation = generation.lock().expect("generation lock poisoned");
      if *generation == my_generation {
        tx.send_replace(next);
      }
    });

    *self.task.lock().expect("task lock poisoned") = Some(handle);
  }
}

impl<S: PhotoSource> Drop for PhotoFeed<S> {
  fn drop(&mut self) {
    if let Some(task) = self.task.lock().expect("task lock poisoned").take() {
      task.abort();
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::{collections::VecDeque, sync::Mutex, time::Duration};

  use tokio::sync::watch;

  use super::FetchState;
  use crate::{feed::PhotoFeed, source::PhotoSource};

  #[derive(Debug, thiserror::Error)]
  #[error("stub fetch failed")]
  struct StubError;

  /// What one `fetch_all` call should do.
  enum Plan {
    Reply(Result<Vec<u32>, StubError>),
    ReplyAfter(Duration, Result<Vec<u32>, StubError>),
    /// Never resolve.
    Hang,
  }

  /// Scripted source: each `fetch_all` call consumes the next plan.
  struct StubSource {
    plans: Mutex<VecDeque<Plan>>,
  }

  impl StubSource {
    fn new(plans: Vec<Plan>) -> Self {
      Self { plans: Mutex::new(plans.into_iter().collect()) }
    }
  }

  impl PhotoSource for StubSource {
    type Record = u32;
    type Error = StubError;

    fn label(&self) -> &str {
      "test photos"
    }

    fn fetch_all(
      &self,
    ) -> impl Future<Output = Result<Vec<u32>, StubError>> + Send + '_ {
      let plan = self
        .plans
        .lock()
        .unwrap()
        .pop_front()
        .expect("fetch_all called with no plan left");
      async move {
        match plan {
          Plan::Reply(result) => result,
          Plan::ReplyAfter(delay, result) => {
            tokio::time::sleep(delay).await;
            result
          }
          Plan::Hang => {
            std::future::pending::<()>().await;
            unreachable!()
          }
        }
      }
    }
  }

  /// Wait until the feed leaves Loading and return the settled state.
  async fn settled(
    rx: &mut watch::Receiver<FetchState<u32>>,
  ) -> FetchState<u32> {
    loop {
      let state = rx.borrow_and_update().clone();
      if !state.is_loading() {
        return state;
      }
      rx.changed().await.expect("feed dropped while waiting");
    }
  }

  #[tokio::test]
  async fn initial_fetch_selects_a_member_of_the_list() {
    let feed = PhotoFeed::new(StubSource::new(vec![Plan::Reply(Ok(vec![1, 2, 3]))]));
    let mut rx = feed.subscribe();

    match settled(&mut rx).await {
      FetchState::Success { summary, selected } => {
        assert_eq!(summary, "Success: 3 test photos retrieved");
        assert!([1, 2, 3].contains(&selected));
      }
      other => panic!("expected Success, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn empty_list_is_an_error_not_a_panic() {
    let feed = PhotoFeed::new(StubSource::new(vec![Plan::Reply(Ok(vec![]))]));
    let mut rx = feed.subscribe();

    assert_eq!(settled(&mut rx).await, FetchState::Error);
  }

  #[tokio::test]
  async fn failed_fetch_is_an_error() {
    let feed = PhotoFeed::new(StubSource::new(vec![Plan::Reply(Err(StubError))]));
    let mut rx = feed.subscribe();

    assert_eq!(settled(&mut rx).await, FetchState::Error);
  }

  #[tokio::test]
  async fn refresh_publishes_loading_synchronously() {
    let feed = PhotoFeed::new(StubSource::new(vec![
      Plan::Reply(Ok(vec![7])),
      Plan::Hang,
    ]));
    let mut rx = feed.subscribe();
    assert!(settled(&mut rx).await.is_success());

    // The Loading transition must be observable before the new fetch
    // resolves — here it never resolves at all.
    feed.refresh();
    assert!(feed.state().is_loading());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(feed.state().is_loading());
  }

  #[tokio::test]
  async fn superseded_fetch_is_discarded() {
    let feed = PhotoFeed::new(StubSource::new(vec![
      Plan::ReplyAfter(Duration::from_millis(300), Ok(vec![1, 2, 3])),
      Plan::Reply(Ok(vec![9])),
    ]));
    let mut rx = feed.subscribe();

    // Let the slow initial fetch get underway, then supersede it.
    tokio::time::sleep(Duration::from_millis(50)).await;
    feed.refresh();

    match settled(&mut rx).await {
      FetchState::Success { summary, selected } => {
        assert_eq!(selected, 9);
        assert_eq!(summary, "Success: 1 test photos retrieved");
      }
      other => panic!("expected Success, got {other:?}"),
    }

    // The slow fetch's outcome must never surface.
    tokio::time::sleep(Duration::from_millis(400)).await;
    match feed.state() {
      FetchState::Success { selected, .. } => assert_eq!(selected, 9),
      other => panic!("stale fetch overwrote the state: {other:?}"),
    }
  }

  #[tokio::test]
  async fn refresh_recovers_from_error_with_a_fresh_selection() {
    let feed = PhotoFeed::new(StubSource::new(vec![
      Plan::Reply(Err(StubError)),
      Plan::Reply(Ok(vec![4, 5])),
    ]));
    let mut rx = feed.subscribe();
    assert_eq!(settled(&mut rx).await, FetchState::Error);

    feed.refresh();
    assert!(feed.state().is_loading());

    match settled(&mut rx).await {
      FetchState::Success { selected, .. } => assert!([4, 5].contains(&selected)),
      other => panic!("expected Success, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn drop_aborts_the_in_flight_fetch() {
    let feed = PhotoFeed::new(StubSource::new(vec![Plan::Hang]));
    let mut rx = feed.subscribe();

    drop(feed);

    // With the feed (and its aborted task) gone, the channel closes
    // without ever publishing an outcome.
    assert!(rx.changed().await.is_err());
    assert!(rx.borrow().is_loading());
  }
}
