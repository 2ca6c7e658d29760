//! Application state and key dispatch.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use photoroll_client::{MarsApi, PicsumApi};
use photoroll_core::{Collection, FetchState, MarsPhoto, PhotoFeed, PhotoSink, PicsumPhoto};

/// Database path of the shared roll counter.
const ROLL_PATH: &str = "roll";

/// Database path under which the last-saved photo ids live, keyed by
/// collection. The layout matches the database written by the original
/// mobile app, so the two stay data-compatible.
const LAST_ADD_PATH: &str = "lastAdd";

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<S: PhotoSink> {
  /// Feed for the Mars rover photo service.
  pub mars: PhotoFeed<MarsApi>,

  /// Feed for the Picsum placeholder-photo service.
  pub picsum: PhotoFeed<PicsumApi>,

  /// Photo pinned in the Mars pane. Set from the first Success after a
  /// roll or load, then held until the next roll or load.
  pub mars_photo: Option<MarsPhoto>,

  /// Photo pinned in the Picsum pane.
  pub picsum_photo: Option<PicsumPhoto>,

  /// Times the user has rolled, shared through the sink.
  pub roll_count: u64,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  sink: S,
}

impl<S: PhotoSink> App<S> {
  pub fn new(mars: PhotoFeed<MarsApi>, picsum: PhotoFeed<PicsumApi>, sink: S) -> Self {
    Self {
      mars,
      picsum,
      mars_photo: None,
      picsum_photo: None,
      roll_count: 0,
      status_msg: String::new(),
      sink,
    }
  }

  // ── Startup ───────────────────────────────────────────────────────────────

  /// Read the shared roll counter. A missing key counts as zero; a sink
  /// failure is reported in the status bar, never fatal.
  pub async fn load_roll_count(&mut self) {
    match self.sink.read::<u64>(ROLL_PATH).await {
      Ok(count) => self.roll_count = count.unwrap_or(0),
      Err(e) => self.status_msg = format!("Error reading roll counter: {e}"),
    }
  }

  // ── Pinning ───────────────────────────────────────────────────────────────

  /// Pin the freshly selected photos once their fetches succeed. Called
  /// every loop iteration; a pane that already holds a photo keeps it.
  pub fn pin_selected(&mut self) {
    if self.mars_photo.is_none() {
      if let FetchState::Success { selected, .. } = self.mars.state() {
        self.mars_photo = Some(selected);
      }
    }
    if self.picsum_photo.is_none() {
      if let FetchState::Success { selected, .. } = self.picsum.state() {
        self.picsum_photo = Some(selected);
      }
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Char('r') => self.roll().await,
      KeyCode::Char('s') => self.save().await,
      KeyCode::Char('l') => self.load().await,
      _ => {}
    }

    Ok(true)
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  /// Drop the pinned pair, re-fetch both sources, and bump the shared roll
  /// counter.
  async fn roll(&mut self) {
    self.mars_photo = None;
    self.picsum_photo = None;
    self.mars.refresh();
    self.picsum.refresh();

    self.roll_count += 1;
    match self.sink.write(ROLL_PATH, &self.roll_count).await {
      Ok(()) => self.status_msg = String::new(),
      Err(e) => self.status_msg = format!("Error updating roll counter: {e}"),
    }
  }

  /// Persist the displayed pair under `<collection>/<id>` and record the
  /// ids under `lastAdd/<collection>`.
  async fn save(&mut self) {
    let mut saved = 0usize;

    if let Some(photo) = self.mars_photo.clone() {
      if let Err(e) = self.save_one(Collection::Mars, &photo.id, &photo).await {
        self.status_msg = format!("Error saving Mars photo: {e}");
        return;
      }
      saved += 1;
    }
    if let Some(photo) = self.picsum_photo.clone() {
      if let Err(e) = self.save_one(Collection::Picsum, &photo.id, &photo).await {
        self.status_msg = format!("Error saving Picsum photo: {e}");
        return;
      }
      saved += 1;
    }

    self.status_msg = if saved == 0 {
      "Nothing to save yet".into()
    } else {
      format!("Saved {saved} photo(s)")
    };
  }

  async fn save_one<T>(
    &self,
    collection: Collection,
    id: &str,
    photo: &T,
  ) -> Result<(), S::Error>
  where
    T: serde::Serialize + Sync,
  {
    self
      .sink
      .write(&format!("{collection}/{id}"), photo)
      .await?;
    self
      .sink
      .write(&format!("{LAST_ADD_PATH}/{collection}"), &id)
      .await?;
    Ok(())
  }

  /// Load the last-saved pair back from the sink and pin it.
  async fn load(&mut self) {
    let mut loaded = 0usize;

    match self.load_one::<MarsPhoto>(Collection::Mars).await {
      Ok(Some(photo)) => {
        self.mars_photo = Some(photo);
        loaded += 1;
      }
      Ok(None) => {}
      Err(e) => {
        self.status_msg = format!("Error loading Mars photo: {e}");
        return;
      }
    }
    match self.load_one::<PicsumPhoto>(Collection::Picsum).await {
      Ok(Some(photo)) => {
        self.picsum_photo = Some(photo);
        loaded += 1;
      }
      Ok(None) => {}
      Err(e) => {
        self.status_msg = format!("Error loading Picsum photo: {e}");
        return;
      }
    }

    self.status_msg = if loaded == 0 {
      "No saved photos yet".into()
    } else {
      format!("Loaded {loaded} photo(s)")
    };
  }

  /// Resolve `lastAdd/<collection>` to an id, then read the record saved
  /// under `<collection>/<id>`. Either key may be absent.
  async fn load_one<T>(&self, collection: Collection) -> Result<Option<T>, S::Error>
  where
    T: serde::de::DeserializeOwned,
  {
    let id: Option<String> = self
      .sink
      .read(&format!("{LAST_ADD_PATH}/{collection}"))
      .await?;
    let Some(id) = id else {
      return Ok(None);
    };
    self.sink.read(&format!("{collection}/{id}")).await
  }
}
