//! `photoroll` — terminal UI for the photoroll demo.
//!
//! Fetches the photo lists of two remote photo APIs (Mars rover photos and
//! Picsum placeholder photos), shows one random photo from each, and lets
//! the user roll fresh ones, save the displayed pair to a Firebase Realtime
//! Database, and load the last saved pair back.
//!
//! # Usage
//!
//! ```
//! photoroll --firebase-url https://my-project.firebaseio.com
//! photoroll --config ~/.config/photoroll/config.toml
//! ```

mod app;
mod ui;

use std::{io, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use photoroll_client::{MARS_BASE_URL, MarsApi, PICSUM_BASE_URL, PicsumApi};
use photoroll_core::PhotoFeed;
use photoroll_store_firebase::FirebaseStore;
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "photoroll", about = "Terminal UI for the photoroll photo demo")]
struct Args {
  /// Path to a TOML config file (firebase_url, mars_url, picsum_url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the Firebase Realtime Database used for save/load.
  #[arg(long, env = "PHOTOROLL_FIREBASE_URL")]
  firebase_url: Option<String>,

  /// Base URL of the Mars photo service.
  #[arg(long, env = "PHOTOROLL_MARS_URL")]
  mars_url: Option<String>,

  /// Base URL of the Picsum photo service.
  #[arg(long, env = "PHOTOROLL_PICSUM_URL")]
  picsum_url: Option<String>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  firebase_url: String,
  #[serde(default)]
  mars_url:     String,
  #[serde(default)]
  picsum_url:   String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Log to stderr so the TUI on stdout stays intact; silent unless
  // RUST_LOG lowers the filter.
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let firebase_url = args
    .firebase_url
    .or_else(|| (!file_cfg.firebase_url.is_empty()).then(|| file_cfg.firebase_url.clone()))
    .context("firebase_url must be set (flag, PHOTOROLL_FIREBASE_URL, or config file)")?;
  let mars_url = args
    .mars_url
    .or_else(|| (!file_cfg.mars_url.is_empty()).then(|| file_cfg.mars_url.clone()))
    .unwrap_or_else(|| MARS_BASE_URL.to_string());
  let picsum_url = args
    .picsum_url
    .or_else(|| (!file_cfg.picsum_url.is_empty()).then(|| file_cfg.picsum_url.clone()))
    .unwrap_or_else(|| PICSUM_BASE_URL.to_string());

  tracing::debug!(%mars_url, %picsum_url, "starting photoroll");

  let sink = FirebaseStore::new(firebase_url).context("building Firebase client")?;
  let mars = PhotoFeed::new(MarsApi::with_base_url(&mars_url).context("building Mars client")?);
  let picsum =
    PhotoFeed::new(PicsumApi::with_base_url(&picsum_url).context("building Picsum client")?);

  let mut app = App::new(mars, picsum, sink);
  app.load_roll_count().await;

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app).await;

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop<S: photoroll_core::PhotoSink>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<S>,
) -> Result<()> {
  loop {
    // Pin freshly selected photos once their fetches succeed.
    app.pin_selected();

    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting so the
    // fetch tasks keep making progress.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) => {
          let cont = app.handle_key(key).await?;
          if !cont {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Terminal will redraw on next iteration.
        }
        _ => {}
      }
    }
  }

  Ok(())
}
