//! Client tests against a local mock server.

use axum::{Json, Router, http::StatusCode, routing::get};
use photoroll_core::{FetchState, PhotoFeed, PhotoSource as _};
use serde_json::json;

use crate::{ClientError, MarsApi, PicsumApi};

/// Serve `router` on an ephemeral port and return its base URL.
async fn serve(router: Router) -> String {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
    .await
    .expect("binding mock server");
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, router).await.unwrap();
  });
  format!("http://{addr}")
}

fn mars_router() -> Router {
  Router::new().route(
    "/photos",
    get(|| async {
      Json(json!([
        { "id": "424905", "img_src": "https://mars.example/424905.jpg" },
        { "id": "424906", "img_src": "https://mars.example/424906.jpg" },
      ]))
    }),
  )
}

fn picsum_router() -> Router {
  Router::new().route(
    "/v2/list",
    get(|| async {
      Json(json!([
        {
          "id": "0",
          "author": "Alejandro Escamilla",
          "width": 5000,
          "height": 3333,
          "url": "https://unsplash.com/photos/yC-Yzbqy7PY",
          "download_url": "https://picsum.photos/id/0/5000/3333",
        },
      ]))
    }),
  )
}

// ─── Mars ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn mars_fetch_all_decodes_the_list() {
  let base = serve(mars_router()).await;
  let api = MarsApi::with_base_url(&base).unwrap();

  let photos = api.fetch_all().await.unwrap();
  assert_eq!(photos.len(), 2);
  assert_eq!(photos[0].id, "424905");
  assert_eq!(photos[0].img_src, "https://mars.example/424905.jpg");
}

#[tokio::test]
async fn mars_non_2xx_is_a_status_error() {
  let router = Router::new().route(
    "/photos",
    get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
  );
  let base = serve(router).await;
  let api = MarsApi::with_base_url(&base).unwrap();

  match api.fetch_all().await {
    Err(ClientError::Status(status)) => {
      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR)
    }
    other => panic!("expected Status error, got {other:?}"),
  }
}

#[tokio::test]
async fn mars_malformed_body_is_a_request_error() {
  let router =
    Router::new().route("/photos", get(|| async { "definitely not json" }));
  let base = serve(router).await;
  let api = MarsApi::with_base_url(&base).unwrap();

  assert!(matches!(api.fetch_all().await, Err(ClientError::Request(_))));
}

// ─── Picsum ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn picsum_fetch_all_decodes_the_list() {
  let base = serve(picsum_router()).await;
  let api = PicsumApi::with_base_url(&base).unwrap();

  let photos = api.fetch_all().await.unwrap();
  assert_eq!(photos.len(), 1);
  assert_eq!(photos[0].author, "Alejandro Escamilla");
  assert_eq!(photos[0].width, 5000);
  assert_eq!(photos[0].download_url, "https://picsum.photos/id/0/5000/3333");
}

// ─── End to end through the feed ─────────────────────────────────────────────

#[tokio::test]
async fn feed_over_a_real_client_reaches_success() {
  let base = serve(mars_router()).await;
  let feed = PhotoFeed::new(MarsApi::with_base_url(&base).unwrap());
  let mut rx = feed.subscribe();

  loop {
    let state = rx.borrow_and_update().clone();
    match state {
      FetchState::Loading => rx.changed().await.expect("feed dropped"),
      FetchState::Success { summary, selected } => {
        assert_eq!(summary, "Success: 2 Mars photos retrieved");
        assert!(selected.id == "424905" || selected.id == "424906");
        break;
      }
      FetchState::Error => panic!("fetch against the mock server failed"),
    }
  }
}
