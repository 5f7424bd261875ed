//! Podcast handlers
//!
//! The submit-or-render endpoint and the per-feed document endpoint.
//! A request carrying `url` appends to a feed; any other request renders it.

use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Path, Query, State,
    },
    http::header,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;

use crate::domain::entities::FeedName;
use crate::error::{AppError, MessageResponse};
use crate::AppState;

pub const ADDED_MESSAGE: &str = "successfully added URL";
pub const XML_CONTENT_TYPE: &str = "application/xml";

/// Parameters of the submit-or-render endpoint, from the query string or a form body
#[derive(Debug, Default, Deserialize)]
pub struct PodcastParams {
    /// Audio URL to add; absent means render
    pub url: Option<String>,
    pub feedname: Option<String>,
    /// Only used when adding
    pub title: Option<String>,
    /// Only used when rendering
    pub feedtype: Option<String>,
}

impl PodcastParams {
    /// Overlay `body` on these params; fields present in the body win
    fn merge(self, body: PodcastParams) -> Self {
        Self {
            url: body.url.or(self.url),
            feedname: body.feedname.or(self.feedname),
            title: body.title.or(self.title),
            feedtype: body.feedtype.or(self.feedtype),
        }
    }
}

/// Query params for GET /feeds/:feedname
#[derive(Debug, Default, Deserialize)]
pub struct RenderParams {
    pub feedtype: Option<String>,
}

/// GET / and POST /
///
/// Adds `url` to the feed when present, otherwise returns the feed document.
/// Parameters come from the query string and, on POST, a urlencoded body.
pub async fn podcastit(
    State(state): State<AppState>,
    query: Result<Query<PodcastParams>, QueryRejection>,
    body: Result<Form<PodcastParams>, FormRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let params = match body {
        Ok(Form(body)) => query.merge(body),
        // No urlencoded body: the query string is all there is
        Err(FormRejection::InvalidFormContentType(_)) => query,
        Err(e) => return Err(AppError::BadRequest(e.body_text())),
    };
    let feed = resolve_feed_name(&state, params.feedname.as_deref())?;

    match params.url {
        Some(url) => {
            state
                .feed_service
                .submit(&feed, &url, params.title.as_deref())
                .await?;
            Ok(Json(MessageResponse::new(ADDED_MESSAGE)).into_response())
        }
        None => render_response(&state, &feed, params.feedtype.as_deref()).await,
    }
}

/// GET /feeds/:feedname
///
/// Canonical location of a feed; the id written into its metadata.
pub async fn get_feed(
    State(state): State<AppState>,
    Path(feedname): Path<String>,
    Query(params): Query<RenderParams>,
) -> Result<Response, AppError> {
    let feed: FeedName = feedname.parse()?;
    render_response(&state, &feed, params.feedtype.as_deref()).await
}

async fn render_response(
    state: &AppState,
    feed: &FeedName,
    feed_type: Option<&str>,
) -> Result<Response, AppError> {
    let feed_type = feed_type.filter(|t| !t.is_empty());
    let rendered = state.feed_service.render_feed(feed, feed_type).await?;
    tracing::debug!(feed = %feed, format = %rendered.format, bytes = rendered.body.len(), "Serving feed");

    Ok(([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], rendered.body).into_response())
}

/// A blank or missing `feedname` selects the configured default feed
fn resolve_feed_name(state: &AppState, feedname: Option<&str>) -> Result<FeedName, AppError> {
    match feedname.filter(|n| !n.is_empty()) {
        Some(name) => Ok(name.parse()?),
        None => Ok(state.config.default_feed.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;
    use tempfile::{tempdir, TempDir};

    use crate::test_utils::test_config;
    use crate::{app_router, AppState};

    fn test_server() -> (TestServer, TempDir) {
        let dir = tempdir().unwrap();
        let state = AppState::new(test_config(dir.path()));
        let server = TestServer::new(app_router(state)).unwrap();
        (server, dir)
    }

    #[test]
    fn parse_podcast_params_all_optional() {
        let params: PodcastParams = serde_json::from_str("{}").unwrap();
        assert!(params.url.is_none());
        assert!(params.feedname.is_none());
        assert!(params.title.is_none());
        assert!(params.feedtype.is_none());
    }

    #[tokio::test]
    async fn add_url_returns_success_message() {
        let (server, dir) = test_server();

        let response = server
            .get("/")
            .add_query_param("url", "http://example.com/ep1.mp3")
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "application/json");
        let body: Value = response.json();
        assert_eq!(body["message"], "successfully added URL");
        assert!(dir.path().join("podcast.csv").exists());
    }

    #[tokio::test]
    async fn add_then_render_atom() {
        let (server, _dir) = test_server();

        server
            .get("/")
            .add_query_param("url", "http://example.com/ep1.mp3")
            .await
            .assert_status_ok();

        let response = server.get("/").await;

        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "application/xml");
        let feed = atom_syndication::Feed::read_from(&response.as_bytes()[..]).unwrap();
        assert_eq!(feed.entries().len(), 1);
        assert_eq!(feed.entries()[0].title().as_str(), "ep1.mp3 from example.com");
        assert_eq!(feed.entries()[0].links()[0].href(), "http://example.com/ep1.mp3");
    }

    #[tokio::test]
    async fn post_form_adds_url_with_title() {
        let (server, _dir) = test_server();

        server
            .post("/")
            .form(&[
                ("url", "http://example.com/ep2.mp3"),
                ("title", "Episode two"),
                ("feedname", "evening"),
            ])
            .await
            .assert_status_ok();

        let response = server
            .get("/feeds/evening")
            .add_query_param("feedtype", "rss")
            .await;

        response.assert_status_ok();
        let channel = rss::Channel::read_from(&response.as_bytes()[..]).unwrap();
        assert_eq!(channel.items().len(), 1);
        assert_eq!(channel.items()[0].title(), Some("Episode two"));
    }

    #[tokio::test]
    async fn post_with_query_string_adds_url() {
        let (server, _dir) = test_server();

        let response = server
            .post("/")
            .add_query_param("url", "http://example.com/ep3.mp3")
            .add_query_param("feedname", "evening")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "successfully added URL");

        let response = server.get("/feeds/evening").await;
        let feed = atom_syndication::Feed::read_from(&response.as_bytes()[..]).unwrap();
        assert_eq!(feed.entries().len(), 1);
        assert_eq!(feed.entries()[0].id(), "http://example.com/ep3.mp3");
    }

    #[tokio::test]
    async fn post_body_fields_override_query_string() {
        let (server, _dir) = test_server();

        server
            .post("/")
            .add_query_param("url", "http://example.com/from-query.mp3")
            .add_query_param("title", "Query title")
            .form(&[("url", "http://example.com/from-body.mp3")])
            .await
            .assert_status_ok();

        let response = server.get("/").await;
        let feed = atom_syndication::Feed::read_from(&response.as_bytes()[..]).unwrap();
        assert_eq!(feed.entries().len(), 1);
        assert_eq!(feed.entries()[0].id(), "http://example.com/from-body.mp3");
        assert_eq!(feed.entries()[0].title().as_str(), "Query title");
    }

    #[tokio::test]
    async fn bare_post_renders_feed() {
        let (server, dir) = test_server();

        let response = server.post("/").await;

        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "application/xml");
        let feed = atom_syndication::Feed::read_from(&response.as_bytes()[..]).unwrap();
        assert!(feed.entries().is_empty());
        assert!(!dir.path().join("podcast.csv").exists());
    }

    #[tokio::test]
    async fn post_rss_render_from_query_string() {
        let (server, _dir) = test_server();

        server
            .get("/")
            .add_query_param("url", "http://user@example.com/ep.mp3")
            .await
            .assert_status_ok();

        let response = server.post("/").add_query_param("feedtype", "rss").await;

        response.assert_status_ok();
        let channel = rss::Channel::read_from(&response.as_bytes()[..]).unwrap();
        assert_eq!(channel.items().len(), 1);
    }

    #[tokio::test]
    async fn render_empty_feed() {
        let (server, dir) = test_server();

        let response = server.get("/").add_query_param("feedtype", "rss").await;

        response.assert_status_ok();
        let channel = rss::Channel::read_from(&response.as_bytes()[..]).unwrap();
        assert!(channel.items().is_empty());
        assert!(!dir.path().join("podcast.csv").exists());
    }

    #[tokio::test]
    async fn invalid_url_is_rejected() {
        let (server, dir) = test_server();

        let response = server.get("/").add_query_param("url", "not a url").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["message"].as_str().unwrap().contains("not a url"));
        assert!(!dir.path().join("podcast.csv").exists());
    }

    #[tokio::test]
    async fn unsupported_feedtype_is_rejected() {
        let (server, _dir) = test_server();

        let response = server.get("/").add_query_param("feedtype", "foo").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.header("content-type"), "application/json");
        let body: Value = response.json();
        assert_eq!(
            body["message"],
            "Unsupported feed type 'foo', expected 'atom' or 'rss'"
        );
    }

    #[tokio::test]
    async fn traversal_feedname_is_rejected() {
        let (server, _dir) = test_server();

        let response = server
            .get("/")
            .add_query_param("feedname", "../secrets")
            .add_query_param("url", "http://example.com/ep1.mp3")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn corrupt_log_reports_json_error() {
        let (server, dir) = test_server();
        std::fs::write(dir.path().join("podcast.csv"), "garbage\n").unwrap();

        let response = server.get("/").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["message"], "Feed log is corrupt");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (server, _dir) = test_server();

        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
    }
}
