//! Backend event source abstraction and its HTTP implementation.
//!
//! [`EventSource`] is the seam between the view-model and the backend. The view-model
//! only needs [`EventSource::fetch_page`]; the detail and editing screens use the
//! remaining methods. [`HttpEventSource`] implements the contract over `reqwest`.
//!
//! # Endpoints
//!
//! | Operation       | Request                              |
//! |-----------------|--------------------------------------|
//! | `fetch_page`    | `GET /api/events?page=<n>&limit=<k>` |
//! | `fetch_event`   | `GET /api/events/<id>`               |
//! | `create_event`  | `POST /api/events`                   |
//! | `update_event`  | `PUT /api/events/<id>`               |

use crate::api::messages::{EventDraft, EventEnvelope, EventPage, PageQuery};
use crate::api::session::Session;
use crate::domain::error::{EventBoardError, Result};
use crate::domain::Event;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::Instrument;
use url::Url;

/// Abstraction over the events backend.
///
/// # Implementations
///
/// - [`HttpEventSource`]: REST backend over HTTP (default)
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetches one page of the listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend answers with a
    /// non-success status, or the body is not a page.
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<EventPage>;

    /// Fetches a single event for the detail view.
    ///
    /// # Errors
    ///
    /// Same conditions as [`fetch_page`](Self::fetch_page).
    async fn fetch_event(&self, id: &str) -> Result<Event>;

    /// Creates an event and returns the stored record.
    ///
    /// # Errors
    ///
    /// Same conditions as [`fetch_page`](Self::fetch_page).
    async fn create_event(&self, draft: &EventDraft) -> Result<Event>;

    /// Replaces an event and returns the stored record.
    ///
    /// # Errors
    ///
    /// Same conditions as [`fetch_page`](Self::fetch_page).
    async fn update_event(&self, id: &str, draft: &EventDraft) -> Result<Event>;
}

/// REST event source.
///
/// Holds the injected [`Session`] and attaches its bearer token to every request.
#[derive(Debug, Clone)]
pub struct HttpEventSource {
    http: Client,
    base_url: Url,
    session: Session,
}

impl HttpEventSource {
    /// Creates a source for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`EventBoardError::Config`] if `base_url` is not an absolute
    /// http(s) URL, or [`EventBoardError::Http`] if the client cannot be built.
    pub fn new(base_url: &str, session: Session, timeout: Duration) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder().timeout(timeout).build()?;

        tracing::debug!(
            base_url = %base_url,
            authenticated = session.is_authenticated(),
            user_id = session.user_id(),
            "event source created"
        );

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                EventBoardError::Config(format!("base URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(["api", "events"])
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<Response> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            tracing::debug!(status = status.as_u16(), url = %url, "backend rejected request");
            Err(EventBoardError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            })
        }
    }

    async fn decode_event(response: Response) -> Result<Event> {
        let envelope: EventEnvelope = response
            .json()
            .await
            .map_err(|e| EventBoardError::Decode(e.to_string()))?;
        Ok(envelope.into_event())
    }
}

#[async_trait]
impl EventSource for HttpEventSource {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<EventPage> {
        let span = tracing::debug_span!("fetch_page", page, limit);

        async move {
            let url = self.endpoint(&[])?;
            let request = self.http.get(url.clone()).query(&PageQuery { page, limit });
            let response = self.send(request, &url).await?;
            let page: EventPage = response
                .json()
                .await
                .map_err(|e| EventBoardError::Decode(e.to_string()))?;

            tracing::debug!(
                events = page.events.len(),
                has_more = page.has_more,
                "page fetched"
            );
            Ok::<_, EventBoardError>(page)
        }
        .instrument(span)
        .await
    }

    async fn fetch_event(&self, id: &str) -> Result<Event> {
        let id = checked_id(id)?;
        let url = self.endpoint(&[id])?;
        let response = self.send(self.http.get(url.clone()), &url).await?;
        Self::decode_event(response).await
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<Event> {
        let url = self.endpoint(&[])?;
        let response = self.send(self.http.post(url.clone()).json(draft), &url).await?;
        let event = Self::decode_event(response).await?;
        tracing::info!(event_id = %event.id, title = %event.title, "event created");
        Ok(event)
    }

    async fn update_event(&self, id: &str, draft: &EventDraft) -> Result<Event> {
        let id = checked_id(id)?;
        let url = self.endpoint(&[id])?;
        let response = self.send(self.http.put(url.clone()).json(draft), &url).await?;
        let event = Self::decode_event(response).await?;
        tracing::info!(event_id = %event.id, "event updated");
        Ok(event)
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| EventBoardError::Config(format!("invalid API base URL '{raw}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(EventBoardError::Config(format!(
            "API base URL must be an absolute http(s) URL, got '{raw}'"
        )));
    }
    Ok(url)
}

fn checked_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(EventBoardError::InvalidRequest("event id must not be empty".to_string()));
    }
    Ok(id)
}
