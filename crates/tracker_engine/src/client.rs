use std::time::Duration;

use reqwest::header::COOKIE;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracker_core::{Job, JobDraft, JobFilter, JobTag, Note, Tag};
use tracker_logging::{tracker_debug, tracker_trace};

use crate::RemoteError;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    /// Raw `Cookie` header value of an authenticated session, passed through as is.
    pub session_cookie: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            session_cookie: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewNote<'a> {
    content: &'a str,
    job_id: &'a str,
}

#[derive(Serialize)]
struct NewTag<'a> {
    name: &'a str,
    color: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TagLink<'a> {
    tag_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the `/api/jobs` endpoints.
#[derive(Debug, Clone)]
pub struct JobsClient {
    http: reqwest::Client,
    base_url: Url,
    session_cookie: Option<String>,
}

impl JobsClient {
    pub fn new(settings: ClientSettings) -> Result<Self, RemoteError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| RemoteError::new(format!("invalid base url: {err}")))?;
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(map_reqwest_error)?;
        Ok(Self {
            http,
            base_url,
            session_cookie: settings.session_cookie,
        })
    }

    /// Lists the signed-in user's jobs, most recently updated first.
    pub async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, RemoteError> {
        let mut url = self.endpoint(&["api", "jobs"])?;
        let pairs = filter.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        self.send(self.request(Method::GET, url)).await
    }

    pub async fn create_job(&self, draft: &JobDraft) -> Result<Job, RemoteError> {
        let url = self.endpoint(&["api", "jobs"])?;
        self.send(self.request(Method::POST, url).json(draft)).await
    }

    /// Full update; the API expects every form field, not a patch.
    pub async fn update_job(&self, id: &str, body: &JobDraft) -> Result<Job, RemoteError> {
        let url = self.endpoint(&["api", "jobs", id])?;
        self.send(self.request(Method::PUT, url).json(body)).await
    }

    pub async fn delete_job(&self, id: &str) -> Result<(), RemoteError> {
        let url = self.endpoint(&["api", "jobs", id])?;
        let response = self.execute(self.request(Method::DELETE, url)).await?;
        tracker_debug!("deleted job {} ({})", id, response.status());
        Ok(())
    }

    pub async fn add_note(&self, job_id: &str, content: &str) -> Result<Note, RemoteError> {
        let url = self.endpoint(&["api", "notes"])?;
        let body = NewNote { content, job_id };
        self.send(self.request(Method::POST, url).json(&body)).await
    }

    pub async fn create_tag(&self, name: &str, color: &str) -> Result<Tag, RemoteError> {
        let url = self.endpoint(&["api", "tags"])?;
        let body = NewTag { name, color };
        self.send(self.request(Method::POST, url).json(&body)).await
    }

    pub async fn attach_tag(&self, job_id: &str, tag_id: &str) -> Result<JobTag, RemoteError> {
        let url = self.endpoint(&["api", "jobs", job_id, "tags"])?;
        let body = TagLink { tag_id };
        self.send(self.request(Method::POST, url).json(&body)).await
    }

    pub async fn detach_tag(&self, job_id: &str, tag_id: &str) -> Result<(), RemoteError> {
        let mut url = self.endpoint(&["api", "jobs", job_id, "tags"])?;
        url.query_pairs_mut().append_pair("tagId", tag_id);
        self.execute(self.request(Method::DELETE, url)).await?;
        tracker_debug!("detached tag {} from job {}", tag_id, job_id);
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RemoteError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RemoteError::new("base url cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracker_trace!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match &self.session_cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response, RemoteError> {
        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        // Prefer the API's `{ "error": ... }` message over the bare status line.
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        Err(RemoteError::with_status(status.as_u16(), message))
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, RemoteError> {
        let response = self.execute(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| RemoteError::new(format!("invalid response body: {err}")))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RemoteError {
    if err.is_timeout() {
        return RemoteError::new(format!("timeout: {err}"));
    }
    RemoteError::new(format!("network error: {err}"))
}
