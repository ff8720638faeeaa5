//! `reqwest`-based implementation of the project backend port.

use super::{
    HttpBackendConfig,
    models::{ProjetoPayload, StatusRequest, TarefaPayload, TarefaRequest},
};
use crate::board::{
    domain::{Project, ProjectId, StatusId, Task, TaskDetails, TaskId},
    ports::{BackendError, BackendResult, ProjectBackend},
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

/// Project backend reached over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpProjectBackend {
    client: Client,
    base_url: Url,
    bearer_token: Option<String>,
}

impl HttpProjectBackend {
    /// Creates a backend client from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Transport`] when the base URL is invalid or
    /// the HTTP client cannot be built.
    pub fn new(config: &HttpBackendConfig) -> BackendResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(BackendError::transport)?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::transport(std::io::Error::other(format!(
                "base url {} cannot hold a path",
                config.base_url
            ))));
        }
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(BackendError::transport)?;
        Ok(Self {
            client,
            base_url,
            bearer_token: config.bearer_token.clone(),
        })
    }

    /// Builds the URL of an endpoint below the base URL.
    ///
    /// Each segment is percent-encoded on its own.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Transport`] when the base URL cannot hold a
    /// path.
    pub fn endpoint(&self, segments: &[&str]) -> BackendResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                BackendError::transport(std::io::Error::other("base url cannot hold a path"))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn send(&self, request: RequestBuilder) -> BackendResult<Response> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(BackendError::transport)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(response.url().path().to_owned()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "backend rejected request");
            return Err(BackendError::rejected(status.as_u16(), message));
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> BackendResult<T> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(BackendError::decode)
    }
}

#[async_trait]
impl ProjectBackend for HttpProjectBackend {
    async fn get_project(&self, project_id: &ProjectId) -> BackendResult<Project> {
        let url = self.endpoint(&["projetos", project_id.as_str()])?;
        let payload: ProjetoPayload = self.send_json(self.client.get(url)).await?;
        Project::try_from(payload)
    }

    async fn update_task_status(
        &self,
        task_id: &TaskId,
        status_id: &StatusId,
    ) -> BackendResult<Option<Task>> {
        let url = self.endpoint(&["tarefas", task_id.as_str(), "status"])?;
        let body = StatusRequest {
            status: status_id.as_str().to_owned(),
        };
        let response = self.send(self.client.patch(url).json(&body)).await?;
        let text = response.text().await.map_err(BackendError::transport)?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str::<TarefaPayload>(&text) {
            Ok(payload) => Task::try_from(payload).map(Some),
            Err(err) => {
                tracing::warn!(%task_id, error = %err, "status update returned no task body");
                Ok(None)
            }
        }
    }

    async fn create_task(
        &self,
        project_id: &ProjectId,
        draft: &TaskDetails,
    ) -> BackendResult<Task> {
        let url = self.endpoint(&["projetos", project_id.as_str(), "tarefas"])?;
        let body = TarefaRequest::from(draft);
        let payload: TarefaPayload = self.send_json(self.client.post(url).json(&body)).await?;
        Task::try_from(payload)
    }

    async fn update_task(&self, task_id: &TaskId, draft: &TaskDetails) -> BackendResult<Task> {
        let url = self.endpoint(&["tarefas", task_id.as_str()])?;
        let body = TarefaRequest::from(draft);
        let payload: TarefaPayload = self.send_json(self.client.put(url).json(&body)).await?;
        Task::try_from(payload)
    }
}
