//! Wire payloads of the REST backend and their mapping to board types.

use crate::board::{
    domain::{
        Project, ProjectId, ProjectSummary, StatusId, Task, TaskDetails, TaskId, TaskPriority,
    },
    ports::BackendError,
};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status recorded for tasks whose payload carries none.
pub const FALLBACK_STATUS: &str = "TODO";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_FORMAT_LEN: usize = 10;

/// Identifier as sent by the backend, either numeric or textual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    /// Numeric database key.
    Number(i64),
    /// Textual key such as a UUID.
    Text(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Project payload returned by `GET /projetos/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjetoPayload {
    /// Project identifier.
    pub id: WireId,
    /// Project name.
    #[serde(default)]
    pub nome: Option<String>,
    /// Owning client, if embedded.
    #[serde(default)]
    pub cliente: Option<ClientePayload>,
    /// Flat task list.
    #[serde(default)]
    pub tarefas: Vec<TarefaPayload>,
}

/// Client summary embedded in a project payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientePayload {
    /// Client name.
    #[serde(default)]
    pub nome: Option<String>,
}

/// Task payload as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TarefaPayload {
    /// Task identifier.
    pub id: WireId,
    /// Task name.
    #[serde(default)]
    pub nome: Option<String>,
    /// Task description.
    #[serde(default)]
    pub descricao: Option<String>,
    /// Raw priority value.
    #[serde(default)]
    pub prioridade: Option<String>,
    /// Raw status value.
    #[serde(default)]
    pub status: Option<String>,
    /// Start date, `YYYY-MM-DD` or RFC 3339.
    #[serde(default)]
    pub data_inicio: Option<String>,
    /// Due date, `YYYY-MM-DD` or RFC 3339.
    #[serde(default)]
    pub data_termino: Option<String>,
}

impl TryFrom<ProjetoPayload> for Project {
    type Error = BackendError;

    fn try_from(payload: ProjetoPayload) -> Result<Self, Self::Error> {
        let id = ProjectId::new(payload.id.to_string()).map_err(BackendError::decode)?;
        let tasks = payload
            .tarefas
            .into_iter()
            .map(Task::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            summary: ProjectSummary {
                id,
                name: payload.nome.unwrap_or_default(),
                client_name: payload.cliente.and_then(|cliente| cliente.nome),
            },
            tasks,
        })
    }
}

impl TryFrom<TarefaPayload> for Task {
    type Error = BackendError;

    fn try_from(payload: TarefaPayload) -> Result<Self, Self::Error> {
        let id = TaskId::new(payload.id.to_string()).map_err(BackendError::decode)?;
        let raw_status = payload
            .status
            .filter(|status| !status.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_STATUS.to_owned());
        let status_id = StatusId::new(raw_status).map_err(BackendError::decode)?;
        let details = TaskDetails {
            name: payload.nome.unwrap_or_default(),
            description: payload.descricao.unwrap_or_default(),
            priority: payload
                .prioridade
                .as_deref()
                .map(TaskPriority::parse_lenient)
                .unwrap_or_default(),
            status_id,
            start_date: payload.data_inicio.as_deref().and_then(parse_wire_date),
            due_date: payload.data_termino.as_deref().and_then(parse_wire_date),
        };
        Ok(Self::new(id, details))
    }
}

/// Body of `POST /projetos/{id}/tarefas` and `PUT /tarefas/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TarefaRequest {
    /// Task name.
    pub nome: String,
    /// Task description.
    pub descricao: String,
    /// Canonical priority value.
    pub prioridade: String,
    /// Status identifier.
    pub status: String,
    /// Start date as `YYYY-MM-DD`.
    pub data_inicio: Option<String>,
    /// Due date as `YYYY-MM-DD`.
    pub data_termino: Option<String>,
}

impl From<&TaskDetails> for TarefaRequest {
    fn from(details: &TaskDetails) -> Self {
        Self {
            nome: details.name.clone(),
            descricao: details.description.clone(),
            prioridade: details.priority.as_str().to_owned(),
            status: details.status_id.as_str().to_owned(),
            data_inicio: details.start_date.map(format_wire_date),
            data_termino: details.due_date.map(format_wire_date),
        }
    }
}

/// Body of `PATCH /tarefas/{id}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRequest {
    /// New status identifier.
    pub status: String,
}

/// Parses a backend date, keeping only the calendar date of timestamps.
///
/// Returns `None` for blank or unparseable values.
#[must_use]
pub fn parse_wire_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
        .or_else(|| {
            trimmed
                .get(..DATE_FORMAT_LEN)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok())
        });
    if parsed.is_none() {
        tracing::debug!(value = trimmed, "ignoring unparseable task date");
    }
    parsed
}

fn format_wire_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
