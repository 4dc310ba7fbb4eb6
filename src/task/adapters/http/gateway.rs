//! REST gateway adapter backed by `reqwest`.

use super::wire::{NewTaskWire, OptionWire, TaskWire, UpdateWire};
use crate::task::{
    domain::{NewTask, TaskId, TaskRecord},
    ports::{TaskGateway, TaskGatewayError, TaskGatewayResult, TaskUpdate},
};
use crate::taxonomy::domain::{Dimension, OptionId, OptionItem};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Gateway speaking the dashboard's REST contract.
///
/// Endpoints:
/// `GET/POST /tasks`, `PUT/DELETE /tasks/{id}`, `GET /tasks/categories`,
/// `GET /tasks/subcategories/{categoryId}`,
/// `GET /tasks/technologies/{subcategoryId}`, and
/// `GET /tasks/{statuses|priorities|types|levels|sources}`.
#[derive(Debug, Clone)]
pub struct HttpTaskGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTaskGateway {
    /// Creates a gateway rooted at the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> TaskGatewayResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(TaskGatewayError::persistence)?
            .error_for_status()
            .map_err(TaskGatewayError::persistence)?;
        response
            .json()
            .await
            .map_err(|err| TaskGatewayError::MalformedResponse(err.to_string()))
    }

    fn option_path(dimension: Dimension, parent: Option<OptionId>) -> TaskGatewayResult<String> {
        match dimension {
            Dimension::Category => Ok("tasks/categories".to_owned()),
            Dimension::Subcategory => parent
                .map(|scope| format!("tasks/subcategories/{scope}"))
                .ok_or(TaskGatewayError::MissingScope(dimension)),
            Dimension::Technology => parent
                .map(|scope| format!("tasks/technologies/{scope}"))
                .ok_or(TaskGatewayError::MissingScope(dimension)),
            Dimension::Status => Ok("tasks/statuses".to_owned()),
            Dimension::Priority => Ok("tasks/priorities".to_owned()),
            Dimension::Kind => Ok("tasks/types".to_owned()),
            Dimension::Level => Ok("tasks/levels".to_owned()),
            Dimension::Source => Ok("tasks/sources".to_owned()),
        }
    }
}

#[async_trait]
impl TaskGateway for HttpTaskGateway {
    async fn list_tasks(&self) -> TaskGatewayResult<Vec<TaskRecord>> {
        let rows: Vec<TaskWire> = self.get_json("tasks").await?;
        rows.into_iter().map(TaskWire::into_record).collect()
    }

    async fn create_task(&self, new_task: &NewTask) -> TaskGatewayResult<TaskRecord> {
        let response = self
            .client
            .post(self.url("tasks"))
            .json(&NewTaskWire::from(new_task))
            .send()
            .await
            .map_err(TaskGatewayError::persistence)?
            .error_for_status()
            .map_err(TaskGatewayError::persistence)?;
        let row: TaskWire = response
            .json()
            .await
            .map_err(|err| TaskGatewayError::MalformedResponse(err.to_string()))?;
        row.into_record()
    }

    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> TaskGatewayResult<TaskRecord> {
        let response = self
            .client
            .put(self.url(&format!("tasks/{id}")))
            .json(&UpdateWire::from(update))
            .send()
            .await
            .map_err(TaskGatewayError::persistence)?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(TaskGatewayError::NotFound(id));
        }
        let row: TaskWire = response
            .error_for_status()
            .map_err(TaskGatewayError::persistence)?
            .json()
            .await
            .map_err(|err| TaskGatewayError::MalformedResponse(err.to_string()))?;
        row.into_record()
    }

    async fn delete_task(&self, id: TaskId) -> TaskGatewayResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("tasks/{id}")))
            .send()
            .await
            .map_err(TaskGatewayError::persistence)?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(TaskGatewayError::NotFound(id));
        }
        response
            .error_for_status()
            .map_err(TaskGatewayError::persistence)?;
        Ok(())
    }

    async fn list_options(
        &self,
        dimension: Dimension,
        parent: Option<OptionId>,
    ) -> TaskGatewayResult<Vec<OptionItem>> {
        let path = Self::option_path(dimension, parent)?;
        let options: Vec<OptionWire> = self.get_json(&path).await?;
        Ok(options.into_iter().map(OptionItem::from).collect())
    }
}
