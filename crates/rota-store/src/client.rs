//! HTTP client for the task store.

use serde::de::DeserializeOwned;

use rota_core::constants::STORE_API_BASE;
use rota_core::types::{PersistedTask, Task};

use crate::auth::Authorizer;
use crate::error::{StoreError, StoreResult};
use crate::model::{NewTask, TaskList, TaskListsPage, TasksPage};

/// Page size requested from list endpoints.
const PAGE_SIZE: &str = "100";

/// Client for one task store account.
#[derive(Debug, Clone)]
pub struct TasksClient {
    http: reqwest::Client,
    authorizer: Authorizer,
}

impl TasksClient {
    #[must_use]
    pub fn new(authorizer: Authorizer) -> Self {
        Self {
            http: reqwest::Client::new(),
            authorizer,
        }
    }

    /// ## Summary
    /// Lists every task list on the account, following pagination.
    ///
    /// ## Errors
    /// Fails on authorization, transport, or API errors.
    pub async fn list_task_lists(&self) -> StoreResult<Vec<TaskList>> {
        let url = format!("{STORE_API_BASE}/users/@me/lists");
        let mut lists = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![("maxResults", PAGE_SIZE.to_owned())];
            if let Some(token) = page_token.take() {
                query.push(("pageToken", token));
            }
            let page: TaskListsPage = self.get_json(&url, &query).await?;
            lists.extend(page.items);
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(count = lists.len(), "Listed task lists");
        Ok(lists)
    }

    /// ## Summary
    /// Finds the task list with the given title.
    ///
    /// ## Errors
    /// Fails with [`StoreError::MissingList`] if no list carries the
    /// title, besides authorization, transport, and API errors.
    pub async fn find_task_list(&self, title: &str) -> StoreResult<TaskList> {
        let lists = self.list_task_lists().await?;
        lists
            .into_iter()
            .find(|list| list.title.as_deref() == Some(title))
            .ok_or_else(|| StoreError::MissingList(title.to_owned()))
    }

    /// ## Summary
    /// Lists the complete current task state of one list.
    ///
    /// Follows pagination to exhaustion and includes completed and hidden
    /// items, so reconciliation always diffs against full ground truth.
    ///
    /// ## Errors
    /// Fails on authorization, transport, or API errors.
    pub async fn list_tasks(&self, list_id: &str) -> StoreResult<Vec<PersistedTask>> {
        let url = format!("{STORE_API_BASE}/lists/{list_id}/tasks");
        let mut tasks = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("maxResults", PAGE_SIZE.to_owned()),
                ("showCompleted", "true".to_owned()),
                ("showHidden", "true".to_owned()),
            ];
            if let Some(token) = page_token.take() {
                query.push(("pageToken", token));
            }
            let page: TasksPage = self.get_json(&url, &query).await?;
            tasks.extend(page.items.into_iter().map(PersistedTask::from));
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(list_id, count = tasks.len(), "Listed tasks");
        Ok(tasks)
    }

    /// ## Summary
    /// Records one projected occurrence in the given list.
    ///
    /// ## Errors
    /// Fails on authorization, transport, or API errors; the caller
    /// decides whether to re-run (re-running recomputes the delta against
    /// the store, so completed creations are not repeated).
    pub async fn insert_task(&self, list_id: &str, task: &Task) -> StoreResult<()> {
        let url = format!("{STORE_API_BASE}/lists/{list_id}/tasks");
        let payload = NewTask {
            title: &task.title,
            due: task.due_string(),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.authorizer.access_token().await?)
            .json(&payload)
            .send()
            .await?;
        Self::check(response).await?;

        tracing::debug!(list_id, title = %task.title, due = %payload.due, "Inserted task");
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> StoreResult<T> {
        let response = self
            .http
            .get(url)
            .query(query)
            .bearer_auth(self.authorizer.access_token().await?)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Maps non-success statuses to [`StoreError::Api`] with a body
    /// snippet for context.
    async fn check(response: reqwest::Response) -> StoreResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(StoreError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}
