//! Wire models for the task store API.
//!
//! Only the fields the sync run needs are modeled; unknown fields are
//! ignored. Everything the store returns is treated as untrusted and
//! nullable.

use rota_core::types::PersistedTask;
use serde::{Deserialize, Serialize};

/// One task list as returned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskList {
    pub id: String,
    pub title: Option<String>,
}

/// Response page for the task-lists collection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListsPage {
    #[serde(default)]
    pub items: Vec<TaskList>,
    pub next_page_token: Option<String>,
}

/// One task as returned by the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteTask {
    pub id: Option<String>,
    pub title: Option<String>,
    pub due: Option<String>,
    pub status: Option<String>,
}

/// Response page for a list's tasks collection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksPage {
    #[serde(default)]
    pub items: Vec<RemoteTask>,
    pub next_page_token: Option<String>,
}

/// Creation payload for one new task.
#[derive(Debug, Clone, Serialize)]
pub struct NewTask<'a> {
    pub title: &'a str,
    pub due: String,
}

impl From<RemoteTask> for PersistedTask {
    fn from(task: RemoteTask) -> Self {
        Self {
            title: task.title,
            due: task.due,
        }
    }
}
