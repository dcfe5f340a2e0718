use crate::error::AppError;
use crate::model::{Task, coerce_tasks};
use crate::storage::KeyValueStore;
use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;

pub const STORAGE_KEY: &str = "terminal_list_tasks_v1";
pub const HISTORY_CAPACITY: usize = 50;

#[derive(Serialize)]
struct ExportPayload<'a> {
    v: u32,
    tasks: &'a [Task],
}

/// Owns the ordered task list, its persistence round-trip, and the bounded
/// undo history. Every mutating operation validates first, snapshots the
/// pre-mutation list, applies, then saves; nothing is written on error.
pub struct TaskStore {
    backend: Box<dyn KeyValueStore>,
    tasks: Vec<Task>,
    history: VecDeque<Vec<Task>>,
}

impl TaskStore {
    /// Loads whatever the backend holds; missing, malformed, or wrong-shape
    /// content degrades to an empty list rather than failing startup.
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        let tasks = load_tasks(backend.as_ref());
        Self {
            backend,
            tasks,
            history: VecDeque::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn add(&mut self, text: &str) -> Result<(), AppError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AppError::EmptyTask);
        }

        self.snapshot();
        self.tasks.push(Task::new(trimmed));
        self.save()
    }

    pub fn toggle(&mut self, index: usize) -> Result<(), AppError> {
        let slot = self.slot(index)?;
        self.snapshot();
        self.tasks[slot].done = !self.tasks[slot].done;
        self.save()
    }

    pub fn delete(&mut self, index: usize) -> Result<(), AppError> {
        let slot = self.slot(index)?;
        self.snapshot();
        self.tasks.remove(slot);
        self.save()
    }

    /// Empties the list. Snapshots even when already empty so a following
    /// `undo` restores the same empty list instead of reporting nothing.
    pub fn reset_all(&mut self) -> Result<(), AppError> {
        self.snapshot();
        self.tasks.clear();
        self.save()
    }

    /// Replaces the whole list from a JSON payload: either a bare array or
    /// an object carrying a `tasks` array. Elements are coerced and
    /// filtered exactly like loaded state.
    pub fn import_replace(&mut self, json: &str) -> Result<(), AppError> {
        let parsed: Value =
            serde_json::from_str(json).map_err(|err| AppError::import_format(err.to_string()))?;
        let values = match &parsed {
            Value::Array(values) => values.as_slice(),
            Value::Object(fields) => match fields.get("tasks") {
                Some(Value::Array(values)) => values.as_slice(),
                _ => return Err(AppError::import_format("tasks array is missing")),
            },
            _ => {
                return Err(AppError::import_format(
                    "expected an array or an object with tasks",
                ));
            }
        };

        let replacement = coerce_tasks(values);
        self.snapshot();
        self.tasks = replacement;
        self.save()
    }

    pub fn export_json(&self) -> Result<String, AppError> {
        let payload = ExportPayload {
            v: 1,
            tasks: &self.tasks,
        };
        serde_json::to_string(&payload).map_err(|err| AppError::storage(err.to_string()))
    }

    /// Pops the most recent snapshot as the live list and saves it. Returns
    /// whether a snapshot existed; undo itself never pushes history, so only
    /// forward mutations are undoable.
    pub fn undo(&mut self) -> Result<bool, AppError> {
        let Some(previous) = self.history.pop_back() else {
            return Ok(false);
        };
        self.tasks = previous;
        self.save()?;
        Ok(true)
    }

    fn save(&mut self) -> Result<(), AppError> {
        let payload = serde_json::to_string(&self.tasks)
            .map_err(|err| AppError::storage(err.to_string()))?;
        self.backend.set(STORAGE_KEY, &payload)
    }

    fn snapshot(&mut self) {
        self.history.push_back(self.tasks.clone());
        if self.history.len() > HISTORY_CAPACITY {
            self.history.pop_front();
        }
    }

    // 1-based display index to vec position.
    fn slot(&self, index: usize) -> Result<usize, AppError> {
        if index == 0 || index > self.tasks.len() {
            return Err(AppError::InvalidIndex);
        }
        Ok(index - 1)
    }
}

fn load_tasks(backend: &dyn KeyValueStore) -> Vec<Task> {
    let Ok(Some(raw)) = backend.get(STORAGE_KEY) else {
        return Vec::new();
    };
    let Ok(parsed) = serde_json::from_str::<Value>(&raw) else {
        return Vec::new();
    };
    match parsed {
        Value::Array(values) => coerce_tasks(&values),
        _ => Vec::new(),
    }
}
