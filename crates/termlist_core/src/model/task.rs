use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    pub done: bool,
}

impl Task {
    pub fn new<T: Into<String>>(text: T) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }

    /// Coerce one stored element into a task. String text passes through,
    /// absent or null text becomes empty, any other JSON value keeps its
    /// textual form; `done` follows JS-style truthiness so lists written
    /// by older clients keep their completion marks.
    pub fn coerce(value: &Value) -> Self {
        let text = match value.get("text") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        };
        let done = value.get("done").map(truthy).unwrap_or(false);
        Self { text, done }
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerce a decoded JSON array, dropping elements whose text ends up empty.
pub fn coerce_tasks(values: &[Value]) -> Vec<Task> {
    values
        .iter()
        .map(Task::coerce)
        .filter(|task| !task.text.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Task, coerce_tasks};

    #[test]
    fn coerce_passes_through_well_formed_elements() {
        let value = serde_json::json!({ "text": "buy milk", "done": true });
        let task = Task::coerce(&value);

        assert_eq!(task.text, "buy milk");
        assert!(task.done);
    }

    #[test]
    fn coerce_defaults_missing_fields() {
        let task = Task::coerce(&serde_json::json!({}));

        assert_eq!(task.text, "");
        assert!(!task.done);
    }

    #[test]
    fn coerce_stringifies_foreign_text_values() {
        let task = Task::coerce(&serde_json::json!({ "text": 42 }));
        assert_eq!(task.text, "42");

        let task = Task::coerce(&serde_json::json!({ "text": true }));
        assert_eq!(task.text, "true");
    }

    #[test]
    fn coerce_applies_truthiness_to_done() {
        let truthy = [
            serde_json::json!({ "text": "a", "done": 1 }),
            serde_json::json!({ "text": "a", "done": "yes" }),
            serde_json::json!({ "text": "a", "done": [] }),
        ];
        for value in &truthy {
            assert!(Task::coerce(value).done, "expected done for {value}");
        }

        let falsy = [
            serde_json::json!({ "text": "a", "done": 0 }),
            serde_json::json!({ "text": "a", "done": "" }),
            serde_json::json!({ "text": "a", "done": null }),
            serde_json::json!({ "text": "a" }),
        ];
        for value in &falsy {
            assert!(!Task::coerce(value).done, "expected pending for {value}");
        }
    }

    #[test]
    fn coerce_tasks_drops_empty_text_elements() {
        let values = vec![
            serde_json::json!({ "text": "keep", "done": false }),
            serde_json::json!({ "done": true }),
            serde_json::json!({ "text": "" }),
            serde_json::json!(7),
        ];

        let tasks = coerce_tasks(&values);

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "keep");
    }
}
