mod task;

pub use task::{Task, coerce_tasks};
