use anyhow::Result;

use crate::model::task::Task;

/// Storage seam for the task list.
///
/// Each call is a complete pass over the whole snapshot; implementations
/// keep no state between calls and do no incremental diffing.
pub trait TaskRepository {
    fn load(&self) -> Result<Vec<Task>>;
    fn save(&self, tasks: &[Task]) -> Result<()>;
}
