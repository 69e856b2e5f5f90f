use std::collections::BTreeSet;

use crate::model::task::Task;

/// Positional handle to a task in the store.
///
/// Handles stay valid across redraws and toggles, and go stale at the next
/// structural mutation (removal). The store ignores stale handles instead
/// of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskRef(pub usize);

/// In-memory authoritative ordered task list.
///
/// Never touches storage or presentation; the service layer is responsible
/// for persisting each mutation.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Appends a new pending task and returns its handle. Whitespace-only
    /// input is rejected as a no-op. Line breaks are flattened to spaces so
    /// one task is always one line in the saved file.
    pub fn append(&mut self, text: &str) -> Option<TaskRef> {
        let text = text.replace(['\r', '\n'], " ");
        if text.trim().is_empty() {
            return None;
        }
        self.tasks.push(Task::new(text));
        Some(TaskRef(self.tasks.len() - 1))
    }

    /// Flips the completion flag of the referenced task. Returns `false`
    /// for a stale handle.
    pub fn toggle(&mut self, task: TaskRef) -> bool {
        match self.tasks.get_mut(task.0) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Removes every referenced task and returns how many were removed.
    ///
    /// The removal set is computed up front, so duplicate and stale handles
    /// are harmless and no handle shifts meaning mid-call. Remaining tasks
    /// keep their relative order.
    pub fn remove_all(&mut self, refs: impl IntoIterator<Item = TaskRef>) -> usize {
        let doomed: BTreeSet<usize> = refs
            .into_iter()
            .map(|r| r.0)
            .filter(|&i| i < self.tasks.len())
            .collect();
        if doomed.is_empty() {
            return 0;
        }
        let mut index = 0;
        self.tasks.retain(|_| {
            let keep = !doomed.contains(&index);
            index += 1;
            keep
        });
        doomed.len()
    }

    pub fn get(&self, task: TaskRef) -> Option<&Task> {
        self.tasks.get(task.0)
    }

    /// Ordered enumeration for rendering. Restartable; each call yields an
    /// independent view as of call time.
    pub fn iter(&self) -> impl Iterator<Item = (TaskRef, &Task)> {
        self.tasks.iter().enumerate().map(|(i, t)| (TaskRef(i), t))
    }

    /// The ordered task slice, for serialization.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_rejects_blank_input() {
        let mut store = TaskStore::new();
        assert_eq!(store.append(""), None);
        assert_eq!(store.append("   "), None);
        assert_eq!(store.len(), 0);

        assert_eq!(store.append("Write report"), Some(TaskRef(0)));
        assert_eq!(store.len(), 1);
        assert!(!store.get(TaskRef(0)).unwrap().completed);
    }

    #[test]
    fn test_append_flattens_line_breaks() {
        let mut store = TaskStore::new();
        let task = store.append("Buy\nmilk").unwrap();
        assert_eq!(store.get(task).unwrap().text, "Buy milk");

        // Nothing but line breaks is still blank input.
        assert_eq!(store.append("\r\n"), None);
    }

    #[test]
    fn test_append_keeps_text_as_typed() {
        let mut store = TaskStore::new();
        let task = store.append("  padded  ").unwrap();
        assert_eq!(store.get(task).unwrap().text, "  padded  ");
    }

    #[test]
    fn test_toggle_flips_flag() {
        let mut store = TaskStore::new();
        let task = store.append("Walk dog").unwrap();

        assert!(store.toggle(task));
        assert!(store.get(task).unwrap().completed);
        assert!(store.toggle(task));
        assert!(!store.get(task).unwrap().completed);
    }

    #[test]
    fn test_toggle_ignores_stale_ref() {
        let mut store = TaskStore::new();
        let task = store.append("Write report").unwrap();
        store.remove_all([task]);

        assert!(!store.toggle(task));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_remove_all_dedups_and_keeps_order() {
        let mut store = TaskStore::new();
        store.append("a");
        let b = store.append("b").unwrap();
        store.append("c");

        // Duplicate handles remove the task exactly once.
        assert_eq!(store.remove_all([b, b]), 1);

        let texts: Vec<&str> = store.iter().map(|(_, t)| t.text.as_str()).collect();
        assert_eq!(texts, ["a", "c"]);
    }

    #[test]
    fn test_remove_all_ignores_stale_refs() {
        let mut store = TaskStore::new();
        let a = store.append("a").unwrap();

        assert_eq!(store.remove_all([TaskRef(7)]), 0);
        assert_eq!(store.len(), 1);
        assert_eq!(store.remove_all([a, TaskRef(7)]), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_iter_is_restartable() {
        let mut store = TaskStore::new();
        store.append("a");
        store.append("b");

        let first: Vec<usize> = store.iter().map(|(r, _)| r.0).collect();
        let second: Vec<usize> = store.iter().map(|(r, _)| r.0).collect();
        assert_eq!(first, second);
        assert_eq!(first, [0, 1]);
    }
}
