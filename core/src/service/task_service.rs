use tracing::warn;

use crate::repository::TaskRepository;
use crate::service::intent::Intent;
use crate::store::TaskStore;

/// Controller gluing the in-memory store to its repository.
///
/// Every accepted mutation is written through to storage before the next
/// intent is handled. Persistence is best-effort: a failed write keeps the
/// in-memory state and logs a warning, so an acknowledged user action is
/// never rolled back.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    store: TaskStore,
}

impl<R: TaskRepository> TaskService<R> {
    /// Loads the persisted list into a fresh store. An unreadable store
    /// degrades to an empty list so startup never fails; a missing file is
    /// already handled as empty by the repository itself.
    pub fn open(repo: R) -> Self {
        let tasks = repo.load().unwrap_or_else(|err| {
            warn!("Could not read saved tasks, starting empty: {err:#}");
            Vec::new()
        });
        Self {
            store: TaskStore::from_tasks(tasks),
            repo,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Single entry point for user intents. Returns whether the intent was
    /// accepted (and a write-through attempted). Rejected intents (blank
    /// text, stale handles) are silent no-ops and do not touch storage.
    pub fn apply(&mut self, intent: Intent) -> bool {
        let accepted = match intent {
            Intent::Add(text) => self.store.append(&text).is_some(),
            Intent::Toggle(task) => self.store.toggle(task),
            Intent::Remove(refs) => self.store.remove_all(refs) > 0,
            Intent::Shutdown => true,
        };
        if accepted {
            self.persist();
        }
        accepted
    }

    fn persist(&self) {
        if let Err(err) = self.repo.save(self.store.tasks()) {
            warn!("Could not save tasks: {err:#}");
        }
    }
}
