#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::rc::Rc;

    use anyhow::{anyhow, Result};

    use crate::model::task::Task;
    use crate::repository::TaskRepository;
    use crate::service::intent::Intent;
    use crate::service::task_service::TaskService;
    use crate::store::TaskRef;

    /// Records every snapshot handed to `save`.
    struct RecordingRepo {
        initial: Vec<Task>,
        saved: RefCell<Vec<Vec<Task>>>,
    }

    impl RecordingRepo {
        fn new(initial: Vec<Task>) -> Rc<Self> {
            Rc::new(Self {
                initial,
                saved: RefCell::new(Vec::new()),
            })
        }

        fn save_count(&self) -> usize {
            self.saved.borrow().len()
        }

        fn last_saved(&self) -> Vec<Task> {
            self.saved.borrow().last().cloned().expect("nothing saved")
        }
    }

    impl TaskRepository for Rc<RecordingRepo> {
        fn load(&self) -> Result<Vec<Task>> {
            Ok(self.initial.clone())
        }

        fn save(&self, tasks: &[Task]) -> Result<()> {
            self.saved.borrow_mut().push(tasks.to_vec());
            Ok(())
        }
    }

    struct FailingRepo;

    impl TaskRepository for FailingRepo {
        fn load(&self) -> Result<Vec<Task>> {
            Ok(Vec::new())
        }

        fn save(&self, _tasks: &[Task]) -> Result<()> {
            Err(anyhow!("disk full"))
        }
    }

    struct UnreadableRepo;

    impl TaskRepository for UnreadableRepo {
        fn load(&self) -> Result<Vec<Task>> {
            Err(anyhow!("permission denied"))
        }

        fn save(&self, _tasks: &[Task]) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let repo = RecordingRepo::new(Vec::new());
        let mut service = TaskService::open(Rc::clone(&repo));
        assert!(service.store().is_empty());

        assert!(service.apply(Intent::Add("Write report".to_string())));
        assert_eq!(service.store().tasks(), [Task::new("Write report")]);

        assert!(service.apply(Intent::Toggle(TaskRef(0))));
        assert_eq!(
            repo.last_saved(),
            vec![Task {
                text: "Write report".to_string(),
                completed: true,
            }]
        );

        // Restart from what was last written to storage.
        let restarted = RecordingRepo::new(repo.last_saved());
        let mut service = TaskService::open(Rc::clone(&restarted));
        assert_eq!(service.store().len(), 1);
        assert!(service.store().get(TaskRef(0)).unwrap().completed);

        assert!(service.apply(Intent::Remove(BTreeSet::from([TaskRef(0)]))));
        assert!(service.store().is_empty());
        assert!(restarted.last_saved().is_empty());
    }

    #[test]
    fn test_every_accepted_mutation_saves() {
        let repo = RecordingRepo::new(Vec::new());
        let mut service = TaskService::open(Rc::clone(&repo));

        service.apply(Intent::Add("a".to_string()));
        service.apply(Intent::Toggle(TaskRef(0)));
        service.apply(Intent::Remove(BTreeSet::from([TaskRef(0)])));

        assert_eq!(repo.save_count(), 3);
    }

    #[test]
    fn test_rejected_intents_do_not_save() {
        let repo = RecordingRepo::new(vec![Task::new("keep")]);
        let mut service = TaskService::open(Rc::clone(&repo));

        assert!(!service.apply(Intent::Add("   ".to_string())));
        assert!(!service.apply(Intent::Toggle(TaskRef(9))));
        assert!(!service.apply(Intent::Remove(BTreeSet::from([TaskRef(9)]))));

        assert_eq!(repo.save_count(), 0);
        assert_eq!(service.store().len(), 1);
    }

    #[test]
    fn test_shutdown_always_saves() {
        let repo = RecordingRepo::new(vec![Task::new("keep")]);
        let mut service = TaskService::open(Rc::clone(&repo));

        assert!(service.apply(Intent::Shutdown));
        assert_eq!(repo.save_count(), 1);
        assert_eq!(repo.last_saved(), vec![Task::new("keep")]);
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let mut service = TaskService::open(FailingRepo);

        // The mutation is acknowledged even though the write failed.
        assert!(service.apply(Intent::Add("Write report".to_string())));
        assert_eq!(service.store().len(), 1);
    }

    #[test]
    fn test_unreadable_store_starts_empty() {
        let service = TaskService::open(UnreadableRepo);
        assert!(service.store().is_empty());
    }
}
