pub mod model;
pub mod repository;
pub mod service;
pub mod store;

pub use model::task::Task;
pub use repository::{FileTaskRepository, TaskRepository};
pub use service::intent::Intent;
pub use service::task_service::TaskService;
pub use store::{TaskRef, TaskStore};
