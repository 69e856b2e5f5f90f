use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracker_core::TaskStore;

// Helper struct for Table Row
#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "St")]
    status: &'static str,
    #[tabled(rename = "Task")]
    text: String,
}

pub fn print_tasks(store: &TaskStore) {
    if store.is_empty() {
        println!("No tasks found.");
        return;
    }

    let rows: Vec<TaskRow> = store
        .iter()
        .map(|(task_ref, task)| TaskRow {
            number: task_ref.0 + 1,
            status: if task.completed { "✔" } else { "☐" },
            text: task.text.clone(),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::rounded()));
}
