use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use ratatui::widgets::ListState;
use tracker_core::{FileTaskRepository, Intent, Task, TaskRef, TaskService};

pub enum InputMode {
    Normal,
    Adding,
}

pub struct App {
    service: TaskService<FileTaskRepository>,
    pub state: ListState,
    pub marked: BTreeSet<TaskRef>,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
}

impl App {
    pub fn new(file: Option<PathBuf>) -> Result<App> {
        let repo = match file {
            Some(path) => FileTaskRepository::with_path(path),
            None => FileTaskRepository::new(None)?,
        };
        let service = TaskService::open(repo);

        let mut state = ListState::default();
        if !service.store().is_empty() {
            state.select(Some(0));
        }
        Ok(App {
            service,
            state,
            marked: BTreeSet::new(),
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        self.service.store().tasks()
    }

    pub fn is_marked(&self, task: TaskRef) -> bool {
        self.marked.contains(&task)
    }

    pub fn next(&mut self) {
        if self.tasks().is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.tasks().len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.tasks().is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.tasks().len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn toggle_selected(&mut self) {
        if let Some(i) = self.state.selected() {
            self.service.apply(Intent::Toggle(TaskRef(i)));
        }
    }

    pub fn toggle_mark(&mut self) {
        if let Some(i) = self.state.selected() {
            let task = TaskRef(i);
            if !self.marked.remove(&task) {
                self.marked.insert(task);
            }
        }
    }

    /// Removes the marked tasks, or the selected one when nothing is
    /// marked. Marks are consumed either way: removal shifts positions, so
    /// surviving marks would point at the wrong rows.
    pub fn remove_marked(&mut self) {
        let selected = self.state.selected();
        let refs: BTreeSet<TaskRef> = if self.marked.is_empty() {
            selected.map(TaskRef).into_iter().collect()
        } else {
            std::mem::take(&mut self.marked)
        };
        if refs.is_empty() {
            return;
        }
        self.service.apply(Intent::Remove(refs));

        // Adjust selection after removal
        let len = self.tasks().len();
        if len == 0 {
            self.state.select(None);
        } else if let Some(i) = selected {
            self.state.select(Some(i.min(len - 1)));
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::Adding;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self
            .input
            .chars()
            .take(self.cursor_position)
            .map(|c| c.len_utf8())
            .sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self
                .input
                .chars()
                .take(self.cursor_position - 1)
                .map(|c| c.len_utf8())
                .sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit_add(&mut self) {
        if self.service.apply(Intent::Add(self.input.clone())) {
            // Select the task that was just appended.
            self.state.select(Some(self.tasks().len() - 1));
        }
        self.input.clear();
        self.cursor_position = 0;
        self.exit_input_mode();
    }

    pub fn quit(&mut self) {
        self.service.apply(Intent::Shutdown);
    }
}
