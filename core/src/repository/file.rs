use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::model::task::Task;
use crate::repository::traits::TaskRepository;

const DEFAULT_DIR_NAME: &str = ".tracker";
const DEFAULT_FILE_NAME: &str = "tasks.txt";
const DELIMITER: char = ';';

/// Line-oriented task file: one record per line in the form
/// `<flag>;<text>`, where the flag is `1` for a completed task and `0`
/// otherwise. The text is written verbatim, without escaping; parsing
/// splits on the first delimiter only, so text containing `;` survives a
/// round trip unless everything before its first `;` parses as an integer.
#[derive(Clone)]
pub struct FileTaskRepository {
    file_path: PathBuf,
}

impl FileTaskRepository {
    /// Opens the repository at `<base_dir>/tasks.txt`, defaulting the base
    /// to `~/.tracker`. The directory is created if needed; the file is
    /// not, since a missing file simply reads as an empty list.
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(DEFAULT_DIR_NAME)
            }
        };
        fs::create_dir_all(&path)?;
        path.push(DEFAULT_FILE_NAME);

        Ok(FileTaskRepository { file_path: path })
    }

    /// Uses an exact file path instead of the default directory layout.
    pub fn with_path(file_path: PathBuf) -> Self {
        FileTaskRepository { file_path }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl TaskRepository for FileTaskRepository {
    fn load(&self) -> Result<Vec<Task>> {
        let file = match File::open(&self.file_path) {
            Ok(file) => file,
            // No file yet is the normal first run, not an error.
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to open {}", self.file_path.display()))
            }
        };

        let reader = BufReader::new(file);
        let mut tasks = Vec::new();
        for line in reader.lines() {
            let line = line
                .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
            tasks.push(parse_line(&line));
        }
        Ok(tasks)
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        let file = File::create(&self.file_path).with_context(|| {
            format!("Failed to open {} for writing", self.file_path.display())
        })?;
        let mut writer = BufWriter::new(file);
        for task in tasks {
            writeln!(writer, "{}", format_line(task))?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn format_line(task: &Task) -> String {
    format!("{}{}{}", u8::from(task.completed), DELIMITER, task.text)
}

/// A line without a delimiter degrades to "whole line is the text, not
/// completed". Only a flag equal to 1 marks a task completed; anything
/// unparsable counts as pending. Line terminators were already stripped by
/// the reader.
fn parse_line(line: &str) -> Task {
    match line.split_once(DELIMITER) {
        Some((flag, text)) => Task {
            text: text.to_string(),
            completed: matches!(flag.trim().parse::<i64>(), Ok(1)),
        },
        None => Task::new(line),
    }
}
