mod listing;
mod tui;

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracker_core::{FileTaskRepository, Intent, TaskRef, TaskService};

#[derive(Parser)]
#[command(name = "tracker")]
#[command(about = "A single-list task tracker with a plain-text store", long_about = None)]
struct Cli {
    /// Task file to use instead of ~/.tracker/tasks.txt
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a new task (usage: add Write the quarterly report)
    Add {
        /// Task text; multiple words are joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List all tasks
    List,
    /// Toggle completion of a task by its list number
    Toggle {
        /// 1-based number as shown by `list`
        number: usize,
    },
    /// Remove tasks by their list numbers
    Remove {
        /// 1-based numbers as shown by `list`
        numbers: Vec<usize>,
    },
    /// Open the terminal user interface
    Tui,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Add { args }) => {
            if args.is_empty() {
                println!("Error: Task text is required.");
                return Ok(());
            }
            let mut service = open_service(cli.file)?;
            if service.apply(Intent::Add(args.join(" "))) {
                println!("Task added.");
            } else {
                println!("Error: Task text is required.");
            }
        }
        Some(Commands::List) => {
            let service = open_service(cli.file)?;
            listing::print_tasks(service.store());
        }
        Some(Commands::Toggle { number }) => {
            let mut service = open_service(cli.file)?;
            let toggled = number_to_ref(number)
                .is_some_and(|task| service.apply(Intent::Toggle(task)));
            if toggled {
                listing::print_tasks(service.store());
            } else {
                println!("No task number {number}.");
            }
        }
        Some(Commands::Remove { numbers }) => {
            let mut service = open_service(cli.file)?;
            let refs: BTreeSet<TaskRef> =
                numbers.iter().filter_map(|&n| number_to_ref(n)).collect();
            if !refs.is_empty() && service.apply(Intent::Remove(refs)) {
                listing::print_tasks(service.store());
            } else {
                println!("Nothing removed.");
            }
        }
        Some(Commands::Tui) | None => {
            tui::run(cli.file)?;
        }
    }
    Ok(())
}

fn open_service(file: Option<PathBuf>) -> Result<TaskService<FileTaskRepository>> {
    let repo = match file {
        Some(path) => FileTaskRepository::with_path(path),
        None => FileTaskRepository::new(None)?,
    };
    Ok(TaskService::open(repo))
}

fn number_to_ref(number: usize) -> Option<TaskRef> {
    // List numbers are 1-based; 0 is never a valid task.
    number.checked_sub(1).map(TaskRef)
}
