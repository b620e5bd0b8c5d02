//! A command-line front-end to a local task list

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use task_manager::cache::Cache;
use task_manager::remote::{HttpRecordStore, RemoteSync};
use task_manager::resource::Resource;
use task_manager::utils::{format_lists, print_dashboard};
use task_manager::{Symbol, SymbolCatalog, TaskId, TaskManager, Timeframe};

#[derive(Parser)]
#[command(name = "task-manager")]
#[command(about = "Manage your tasks for today, this week and this month", long_about = None)]
#[command(version)]
struct Cli {
    /// Folder that holds the task snapshots. Defaults to the user's data directory
    #[arg(long, env = "TASKS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Base URL of a remote record store. Toggled tasks are pushed there
    #[arg(long, env = "TASKS_REMOTE_URL")]
    remote_url: Option<url::Url>,

    #[arg(long, env = "TASKS_REMOTE_USER", default_value = "")]
    remote_user: String,

    #[arg(long, env = "TASKS_REMOTE_PASSWORD", default_value = "", hide_env_values = true)]
    remote_password: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the dashboard (default)
    Show,
    /// Add a task
    Add {
        text: String,
        #[arg(long)]
        details: Option<String>,
        /// today, endOfWeek or endOfMonth
        #[arg(long, default_value = "today")]
        timeframe: Timeframe,
    },
    /// Mark a task as completed, or as uncompleted if it already was
    Toggle { id: TaskId },
    /// Show the lists and their tasks
    Lists,
    /// Create a list
    NewList {
        name: String,
        /// One of the names shown by the `symbols` command
        #[arg(long)]
        symbol: Option<String>,
    },
    /// Add a task to a list
    Assign { list: String, task: TaskId },
    /// Show the symbols a list can use
    Symbols,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let Cli { data_dir, remote_url, remote_user, remote_password, command } = cli;

    let folder = match data_dir {
        Some(dir) => dir,
        None => Cache::default_folder()?,
    };
    let remote = remote_url.map(|url| {
        let resource = Resource::new(url, remote_user, remote_password);
        RemoteSync::new(Arc::new(HttpRecordStore::new(resource)))
    });

    let mut manager = TaskManager::new(Cache::new(&folder), remote);
    manager.load().await?;

    match command.unwrap_or(Command::Show) {
        Command::Show => print_dashboard(manager.state()),
        Command::Add { text, details, timeframe } => {
            let id = manager.add_task(text, details, timeframe);
            manager.save().await?;
            println!("Added task {}", id);
        },
        Command::Toggle { id } => {
            let toggled = manager.toggle_completion(id)
                .ok_or_else(|| format!("No task with id {}", id))?;
            let saved = manager.save().await;
            // The process is about to exit, which would cancel a pending push
            if let Some(upload) = toggled.upload {
                let _ = upload.await;
            }
            saved?;
            let status = if toggled.task.completed() { "completed" } else { "not completed" };
            println!("Task {} is {}", id, status);
        },
        Command::Lists => print!("{}", format_lists(manager.state().lists(), manager.state().tasks())),
        Command::NewList { name, symbol } => {
            let catalog = SymbolCatalog::bundled();
            let symbol = match symbol {
                Some(name) => catalog.get(&name).cloned()
                    .ok_or_else(|| format!("Unknown symbol {:?}, see the `symbols` command", name))?,
                None => catalog.default_symbol().cloned().unwrap_or_else(|| Symbol::new("list.bullet")),
            };
            if manager.add_list(name.clone(), symbol) == false {
                return Err(format!("A list named {:?} already exists", name).into());
            }
            manager.save().await?;
            println!("Created list {:?}", name);
        },
        Command::Assign { list, task } => {
            if manager.assign_to_list(&list, task) == false {
                return Err(format!("Unable to add task {} to list {:?}", task, list).into());
            }
            manager.save().await?;
        },
        Command::Symbols => {
            for symbol in SymbolCatalog::bundled().symbols() {
                println!("{}", symbol.name);
            }
        },
    }

    Ok(())
}
