mod view;

use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use todo_client::{
    submit_title, ApiConfig, CancelSource, EditBuffer, EditOutcome, TodoApp, TodoFilter,
    UreqTransport,
};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Manage todos on a REST backend")]
struct Cli {
    /// Base URL of the todo API [default: $TODO_API_BASE_URL, else /api].
    /// Relative values are resolved against `--origin`.
    #[arg(long)]
    base_url: Option<String>,

    /// Scheme, host and port used for a relative base URL.
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    origin: String,

    /// Which todos to fetch and display.
    #[arg(long, default_value_t = TodoFilter::All)]
    filter: TodoFilter,

    /// Heading printed above the list.
    #[arg(long, default_value = view::DEFAULT_TITLE)]
    title: String,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the todos (default).
    List,
    /// Add a todo.
    Add { title: Vec<String> },
    /// Mark a todo as completed.
    Complete { id: String },
    /// Mark a todo as active again.
    Reopen { id: String },
    /// Rename a todo.
    Edit { id: String, title: Vec<String> },
    /// Delete a todo.
    Delete { id: String },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match cli.base_url {
        Some(base_url) => ApiConfig::resolve(Some(base_url)),
        None => ApiConfig::from_env(),
    };
    let app = TodoApp::new(&config, UreqTransport::new(Some(&cli.origin)), cli.filter);

    let teardown = CancelSource::new();
    tokio::select! {
        _ = app.mount(teardown.token()) => {}
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for ctrl-c")?;
            teardown.cancel();
            eprintln!("interrupted");
            return Ok(ExitCode::SUCCESS);
        }
    }

    match cli.cmd.unwrap_or(Command::List) {
        Command::List => {}
        Command::Add { title } => match submit_title(&title.join(" ")) {
            Some(title) => app.add_todo(&title).await,
            None => anyhow::bail!("title must not be blank"),
        },
        Command::Complete { id } => app.toggle_todo(&id, true).await,
        Command::Reopen { id } => app.toggle_todo(&id, false).await,
        Command::Edit { id, title } => {
            let current = app
                .snapshot()
                .find(&id)
                .cloned()
                .with_context(|| format!("no todo with id `{id}` in the loaded list"))?;
            let mut edit = EditBuffer::begin(&current);
            edit.set_text(title.join(" "));
            match edit.commit() {
                EditOutcome::Commit(title) => app.edit_todo(&id, &title).await,
                EditOutcome::Revert => eprintln!("title unchanged"),
            }
        }
        Command::Delete { id } => app.delete_todo(&id).await,
    }

    let state = app.snapshot();
    print!("{}", view::render(&cli.title, &state));
    Ok(view::exit_code(&state))
}
