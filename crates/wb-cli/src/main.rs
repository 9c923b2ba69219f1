#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use cmd::{Reported, Repo};
use output::{Format, Problem, report_problem};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "wb: plain-text whiteboards with an index, shortcuts, trash and an activity log",
    long_about = None,
    after_help = "EXAMPLES:\n    # Edit the default board\n    wb\n\n    # Edit a board (or a shortcut to one)\n    wb groceries\n\n    # Add an entry without opening the editor\n    wb add groceries buy milk"
)]
struct Cli {
    /// Board (or shortcut) to edit; the default board when omitted.
    name: Option<String>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Repository root (overrides WB_ROOT and the config file).
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Config file to read instead of the default location.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit JSON output instead of human-readable text (also `FORMAT=json`).
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Boards",
        about = "Create a board and open it",
        long_about = "Create an empty board, announce it in the list index, then open it in the editor.",
        after_help = "EXAMPLES:\n    # Create and edit\n    wb new groceries\n\n    # Create without opening the editor\n    wb new groceries --no-edit"
    )]
    New(cmd::new::NewArgs),

    #[command(
        next_help_heading = "Boards",
        about = "Print a board",
        long_about = "Print a board's content. The default board is created on first view.",
        after_help = "EXAMPLES:\n    # Print the default board\n    wb cat\n\n    # Print one board as JSON\n    wb cat groceries --json"
    )]
    Cat(cmd::cat::CatArgs),

    #[command(
        next_help_heading = "Boards",
        about = "Add an entry to the top of a board",
        long_about = "Prepend one line to a board (or the board a shortcut points to). One pair of surrounding double quotes is stripped.",
        after_help = "EXAMPLES:\n    # Add through a shortcut\n    wb add todo call the bank"
    )]
    Add(cmd::add::AddArgs),

    #[command(
        next_help_heading = "Boards",
        about = "Copy a board",
        after_help = "EXAMPLES:\n    wb cp groceries groceries-2"
    )]
    Cp(cmd::cp::CpArgs),

    #[command(
        next_help_heading = "Boards",
        about = "Rename a board",
        long_about = "Rename a board. Its bracketed token in the list index is rewritten in place.",
        after_help = "EXAMPLES:\n    wb mv groceries shopping"
    )]
    Mv(cmd::mv::MvArgs),

    #[command(
        next_help_heading = "Trash",
        about = "Move a board to the trash",
        after_help = "EXAMPLES:\n    wb rm shopping\n\n    # Undo\n    wb recover shopping"
    )]
    Rm(cmd::rm::RmArgs),

    #[command(next_help_heading = "Trash", about = "Restore a board from the trash")]
    Recover(cmd::recover::RecoverArgs),

    #[command(
        next_help_heading = "Trash",
        about = "Permanently delete everything in the trash"
    )]
    EmptyTrash,

    #[command(
        next_help_heading = "Read",
        about = "Show the list index",
        long_about = "Show the list index board, or a plain listing of board files when there is no index.",
        after_help = "EXAMPLES:\n    wb ls\n\n    # Show the trash\n    wb ls --trash"
    )]
    Ls(cmd::ls::LsArgs),

    #[command(next_help_heading = "Read", about = "Show the activity log")]
    Log,

    #[command(
        next_help_heading = "Read",
        about = "Show per-board additions and deletions from git history"
    )]
    Stats,

    #[command(
        next_help_heading = "Sync",
        about = "Commit and push the repository",
        long_about = "Run git add/commit/push in the repository root, then start a fresh activity log.",
        after_help = "EXAMPLES:\n    wb push\n\n    wb push weekly cleanup"
    )]
    Push(cmd::push::PushArgs),

    #[command(next_help_heading = "Sync", about = "Mirror boards to the configured S3 bucket")]
    Backup,

    #[command(next_help_heading = "Sync", about = "Download boards from the configured S3 bucket")]
    Restore,

    #[command(about = "Generate shell completions")]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("WB_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "wb=debug,info"
        } else {
            "wb=info,warn"
        })
    });

    let format = env::var("WB_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: Cli, output: Format) -> anyhow::Result<()> {
    if let Some(Commands::Completions(args)) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let repo = Repo::open(cli.root, cli.config.as_deref(), output)?;

    match cli.command {
        None => cmd::edit::run_edit(cli.name.as_deref(), &repo),
        Some(Commands::New(args)) => cmd::new::run_new(&args, &repo),
        Some(Commands::Cat(args)) => cmd::cat::run_cat(&args, &repo),
        Some(Commands::Add(args)) => cmd::add::run_add(&args, &repo),
        Some(Commands::Cp(args)) => cmd::cp::run_cp(&args, &repo),
        Some(Commands::Mv(args)) => cmd::mv::run_mv(&args, &repo),
        Some(Commands::Rm(args)) => cmd::rm::run_rm(&args, &repo),
        Some(Commands::Recover(args)) => cmd::recover::run_recover(&args, &repo),
        Some(Commands::EmptyTrash) => cmd::empty_trash::run_empty_trash(&repo),
        Some(Commands::Ls(args)) => cmd::ls::run_ls(&args, &repo),
        Some(Commands::Log) => cmd::log::run_log(&repo),
        Some(Commands::Stats) => cmd::stats::run_stats(&repo),
        Some(Commands::Push(args)) => cmd::push::run_push(&args, &repo),
        Some(Commands::Backup) => cmd::backup::run_backup(&repo),
        Some(Commands::Restore) => cmd::backup::run_restore(&repo),
        Some(Commands::Completions(_)) => Ok(()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = Format::detect(cli.json);
    debug!(?output, command = ?cli.command, "dispatching");
    match run(cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.downcast_ref::<Reported>().is_none()
                && report_problem(output, &Problem::new(format!("{err:#}"))).is_err()
            {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_edits_default_board() {
        let cli = Cli::parse_from(["wb"]);
        assert!(cli.name.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn positional_name_is_edit_target() {
        let cli = Cli::parse_from(["wb", "groceries"]);
        assert_eq!(cli.name.as_deref(), Some("groceries"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn subcommand_names_take_precedence() {
        let cli = Cli::parse_from(["wb", "ls"]);
        assert!(cli.name.is_none());
        assert!(matches!(cli.command, Some(Commands::Ls(_))));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::parse_from(["wb", "ls", "--json", "--root", "/tmp/wbs"]);
        assert!(cli.json);
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/wbs")));
    }

    #[test]
    fn add_joins_trailing_words() {
        let cli = Cli::parse_from(["wb", "add", "todo", "call", "-the", "bank"]);
        let Some(Commands::Add(args)) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.name, "todo");
        assert_eq!(args.entry, ["call", "-the", "bank"]);
    }

    #[test]
    fn add_requires_entry() {
        assert!(Cli::try_parse_from(["wb", "add", "todo"]).is_err());
    }

    #[test]
    fn push_message_is_optional() {
        let cli = Cli::parse_from(["wb", "push"]);
        assert!(matches!(cli.command, Some(Commands::Push(ref a)) if a.message.is_empty()));
    }

    #[test]
    fn json_flag_parses_before_subcommand() {
        let cli = Cli::parse_from(["wb", "--json", "add", "todo", "eggs", "--json"]);
        assert!(cli.json);
        let Some(Commands::Add(args)) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.entry, ["eggs", "--json"]);
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["wb", "new", "x"],
            vec!["wb", "new", "x", "--no-edit"],
            vec!["wb", "cat"],
            vec!["wb", "cat", "x"],
            vec!["wb", "add", "x", "entry"],
            vec!["wb", "cp", "a", "b"],
            vec!["wb", "mv", "a", "b"],
            vec!["wb", "rm", "x"],
            vec!["wb", "recover", "x"],
            vec!["wb", "empty-trash"],
            vec!["wb", "ls"],
            vec!["wb", "ls", "--trash"],
            vec!["wb", "log"],
            vec!["wb", "stats"],
            vec!["wb", "push", "some", "message"],
            vec!["wb", "backup"],
            vec!["wb", "restore"],
            vec!["wb", "completions", "bash"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(result.is_ok(), "failed to parse {args:?}: {:?}", result.err());
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
