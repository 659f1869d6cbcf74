use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, CommandFactory, Parser, Subcommand};

fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::BrightCyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightGreen.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::BrightMagenta.on_default())
}

pub fn styled_command() -> clap::Command {
    Cli::command()
}

#[derive(Debug, Parser)]
#[command(name = "agenda")]
#[command(bin_name = "agenda")]
#[command(version)]
#[command(about = "A local-first, file-backed todo list")]
#[command(styles = cli_styles())]
pub struct Cli {
    #[arg(
        short = 'C',
        long,
        env = "AGENDA_DATA_DIR",
        default_value = ".agenda",
        help = "Data directory that holds the store file and config.toml."
    )]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Add a new item.")]
    Add(AddArgs),
    #[command(about = "List items grouped by deadline day.")]
    Ls(ListArgs),
    #[command(about = "Show one item by id.")]
    Show(ShowArgs),
    #[command(about = "Update item fields in one command.")]
    Update(UpdateArgs),
    #[command(about = "Mark an item done (or not done with --undo).")]
    Done(DoneArgs),
    #[command(about = "Remove an item.")]
    Rm(RemoveArgs),
    #[command(about = "Write the collection to a file in json or csv form.")]
    Export(ExportArgs),
    #[command(about = "Merge items from a json or csv file into the collection.")]
    Import(ImportArgs),
    #[command(about = "Generate or install shell completions.")]
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
#[command(about = "Add a new item.")]
pub struct AddArgs {
    #[arg(help = "Item text.")]
    pub text: String,

    #[arg(
        short = 'i',
        long,
        help = "Importance level (low, basic, important). Defaults to basic."
    )]
    pub importance: Option<String>,

    #[arg(short = 'd', long, help = "Deadline as RFC3339 or YYYY-MM-DD.")]
    pub deadline: Option<String>,
}

#[derive(Debug, Args, Default)]
#[command(about = "List items grouped by deadline day.")]
pub struct ListArgs {
    #[arg(short = 'a', long, help = "Include completed items.")]
    pub all: bool,

    #[arg(long, help = "Print the sectioned view as JSON.")]
    pub json: bool,
}

#[derive(Debug, Args)]
#[command(about = "Show one item by id.")]
pub struct ShowArgs {
    #[arg(help = "Item id.")]
    pub id: String,
}

#[derive(Debug, Args)]
#[command(about = "Update item fields in one command.")]
pub struct UpdateArgs {
    #[arg(help = "Item id.")]
    pub id: String,

    #[arg(short = 't', long, help = "Replacement item text.")]
    pub text: Option<String>,

    #[arg(short = 'i', long, help = "New importance level.")]
    pub importance: Option<String>,

    #[arg(short = 'd', long, help = "New deadline as RFC3339 or YYYY-MM-DD.")]
    pub deadline: Option<String>,

    #[arg(long, conflicts_with = "deadline", help = "Drop the deadline.")]
    pub clear_deadline: bool,
}

#[derive(Debug, Args)]
#[command(about = "Mark an item done.")]
pub struct DoneArgs {
    #[arg(help = "Item id.")]
    pub id: String,

    #[arg(long, help = "Mark the item as not done instead.")]
    pub undo: bool,
}

#[derive(Debug, Args)]
#[command(about = "Remove an item.")]
pub struct RemoveArgs {
    #[arg(help = "Item id.")]
    pub id: String,
}

#[derive(Debug, Args)]
#[command(about = "Write the collection to a file.")]
pub struct ExportArgs {
    #[arg(help = "Target file path.")]
    pub path: PathBuf,

    #[arg(
        short = 'f',
        long,
        default_value = "json",
        help = "Payload format (json or csv)."
    )]
    pub format: String,
}

#[derive(Debug, Args)]
#[command(about = "Merge items from a file.")]
pub struct ImportArgs {
    #[arg(help = "Source file path.")]
    pub path: PathBuf,

    #[arg(
        short = 'f',
        long,
        default_value = "json",
        help = "Payload format (json or csv)."
    )]
    pub format: String,
}

#[derive(Debug, Args)]
#[command(about = "Generate or install shell completions.")]
pub struct CompletionsArgs {
    #[arg(help = "Shell name (bash, zsh, fish). Auto-detected if omitted.")]
    pub shell: Option<String>,

    #[arg(long, help = "Install to the shell's completions directory.")]
    pub install: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
