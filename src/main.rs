mod app;
mod cli;
mod collection;
mod completions;
mod dates;
mod domain;
mod record;
mod sections;
mod store;
mod ui;
mod workspace;

use crate::record::JsonRecord;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn print_json(value: &impl serde::Serialize) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).expect("json serialization should work")
    );
}

fn run() -> Result<(), app::AppError> {
    use clap::Parser;
    use cli::Commands;

    let cli = cli::Cli::parse();

    if let Commands::Completions(args) = &cli.command {
        return completions::run_completions_command(args.shell.as_deref(), args.install);
    }

    let mut app = app::App::open(&cli.data_dir)?;
    if let Some(warning) = app.load_warning() {
        eprintln!(
            "warning: store could not be read, starting from an empty list: {}",
            warning
        );
    }

    match cli.command {
        Commands::Add(args) => {
            let item = app.add(
                &args.text,
                args.importance.as_deref(),
                args.deadline.as_deref(),
            )?;
            print_json(&item.to_json());
        }
        Commands::Ls(args) => {
            let view = app.list();
            if args.json {
                print_json(&view_to_json(&view));
            } else {
                ui::print_sections(&view, args.all);
            }
        }
        Commands::Show(args) => {
            print_json(&app.show(&args.id)?.to_json());
        }
        Commands::Update(args) => {
            let item = app.update(
                &args.id,
                app::UpdateItemPatch {
                    text: args.text,
                    importance: args.importance,
                    deadline: args.deadline,
                    clear_deadline: args.clear_deadline,
                    done: None,
                },
            )?;
            print_json(&item.to_json());
        }
        Commands::Done(args) => {
            let item = app.set_done(&args.id, !args.undo)?;
            print_json(&item.to_json());
        }
        Commands::Rm(args) => {
            let removed = app.remove(&args.id)?;
            println!("removed {}", removed.id);
        }
        Commands::Export(args) => {
            let format = parse_format(&args.format)?;
            let count = app.export(&args.path, format)?;
            println!("exported {} item(s) to {}", count, args.path.display());
        }
        Commands::Import(args) => {
            let format = parse_format(&args.format)?;
            let outcome = app.import(&args.path, format)?;
            print_json(&outcome);
        }
        Commands::Completions(_) => {
            unreachable!("completions are handled before app initialization")
        }
    }

    Ok(())
}

fn parse_format(raw: &str) -> Result<workspace::StoreFormat, app::AppError> {
    raw.parse()
        .map_err(|err: workspace::ParseFormatError| app::AppError::InvalidArgument(err.to_string()))
}

fn view_to_json(view: &sections::SectionedView) -> serde_json::Value {
    serde_json::json!({
        "sections": view
            .sections
            .iter()
            .map(|section| {
                serde_json::json!({
                    "label": section.label,
                    "items": section
                        .items
                        .iter()
                        .map(JsonRecord::to_json)
                        .collect::<Vec<_>>(),
                })
            })
            .collect::<Vec<_>>(),
        "labels": view.labels,
    })
}
