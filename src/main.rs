use clap::Parser;
use simplenotes::cli::{screens, Cli, Commands};
use simplenotes::error::NotesError;
use simplenotes::{logging, App};

#[tokio::main]
async fn main() {
    logging::init();
    let cli = Cli::parse();

    let result = run(cli).await;

    match result {
        Ok(output) => {
            print!("{}", output);
            if !output.is_empty() && !output.ends_with('\n') {
                println!();
            }
            std::process::exit(0)
        }
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<String, NotesError> {
    let app = App::discover()?;

    match cli.command {
        Commands::List { json } => screens::list(&app, json).await,
        Commands::Show { id } => screens::show(&app, id).await,
        Commands::New { fields } => screens::edit(&app, None, fields, false).await,
        Commands::Edit {
            id,
            fields,
            clear_image,
        } => screens::edit(&app, Some(id), fields, clear_image).await,
        Commands::Delete { id } => screens::delete(&app, id).await,
        Commands::Open { route } => screens::open(&app, &route).await,
    }
}
