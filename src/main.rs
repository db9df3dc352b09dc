use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

use limone_lib::commands::{
    load_menu_command, menu_status_command, profile_get_command, profile_set_command,
    search_menu_command,
};
use limone_lib::profile::{StoreHandle, PROFILE_KEY};
use limone_lib::{db, logging, AppState, CategoryFilter, HttpMenuSource, Section};

#[derive(Debug, Parser)]
#[command(name = "limone", about = "Limone menu cache and search engine", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Seed the local menu cache from the remote catalog if it is empty.
    Seed {
        /// Catalog URL; defaults to the LIMONE_MENU_URL environment variable.
        #[arg(long)]
        url: Option<String>,
    },
    /// Print the full cached menu grouped into sections.
    Menu {
        /// Emit JSON instead of the table view.
        #[arg(long)]
        json: bool,
    },
    /// Query the cached menu by name text and category.
    Search {
        /// Case-insensitive substring matched against item names.
        #[arg(long, default_value = "")]
        text: String,
        /// May be given multiple times; omit for no category restriction.
        #[arg(long = "category")]
        categories: Vec<String>,
        /// Emit JSON instead of the table view.
        #[arg(long)]
        json: bool,
    },
    /// Read or write the profile key-value store.
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Report cache location, row count and seeding state.
    Status {
        /// Emit JSON instead of the table view.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
enum ProfileCommand {
    /// Print the value stored under a key.
    Get {
        #[arg(long, default_value = PROFILE_KEY)]
        key: String,
    },
    /// Store a value under a key and persist it.
    Set {
        #[arg(long, default_value = PROFILE_KEY)]
        key: String,
        value: String,
    },
}

#[tokio::main]
async fn main() {
    logging::init();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            process::exit(1);
        }
    }
}

async fn run(command: Commands) -> Result<i32> {
    let dir = data_dir()?;
    let db_path = dir.join("limone.sqlite3");
    let state = open_state(&dir, &db_path).await?;

    match command {
        Commands::Seed { url } => {
            let url = url
                .or_else(|| std::env::var("LIMONE_MENU_URL").ok())
                .context("pass --url or set LIMONE_MENU_URL")?;
            let was_empty = menu_status_command(&state).await?.empty;

            let source = HttpMenuSource::new(url);
            let sections = load_menu_command(&state, &source).await?;
            let items: usize = sections.iter().map(|s| s.data.len()).sum();
            if was_empty {
                println!("Seeded {items} items into {} sections.", sections.len());
            } else {
                println!("Menu already cached ({items} items); remote not contacted.");
            }
            Ok(0)
        }
        Commands::Menu { json } => {
            let sections = search_menu_command(&state, "", &CategoryFilter::All).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&sections)?);
            } else if sections.is_empty() {
                println!("Menu cache is empty. Run `limone seed` first.");
            } else {
                print_sections(&sections);
            }
            Ok(0)
        }
        Commands::Search {
            text,
            categories,
            json,
        } => {
            let filter = if categories.is_empty() {
                CategoryFilter::All
            } else {
                CategoryFilter::Only(categories)
            };
            let sections = search_menu_command(&state, &text, &filter).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&sections)?);
            } else if sections.is_empty() {
                println!("(no matches)");
            } else {
                print_sections(&sections);
            }
            Ok(0)
        }
        Commands::Profile(ProfileCommand::Get { key }) => match profile_get_command(&state, &key) {
            Some(value) => {
                println!("{value}");
                Ok(0)
            }
            None => {
                eprintln!("profile key not set: {key}");
                Ok(1)
            }
        },
        Commands::Profile(ProfileCommand::Set { key, value }) => {
            profile_set_command(&state, &key, &value)?;
            println!("Saved {key}.");
            Ok(0)
        }
        Commands::Status { json } => {
            let status = menu_status_command(&state).await?;
            if json {
                let payload = json!({
                    "path": db_path,
                    "rows": status.rows,
                    "empty": status.empty,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("Menu cache status");
                println!("Database : {}", db_path.display());
                println!("Rows     : {}", status.rows);
                println!("Seeded   : {}", if status.empty { "no" } else { "yes" });
            }
            Ok(0)
        }
    }
}

async fn open_state(dir: &Path, db_path: &Path) -> Result<AppState> {
    let pool = db::open_menu_pool(db_path).await?;
    let profile = StoreHandle::json_file(&dir.join("profile.json"))?;
    let state = AppState::new(pool, profile);
    state.menu_store().ensure_schema().await?;
    Ok(state)
}

fn data_dir() -> Result<PathBuf> {
    if let Ok(fake) = std::env::var("LIMONE_FAKE_APPDATA") {
        return Ok(PathBuf::from(fake));
    }

    let base = dirs::data_dir()
        .or_else(|| std::env::current_dir().ok())
        .ok_or_else(|| anyhow::anyhow!("failed to resolve application data directory"))?;
    Ok(base.join("limone"))
}

fn print_sections(sections: &[Section]) {
    for section in sections {
        println!("{}", section.name);
        for item in &section.data {
            println!("  {:<28} ${}", item.name, item.price);
        }
    }
}
