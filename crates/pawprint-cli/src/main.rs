//! Pawprint CLI - avatar builder and account page in the terminal
//!
//! Every command works on the records in the data directory, so several
//! invocations behave like one long editing session.

use clap::{Parser, Subcommand};
use pawprint_core::{Category, PawprintConfig};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;

use commands::Context;

/// Pawprint - layered sprite avatars
#[derive(Parser)]
#[command(name = "pawprint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the stored records
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Sprite sheet image
    #[arg(long, global = true)]
    sheet: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the avatar
    Avatar {
        #[command(subcommand)]
        action: AvatarAction,
    },

    /// Edit profile text and colors
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Manage the account record
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
}

#[derive(Subcommand)]
enum AvatarAction {
    /// Show the current layers
    Show {
        /// Display width in pixels
        #[arg(short, long)]
        width: Option<u32>,

        /// Draw the avatar in the terminal
        #[arg(short, long)]
        preview: bool,
    },
    /// List selectable frames
    Options {
        /// Only this category
        category: Option<Category>,
    },
    /// Select a frame by its sheet index
    Select { frame: u32 },
    /// Select a frame for a category
    Set { category: Category, frame: u32 },
    /// Empty a category's slot
    Clear { category: Category },
    /// Pick a random frame for every category
    Random {
        /// Seed for a repeatable result
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Write the avatar as a PNG
    Export {
        /// Output file
        #[arg(short, long, default_value = "avatar.png")]
        output: PathBuf,

        /// Give up loading the sheet after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show profile fields
    Show,
    /// Change profile fields
    Set {
        #[arg(long)]
        nick: Option<String>,
        #[arg(long)]
        about: Option<String>,
        #[arg(long)]
        pronouns: Option<String>,
        /// Accent color, e.g. #ff8800
        #[arg(long)]
        accent: Option<String>,
        /// Background color, e.g. #223344
        #[arg(long)]
        bg: Option<String>,
    },
    /// Show the derived page theme
    Theme,
}

#[derive(Subcommand)]
enum AccountAction {
    /// Show the account form
    Show,
    /// Change account fields
    Set {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        /// Birthday as YYYY-MM-DD
        #[arg(long)]
        birthday: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        language: Option<String>,
    },
    /// Suggest nearby cities for the location field
    Suggest {
        /// Latitude of the current position
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude of the current position
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Use suggestion N (from 1) as the location and save
        #[arg(long)]
        pick: Option<usize>,
    },
}

fn load_config(cli: &Cli) -> Result<PawprintConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => PawprintConfig::load(path)?,
        None => PawprintConfig::default(),
    };

    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(sheet) = &cli.sheet {
        config.sheet_path = sheet.clone();
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let ctx = Context::new(load_config(&cli)?);

    match cli.command {
        Commands::Avatar { action } => match action {
            AvatarAction::Show { width, preview } => {
                commands::avatar::show(&ctx, width, preview).await?
            }
            AvatarAction::Options { category } => commands::avatar::options(&ctx, category),
            AvatarAction::Select { frame } => commands::avatar::select(&ctx, frame).await?,
            AvatarAction::Set { category, frame } => {
                commands::avatar::set(&ctx, category, frame).await?
            }
            AvatarAction::Clear { category } => commands::avatar::clear(&ctx, category).await?,
            AvatarAction::Random { seed } => commands::avatar::random(&ctx, seed).await?,
            AvatarAction::Export { output, timeout_ms } => {
                commands::avatar::export(&ctx, &output, timeout_ms).await?
            }
        },

        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::profile::show(&ctx),
            ProfileAction::Set {
                nick,
                about,
                pronouns,
                accent,
                bg,
            } => {
                let edits = commands::profile::ProfileEdits {
                    nick,
                    about,
                    pronouns,
                    accent,
                    bg_color: bg,
                };
                commands::profile::set(&ctx, edits).await?
            }
            ProfileAction::Theme => commands::profile::theme(&ctx),
        },

        Commands::Account { action } => match action {
            AccountAction::Show => commands::account::show(&ctx),
            AccountAction::Set {
                email,
                password,
                birthday,
                location,
                language,
            } => {
                let edits = commands::account::AccountEdits {
                    email,
                    password,
                    birthday,
                    location,
                    language,
                };
                commands::account::set(&ctx, edits)?
            }
            AccountAction::Suggest { lat, lon, pick } => {
                commands::account::suggest(&ctx, lat.zip(lon), pick).await?
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_avatar_set() {
        let cli = Cli::try_parse_from(["pawprint", "avatar", "set", "expr", "32"]).unwrap();
        match cli.command {
            Commands::Avatar {
                action: AvatarAction::Set { category, frame },
            } => {
                assert_eq!(category, Category::Expression);
                assert_eq!(frame, 32);
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pawprint", "account", "show", "--data-dir", "/tmp/pp", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/pp")));
    }

    #[test]
    fn test_suggest_needs_both_coordinates() {
        assert!(Cli::try_parse_from(["pawprint", "account", "suggest", "--lat", "42.7"]).is_err());
        let cli = Cli::try_parse_from([
            "pawprint", "account", "suggest", "--lat", "-33.9", "--lon", "151.2",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Account {
                action: AccountAction::Suggest { lat: Some(_), lon: Some(_), pick: None }
            }
        ));
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!(Cli::try_parse_from(["pawprint", "avatar", "clear", "tail"]).is_err());
    }

    #[test]
    fn test_config_overrides() {
        let cli = Cli::try_parse_from(["pawprint", "--sheet", "s.png", "--data-dir", "d", "profile", "show"]).unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.sheet_path, PathBuf::from("s.png"));
        assert_eq!(config.data_dir, Some(PathBuf::from("d")));
        assert_eq!(config.debounce_ms, 420);
    }
}
