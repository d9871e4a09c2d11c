//! # storemeta
//!
//! Command-line editor for App Store Connect localization metadata.
//!
//! ## Commands
//!
//! - `login` / `logout`: Store or remove API key credentials
//! - `status`: Show credential and configuration status
//! - `apps`, `versions`, `locales`: Browse apps, store versions and localizations
//! - `set`, `mirror`, `translate`, `add-locale`: Edit a version's
//!   localizations and synchronize the changed ones
//!
//! ## Example
//!
//! ```bash
//! # Store an API key
//! storemeta login --issuer 69a6de70-... --key-id 2X9R4HXF34 --key-file AuthKey_2X9R4HXF34.p8
//!
//! # Find the version to edit
//! storemeta apps
//! storemeta versions 1234567890
//!
//! # Copy the primary locale into French and German, then submit
//! storemeta mirror ver-abc --to fr-FR,de-DE
//!
//! # Edit one field
//! storemeta set ver-abc --locale fr-FR --field keywords --value "photo,editeur"
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use storemeta_types::LocalizationField;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{browse, edit, login, status};
use config::Config;

/// Command-line editor for App Store Connect localization metadata.
#[derive(Parser, Debug)]
#[command(name = "storemeta")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Data directory for credentials and configuration
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbose logging (debug level)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments shared by every command that edits a version.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Store version identifier
    pub version_id: String,

    /// Primary locale override (defaults to the app's primary locale)
    #[arg(long)]
    pub primary: Option<String>,

    /// Show what would be submitted without sending anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store API key credentials
    Login {
        /// Issuer identifier
        #[arg(long)]
        issuer: String,

        /// Key identifier
        #[arg(long)]
        key_id: String,

        /// Path to the .p8 private key
        #[arg(long)]
        key_file: PathBuf,
    },

    /// Remove stored credentials
    Logout,

    /// Show credential and configuration status
    Status,

    /// Show or initialize the configuration file
    Config {
        /// Write a config file with default values if none exists
        #[arg(long)]
        init: bool,
    },

    /// List apps
    Apps {
        /// Only show apps whose name or bundle id contains this text
        #[arg(long, short)]
        search: Option<String>,
    },

    /// List store versions of an app
    Versions {
        /// App identifier
        app_id: String,

        /// Only show versions for this platform (e.g. IOS, MAC_OS)
        #[arg(long)]
        platform: Option<String>,
    },

    /// List the localizations of a version
    Locales {
        /// Store version identifier
        version_id: String,

        /// Print every field of this locale
        #[arg(long)]
        show: Option<String>,

        /// Primary locale override (defaults to the app's primary locale)
        #[arg(long)]
        primary: Option<String>,
    },

    /// Set one field of one locale and synchronize
    Set {
        #[command(flatten)]
        edit: EditArgs,

        /// Locale to edit
        #[arg(long)]
        locale: String,

        /// Field name (promotionalText, description, whatsNew, keywords, supportUrl, marketingUrl)
        #[arg(long)]
        field: LocalizationField,

        /// New value
        #[arg(long, conflicts_with = "clear", required_unless_present = "clear")]
        value: Option<String>,

        /// Clear the field instead of setting it
        #[arg(long)]
        clear: bool,
    },

    /// Copy a locale's fields into other locales and synchronize
    Mirror {
        #[command(flatten)]
        edit: EditArgs,

        /// Target locales (comma separated)
        #[arg(long, required = true, value_delimiter = ',')]
        to: Vec<String>,

        /// Source locale (defaults to the primary locale)
        #[arg(long)]
        from: Option<String>,
    },

    /// Translate the primary locale into other locales and synchronize
    Translate {
        #[command(flatten)]
        edit: EditArgs,

        /// Target locales (comma separated)
        #[arg(long, required = true, value_delimiter = ',')]
        to: Vec<String>,

        /// Fields to translate (defaults to the translatable text fields)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<LocalizationField>,
    },

    /// Add locales the version doesn't have yet, copying the primary locale, and synchronize
    AddLocale {
        #[command(flatten)]
        edit: EditArgs,

        /// Locales to add (comma separated)
        #[arg(required = true, value_delimiter = ',')]
        locales: Vec<String>,

        /// Leave the new locales empty instead of copying the primary locale
        #[arg(long)]
        empty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Determine data directory
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };

    // Ensure data directory exists
    tokio::fs::create_dir_all(&data_dir)
        .await
        .context("Failed to create data directory")?;
    config::set_dir_permissions_0700(&data_dir).await?;

    let config = Config::load(&data_dir).await?;

    match cli.command {
        Commands::Login {
            issuer,
            key_id,
            key_file,
        } => {
            login::login(&data_dir, &issuer, &key_id, &key_file).await?;
        }
        Commands::Logout => {
            login::logout(&data_dir).await?;
        }
        Commands::Status => {
            status::run(&data_dir, &config).await?;
        }
        Commands::Config { init } => {
            status::config(&data_dir, &config, init).await?;
        }
        Commands::Apps { search } => {
            browse::apps(&data_dir, &config, search.as_deref()).await?;
        }
        Commands::Versions { app_id, platform } => {
            browse::versions(&data_dir, &config, &app_id, platform.as_deref()).await?;
        }
        Commands::Locales {
            version_id,
            show,
            primary,
        } => {
            browse::locales(
                &data_dir,
                &config,
                &version_id,
                primary.as_deref(),
                show.as_deref(),
            )
            .await?;
        }
        Commands::Set {
            edit,
            locale,
            field,
            value,
            clear,
        } => {
            let value = if clear { None } else { value };
            edit::set(&data_dir, &config, &edit, &locale, field, value).await?;
        }
        Commands::Mirror { edit, to, from } => {
            edit::mirror(&data_dir, &config, &edit, from.as_deref(), &to).await?;
        }
        Commands::Translate { edit, to, fields } => {
            edit::translate(&data_dir, &config, &edit, &to, &fields).await?;
        }
        Commands::AddLocale {
            edit,
            locales,
            empty,
        } => {
            edit::add_locales(&data_dir, &config, &edit, &locales, !empty).await?;
        }
    }

    Ok(())
}

/// Install the tracing subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Get the default data directory for storemeta.
fn default_data_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("io", "ydun", "storemeta")
        .context("Could not determine home directory")?;
    Ok(dirs.data_dir().to_path_buf())
}
