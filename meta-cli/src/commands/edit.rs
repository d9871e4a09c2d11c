//! Editing commands. Each one loads a version, applies its edit to the
//! working set and then synchronizes whatever ended up pending.

use anyhow::{bail, Context, Result};
use std::path::Path;

use storemeta_client::{MockTranslator, SyncEngine, Translator};
use storemeta_types::{LocalizationField, LocalizationFields};

use super::{open_version, Service};
use crate::config::Config;
use crate::EditArgs;

/// Run the set command.
pub async fn set(
    data_dir: &Path,
    config: &Config,
    args: &EditArgs,
    locale: &str,
    field: LocalizationField,
    value: Option<String>,
) -> Result<()> {
    let mut engine = open_version(data_dir, config, &args.version_id, args.primary.as_deref()).await?;
    engine
        .set_field(locale, field, value)
        .with_context(|| format!("Cannot set {field} of {locale}"))?;
    finish(engine, args.dry_run).await
}

/// Run the mirror command.
pub async fn mirror(
    data_dir: &Path,
    config: &Config,
    args: &EditArgs,
    from: Option<&str>,
    targets: &[String],
) -> Result<()> {
    let mut engine = open_version(data_dir, config, &args.version_id, args.primary.as_deref()).await?;
    let source = match from {
        Some(source) => source.to_string(),
        None => engine
            .state()
            .primary_locale()
            .context("Version has no localizations to mirror from")?
            .to_string(),
    };

    for target in targets {
        if target.as_str() == source {
            continue;
        }
        engine.apply_mirror(&source, target).with_context(|| {
            format!("Cannot mirror {source} into {target} (use add-locale for new locales)")
        })?;
        println!("Mirrored {source} -> {target}");
    }
    finish(engine, args.dry_run).await
}

/// Run the translate command.
pub async fn translate(
    data_dir: &Path,
    config: &Config,
    args: &EditArgs,
    targets: &[String],
    fields: &[LocalizationField],
) -> Result<()> {
    let translator = translator(config)?;
    let fields: Vec<LocalizationField> = if fields.is_empty() {
        LocalizationField::TRANSLATABLE.to_vec()
    } else {
        fields.to_vec()
    };

    let mut engine = open_version(data_dir, config, &args.version_id, args.primary.as_deref()).await?;
    for target in targets {
        if engine.state().primary_locale() == Some(target.as_str()) {
            println!("Skipping {target}: it is the primary locale");
            continue;
        }
        engine
            .translate_from_primary(translator.as_ref(), target, &fields)
            .await
            .with_context(|| format!("Failed to translate into {target}"))?;
        println!("Translated into {target}");
    }
    finish(engine, args.dry_run).await
}

/// Run the add-locale command. With `copy_primary` the new locales start
/// as a copy of the primary locale.
pub async fn add_locales(
    data_dir: &Path,
    config: &Config,
    args: &EditArgs,
    locales: &[String],
    copy_primary: bool,
) -> Result<()> {
    let mut engine = open_version(data_dir, config, &args.version_id, args.primary.as_deref()).await?;
    for locale in locales {
        engine
            .add_locale(locale)
            .with_context(|| format!("Cannot add {locale}"))?;
        let is_primary = engine.state().primary_locale() == Some(locale.as_str());
        if copy_primary && !is_primary {
            engine.mirror_primary(locale)?;
        }
        println!("Added {locale}");
    }
    finish(engine, args.dry_run).await
}

/// Build the configured translator.
fn translator(config: &Config) -> Result<Box<dyn Translator>> {
    if config.translation.use_mock {
        return Ok(Box::new(MockTranslator));
    }
    bail!(
        "No translator available for {}. Set use_mock = true under [translation] in config.toml.",
        config.translation.base_url
    )
}

/// Submit the pending locales (or describe them when `dry_run` is set).
async fn finish(mut engine: SyncEngine<Service>, dry_run: bool) -> Result<()> {
    let state = engine.state();
    let batch = state.submission_batch();
    for locale in state.pending_locales() {
        if !batch.iter().any(|r| r.locale() == locale) {
            println!("Skipping {locale}: no content");
        }
    }
    if batch.is_empty() {
        println!("No changes to synchronize.");
        return Ok(());
    }

    if dry_run {
        println!("Would synchronize {} locale(s):", batch.len());
        for record in &batch {
            let changes = state.changes(record.locale())?;
            let action = if record.id().is_some() { "update" } else { "create" };
            println!(
                "  {} ({action}): {}",
                record.locale(),
                changed_field_names(&changes).join(", ")
            );
        }
        return Ok(());
    }

    let report = engine
        .synchronize(|p| println!("[{}/{}] {}", p.completed, p.total, p.locale))
        .await;
    println!("{report}");
    if !report.is_success() {
        bail!(
            "{} of {} locale(s) failed to synchronize",
            report.failed.len(),
            report.attempted
        );
    }
    Ok(())
}

/// Names of the fields present in a change set.
fn changed_field_names(changes: &LocalizationFields) -> Vec<&'static str> {
    changes
        .iter()
        .filter(|(_, value)| value.is_some())
        .map(|(field, _)| field.name())
        .collect()
}
