// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{error, info, warn};

use crate::core::{AppConfig, Database, FsOps};
use crate::error::{Notification, NotificationLevel};
use crate::export::TypstExporter;
use crate::forms::{
    CertificationEntries, EducationEntries, ExperienceEntries, ListForm, ListSection,
    PersonalInfoForm, PersonalInfoValues, ProjectEntries, SkillsForm,
};
use crate::storage::{
    DocumentPersistence, MemoryDocumentStore, SectionSync, SqliteDocumentStore,
};
use crate::store::{PersonalInfoPatch, ResumeStore};
use crate::template::render_document;
use crate::types::{PersonalInfo, Section, SkillsAndLanguages, TemplateKind};

#[derive(Parser)]
#[command(name = "cvdraft")]
#[command(about = "Edit, preview and export a resume from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to ./cvdraft.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep the document in memory only; the database file is not opened
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the stored document as JSON
    Show {
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render the document as text, with sample content for empty sections
    Preview,
    /// Merge a JSON object into personal info (null clears a field)
    Personal { patch: String },
    /// Replace one section with the contents of a JSON file
    Set { section: Section, file: PathBuf },
    /// Empty one section
    Clear { section: Section },
    /// Select the template used for preview and export
    Template { kind: TemplateKind },
    /// Export the rendered resume
    Export {
        #[arg(long)]
        file_name: Option<String>,
        /// Only write the Typst source
        #[arg(long)]
        no_compile: bool,
    },
    /// Copy between the document and the per-section tables
    Sync {
        #[arg(value_enum)]
        direction: SyncDirection,
    },
    /// Drop the whole document
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SyncDirection {
    Push,
    Pull,
}

/// Everything a command runs against.
pub struct App {
    pub config: AppConfig,
    pub store: ResumeStore,
    pub sync: SectionSync,
}

/// Open the document store. Without a stored document the section tables
/// are used to rebuild it, when they hold anything.
pub async fn open_store(persistence: Arc<dyn DocumentPersistence>, sync: &SectionSync) -> ResumeStore {
    ResumeStore::open_or_rebuild(persistence, move || async move {
        match sync.is_empty().await {
            Ok(false) => {
                info!("Rebuilding resume document from section tables");
                Some(sync.pull().await)
            }
            Ok(true) => None,
            Err(e) => {
                warn!("Failed to inspect section tables, starting empty: {}", e);
                None
            }
        }
    })
    .await
}

/// Open the database, the document store and its exporter.
pub async fn open_app(config: AppConfig, ephemeral: bool) -> Result<(App, Database)> {
    let (db, persistence): (Database, Arc<dyn DocumentPersistence>) = if ephemeral {
        info!("Ephemeral run, {} is left untouched", config.database_path.display());
        let persistence: Arc<dyn DocumentPersistence> = Arc::new(MemoryDocumentStore::new());
        (Database::in_memory().await?, persistence)
    } else {
        let db = Database::new(&config.database_path).await?;
        let persistence: Arc<dyn DocumentPersistence> = Arc::new(SqliteDocumentStore::new(
            db.pool().clone(),
            config.storage_key.clone(),
        ));
        (db, persistence)
    };

    let sync = SectionSync::new(db.pool().clone(), &config.profile_id);
    let store = open_store(persistence, &sync).await;

    // The active template's exporter; `export` may replace it with overrides
    store.register_export_handler(exporter_for(&config, None, false).handler());

    Ok((App { config, store, sync }, db))
}

pub fn exporter_for(config: &AppConfig, file_name: Option<String>, no_compile: bool) -> TypstExporter {
    let mut options = config.export.clone();
    if let Some(file_name) = file_name {
        options = options.with_file_name(file_name);
    }
    let exporter = TypstExporter::new(config.output_path.clone(), options);
    if no_compile || !config.compile_pdf {
        exporter.source_only()
    } else {
        exporter
    }
}

pub async fn handle_command(command: Command, app: &App) -> Result<()> {
    let store = &app.store;
    let mut notifications = store.subscribe();

    let outcome = run(command, app).await;
    let flushed = store.flush().await;

    loop {
        match notifications.try_recv() {
            Ok(note) => print_notification(&note),
            Err(TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }

    outcome?;
    flushed.context("Failed to persist resume document")
}

async fn run(command: Command, app: &App) -> Result<()> {
    let store = &app.store;

    match command {
        Command::Show { output } => {
            let json = serde_json::to_string_pretty(&store.state())?;
            match output {
                Some(path) => FsOps::write_file_safe(&path, &json).await?,
                None => println!("{}", json),
            }
        }

        Command::Preview => {
            let state = store.state();
            let tree = render_document(&state);
            print!("{}", tree.to_plain_text());
        }

        Command::Personal { patch } => {
            let value: Value = serde_json::from_str(&patch).context("Patch is not valid JSON")?;
            let patch = PersonalInfoPatch::from_json(&value)?;
            if patch.is_noop() {
                info!("Personal info patch changes nothing");
            }
            store.set_personal_info(patch);
            println!("✓ Personal info updated");
        }

        Command::Set { section, file } => {
            let content = FsOps::read_file_safe(&file).await?;
            let value: Value = serde_json::from_str(&content)
                .with_context(|| format!("{} is not valid JSON", file.display()))?;
            let count = set_section(store, section, value)?;
            println!("✓ Saved {} ({} entries)", section, count);
        }

        Command::Clear { section } => {
            store.clear_section(section);
            println!("✓ Cleared {}", section);
        }

        Command::Template { kind } => {
            store.set_selected_template(kind);
            println!("✓ Selected {}", kind);
        }

        Command::Export {
            file_name,
            no_compile,
        } => {
            let exporter = exporter_for(&app.config, file_name, no_compile);
            let target = exporter.target_path();
            store.register_export_handler(exporter.handler());

            if store.invoke_export()? {
                println!("✓ Exported resume to {}", target.display());
            } else {
                anyhow::bail!("No export handler registered");
            }
        }

        Command::Sync { direction } => match direction {
            SyncDirection::Push => {
                let report = app.sync.push(&store.state()).await;
                for (section, e) in &report.failed {
                    error!("Failed to push {}: {}", section, e);
                }
                if !report.is_complete() {
                    anyhow::bail!("{} section(s) failed to save", report.failed.len());
                }
                println!("✓ Pushed {} sections", report.saved.len());
            }
            SyncDirection::Pull => {
                let mut document = app.sync.pull().await;
                document.selected_template = store.selected_template();
                store.replace_document(document);
                println!("✓ Pulled document from section tables");
            }
        },

        Command::Reset => {
            store.reset();
            println!("✓ Resume reset");
        }
    }

    Ok(())
}

/// Replace `section` through its form so every entry is validated first
fn set_section(store: &ResumeStore, section: Section, value: Value) -> Result<usize> {
    match section {
        Section::PersonalInfo => {
            let info: PersonalInfo = serde_json::from_value(value)?;
            let mut form = PersonalInfoForm::new();
            form.values = PersonalInfoValues::from_info(&info);
            for link in info.social_links() {
                form.add_social_link(link.clone(), Some(store))?;
            }
            form.submit(store)?;
            Ok(1)
        }
        Section::SkillsAndLanguages => {
            let parsed: SkillsAndLanguages = serde_json::from_value(value)?;
            let mut form = SkillsForm::new();
            for skill in parsed.skills {
                form.add_skill(skill, Some(store))?;
            }
            for language in parsed.languages {
                form.add_language(language, Some(store))?;
            }
            form.submit(store);
            Ok(form.skills().len() + form.languages().len())
        }
        Section::Education => fill_list::<EducationEntries>(store, value),
        Section::Experience => fill_list::<ExperienceEntries>(store, value),
        Section::Projects => fill_list::<ProjectEntries>(store, value),
        Section::Certificates => fill_list::<CertificationEntries>(store, value),
    }
}

fn fill_list<S>(store: &ResumeStore, value: Value) -> Result<usize>
where
    S: ListSection,
    S::Item: DeserializeOwned,
{
    let items: Vec<S::Item> = serde_json::from_value(value)
        .with_context(|| format!("Expected a JSON array of {} entries", S::LABEL))?;

    let mut form = ListForm::<S>::new();
    for (index, item) in items.into_iter().enumerate() {
        form.add(item, Some(store))
            .with_context(|| format!("{} entry {} rejected", S::LABEL, index + 1))?;
    }
    form.submit(store);
    Ok(form.items().len())
}

fn print_notification(note: &Notification) {
    match note.level {
        NotificationLevel::Success => info!("{}", note.message),
        NotificationLevel::Warning | NotificationLevel::Error => eprintln!("{}", note),
    }
}
