// src/store/mod.rs
//! In-memory resume document with per-section mutators and write-behind persistence

pub mod patch;

pub use patch::{FieldUpdate, PersonalInfoPatch};

use std::future::Future;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::error::{Notification, StorageError};
use crate::export::ExportHandler;
use crate::storage::{DocumentPersistence, MemoryDocumentStore};
use crate::types::{
    Certificate, Education, Experience, Project, ResumeDocument, Section, SkillsAndLanguages,
    TemplateKind,
};

const NOTIFICATION_CAPACITY: usize = 64;

enum WriteCommand {
    Persist {
        document: ResumeDocument,
        origin: &'static str,
    },
    Flush(oneshot::Sender<Option<StorageError>>),
}

struct StoreInner {
    document: RwLock<ResumeDocument>,
    writes: mpsc::UnboundedSender<WriteCommand>,
    notifications: broadcast::Sender<Notification>,
    export_handler: RwLock<Option<ExportHandler>>,
}

/// Handle to the resume document store. Clones share the same document.
#[derive(Clone)]
pub struct ResumeStore {
    inner: Arc<StoreInner>,
}

impl ResumeStore {
    /// Load the persisted document (or start empty) and start the writer.
    /// A failed read is treated as "no prior data".
    pub async fn open(persistence: Arc<dyn DocumentPersistence>) -> Self {
        Self::open_or_rebuild(persistence, || async { None }).await
    }

    /// Like `open`, but a missing document is taken from `rebuild` when it
    /// yields one. The rebuilt document is written back to `persistence`.
    pub async fn open_or_rebuild<F, Fut>(persistence: Arc<dyn DocumentPersistence>, rebuild: F) -> Self
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<ResumeDocument>>,
    {
        match persistence.load().await {
            Ok(Some(document)) => {
                info!("Hydrated resume document from durable storage");
                Self::from_document(document, persistence)
            }
            Ok(None) => match rebuild().await {
                Some(document) => {
                    info!("No stored resume document, using rebuilt one");
                    let store = Self::from_document(document, persistence);
                    store.replace_document(store.state());
                    store
                }
                None => {
                    info!("No stored resume document, starting empty");
                    Self::from_document(ResumeDocument::empty(), persistence)
                }
            },
            Err(e) => {
                warn!("Failed to read stored resume document, starting empty: {}", e);
                Self::from_document(ResumeDocument::empty(), persistence)
            }
        }
    }

    /// Start from a known document without reading storage. Must run inside a tokio runtime.
    pub fn from_document(document: ResumeDocument, persistence: Arc<dyn DocumentPersistence>) -> Self {
        let (writes, receiver) = mpsc::unbounded_channel();
        let (notifications, _) = broadcast::channel(NOTIFICATION_CAPACITY);

        tokio::spawn(run_writer(receiver, persistence, notifications.clone()));

        Self {
            inner: Arc::new(StoreInner {
                document: RwLock::new(document),
                writes,
                notifications,
                export_handler: RwLock::new(None),
            }),
        }
    }

    /// Store backed by an in-memory blob
    pub fn in_memory() -> Self {
        Self::from_document(ResumeDocument::empty(), Arc::new(MemoryDocumentStore::new()))
    }

    /// Snapshot of the current document
    pub fn state(&self) -> ResumeDocument {
        self.read_doc().clone()
    }

    pub fn selected_template(&self) -> TemplateKind {
        self.read_doc().selected_template
    }

    pub fn set_personal_info(&self, patch: PersonalInfoPatch) {
        self.mutate("personal-info", |doc| patch.apply_to(&mut doc.personal_info));
    }

    pub fn set_skills_and_languages(&self, value: SkillsAndLanguages) {
        self.mutate("skills-and-languages", |doc| doc.skills_and_languages = value);
    }

    pub fn set_education(&self, value: Vec<Education>) {
        self.mutate("education", |doc| doc.educations = value);
    }

    pub fn set_experience(&self, value: Vec<Experience>) {
        self.mutate("experience", |doc| doc.experiences = value);
    }

    pub fn set_projects(&self, value: Vec<Project>) {
        self.mutate("projects", |doc| doc.projects = value);
    }

    pub fn set_certificates(&self, value: Vec<Certificate>) {
        self.mutate("certifications", |doc| doc.certificates = value);
    }

    pub fn set_selected_template(&self, template: TemplateKind) {
        self.mutate("selected-template", |doc| doc.selected_template = template);
    }

    /// Reset one section to its empty value
    pub fn clear_section(&self, section: Section) {
        match section {
            Section::PersonalInfo => self.set_personal_info(PersonalInfoPatch::clear_all()),
            Section::SkillsAndLanguages => {
                self.set_skills_and_languages(SkillsAndLanguages::default())
            }
            Section::Education => self.set_education(Vec::new()),
            Section::Experience => self.set_experience(Vec::new()),
            Section::Projects => self.set_projects(Vec::new()),
            Section::Certificates => self.set_certificates(Vec::new()),
        }
    }

    /// Replace the whole document (section sync pull, tests)
    pub fn replace_document(&self, document: ResumeDocument) {
        self.mutate("document", |doc| *doc = document);
    }

    /// Back to the empty document; the export handler is dropped too
    pub fn reset(&self) {
        *self.write_handler() = None;
        self.mutate("reset", |doc| *doc = ResumeDocument::empty());
    }

    /// Wait for every write issued so far; returns the first failure since the last flush
    pub async fn flush(&self) -> Result<(), StorageError> {
        let (ack, done) = oneshot::channel();
        self.inner
            .writes
            .send(WriteCommand::Flush(ack))
            .map_err(|_| StorageError::Unavailable("document writer stopped".to_string()))?;

        match done.await {
            Ok(None) => Ok(()),
            Ok(Some(e)) => Err(e),
            Err(_) => Err(StorageError::Unavailable(
                "document writer stopped".to_string(),
            )),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.inner.notifications.subscribe()
    }

    pub fn notify(&self, notification: Notification) {
        // no subscribers is fine
        let _ = self.inner.notifications.send(notification);
    }

    // ===== Export Hook =====

    /// Install the export callback, replacing any previous one
    pub fn register_export_handler<F>(&self, handler: F)
    where
        F: Fn(&ResumeDocument) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        *self.write_handler() = Some(Arc::new(handler));
    }

    pub fn has_export_handler(&self) -> bool {
        self.inner
            .export_handler
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    /// Run the registered export callback with the current document.
    /// Returns `Ok(false)` when nothing is registered.
    pub fn invoke_export(&self) -> anyhow::Result<bool> {
        let handler = self
            .inner
            .export_handler
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();

        match handler {
            Some(handler) => {
                let snapshot = self.state();
                (handler.as_ref())(&snapshot)?;
                Ok(true)
            }
            None => {
                debug!("Export requested with no handler registered");
                Ok(false)
            }
        }
    }

    // ===== Internals =====

    fn mutate(&self, origin: &'static str, apply: impl FnOnce(&mut ResumeDocument)) {
        let mut doc = self.write_doc();
        apply(&mut doc);
        let snapshot = doc.clone();

        // enqueued under the lock so queue order matches mutation order
        if self
            .inner
            .writes
            .send(WriteCommand::Persist {
                document: snapshot,
                origin,
            })
            .is_err()
        {
            error!("Document writer stopped; {} change kept in memory only", origin);
            self.notify(Notification::error(format!(
                "Could not save {}: storage is unavailable",
                origin
            )));
        }
    }

    fn read_doc(&self) -> RwLockReadGuard<'_, ResumeDocument> {
        self.inner
            .document
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_doc(&self) -> RwLockWriteGuard<'_, ResumeDocument> {
        self.inner
            .document
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_handler(&self) -> RwLockWriteGuard<'_, Option<ExportHandler>> {
        self.inner
            .export_handler
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn run_writer(
    mut receiver: mpsc::UnboundedReceiver<WriteCommand>,
    persistence: Arc<dyn DocumentPersistence>,
    notifications: broadcast::Sender<Notification>,
) {
    let mut pending_error: Option<StorageError> = None;

    while let Some(command) = receiver.recv().await {
        match command {
            WriteCommand::Persist { document, origin } => {
                match persistence.save(&document).await {
                    Ok(()) => debug!("Persisted resume document after {} update", origin),
                    Err(e) => {
                        error!("Failed to persist resume document after {} update: {}", origin, e);
                        let _ = notifications.send(Notification::error(format!(
                            "Failed to save {}: {}",
                            origin, e
                        )));
                        if pending_error.is_none() {
                            pending_error = Some(e);
                        }
                    }
                }
            }
            WriteCommand::Flush(ack) => {
                let _ = ack.send(pending_error.take());
            }
        }
    }

    debug!("Document writer stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotificationLevel;
    use crate::types::{PersonalInfo, Skill, SkillLevel};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn education(name: &str) -> Education {
        Education {
            institution_name: name.to_string(),
            website: None,
            area_of_study: "Computer Science".to_string(),
            type_of_study: "Bachelor".to_string(),
            description: None,
            start_date: "2015-09-01T00:00:00.000Z".to_string(),
            end_date: None,
            ongoing: true,
        }
    }

    fn certificate(name: &str) -> Certificate {
        Certificate {
            certificate_name: name.to_string(),
            issued_by: "Udemy".to_string(),
            date: None,
            website: None,
            description: None,
        }
    }

    /// Records every saved document; can be switched into failure mode.
    #[derive(Default)]
    struct RecordingPersistence {
        saved: Mutex<Vec<ResumeDocument>>,
        fail: AtomicBool,
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl DocumentPersistence for RecordingPersistence {
        async fn load(&self) -> Result<Option<ResumeDocument>, StorageError> {
            Err(StorageError::Unavailable("read failed".to_string()))
        }

        async fn save(&self, document: &ResumeDocument) -> Result<(), StorageError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(StorageError::Unavailable("disk full".to_string()));
            }
            self.saved.lock().unwrap().push(document.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_personal_info_is_merged() {
        let store = ResumeStore::in_memory();
        store.set_personal_info(PersonalInfoPatch::new().name("Jane").phone("111"));
        store.set_personal_info(PersonalInfoPatch::new().phone("555"));

        let info = store.state().personal_info;
        assert_eq!(
            info,
            PersonalInfo {
                name: Some("Jane".to_string()),
                phone: Some("555".to_string()),
                ..Default::default()
            }
        );
    }

    #[tokio::test]
    async fn test_clearing_one_personal_field() {
        let store = ResumeStore::in_memory();
        store.set_personal_info(PersonalInfoPatch::new().name("Jane").email("jane@x.com"));
        store.set_personal_info(PersonalInfoPatch {
            email: FieldUpdate::Clear,
            ..Default::default()
        });

        let info = store.state().personal_info;
        assert_eq!(info.name.as_deref(), Some("Jane"));
        assert_eq!(info.email, None);
    }

    #[tokio::test]
    async fn test_list_sections_are_replaced() {
        let store = ResumeStore::in_memory();
        store.set_education(vec![education("A"), education("B")]);
        store.set_education(vec![education("X")]);
        assert_eq!(store.state().educations, vec![education("X")]);

        store.set_education(Vec::new());
        assert!(store.state().educations.is_empty());
    }

    #[tokio::test]
    async fn test_sections_are_independent() {
        let store = ResumeStore::in_memory();
        store.set_certificates(vec![certificate("Rust")]);
        store.set_education(vec![education("MIT")]);
        store.set_skills_and_languages(SkillsAndLanguages {
            skills: vec![Skill {
                skill_name: "Rust".to_string(),
                skill_level: SkillLevel::Expert,
            }],
            languages: vec![],
        });
        store.set_education(vec![]);
        store.set_selected_template(TemplateKind::Template2);
        store.set_personal_info(PersonalInfoPatch::new().name("Jane"));

        let doc = store.state();
        assert_eq!(doc.certificates, vec![certificate("Rust")]);
        assert!(doc.educations.is_empty());
        assert_eq!(doc.skills_and_languages.skills.len(), 1);
        assert_eq!(doc.selected_template, TemplateKind::Template2);
        assert!(doc.experiences.is_empty());
        assert!(doc.projects.is_empty());
    }

    #[tokio::test]
    async fn test_state_is_a_snapshot() {
        let store = ResumeStore::in_memory();
        store.set_certificates(vec![certificate("A")]);

        let mut snapshot = store.state();
        snapshot.certificates.push(certificate("B"));

        assert_eq!(store.state().certificates.len(), 1);
    }

    #[tokio::test]
    async fn test_every_setter_persists_in_order() {
        let persistence = Arc::new(RecordingPersistence::default());
        let store = ResumeStore::from_document(ResumeDocument::empty(), persistence.clone());

        store.set_certificates(vec![certificate("A")]);
        store.set_certificates(vec![certificate("A"), certificate("B")]);
        store.set_selected_template(TemplateKind::Template2);
        store.flush().await.unwrap();

        let saved = persistence.saved.lock().unwrap();
        assert_eq!(saved.len(), 3);
        assert_eq!(saved[0].certificates.len(), 1);
        assert_eq!(saved[1].certificates.len(), 2);
        assert_eq!(saved[2].selected_template, TemplateKind::Template2);
        assert_eq!(saved[2].certificates.len(), 2);
    }

    #[tokio::test]
    async fn test_write_failure_keeps_memory_and_notifies() {
        let persistence = Arc::new(RecordingPersistence::default());
        persistence.fail.store(true, Ordering::SeqCst);
        let store = ResumeStore::from_document(ResumeDocument::empty(), persistence.clone());
        let mut notifications = store.subscribe();

        store.set_personal_info(PersonalInfoPatch::new().name("Jane"));

        // read-your-writes before durability
        assert_eq!(store.state().personal_info.name.as_deref(), Some("Jane"));

        let err = store.flush().await.unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
        assert_eq!(store.state().personal_info.name.as_deref(), Some("Jane"));

        let notification = notifications.recv().await.unwrap();
        assert_eq!(notification.level, NotificationLevel::Error);
        assert!(notification.message.contains("personal-info"));

        // no automatic retry, and the error is reported once
        assert_eq!(persistence.attempts.load(Ordering::SeqCst), 1);
        store.flush().await.unwrap();

        persistence.fail.store(false, Ordering::SeqCst);
        store.set_projects(vec![]);
        store.flush().await.unwrap();
        assert_eq!(persistence.saved.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_open_treats_read_failure_as_empty() {
        let persistence = Arc::new(RecordingPersistence::default());
        let store = ResumeStore::open(persistence).await;
        assert_eq!(store.state(), ResumeDocument::empty());
    }

    #[tokio::test]
    async fn test_open_hydrates_persisted_document() {
        let persistence = Arc::new(MemoryDocumentStore::new());
        {
            let store = ResumeStore::from_document(ResumeDocument::empty(), persistence.clone());
            store.set_personal_info(
                PersonalInfoPatch::new().name("Jane Doe").email("jane@x.com"),
            );
            store.flush().await.unwrap();
        }

        let reopened = ResumeStore::open(persistence).await;
        let info = reopened.state().personal_info;
        assert_eq!(info.name.as_deref(), Some("Jane Doe"));
        assert_eq!(info.email.as_deref(), Some("jane@x.com"));
    }

    #[tokio::test]
    async fn test_open_or_rebuild_only_rebuilds_missing_document() {
        let persistence = Arc::new(MemoryDocumentStore::new());
        let mut rebuilt = ResumeDocument::empty();
        rebuilt.personal_info.name = Some("Jane Doe".to_string());

        let source = rebuilt.clone();
        let store =
            ResumeStore::open_or_rebuild(persistence.clone(), move || async move { Some(source) })
                .await;
        store.flush().await.unwrap();
        assert_eq!(store.state(), rebuilt);
        assert!(persistence.raw().is_some());

        // a stored document wins over the rebuild source
        let reopened = ResumeStore::open_or_rebuild(persistence, || async {
            Some(ResumeDocument::empty())
        })
        .await;
        assert_eq!(reopened.state(), rebuilt);
    }

    #[tokio::test]
    async fn test_clear_section_and_reset() {
        let store = ResumeStore::in_memory();
        store.set_certificates(vec![certificate("A"), certificate("B")]);
        store.set_personal_info(PersonalInfoPatch::new().name("Jane"));

        store.clear_section(Section::Certificates);
        assert!(store.state().certificates.is_empty());
        assert_eq!(store.state().personal_info.name.as_deref(), Some("Jane"));

        store.clear_section(Section::PersonalInfo);
        assert!(store.state().personal_info.is_empty());

        store.set_selected_template(TemplateKind::Template2);
        store.reset();
        assert_eq!(store.state(), ResumeDocument::empty());
    }

    #[tokio::test]
    async fn test_invoke_export_without_handler_is_noop() {
        let store = ResumeStore::in_memory();
        assert!(!store.has_export_handler());
        assert!(!store.invoke_export().unwrap());
    }

    #[tokio::test]
    async fn test_registering_export_handler_replaces_previous() {
        let store = ResumeStore::in_memory();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(Mutex::new(Vec::<String>::new()));

        let counter = first.clone();
        store.register_export_handler(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let seen = second.clone();
        store.register_export_handler(move |doc| {
            seen.lock()
                .unwrap()
                .push(doc.personal_info.name.clone().unwrap_or_default());
            Ok(())
        });

        store.set_personal_info(PersonalInfoPatch::new().name("Jane"));
        assert!(store.invoke_export().unwrap());

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(*second.lock().unwrap(), vec!["Jane".to_string()]);
    }

    #[tokio::test]
    async fn test_export_handler_errors_propagate() {
        let store = ResumeStore::in_memory();
        store.register_export_handler(|_| anyhow::bail!("printer on fire"));
        let err = store.invoke_export().unwrap_err();
        assert!(err.to_string().contains("printer on fire"));

        store.reset();
        assert!(!store.invoke_export().unwrap());
    }
}
