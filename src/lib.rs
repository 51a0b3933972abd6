pub mod cli;
pub mod core;
pub mod editor;
pub mod error;
pub mod export;
pub mod forms;
pub mod logging;
pub mod resolver;
pub mod storage;
pub mod store;
pub mod template;
pub mod types;

pub use error::{Notification, NotificationLevel, StorageError, ValidationError};
pub use resolver::{resolve, EffectiveResumeDocument, FallbackReport};
pub use store::{FieldUpdate, PersonalInfoPatch, ResumeStore};
pub use template::{render_document, template_for, RenderTree, ResumeTemplate};
pub use types::{ResumeDocument, Section, TemplateKind};
