// src/storage/mod.rs
//! Durable storage: the whole-document blob and the per-section tables

pub mod document;
pub mod section_repository;
pub mod sync;

pub use document::{DocumentPersistence, MemoryDocumentStore, SqliteDocumentStore};
pub use section_repository::{
    CertificationsSection, EducationSection, ExperienceSection, PersonalInfoSection,
    ProjectsSection, RecordId, SectionKind, SectionRepository, SectionSnapshot, SkillsSection,
};
pub use sync::{PushReport, SectionSync};
