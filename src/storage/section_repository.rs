// src/storage/section_repository.rs
//! Durable single-record-per-section storage

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use std::marker::PhantomData;
use tracing::debug;

use crate::error::StorageError;
use crate::types::{
    Certificate, Education, Experience, PersonalInfo, Project, Section, SkillsAndLanguages,
};

pub type RecordId = i64;

/// Binds a record type to the table that stores it.
pub trait SectionKind: Send + Sync + 'static {
    type Record: Serialize + DeserializeOwned + Clone + Send + Sync;
    const TABLE: &'static str;
    const SECTION: Section;
}

pub struct PersonalInfoSection;
pub struct SkillsSection;
pub struct EducationSection;
pub struct ExperienceSection;
pub struct ProjectsSection;
pub struct CertificationsSection;

impl SectionKind for PersonalInfoSection {
    type Record = PersonalInfo;
    const TABLE: &'static str = "personal_info";
    const SECTION: Section = Section::PersonalInfo;
}

impl SectionKind for SkillsSection {
    type Record = SkillsAndLanguages;
    const TABLE: &'static str = "skills_and_languages";
    const SECTION: Section = Section::SkillsAndLanguages;
}

impl SectionKind for EducationSection {
    type Record = Education;
    const TABLE: &'static str = "education";
    const SECTION: Section = Section::Education;
}

impl SectionKind for ExperienceSection {
    type Record = Experience;
    const TABLE: &'static str = "experience";
    const SECTION: Section = Section::Experience;
}

impl SectionKind for ProjectsSection {
    type Record = Project;
    const TABLE: &'static str = "projects";
    const SECTION: Section = Section::Projects;
}

impl SectionKind for CertificationsSection {
    type Record = Certificate;
    const TABLE: &'static str = "certifications";
    const SECTION: Section = Section::Certificates;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionSnapshot<T> {
    pub id: RecordId,
    pub records: Vec<T>,
    /// Epoch milliseconds of the first save
    pub created_at: i64,
    /// Epoch milliseconds of the latest save
    pub updated_at: i64,
}

#[derive(sqlx::FromRow)]
struct SectionRow {
    id: i64,
    records: String,
    created_at: i64,
    updated_at: i64,
}

pub fn system_clock() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub struct SectionRepository<S: SectionKind> {
    pool: SqlitePool,
    profile_id: String,
    clock: fn() -> i64,
    _section: PhantomData<S>,
}

impl<S: SectionKind> Clone for SectionRepository<S> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            profile_id: self.profile_id.clone(),
            clock: self.clock,
            _section: PhantomData,
        }
    }
}

impl<S: SectionKind> SectionRepository<S> {
    pub fn new(pool: SqlitePool, profile_id: impl Into<String>) -> Self {
        Self {
            pool,
            profile_id: profile_id.into(),
            clock: system_clock,
            _section: PhantomData,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the section's stored records, keeping the original creation time
    pub async fn save(&self, records: &[S::Record]) -> Result<RecordId, StorageError> {
        let body = serde_json::to_string(records)?;
        let now = (self.clock)();

        // the unique profile index turns a second save into an update; created_at is kept
        let (id,): (RecordId,) = sqlx::query_as(&format!(
            "INSERT INTO {} (profile_id, records, created_at, updated_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(profile_id) DO UPDATE SET records = excluded.records, updated_at = excluded.updated_at
             RETURNING id",
            S::TABLE
        ))
        .bind(&self.profile_id)
        .bind(&body)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        debug!(
            "Saved {} record(s) to {} for profile {} (id {})",
            records.len(),
            S::TABLE,
            self.profile_id,
            id
        );
        Ok(id)
    }

    /// The single stored record for this section, if any
    pub async fn get_all(&self) -> Result<Option<SectionSnapshot<S::Record>>, StorageError> {
        let row = sqlx::query_as::<_, SectionRow>(&format!(
            "SELECT id, records, created_at, updated_at FROM {} WHERE profile_id = ? ORDER BY id ASC LIMIT 1",
            S::TABLE
        ))
        .bind(&self.profile_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(SectionSnapshot {
                id: row.id,
                records: serde_json::from_str(&row.records)?,
                created_at: row.created_at,
                updated_at: row.updated_at,
            })),
            None => Ok(None),
        }
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        sqlx::query(&format!("DELETE FROM {} WHERE profile_id = ?", S::TABLE))
            .bind(&self.profile_id)
            .execute(&self.pool)
            .await?;

        debug!("Cleared {} for profile {}", S::TABLE, self.profile_id);
        Ok(())
    }
}
