// src/storage/sync.rs
//! Reconciliation between the in-memory document and the per-section tables

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::StorageError;
use crate::storage::section_repository::{
    CertificationsSection, EducationSection, ExperienceSection, PersonalInfoSection,
    ProjectsSection, SectionKind, SectionRepository, SkillsSection,
};
use crate::types::{ResumeDocument, Section};

/// Outcome of writing the document to every section table.
#[derive(Debug, Default)]
pub struct PushReport {
    pub saved: Vec<Section>,
    pub failed: Vec<(Section, StorageError)>,
}

impl PushReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct SectionSync {
    personal_info: SectionRepository<PersonalInfoSection>,
    skills: SectionRepository<SkillsSection>,
    education: SectionRepository<EducationSection>,
    experience: SectionRepository<ExperienceSection>,
    projects: SectionRepository<ProjectsSection>,
    certifications: SectionRepository<CertificationsSection>,
}

impl SectionSync {
    pub fn new(pool: SqlitePool, profile_id: &str) -> Self {
        Self {
            personal_info: SectionRepository::new(pool.clone(), profile_id),
            skills: SectionRepository::new(pool.clone(), profile_id),
            education: SectionRepository::new(pool.clone(), profile_id),
            experience: SectionRepository::new(pool.clone(), profile_id),
            projects: SectionRepository::new(pool.clone(), profile_id),
            certifications: SectionRepository::new(pool, profile_id),
        }
    }

    /// Save each section on its own; a failure in one does not stop or undo the others
    pub async fn push(&self, document: &ResumeDocument) -> PushReport {
        let mut report = PushReport::default();

        let personal = std::slice::from_ref(&document.personal_info);
        let skills = std::slice::from_ref(&document.skills_and_languages);

        record(&mut report, Section::PersonalInfo, self.personal_info.save(personal).await);
        record(&mut report, Section::SkillsAndLanguages, self.skills.save(skills).await);
        record(&mut report, Section::Education, self.education.save(&document.educations).await);
        record(&mut report, Section::Experience, self.experience.save(&document.experiences).await);
        record(&mut report, Section::Projects, self.projects.save(&document.projects).await);
        record(
            &mut report,
            Section::Certificates,
            self.certifications.save(&document.certificates).await,
        );

        info!(
            "Section push: {} saved, {} failed",
            report.saved.len(),
            report.failed.len()
        );
        report
    }

    /// Assemble a document from the section tables; unreadable sections stay empty
    pub async fn pull(&self) -> ResumeDocument {
        let mut document = ResumeDocument::empty();

        if let Some(info) = load(&self.personal_info).await.into_iter().next() {
            document.personal_info = info;
        }
        if let Some(skills) = load(&self.skills).await.into_iter().next() {
            document.skills_and_languages = skills;
        }
        document.educations = load(&self.education).await;
        document.experiences = load(&self.experience).await;
        document.projects = load(&self.projects).await;
        document.certificates = load(&self.certifications).await;

        document
    }

    /// True when no section has ever been saved for this profile
    pub async fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.personal_info.get_all().await?.is_none()
            && self.skills.get_all().await?.is_none()
            && self.education.get_all().await?.is_none()
            && self.experience.get_all().await?.is_none()
            && self.projects.get_all().await?.is_none()
            && self.certifications.get_all().await?.is_none())
    }

    pub async fn clear(&self, section: Section) -> Result<(), StorageError> {
        match section {
            Section::PersonalInfo => self.personal_info.clear().await,
            Section::SkillsAndLanguages => self.skills.clear().await,
            Section::Education => self.education.clear().await,
            Section::Experience => self.experience.clear().await,
            Section::Projects => self.projects.clear().await,
            Section::Certificates => self.certifications.clear().await,
        }
    }
}

fn record(report: &mut PushReport, section: Section, result: Result<i64, StorageError>) {
    match result {
        Ok(_) => report.saved.push(section),
        Err(e) => {
            warn!("Failed to save section {}: {}", section, e);
            report.failed.push((section, e));
        }
    }
}

async fn load<S: SectionKind>(repo: &SectionRepository<S>) -> Vec<S::Record> {
    match repo.get_all().await {
        Ok(Some(snapshot)) => snapshot.records,
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!("Failed to read section {}, treating as empty: {}", S::SECTION, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Database;
    use crate::types::{Certificate, PersonalInfo, SocialLink, TemplateKind};

    fn document() -> ResumeDocument {
        ResumeDocument {
            personal_info: PersonalInfo {
                name: Some("Jane Doe".to_string()),
                social_links: Some(vec![SocialLink::new("GitHub", "jane")]),
                ..Default::default()
            },
            certificates: vec![Certificate {
                certificate_name: "Advanced React".to_string(),
                issued_by: "Udemy".to_string(),
                date: Some("2021-12-01".to_string()),
                website: None,
                description: None,
            }],
            selected_template: TemplateKind::Template2,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_push_then_pull_restores_sections() {
        let db = Database::in_memory().await.unwrap();
        let sync = SectionSync::new(db.pool().clone(), "jane");
        assert!(sync.is_empty().await.unwrap());

        let report = sync.push(&document()).await;
        assert!(report.is_complete());
        assert_eq!(report.saved.len(), 6);
        assert!(!sync.is_empty().await.unwrap());

        let pulled = sync.pull().await;
        let expected = document();
        assert_eq!(pulled.personal_info, expected.personal_info);
        assert_eq!(pulled.certificates, expected.certificates);
        assert!(pulled.educations.is_empty());
        // the template choice lives only in the document blob
        assert_eq!(pulled.selected_template, TemplateKind::Template1);
    }

    #[tokio::test]
    async fn test_clear_one_section() {
        let db = Database::in_memory().await.unwrap();
        let sync = SectionSync::new(db.pool().clone(), "jane");
        sync.push(&document()).await;

        sync.clear(Section::Certificates).await.unwrap();
        let pulled = sync.pull().await;
        assert!(pulled.certificates.is_empty());
        assert_eq!(pulled.personal_info.name.as_deref(), Some("Jane Doe"));
    }

    #[tokio::test]
    async fn test_pull_on_closed_pool_is_empty() {
        let db = Database::in_memory().await.unwrap();
        let sync = SectionSync::new(db.pool().clone(), "jane");
        sync.push(&document()).await;
        db.close().await;

        assert_eq!(sync.pull().await, ResumeDocument::empty());
        let report = sync.push(&document()).await;
        assert_eq!(report.failed.len(), 6);
    }
}
