// src/forms/mod.rs
//! Editing sessions for each resume section: hydrate from the store, collect
//! entries, validate, then submit through the section setter.

pub mod validation;

use tracing::{debug, info, warn};

use crate::editor::{CollectionEditor, EditorAction, HydrationState};
use crate::error::{Notification, ValidationError};
use crate::store::{FieldUpdate, PersonalInfoPatch, ResumeStore};
use crate::types::{
    Certificate, Education, Experience, Language, PersonalInfo, Project, ResumeDocument, Section,
    Skill, SkillsAndLanguages, SocialLink,
};

/// Reject with a warning notification; nothing reaches the store.
fn reject(store: Option<&ResumeStore>, err: ValidationError) -> ValidationError {
    warn!("Form input rejected: {}", err);
    if let Some(store) = store {
        store.notify(Notification::warning(err.to_string()));
    }
    err
}

// ===== Personal Info =====

/// Raw text fields of the personal-info form. Blank means "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalInfoValues {
    pub name: String,
    pub bio: String,
    pub phone: String,
    pub location: String,
    pub email: String,
    pub website: String,
    pub summary: String,
}

impl PersonalInfoValues {
    pub fn from_info(info: &PersonalInfo) -> Self {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            name: field(&info.name),
            bio: field(&info.bio),
            phone: field(&info.phone),
            location: field(&info.location),
            email: field(&info.email),
            website: field(&info.website),
            summary: field(&info.summary),
        }
    }
}

fn text_update(value: &str) -> FieldUpdate<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        FieldUpdate::Clear
    } else {
        FieldUpdate::Set(trimmed.to_string())
    }
}

#[derive(Debug, Default)]
pub struct PersonalInfoForm {
    pub values: PersonalInfoValues,
    socials: CollectionEditor<SocialLink>,
}

impl PersonalInfoForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fill from the store. Fields and social links are only taken over
    /// when a name was saved; a second mount changes nothing.
    pub fn mount(&mut self, store: &ResumeStore) {
        if self.socials.hydration() != HydrationState::Uninitialized {
            debug!("Personal info form already mounted");
            return;
        }

        let info = store.state().personal_info;
        let has_name = info.name.as_deref().is_some_and(|n| !n.trim().is_empty());
        if has_name {
            self.values = PersonalInfoValues::from_info(&info);
            self.socials.hydrate(info.social_links());
        } else {
            self.socials.hydrate(&[]);
        }
    }

    pub fn add_social_link(
        &mut self,
        link: SocialLink,
        store: Option<&ResumeStore>,
    ) -> Result<(), ValidationError> {
        validation::validate_social_link(&link).map_err(|e| reject(store, e))?;
        self.socials.dispatch(EditorAction::Add(link));
        Ok(())
    }

    pub fn remove_social_link(&mut self, index: usize) {
        self.socials.dispatch(EditorAction::Remove(index));
    }

    pub fn social_links(&self) -> &[SocialLink] {
        self.socials.items()
    }

    /// The patch a successful submit would apply
    pub fn to_patch(&self) -> PersonalInfoPatch {
        PersonalInfoPatch {
            name: text_update(&self.values.name),
            bio: text_update(&self.values.bio),
            phone: text_update(&self.values.phone),
            location: text_update(&self.values.location),
            email: text_update(&self.values.email),
            website: text_update(&self.values.website),
            social_links: FieldUpdate::Set(self.socials.to_vec()),
            summary: text_update(&self.values.summary),
        }
    }

    pub fn submit(&self, store: &ResumeStore) -> Result<(), ValidationError> {
        validation::validate_personal_info(&self.values).map_err(|e| reject(Some(store), e))?;
        store.set_personal_info(self.to_patch());
        store.notify(Notification::success("Personal information saved"));
        info!("Submitted personal info with {} social link(s)", self.socials.len());
        Ok(())
    }

    pub fn clear(&mut self, store: &ResumeStore) {
        self.values = PersonalInfoValues::default();
        self.socials.dispatch(EditorAction::ClearAll);
        store.clear_section(Section::PersonalInfo);
        store.notify(Notification::success("Personal information cleared"));
    }
}

// ===== Skills And Languages =====

#[derive(Debug, Default)]
pub struct SkillsForm {
    skills: CollectionEditor<Skill>,
    languages: CollectionEditor<Language>,
}

impl SkillsForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, store: &ResumeStore) {
        let state = store.state().skills_and_languages;
        self.skills.hydrate(&state.skills);
        self.languages.hydrate(&state.languages);
    }

    pub fn add_skill(
        &mut self,
        skill: Skill,
        store: Option<&ResumeStore>,
    ) -> Result<(), ValidationError> {
        validation::validate_skill(&skill).map_err(|e| reject(store, e))?;
        self.skills.dispatch(EditorAction::Add(skill));
        Ok(())
    }

    pub fn add_language(
        &mut self,
        language: Language,
        store: Option<&ResumeStore>,
    ) -> Result<(), ValidationError> {
        validation::validate_language(&language).map_err(|e| reject(store, e))?;
        self.languages.dispatch(EditorAction::Add(language));
        Ok(())
    }

    pub fn remove_skill(&mut self, index: usize) {
        self.skills.dispatch(EditorAction::Remove(index));
    }

    pub fn remove_language(&mut self, index: usize) {
        self.languages.dispatch(EditorAction::Remove(index));
    }

    pub fn skills(&self) -> &[Skill] {
        self.skills.items()
    }

    pub fn languages(&self) -> &[Language] {
        self.languages.items()
    }

    pub fn submit(&self, store: &ResumeStore) {
        store.set_skills_and_languages(SkillsAndLanguages {
            skills: self.skills.to_vec(),
            languages: self.languages.to_vec(),
        });
        store.notify(Notification::success("Skills and languages saved"));
    }

    pub fn clear(&mut self, store: &ResumeStore) {
        self.skills.dispatch(EditorAction::ClearAll);
        self.languages.dispatch(EditorAction::ClearAll);
        store.clear_section(Section::SkillsAndLanguages);
        store.notify(Notification::success("Skills and languages cleared"));
    }
}

// ===== List Sections =====

/// A section edited as a plain ordered list of entries.
pub trait ListSection {
    type Item: Clone;

    const SECTION: Section;
    const LABEL: &'static str;

    fn read(doc: ResumeDocument) -> Vec<Self::Item>;

    fn write(store: &ResumeStore, items: Vec<Self::Item>);

    fn validate(item: &Self::Item) -> Result<(), ValidationError>;

    /// Bring a validated entry to its stored form
    fn normalize(item: Self::Item) -> Self::Item;
}

pub struct EducationEntries;
pub struct ExperienceEntries;
pub struct ProjectEntries;
pub struct CertificationEntries;

impl ListSection for EducationEntries {
    type Item = Education;
    const SECTION: Section = Section::Education;
    const LABEL: &'static str = "Education";

    fn read(doc: ResumeDocument) -> Vec<Education> {
        doc.educations
    }

    fn write(store: &ResumeStore, items: Vec<Education>) {
        store.set_education(items);
    }

    fn validate(item: &Education) -> Result<(), ValidationError> {
        validation::validate_education(item)
    }

    fn normalize(mut item: Education) -> Education {
        item.start_date = validation::normalize_date(&item.start_date);
        item.end_date = validation::normalize_optional_date(item.end_date);
        item
    }
}

impl ListSection for ExperienceEntries {
    type Item = Experience;
    const SECTION: Section = Section::Experience;
    const LABEL: &'static str = "Experience";

    fn read(doc: ResumeDocument) -> Vec<Experience> {
        doc.experiences
    }

    fn write(store: &ResumeStore, items: Vec<Experience>) {
        store.set_experience(items);
    }

    fn validate(item: &Experience) -> Result<(), ValidationError> {
        validation::validate_experience(item)
    }

    fn normalize(mut item: Experience) -> Experience {
        item.start_date = validation::normalize_date(&item.start_date);
        item.end_date = validation::normalize_optional_date(item.end_date);
        item
    }
}

impl ListSection for ProjectEntries {
    type Item = Project;
    const SECTION: Section = Section::Projects;
    const LABEL: &'static str = "Projects";

    fn read(doc: ResumeDocument) -> Vec<Project> {
        doc.projects
    }

    fn write(store: &ResumeStore, items: Vec<Project>) {
        store.set_projects(items);
    }

    fn validate(item: &Project) -> Result<(), ValidationError> {
        validation::validate_project(item)
    }

    fn normalize(mut item: Project) -> Project {
        item.start_date = validation::normalize_date(&item.start_date);
        item.end_date = validation::normalize_optional_date(item.end_date);
        item
    }
}

impl ListSection for CertificationEntries {
    type Item = Certificate;
    const SECTION: Section = Section::Certificates;
    const LABEL: &'static str = "Certifications";

    fn read(doc: ResumeDocument) -> Vec<Certificate> {
        doc.certificates
    }

    fn write(store: &ResumeStore, items: Vec<Certificate>) {
        store.set_certificates(items);
    }

    fn validate(item: &Certificate) -> Result<(), ValidationError> {
        validation::validate_certificate(item)
    }

    fn normalize(mut item: Certificate) -> Certificate {
        item.date = validation::normalize_optional_date(item.date);
        item
    }
}

pub struct ListForm<S: ListSection> {
    editor: CollectionEditor<S::Item>,
}

pub type EducationForm = ListForm<EducationEntries>;
pub type ExperienceForm = ListForm<ExperienceEntries>;
pub type ProjectsForm = ListForm<ProjectEntries>;
pub type CertificationsForm = ListForm<CertificationEntries>;

impl<S: ListSection> Default for ListForm<S> {
    fn default() -> Self {
        Self {
            editor: CollectionEditor::new(),
        }
    }
}

impl<S: ListSection> ListForm<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, store: &ResumeStore) {
        let records = S::read(store.state());
        if self.editor.hydrate(&records) {
            debug!("{} form hydrated with {} entries", S::LABEL, records.len());
        }
    }

    pub fn add(&mut self, item: S::Item, store: Option<&ResumeStore>) -> Result<(), ValidationError> {
        S::validate(&item).map_err(|e| reject(store, e))?;
        self.editor.dispatch(EditorAction::Add(S::normalize(item)));
        Ok(())
    }

    pub fn remove(&mut self, index: usize) {
        self.editor.dispatch(EditorAction::Remove(index));
    }

    pub fn toggle_dialog(&mut self) {
        self.editor.dispatch(EditorAction::ToggleDialog);
    }

    pub fn is_dialog_open(&self) -> bool {
        self.editor.is_dialog_open()
    }

    pub fn items(&self) -> &[S::Item] {
        self.editor.items()
    }

    pub fn submit(&self, store: &ResumeStore) {
        S::write(store, self.editor.to_vec());
        store.notify(Notification::success(format!("{} saved", S::LABEL)));
    }

    pub fn clear(&mut self, store: &ResumeStore) {
        self.editor.dispatch(EditorAction::ClearAll);
        store.clear_section(S::SECTION);
        store.notify(Notification::success(format!("{} cleared", S::LABEL)));
    }
}
