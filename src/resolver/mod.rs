// src/resolver/mod.rs
//! Render-time substitution of sample content for empty sections

pub mod placeholder;

use crate::types::{
    Certificate, Education, Experience, PersonalInfo, Project, ResumeDocument, Section,
    SkillsAndLanguages, TemplateKind,
};

/// The document a template renders. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveResumeDocument {
    pub personal_info: PersonalInfo,
    pub skills_and_languages: SkillsAndLanguages,
    pub educations: Vec<Education>,
    pub experiences: Vec<Experience>,
    pub projects: Vec<Project>,
    pub certificates: Vec<Certificate>,
    pub selected_template: TemplateKind,
    pub fallback: FallbackReport,
}

/// Which sections were replaced by sample content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackReport {
    pub personal_info: bool,
    pub skills_and_languages: bool,
    pub educations: bool,
    pub experiences: bool,
    pub projects: bool,
    pub certificates: bool,
}

impl FallbackReport {
    pub fn sections(&self) -> Vec<Section> {
        let mut sections = Vec::new();
        if self.personal_info {
            sections.push(Section::PersonalInfo);
        }
        if self.skills_and_languages {
            sections.push(Section::SkillsAndLanguages);
        }
        if self.educations {
            sections.push(Section::Education);
        }
        if self.experiences {
            sections.push(Section::Experience);
        }
        if self.projects {
            sections.push(Section::Projects);
        }
        if self.certificates {
            sections.push(Section::Certificates);
        }
        sections
    }

    pub fn is_none(&self) -> bool {
        self.sections().is_empty()
    }
}

/// Whole-section fallback: each empty section is swapped for the sample one
pub fn resolve(doc: &ResumeDocument) -> EffectiveResumeDocument {
    let mut fallback = FallbackReport::default();

    let personal_info = if doc.personal_info.is_empty() {
        fallback.personal_info = true;
        placeholder::personal_info()
    } else {
        doc.personal_info.clone()
    };

    // Real data is kept when either list has entries; only both-empty falls back.
    let has_skills_or_languages = !doc.skills_and_languages.skills.is_empty()
        || !doc.skills_and_languages.languages.is_empty();
    let skills_and_languages = if has_skills_or_languages {
        doc.skills_and_languages.clone()
    } else {
        fallback.skills_and_languages = true;
        placeholder::skills_and_languages()
    };

    EffectiveResumeDocument {
        personal_info,
        skills_and_languages,
        educations: or_placeholder(&doc.educations, &mut fallback.educations, placeholder::educations),
        experiences: or_placeholder(
            &doc.experiences,
            &mut fallback.experiences,
            placeholder::experiences,
        ),
        projects: or_placeholder(&doc.projects, &mut fallback.projects, placeholder::projects),
        certificates: or_placeholder(
            &doc.certificates,
            &mut fallback.certificates,
            placeholder::certificates,
        ),
        selected_template: doc.selected_template,
        fallback,
    }
}

fn or_placeholder<T: Clone>(items: &[T], used: &mut bool, sample: fn() -> Vec<T>) -> Vec<T> {
    if items.is_empty() {
        *used = true;
        sample()
    } else {
        items.to_vec()
    }
}
