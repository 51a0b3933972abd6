// src/types/resume.rs
//! Resume document model shared by the store, the repositories and the templates

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// ===== Root Aggregate =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub skills_and_languages: SkillsAndLanguages,
    pub educations: Vec<Education>,
    pub experiences: Vec<Experience>,
    pub projects: Vec<Project>,
    pub certificates: Vec<Certificate>,
    pub selected_template: TemplateKind,
}

impl ResumeDocument {
    pub fn empty() -> Self {
        Self::default()
    }
}

// ===== Personal Info =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<Vec<SocialLink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl PersonalInfo {
    /// True when no field has been set at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.bio.is_none()
            && self.phone.is_none()
            && self.location.is_none()
            && self.email.is_none()
            && self.website.is_none()
            && self.social_links.is_none()
            && self.summary.is_none()
    }

    pub fn social_links(&self) -> &[SocialLink] {
        self.social_links.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub username: String,
}

impl SocialLink {
    pub fn new(platform: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            username: username.into(),
        }
    }
}

// ===== Skills & Languages =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsAndLanguages {
    pub skills: Vec<Skill>,
    pub languages: Vec<Language>,
}

impl SkillsAndLanguages {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.languages.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub skill_name: String,
    pub skill_level: SkillLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub language_name: String,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Expert,
}

impl SkillLevel {
    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Expert => "Expert",
        }
    }
}

impl FromStr for SkillLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "expert" => Ok(SkillLevel::Expert),
            other => anyhow::bail!(
                "Unknown skill level: {}. Use beginner, intermediate or expert",
                other
            ),
        }
    }
}

impl<'de> Deserialize<'de> for SkillLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Native,
    Fluent,
    Intermediate,
    Basic,
}

impl Proficiency {
    pub fn label(&self) -> &'static str {
        match self {
            Proficiency::Native => "Native",
            Proficiency::Fluent => "Fluent",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Basic => "Basic",
        }
    }
}

impl FromStr for Proficiency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "native" => Ok(Proficiency::Native),
            "fluent" => Ok(Proficiency::Fluent),
            "intermediate" => Ok(Proficiency::Intermediate),
            "basic" => Ok(Proficiency::Basic),
            other => anyhow::bail!(
                "Unknown proficiency: {}. Use native, fluent, intermediate or basic",
                other
            ),
        }
    }
}

impl<'de> Deserialize<'de> for Proficiency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ===== Repeatable Sections =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub area_of_study: String,
    pub type_of_study: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub ongoing: bool,
}

impl Education {
    /// End date as displayed; ignored while the study is ongoing
    pub fn effective_end_date(&self) -> Option<&str> {
        if self.ongoing {
            None
        } else {
            self.end_date.as_deref()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub company_name: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub currently_working: bool,
}

impl Experience {
    pub fn effective_end_date(&self) -> Option<&str> {
        if self.currently_working {
            None
        } else {
            self.end_date.as_deref()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub ongoing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
}

impl Project {
    pub fn effective_end_date(&self) -> Option<&str> {
        if self.ongoing {
            None
        } else {
            self.end_date.as_deref()
        }
    }

    pub fn technologies(&self) -> &[String] {
        self.technologies.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub certificate_name: String,
    pub issued_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ===== Template Selection =====

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateKind {
    #[default]
    Template1,
    Template2,
}

impl TemplateKind {
    pub fn all() -> [TemplateKind; 2] {
        [TemplateKind::Template1, TemplateKind::Template2]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Template1 => "Template1",
            TemplateKind::Template2 => "Template2",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "template1" | "1" | "sidebar" => Ok(TemplateKind::Template1),
            "template2" | "2" | "classic" => Ok(TemplateKind::Template2),
            other => anyhow::bail!("Unknown template: {}. Use Template1 or Template2", other),
        }
    }
}

// ===== Section Names =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    PersonalInfo,
    SkillsAndLanguages,
    Education,
    Experience,
    Projects,
    Certificates,
}

impl Section {
    pub fn all() -> [Section; 6] {
        [
            Section::PersonalInfo,
            Section::SkillsAndLanguages,
            Section::Education,
            Section::Experience,
            Section::Projects,
            Section::Certificates,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::PersonalInfo => "personal-info",
            Section::SkillsAndLanguages => "skills-and-languages",
            Section::Education => "education",
            Section::Experience => "experience",
            Section::Projects => "projects",
            Section::Certificates => "certifications",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "personal-info" | "personal" => Ok(Section::PersonalInfo),
            "skills-and-languages" | "skills" | "languages" => Ok(Section::SkillsAndLanguages),
            "education" | "educations" => Ok(Section::Education),
            "experience" | "experiences" => Ok(Section::Experience),
            "projects" | "project" => Ok(Section::Projects),
            "certifications" | "certificates" | "certification" => Ok(Section::Certificates),
            other => anyhow::bail!("Unknown section: {}", other),
        }
    }
}

// ===== Date Conversion =====

/// Parse an ISO-8601 timestamp or bare date into a calendar date
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .with_context(|| format!("Invalid ISO-8601 date: {}", value))
}

/// Serialize a calendar date the way dates are stored at rest
pub fn to_iso_timestamp(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_serializes_with_camel_case_keys() {
        let doc = ResumeDocument::empty();
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("personalInfo").is_some());
        assert!(json.get("skillsAndLanguages").is_some());
        assert_eq!(json["selectedTemplate"], "Template1");
        assert_eq!(json["certificates"], serde_json::json!([]));
    }

    #[test]
    fn test_personal_info_emptiness() {
        let mut info = PersonalInfo::default();
        assert!(info.is_empty());
        info.phone = Some("555".to_string());
        assert!(!info.is_empty());
    }

    #[test]
    fn test_skill_level_parses_any_case() {
        assert_eq!("Expert".parse::<SkillLevel>().unwrap(), SkillLevel::Expert);
        assert_eq!(" beginner ".parse::<SkillLevel>().unwrap(), SkillLevel::Beginner);
        assert!("guru".parse::<SkillLevel>().is_err());
        let lang: Language =
            serde_json::from_str(r#"{"languageName":"English","proficiency":"Fluent"}"#).unwrap();
        assert_eq!(lang.proficiency, Proficiency::Fluent);
    }

    #[test]
    fn test_ongoing_hides_end_date() {
        let education = Education {
            institution_name: "MIT".to_string(),
            website: None,
            area_of_study: "CS".to_string(),
            type_of_study: "BSc".to_string(),
            description: None,
            start_date: "2020-01-01".to_string(),
            end_date: Some("2024-01-01".to_string()),
            ongoing: true,
        };
        assert_eq!(education.effective_end_date(), None);

        let experience = Experience {
            company_name: "Acme".to_string(),
            position: "Dev".to_string(),
            description: None,
            start_date: "2020-01-01".to_string(),
            end_date: Some("2021-01-01".to_string()),
            currently_working: false,
        };
        assert_eq!(experience.effective_end_date(), Some("2021-01-01"));
    }

    #[test]
    fn test_iso_date_round_trip() {
        let date = parse_iso_date("2021-01-01T00:00:00.000Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        assert_eq!(to_iso_timestamp(date), "2021-01-01T00:00:00.000Z");
        assert_eq!(parse_iso_date("2015-09-01").unwrap().to_string(), "2015-09-01");
        assert!(parse_iso_date("yesterday").is_err());
    }

    #[test]
    fn test_template_and_section_parsing() {
        assert_eq!("template2".parse::<TemplateKind>().unwrap(), TemplateKind::Template2);
        assert_eq!("certificates".parse::<Section>().unwrap(), Section::Certificates);
        assert_eq!("skills_and_languages".parse::<Section>().unwrap(), Section::SkillsAndLanguages);
        assert!("hobbies".parse::<Section>().is_err());
    }
}
