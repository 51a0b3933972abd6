// src/types/mod.rs
pub mod resume;

pub use resume::{
    parse_iso_date, to_iso_timestamp, Certificate, Education, Experience, Language, PersonalInfo,
    Proficiency, Project, ResumeDocument, Section, Skill, SkillLevel, SkillsAndLanguages,
    SocialLink, TemplateKind,
};
