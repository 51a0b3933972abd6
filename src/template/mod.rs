// src/template/mod.rs
//! Template projections: pure functions from the resolved document to a render tree

pub mod classic;
pub mod format;
pub mod render;
pub mod sidebar;

pub use classic::ClassicTemplate;
pub use render::{BlockRole, RenderNode, RenderTree, TextStyle};
pub use sidebar::SidebarTemplate;

use crate::resolver::{resolve, EffectiveResumeDocument};
use crate::types::{ResumeDocument, TemplateKind};

pub trait ResumeTemplate: Send + Sync {
    fn kind(&self) -> TemplateKind;

    fn name(&self) -> &'static str;

    /// Must not depend on anything but `doc`
    fn project(&self, doc: &EffectiveResumeDocument) -> RenderTree;
}

pub fn template_for(kind: TemplateKind) -> Box<dyn ResumeTemplate> {
    match kind {
        TemplateKind::Template1 => Box::new(SidebarTemplate),
        TemplateKind::Template2 => Box::new(ClassicTemplate),
    }
}

/// Resolve fallbacks and project with the document's selected template
pub fn render_document(doc: &ResumeDocument) -> RenderTree {
    let effective = resolve(doc);
    template_for(effective.selected_template).project(&effective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Certificate, Education, Experience, Language, PersonalInfo, Proficiency, Project, Skill,
        SkillLevel, SkillsAndLanguages, SocialLink,
    };

    fn filled_document() -> ResumeDocument {
        ResumeDocument {
            personal_info: PersonalInfo {
                name: Some("Ada Lovelace".to_string()),
                bio: Some("Analyst".to_string()),
                email: Some("ada@engine.org".to_string()),
                social_links: Some(vec![
                    SocialLink::new("GitHub", "ada"),
                    SocialLink::new("Mastodon", "lovelace"),
                ]),
                summary: Some("First programmer.".to_string()),
                ..Default::default()
            },
            skills_and_languages: SkillsAndLanguages {
                skills: vec![Skill {
                    skill_name: "Mathematics".to_string(),
                    skill_level: SkillLevel::Expert,
                }],
                languages: vec![Language {
                    language_name: "French".to_string(),
                    proficiency: Proficiency::Fluent,
                }],
            },
            educations: vec![Education {
                institution_name: "Home Tutoring".to_string(),
                website: None,
                area_of_study: "Mathematics".to_string(),
                type_of_study: "Private".to_string(),
                description: None,
                start_date: "1830-01-01T00:00:00.000Z".to_string(),
                end_date: Some("1835-01-01T00:00:00.000Z".to_string()),
                ongoing: true,
            }],
            experiences: vec![Experience {
                company_name: "Analytical Engine".to_string(),
                position: "Programmer".to_string(),
                description: None,
                start_date: "2021-01-01T00:00:00.000Z".to_string(),
                end_date: Some("2023-05-01T00:00:00.000Z".to_string()),
                currently_working: true,
            }],
            projects: (1..=5)
                .map(|i| Project {
                    project_name: format!("Note {}", i),
                    website: None,
                    description: None,
                    start_date: "2021-01-01T00:00:00.000Z".to_string(),
                    end_date: Some("2021-03-01T00:00:00.000Z".to_string()),
                    ongoing: false,
                    technologies: Some(vec!["Punch cards".to_string()]),
                })
                .collect(),
            certificates: vec![Certificate {
                certificate_name: "Bernoulli Numbers".to_string(),
                issued_by: "Royal Society".to_string(),
                date: Some("2022-07-01T00:00:00.000Z".to_string()),
                website: None,
                description: None,
            }],
            selected_template: TemplateKind::Template1,
        }
    }

    fn render_with(kind: TemplateKind, doc: &ResumeDocument) -> String {
        template_for(kind).project(&resolve(doc)).to_plain_text()
    }

    #[test]
    fn test_registry_matches_kind() {
        for kind in TemplateKind::all() {
            assert_eq!(template_for(kind).kind(), kind);
        }
    }

    #[test]
    fn test_ongoing_entries_render_present() {
        for kind in TemplateKind::all() {
            let output = render_with(kind, &filled_document());
            assert!(output.contains("Jan 2021 - Present"), "{}", kind);
            assert!(!output.contains("May 2023"), "{}", kind);
            assert!(!output.contains("1835"), "{}", kind);
        }
    }

    #[test]
    fn test_all_entries_are_rendered_in_order() {
        for kind in TemplateKind::all() {
            let output = render_with(kind, &filled_document());
            let positions: Vec<usize> = (1..=5)
                .map(|i| output.find(&format!("Note {}", i)).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", kind);

            let github = output.find("GitHub").unwrap();
            let mastodon = output.find("Mastodon").unwrap();
            assert!(github < mastodon);
        }
    }

    #[test]
    fn test_templates_consume_the_document_only() {
        for kind in TemplateKind::all() {
            let output = render_with(kind, &filled_document());
            assert!(output.contains("ADA LOVELACE"));
            assert!(output.contains("Bernoulli Numbers"));
            assert!(output.contains("Jul 2022"));
            assert!(!output.contains("Jane Doe"));
            assert!(!output.contains("Stanford"));
        }
    }

    #[test]
    fn test_projection_does_not_mutate_input() {
        let effective = resolve(&filled_document());
        let before = effective.clone();
        let first = SidebarTemplate.project(&effective);
        let second = SidebarTemplate.project(&effective);
        assert_eq!(effective, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_document_uses_selected_template() {
        let mut doc = filled_document();
        assert_eq!(render_document(&doc).template, TemplateKind::Template1);
        doc.selected_template = TemplateKind::Template2;
        let tree = render_document(&doc);
        assert_eq!(tree.template, TemplateKind::Template2);
        assert!(tree.to_plain_text().contains("Technologies: Punch cards"));
    }

    #[test]
    fn test_empty_document_renders_sample_content() {
        let output = render_document(&ResumeDocument::empty()).to_plain_text();
        assert!(output.contains("JANE DOE"));
        assert!(output.contains("Certified Full Stack Developer"));
        assert!(output.contains("2020 - Present"));
    }
}
