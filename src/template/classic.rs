// src/template/classic.rs
//! Template2: single column, experience first

use super::format::{month_year, range};
use super::render::{
    block, entry, heading, push_opt, section, styled, text, BlockRole, RenderNode, RenderTree,
    TextStyle,
};
use super::ResumeTemplate;
use crate::resolver::EffectiveResumeDocument;
use crate::types::TemplateKind;

pub struct ClassicTemplate;

impl ResumeTemplate for ClassicTemplate {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Template2
    }

    fn name(&self) -> &'static str {
        "Classic"
    }

    fn project(&self, doc: &EffectiveResumeDocument) -> RenderTree {
        let info = &doc.personal_info;

        let mut header = vec![heading(1, info.name.clone().unwrap_or_default())];
        push_opt(&mut header, info.bio.as_deref(), TextStyle::Emphasis);

        let mut contact = Vec::new();
        push_opt(&mut contact, info.phone.as_deref(), TextStyle::Normal);
        push_opt(&mut contact, info.email.as_deref(), TextStyle::Normal);
        push_opt(&mut contact, info.location.as_deref(), TextStyle::Normal);
        push_opt(&mut contact, info.website.as_deref(), TextStyle::Normal);
        if !contact.is_empty() {
            header.push(block(BlockRole::Inline, contact));
        }

        let socials: Vec<RenderNode> = info
            .social_links()
            .iter()
            .map(|link| text(format!("{}: {}", link.platform, link.username)))
            .collect();
        if !socials.is_empty() {
            header.push(block(BlockRole::Inline, socials));
        }

        let mut children = vec![block(BlockRole::Section, header)];

        let mut summary = Vec::new();
        push_opt(&mut summary, info.summary.as_deref(), TextStyle::Normal);
        if !summary.is_empty() {
            children.push(section("Profile", summary));
        }

        children.push(section(
            "Experience",
            doc.experiences
                .iter()
                .map(|exp| {
                    let mut nodes = vec![
                        styled(exp.position.clone(), TextStyle::Strong),
                        text(exp.company_name.clone()),
                        styled(
                            range(&exp.start_date, exp.effective_end_date(), month_year),
                            TextStyle::Muted,
                        ),
                    ];
                    push_opt(&mut nodes, exp.description.as_deref(), TextStyle::Normal);
                    entry(nodes)
                })
                .collect(),
        ));

        children.push(section(
            "Education",
            doc.educations
                .iter()
                .map(|edu| {
                    let mut nodes = vec![
                        styled(edu.institution_name.clone(), TextStyle::Strong),
                        text(format!("{} in {}", edu.type_of_study, edu.area_of_study)),
                        styled(
                            range(&edu.start_date, edu.effective_end_date(), month_year),
                            TextStyle::Muted,
                        ),
                    ];
                    push_opt(&mut nodes, edu.description.as_deref(), TextStyle::Normal);
                    entry(nodes)
                })
                .collect(),
        ));

        children.push(section(
            "Projects",
            doc.projects
                .iter()
                .map(|project| {
                    let mut nodes = vec![
                        styled(project.project_name.clone(), TextStyle::Strong),
                        styled(
                            range(&project.start_date, project.effective_end_date(), month_year),
                            TextStyle::Muted,
                        ),
                    ];
                    push_opt(&mut nodes, project.description.as_deref(), TextStyle::Normal);
                    if !project.technologies().is_empty() {
                        nodes.push(text(format!(
                            "Technologies: {}",
                            project.technologies().join(", ")
                        )));
                    }
                    if let Some(website) = project.website.as_deref().filter(|w| !w.is_empty()) {
                        nodes.push(RenderNode::Link {
                            label: website.to_string(),
                            target: Some(website.to_string()),
                        });
                    }
                    entry(nodes)
                })
                .collect(),
        ));

        let skills = &doc.skills_and_languages;
        children.push(section(
            "Skills",
            vec![RenderNode::Tags(
                skills
                    .skills
                    .iter()
                    .map(|s| format!("{} · {}", s.skill_name, s.skill_level.label()))
                    .collect(),
            )],
        ));
        children.push(section(
            "Languages",
            vec![RenderNode::Tags(
                skills
                    .languages
                    .iter()
                    .map(|l| format!("{} · {}", l.language_name, l.proficiency.label()))
                    .collect(),
            )],
        ));

        children.push(section(
            "Certifications",
            doc.certificates
                .iter()
                .map(|cert| {
                    let mut nodes = vec![
                        styled(cert.certificate_name.clone(), TextStyle::Strong),
                        text(format!("Issued by {}", cert.issued_by)),
                    ];
                    if let Some(date) = cert.date.as_deref() {
                        nodes.push(styled(month_year(date), TextStyle::Muted));
                    }
                    push_opt(&mut nodes, cert.description.as_deref(), TextStyle::Normal);
                    entry(nodes)
                })
                .collect(),
        ));

        RenderTree {
            template: self.kind(),
            root: block(BlockRole::Page, children),
        }
    }
}
