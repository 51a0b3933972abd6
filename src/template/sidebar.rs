// src/template/sidebar.rs
//! Template1: contact, education, skills and languages in a left sidebar

use super::format::{month_year, range, year};
use super::render::{
    block, entry, heading, push_opt, section, styled, text, BlockRole, RenderNode, RenderTree,
    TextStyle,
};
use super::ResumeTemplate;
use crate::resolver::EffectiveResumeDocument;
use crate::types::TemplateKind;

pub struct SidebarTemplate;

impl ResumeTemplate for SidebarTemplate {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Template1
    }

    fn name(&self) -> &'static str {
        "Sidebar"
    }

    fn project(&self, doc: &EffectiveResumeDocument) -> RenderTree {
        let sidebar = block(
            BlockRole::Column,
            vec![
                contact(doc),
                education(doc),
                section(
                    "Skills",
                    vec![RenderNode::List(
                        doc.skills_and_languages
                            .skills
                            .iter()
                            .map(|s| text(format!("{} ({})", s.skill_name, s.skill_level.label())))
                            .collect(),
                    )],
                ),
                section(
                    "Languages",
                    vec![RenderNode::List(
                        doc.skills_and_languages
                            .languages
                            .iter()
                            .map(|l| {
                                text(format!("{} ({})", l.language_name, l.proficiency.label()))
                            })
                            .collect(),
                    )],
                ),
            ],
        );

        let main = block(
            BlockRole::Column,
            vec![
                header(doc),
                section("Summary", summary(doc)),
                projects(doc),
                experience(doc),
                certifications(doc),
            ],
        );

        RenderTree {
            template: self.kind(),
            root: block(BlockRole::Page, vec![block(BlockRole::Columns, vec![sidebar, main])]),
        }
    }
}

fn contact(doc: &EffectiveResumeDocument) -> RenderNode {
    let info = &doc.personal_info;
    let mut nodes = Vec::new();
    push_opt(&mut nodes, info.phone.as_deref(), TextStyle::Normal);
    push_opt(&mut nodes, info.email.as_deref(), TextStyle::Normal);
    push_opt(&mut nodes, info.location.as_deref(), TextStyle::Normal);
    push_opt(&mut nodes, info.website.as_deref(), TextStyle::Normal);
    section("Contact", nodes)
}

fn education(doc: &EffectiveResumeDocument) -> RenderNode {
    let entries = doc
        .educations
        .iter()
        .map(|edu| {
            let mut nodes = vec![
                styled(range(&edu.start_date, edu.effective_end_date(), year), TextStyle::Muted),
                styled(edu.institution_name.clone(), TextStyle::Strong),
                text(format!("{}, {}", edu.type_of_study, edu.area_of_study)),
            ];
            push_opt(&mut nodes, edu.description.as_deref(), TextStyle::Normal);
            entry(nodes)
        })
        .collect();
    section("Education", entries)
}

fn header(doc: &EffectiveResumeDocument) -> RenderNode {
    let info = &doc.personal_info;
    let mut nodes = vec![heading(1, info.name.clone().unwrap_or_default())];
    push_opt(&mut nodes, info.bio.as_deref(), TextStyle::Normal);

    let links: Vec<RenderNode> = info
        .social_links()
        .iter()
        .map(|link| RenderNode::Link {
            label: format!("{} - @{}", link.platform, link.username),
            target: None,
        })
        .collect();
    if !links.is_empty() {
        nodes.push(block(BlockRole::Inline, links));
    }
    block(BlockRole::Section, nodes)
}

fn summary(doc: &EffectiveResumeDocument) -> Vec<RenderNode> {
    let mut nodes = Vec::new();
    push_opt(&mut nodes, doc.personal_info.summary.as_deref(), TextStyle::Normal);
    nodes
}

fn projects(doc: &EffectiveResumeDocument) -> RenderNode {
    let entries = doc
        .projects
        .iter()
        .map(|project| {
            let mut nodes = vec![
                styled(project.project_name.clone(), TextStyle::Strong),
                styled(
                    range(&project.start_date, project.effective_end_date(), month_year),
                    TextStyle::Emphasis,
                ),
            ];
            if let Some(website) = project.website.as_deref().filter(|w| !w.is_empty()) {
                nodes.push(RenderNode::Link {
                    label: website.to_string(),
                    target: Some(website.to_string()),
                });
            }
            if !project.technologies().is_empty() {
                nodes.push(RenderNode::Tags(project.technologies().to_vec()));
            }
            push_opt(&mut nodes, project.description.as_deref(), TextStyle::Normal);
            entry(nodes)
        })
        .collect();
    section("Projects", entries)
}

fn experience(doc: &EffectiveResumeDocument) -> RenderNode {
    let entries = doc
        .experiences
        .iter()
        .map(|exp| {
            let mut nodes = vec![
                styled(
                    format!("{} at {}", exp.position, exp.company_name),
                    TextStyle::Strong,
                ),
                styled(
                    range(&exp.start_date, exp.effective_end_date(), month_year),
                    TextStyle::Emphasis,
                ),
            ];
            push_opt(&mut nodes, exp.description.as_deref(), TextStyle::Normal);
            entry(nodes)
        })
        .collect();
    section("Experience", entries)
}

fn certifications(doc: &EffectiveResumeDocument) -> RenderNode {
    let entries = doc
        .certificates
        .iter()
        .map(|cert| {
            let mut nodes = vec![styled(
                format!("{} - {}", cert.certificate_name, cert.issued_by),
                TextStyle::Strong,
            )];
            if let Some(date) = cert.date.as_deref() {
                nodes.push(styled(month_year(date), TextStyle::Emphasis));
            }
            push_opt(&mut nodes, cert.description.as_deref(), TextStyle::Normal);
            if let Some(website) = cert.website.as_deref().filter(|w| !w.is_empty()) {
                nodes.push(RenderNode::Link {
                    label: website.to_string(),
                    target: Some(website.to_string()),
                });
            }
            entry(nodes)
        })
        .collect();
    section("Certifications", entries)
}
