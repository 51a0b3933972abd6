// src/forms/validation.rs
//! Field rules applied before a form touches the store

use crate::error::ValidationError;
use crate::types::{
    parse_iso_date, to_iso_timestamp, Certificate, Education, Experience, Language, Project, Skill,
    SocialLink,
};

use super::PersonalInfoValues;

pub const NAME_MIN: usize = 2;
pub const BIO_MAX: usize = 80;
pub const PHONE_MAX: usize = 15;
pub const LOCATION_MIN: usize = 2;
pub const SUMMARY_MIN: usize = 80;

fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

fn min_len(field: &'static str, value: &str, min: usize) -> Result<(), ValidationError> {
    if value.trim().chars().count() < min {
        return Err(ValidationError::TooShort { field, min });
    }
    Ok(())
}

fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

fn date(field: &'static str, value: &str) -> Result<(), ValidationError> {
    required(field, value)?;
    parse_iso_date(value).map_err(|_| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })?;
    Ok(())
}

fn optional_date(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(value) => date(field, value),
        None => Ok(()),
    }
}

/// Stored form of a validated date: midnight UTC ISO timestamp
pub fn normalize_date(value: &str) -> String {
    match parse_iso_date(value) {
        Ok(date) => to_iso_timestamp(date),
        Err(_) => value.to_string(),
    }
}

/// Blank end dates are stored as absent
pub fn normalize_optional_date(value: Option<String>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| normalize_date(&v))
}

pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidEmail(value.to_string());
    let (local, domain) = value.trim().split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || domain.contains(char::is_whitespace) {
        return Err(invalid());
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

/// Empty or absent is accepted; anything else must be an http(s) URL with a host
pub fn validate_url(value: Option<&str>) -> Result<(), ValidationError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(());
    };

    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .ok_or_else(|| ValidationError::InvalidUrl(value.to_string()))?;
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() || host.contains(char::is_whitespace) {
        return Err(ValidationError::InvalidUrl(value.to_string()));
    }
    Ok(())
}

pub fn validate_personal_info(values: &PersonalInfoValues) -> Result<(), ValidationError> {
    required("name", &values.name)?;
    min_len("name", &values.name, NAME_MIN)?;
    max_len("bio", &values.bio, BIO_MAX)?;
    required("phone", &values.phone)?;
    max_len("phone", &values.phone, PHONE_MAX)?;
    required("location", &values.location)?;
    min_len("location", &values.location, LOCATION_MIN)?;
    required("email", &values.email)?;
    validate_email(&values.email)?;
    validate_url(Some(&values.website))?;
    if !values.summary.trim().is_empty() {
        min_len("summary", &values.summary, SUMMARY_MIN)?;
    }
    Ok(())
}

pub fn validate_social_link(link: &SocialLink) -> Result<(), ValidationError> {
    required("platform", &link.platform)?;
    required("username", &link.username)
}

pub fn validate_skill(skill: &Skill) -> Result<(), ValidationError> {
    required("skill name", &skill.skill_name)
}

pub fn validate_language(language: &Language) -> Result<(), ValidationError> {
    required("language name", &language.language_name)
}

pub fn validate_education(edu: &Education) -> Result<(), ValidationError> {
    required("institution name", &edu.institution_name)?;
    required("area of study", &edu.area_of_study)?;
    required("type of study", &edu.type_of_study)?;
    date("start date", &edu.start_date)?;
    optional_date("end date", edu.end_date.as_deref())?;
    validate_url(edu.website.as_deref())
}

pub fn validate_experience(exp: &Experience) -> Result<(), ValidationError> {
    required("company name", &exp.company_name)?;
    required("position", &exp.position)?;
    date("start date", &exp.start_date)?;
    optional_date("end date", exp.end_date.as_deref())
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    required("project name", &project.project_name)?;
    date("start date", &project.start_date)?;
    optional_date("end date", project.end_date.as_deref())?;
    validate_url(project.website.as_deref())
}

pub fn validate_certificate(cert: &Certificate) -> Result<(), ValidationError> {
    required("certificate name", &cert.certificate_name)?;
    required("issuer", &cert.issued_by)?;
    optional_date("date", cert.date.as_deref())?;
    validate_url(cert.website.as_deref())
}
