// src/store/patch.rs
//! Field-level updates for the personal info merge

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::types::{PersonalInfo, SocialLink};

/// What a patch does to one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate<T> {
    Keep,
    Clear,
    Set(T),
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::Keep
    }
}

impl<T> FieldUpdate<T> {
    pub fn apply(self, slot: &mut Option<T>) {
        match self {
            FieldUpdate::Keep => {}
            FieldUpdate::Clear => *slot = None,
            FieldUpdate::Set(value) => *slot = Some(value),
        }
    }

    pub fn is_keep(&self) -> bool {
        matches!(self, FieldUpdate::Keep)
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonalInfoPatch {
    pub name: FieldUpdate<String>,
    pub bio: FieldUpdate<String>,
    pub phone: FieldUpdate<String>,
    pub location: FieldUpdate<String>,
    pub email: FieldUpdate<String>,
    pub website: FieldUpdate<String>,
    pub social_links: FieldUpdate<Vec<SocialLink>>,
    pub summary: FieldUpdate<String>,
}

impl PersonalInfoPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every field explicitly cleared
    pub fn clear_all() -> Self {
        Self {
            name: FieldUpdate::Clear,
            bio: FieldUpdate::Clear,
            phone: FieldUpdate::Clear,
            location: FieldUpdate::Clear,
            email: FieldUpdate::Clear,
            website: FieldUpdate::Clear,
            social_links: FieldUpdate::Clear,
            summary: FieldUpdate::Clear,
        }
    }

    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = FieldUpdate::Set(value.into());
        self
    }

    pub fn bio(mut self, value: impl Into<String>) -> Self {
        self.bio = FieldUpdate::Set(value.into());
        self
    }

    pub fn phone(mut self, value: impl Into<String>) -> Self {
        self.phone = FieldUpdate::Set(value.into());
        self
    }

    pub fn location(mut self, value: impl Into<String>) -> Self {
        self.location = FieldUpdate::Set(value.into());
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = FieldUpdate::Set(value.into());
        self
    }

    pub fn website(mut self, value: impl Into<String>) -> Self {
        self.website = FieldUpdate::Set(value.into());
        self
    }

    pub fn summary(mut self, value: impl Into<String>) -> Self {
        self.summary = FieldUpdate::Set(value.into());
        self
    }

    pub fn social_links(mut self, links: Vec<SocialLink>) -> Self {
        self.social_links = FieldUpdate::Set(links);
        self
    }

    pub fn is_noop(&self) -> bool {
        self.name.is_keep()
            && self.bio.is_keep()
            && self.phone.is_keep()
            && self.location.is_keep()
            && self.email.is_keep()
            && self.website.is_keep()
            && self.social_links.is_keep()
            && self.summary.is_keep()
    }

    /// Shallow merge into `info`; kept fields are untouched
    pub fn apply_to(self, info: &mut PersonalInfo) {
        self.name.apply(&mut info.name);
        self.bio.apply(&mut info.bio);
        self.phone.apply(&mut info.phone);
        self.location.apply(&mut info.location);
        self.email.apply(&mut info.email);
        self.website.apply(&mut info.website);
        self.social_links.apply(&mut info.social_links);
        self.summary.apply(&mut info.summary);
    }

    /// Build a patch from a JSON object: absent key keeps, `null` clears, a value sets
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| anyhow::anyhow!("Personal info patch must be a JSON object"))?;

        let mut patch = Self::new();
        for (key, field) in object {
            match key.as_str() {
                "name" => patch.name = field_update(key, field)?,
                "bio" => patch.bio = field_update(key, field)?,
                "phone" | "phoneNumber" => patch.phone = field_update(key, field)?,
                "location" => patch.location = field_update(key, field)?,
                "email" => patch.email = field_update(key, field)?,
                "website" => patch.website = field_update(key, field)?,
                "socialLinks" | "socials" => patch.social_links = field_update(key, field)?,
                "summary" => patch.summary = field_update(key, field)?,
                other => anyhow::bail!("Unknown personal info field: {}", other),
            }
        }
        Ok(patch)
    }
}

impl From<PersonalInfo> for PersonalInfoPatch {
    fn from(info: PersonalInfo) -> Self {
        Self {
            name: info.name.into(),
            bio: info.bio.into(),
            phone: info.phone.into(),
            location: info.location.into(),
            email: info.email.into(),
            website: info.website.into(),
            social_links: info.social_links.into(),
            summary: info.summary.into(),
        }
    }
}

fn field_update<T: DeserializeOwned>(key: &str, value: &Value) -> Result<FieldUpdate<T>> {
    if value.is_null() {
        return Ok(FieldUpdate::Clear);
    }
    let parsed = serde_json::from_value(value.clone())
        .with_context(|| format!("Invalid value for personal info field {}", key))?;
    Ok(FieldUpdate::Set(parsed))
}
