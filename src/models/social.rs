use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Facebook,
    Twitter,
    Instagram,
    Linkedin,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 4] = [
        SocialPlatform::Facebook,
        SocialPlatform::Twitter,
        SocialPlatform::Instagram,
        SocialPlatform::Linkedin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Linkedin => "linkedin",
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One checkbox + text field pair of the social form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialEntry {
    pub enabled: bool,
    pub value: String,
}

impl SocialEntry {
    pub fn enabled(value: impl Into<String>) -> Self {
        Self {
            enabled: true,
            value: value.into(),
        }
    }

    pub fn disabled(value: impl Into<String>) -> Self {
        Self {
            enabled: false,
            value: value.into(),
        }
    }

    fn selected_value(&self) -> Option<&str> {
        (self.enabled && !self.value.trim().is_empty()).then_some(self.value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialFields {
    pub facebook: SocialEntry,
    pub twitter: SocialEntry,
    pub instagram: SocialEntry,
    pub linkedin: SocialEntry,
}

impl SocialFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, platform: SocialPlatform, entry: SocialEntry) -> Self {
        *self.entry_mut(platform) = entry;
        self
    }

    pub fn entry(&self, platform: SocialPlatform) -> &SocialEntry {
        match platform {
            SocialPlatform::Facebook => &self.facebook,
            SocialPlatform::Twitter => &self.twitter,
            SocialPlatform::Instagram => &self.instagram,
            SocialPlatform::Linkedin => &self.linkedin,
        }
    }

    pub fn entry_mut(&mut self, platform: SocialPlatform) -> &mut SocialEntry {
        match platform {
            SocialPlatform::Facebook => &mut self.facebook,
            SocialPlatform::Twitter => &mut self.twitter,
            SocialPlatform::Instagram => &mut self.instagram,
            SocialPlatform::Linkedin => &mut self.linkedin,
        }
    }

    /// True if any platform has a typed value, enabled or not.
    pub fn has_any_value(&self) -> bool {
        SocialPlatform::ALL
            .iter()
            .any(|platform| !self.entry(*platform).value.is_empty())
    }

    /// Platforms that are both enabled and filled in.
    pub fn links(&self) -> SocialLinkSet {
        SocialPlatform::ALL
            .iter()
            .filter_map(|platform| {
                self.entry(*platform)
                    .selected_value()
                    .map(|value| (*platform, value.to_string()))
            })
            .collect()
    }
}

/// Platform to URL mapping sent to the rendering service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SocialLinkSet(BTreeMap<SocialPlatform, String>);

impl SocialLinkSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, platform: SocialPlatform) -> Option<&str> {
        self.0.get(&platform).map(String::as_str)
    }
}

impl FromIterator<(SocialPlatform, String)> for SocialLinkSet {
    fn from_iter<I: IntoIterator<Item = (SocialPlatform, String)>>(iter: I) -> Self {
        SocialLinkSet(iter.into_iter().collect())
    }
}
