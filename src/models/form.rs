use super::{
    GenerationMode, LocalFile, SocialFields, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND,
};

/// Value snapshot of the generation form, read once per attempt.
///
/// Nothing in the crate mutates a snapshot in place; upload resolution
/// produces a new one through [`FormSnapshot::with_image_url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub mode: GenerationMode,
    pub text: String,
    pub url: String,
    pub social: SocialFields,
    pub image_url: String,
    pub selected_file: Option<LocalFile>,
    pub size: Option<i64>,
    pub theme: String,
    pub fg_color: String,
    pub bg_color: String,
}

impl Default for FormSnapshot {
    fn default() -> Self {
        Self {
            mode: GenerationMode::Text,
            text: String::new(),
            url: String::new(),
            social: SocialFields::default(),
            image_url: String::new(),
            selected_file: None,
            size: None,
            theme: "classic".to_string(),
            fg_color: DEFAULT_FOREGROUND.to_string(),
            bg_color: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl FormSnapshot {
    pub fn new(mode: GenerationMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(GenerationMode::Text).with_text(text)
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::new(GenerationMode::Url).with_url(url)
    }

    pub fn social(social: SocialFields) -> Self {
        Self::new(GenerationMode::Social).with_social(social)
    }

    pub fn image(image_url: impl Into<String>) -> Self {
        Self::new(GenerationMode::ImageReference).with_image_url(image_url)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_social(mut self, social: SocialFields) -> Self {
        self.social = social;
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn with_file(mut self, file: LocalFile) -> Self {
        self.selected_file = Some(file);
        self
    }

    pub fn with_size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn with_colors(mut self, fg: impl Into<String>, bg: impl Into<String>) -> Self {
        self.fg_color = fg.into();
        self.bg_color = bg.into();
        self
    }

    /// Whether anything at all was entered, regardless of the active mode.
    pub fn has_content(&self) -> bool {
        !self.text.is_empty()
            || !self.url.is_empty()
            || self.social.has_any_value()
            || !self.image_url.is_empty()
            || self.selected_file.is_some()
    }

    /// The file that must be uploaded before composing, if any.
    pub fn pending_upload(&self) -> Option<&LocalFile> {
        if self.mode != GenerationMode::ImageReference || !self.image_url.trim().is_empty() {
            return None;
        }
        self.selected_file.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SocialEntry, SocialPlatform};

    #[test]
    fn test_defaults_match_form() {
        let form = FormSnapshot::default();
        assert_eq!(form.mode, GenerationMode::Text);
        assert_eq!(form.theme, "classic");
        assert_eq!(form.fg_color, "#000000");
        assert_eq!(form.bg_color, "#ffffff");
        assert!(form.size.is_none());
        assert!(!form.has_content());
    }

    #[test]
    fn test_content_is_mode_independent() {
        let form = FormSnapshot::new(GenerationMode::Social).with_text("left over");
        assert!(form.has_content());

        let form = FormSnapshot::new(GenerationMode::Text).with_social(
            SocialFields::new().with(SocialPlatform::Linkedin, SocialEntry::disabled("li/me")),
        );
        assert!(form.has_content());
    }

    #[test]
    fn test_pending_upload_only_without_direct_url() {
        let file = LocalFile::new("logo.png", vec![1, 2, 3]);

        let form = FormSnapshot::new(GenerationMode::ImageReference).with_file(file.clone());
        assert_eq!(form.pending_upload(), Some(&file));

        let form = form.with_image_url("https://cdn/logo.png");
        assert_eq!(form.pending_upload(), None);

        let form = FormSnapshot::new(GenerationMode::Text).with_file(file);
        assert_eq!(form.pending_upload(), None);
    }
}
