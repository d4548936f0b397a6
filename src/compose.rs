use crate::{
    error::ValidationError,
    models::{
        FormSnapshot, GenerationMode, GenerationRequest, LocalFile, Payload, StyleSpec, Theme,
        CUSTOM_THEME,
    },
};

/// Size used when the form leaves it unset or non-positive.
pub const DEFAULT_SIZE: u32 = 300;

/// Outcome of composing a form snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composition<'a> {
    Ready(GenerationRequest),
    /// Image mode with only a local file: upload it, then compose again
    /// with the returned reference.
    NeedsUpload(&'a LocalFile),
}

impl<'a> Composition<'a> {
    pub fn ready(self) -> Option<GenerationRequest> {
        match self {
            Composition::Ready(request) => Some(request),
            Composition::NeedsUpload(_) => None,
        }
    }
}

pub fn compose(form: &FormSnapshot) -> Result<Composition<'_>, ValidationError> {
    let payload = match form.mode {
        GenerationMode::Text => literal(&form.text, GenerationMode::Text)?,
        GenerationMode::Url => literal(&form.url, GenerationMode::Url)?,
        GenerationMode::Social => {
            let links = form.social.links();
            if links.is_empty() {
                return Err(ValidationError::NoPlatformSelected);
            }
            Payload::Social(links)
        }
        GenerationMode::ImageReference => {
            let image_url = form.image_url.trim();
            if !image_url.is_empty() {
                Payload::ImageUrl(image_url.to_string())
            } else if let Some(file) = &form.selected_file {
                return Ok(Composition::NeedsUpload(file));
            } else {
                return Err(ValidationError::MissingImageSource);
            }
        }
    };

    Ok(Composition::Ready(GenerationRequest {
        mode: form.mode,
        size: resolve_size(form.size),
        style: resolve_style(&form.theme, &form.fg_color, &form.bg_color),
        payload,
    }))
}

fn literal(value: &str, mode: GenerationMode) -> Result<Payload, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyInput(mode));
    }
    Ok(Payload::Literal(value.to_string()))
}

pub fn resolve_size(size: Option<i64>) -> u32 {
    size.and_then(|size| u32::try_from(size).ok())
        .filter(|size| *size > 0)
        .unwrap_or(DEFAULT_SIZE)
}

/// Known theme names win; `"custom"`, blank and unknown names fall back
/// to the color pair as typed.
pub fn resolve_style(theme: &str, fg_color: &str, bg_color: &str) -> StyleSpec {
    if theme.trim().eq_ignore_ascii_case(CUSTOM_THEME) {
        return StyleSpec::custom(fg_color, bg_color);
    }
    match Theme::from_name(theme) {
        Some(theme) => StyleSpec::Theme(theme),
        None => StyleSpec::custom(fg_color, bg_color),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SocialEntry, SocialFields, SocialPlatform};

    fn ready(form: &FormSnapshot) -> GenerationRequest {
        compose(form)
            .expect("form should be valid")
            .ready()
            .expect("form should not need an upload")
    }

    #[test]
    fn test_text_with_defaults() {
        let form = FormSnapshot::text("hello").with_theme("classic");

        assert_eq!(
            ready(&form),
            GenerationRequest {
                mode: GenerationMode::Text,
                size: 300,
                style: StyleSpec::Theme(Theme::Classic),
                payload: Payload::Literal("hello".to_string()),
            }
        );
    }

    #[test]
    fn test_empty_fields_fail_per_mode() {
        let blank = "  \t";
        assert_eq!(
            compose(&FormSnapshot::text(blank)),
            Err(ValidationError::EmptyInput(GenerationMode::Text))
        );
        assert_eq!(
            compose(&FormSnapshot::url("")),
            Err(ValidationError::EmptyInput(GenerationMode::Url))
        );
        assert_eq!(
            compose(&FormSnapshot::social(SocialFields::new())),
            Err(ValidationError::NoPlatformSelected)
        );
        assert_eq!(
            compose(&FormSnapshot::image("")),
            Err(ValidationError::MissingImageSource)
        );
    }

    #[test]
    fn test_url_mode_reads_url_field() {
        let form = FormSnapshot::url("https://example.com").with_text("ignored");
        assert_eq!(
            ready(&form).payload,
            Payload::Literal("https://example.com".to_string())
        );
    }

    #[test]
    fn test_social_with_custom_colors() {
        let social = SocialFields::new()
            .with(SocialPlatform::Facebook, SocialEntry::enabled("fb.com/me"))
            .with(SocialPlatform::Twitter, SocialEntry::disabled("x.com/me"));
        let form = FormSnapshot::social(social)
            .with_theme("custom")
            .with_colors("#112233", "#ffffff");

        let request = ready(&form);
        let Payload::Social(links) = &request.payload else {
            panic!("expected a social payload");
        };
        assert_eq!(links.len(), 1);
        assert_eq!(links.get(SocialPlatform::Facebook), Some("fb.com/me"));
        assert_eq!(request.style, StyleSpec::custom("#112233", "#ffffff"));
    }

    #[test]
    fn test_enabled_platform_without_value_is_dropped() {
        let social = SocialFields::new().with(SocialPlatform::Instagram, SocialEntry::enabled(""));
        assert_eq!(
            compose(&FormSnapshot::social(social)),
            Err(ValidationError::NoPlatformSelected)
        );
    }

    #[test]
    fn test_file_only_needs_upload() {
        let file = LocalFile::new("logo.png", vec![0x89, 0x50]);
        let form = FormSnapshot::image("").with_file(file.clone());

        assert_eq!(compose(&form), Ok(Composition::NeedsUpload(&file)));

        let resolved = form.clone().with_image_url("https://store/abc.png");
        assert_eq!(
            ready(&resolved).payload,
            Payload::ImageUrl("https://store/abc.png".to_string())
        );
    }

    #[test]
    fn test_direct_url_wins_over_file() {
        let form = FormSnapshot::image(" https://cdn/pic.jpg ")
            .with_file(LocalFile::new("local.png", vec![1]));
        assert_eq!(
            ready(&form).payload,
            Payload::ImageUrl("https://cdn/pic.jpg".to_string())
        );
    }

    #[test]
    fn test_size_fallback() {
        assert_eq!(resolve_size(None), 300);
        assert_eq!(resolve_size(Some(0)), 300);
        assert_eq!(resolve_size(Some(-20)), 300);
        assert_eq!(resolve_size(Some(512)), 512);
        assert_eq!(resolve_size(Some(i64::MAX)), 300);
    }

    #[test]
    fn test_style_never_mixes_theme_and_colors() {
        for name in ["classic", "Indigo", "custom", "", "neon", "forest"] {
            let style = resolve_style(name, "#010203", "not-a-color");
            assert!(style.theme().is_some() != style.colors().is_some());
        }
        assert_eq!(
            resolve_style("neon", "#010203", "not-a-color"),
            StyleSpec::custom("#010203", "not-a-color")
        );
    }

    #[test]
    fn test_compose_is_deterministic() {
        let social = SocialFields::new()
            .with(SocialPlatform::Linkedin, SocialEntry::enabled("linkedin.com/in/me"))
            .with(SocialPlatform::Facebook, SocialEntry::enabled("fb.com/me"));
        let forms = [
            FormSnapshot::text("same input").with_size(128).with_theme("midnight"),
            FormSnapshot::social(social).with_theme("custom").with_colors("#112233", "#eeeeee"),
            FormSnapshot::image("https://cdn/pic.jpg").with_size(-1),
        ];
        for form in &forms {
            assert_eq!(compose(form), compose(form));
            assert_eq!(ready(form).to_wire(), ready(form).to_wire());
        }
    }
}
