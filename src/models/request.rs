use super::{GenerationMode, SocialLinkSet, StyleSpec};
use serde::Serialize;

/// Mode-specific data carried by a [`GenerationRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Text and URL modes both encode the literal string.
    Literal(String),
    Social(SocialLinkSet),
    ImageUrl(String),
}

/// The single input the rendering service accepts. Built fresh for every
/// attempt and dropped once dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub mode: GenerationMode,
    pub size: u32,
    pub style: StyleSpec,
    pub payload: Payload,
}

/// How a request travels to `/api/qr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireRequest {
    Query(Vec<(&'static str, String)>),
    Json(QrPostBody),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QrPostBody {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<SocialLinkSet>,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(rename = "fgColor", skip_serializing_if = "Option::is_none")]
    pub fg_color: Option<String>,
    #[serde(rename = "bgColor", skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
}

impl GenerationRequest {
    pub fn to_wire(&self) -> WireRequest {
        match &self.payload {
            Payload::Literal(text) => {
                let mut query = vec![("text", text.clone()), ("size", self.size.to_string())];
                match &self.style {
                    StyleSpec::Theme(theme) => query.push(("theme", theme.as_str().to_string())),
                    StyleSpec::Custom {
                        foreground,
                        background,
                    } => {
                        query.push(("fg", foreground.clone()));
                        query.push(("bg", background.clone()));
                    }
                }
                WireRequest::Query(query)
            }
            Payload::Social(links) => WireRequest::Json(self.post_body(Some(links.clone()), None)),
            Payload::ImageUrl(url) => WireRequest::Json(self.post_body(None, Some(url.clone()))),
        }
    }

    fn post_body(&self, payload: Option<SocialLinkSet>, image_url: Option<String>) -> QrPostBody {
        let (theme, fg_color, bg_color) = match &self.style {
            StyleSpec::Theme(theme) => (Some(theme.as_str().to_string()), None, None),
            StyleSpec::Custom {
                foreground,
                background,
            } => (None, Some(foreground.clone()), Some(background.clone())),
        };

        QrPostBody {
            kind: self.mode.as_str(),
            size: self.size,
            payload,
            image_url,
            theme,
            fg_color,
            bg_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SocialEntry, SocialFields, SocialPlatform, Theme};
    use serde_json::json;

    #[test]
    fn test_literal_goes_as_query() {
        let request = GenerationRequest {
            mode: GenerationMode::Url,
            size: 256,
            style: StyleSpec::custom("#112233", "#ffffff"),
            payload: Payload::Literal("https://example.com/?a=b".to_string()),
        };

        assert_eq!(
            request.to_wire(),
            WireRequest::Query(vec![
                ("text", "https://example.com/?a=b".to_string()),
                ("size", "256".to_string()),
                ("fg", "#112233".to_string()),
                ("bg", "#ffffff".to_string()),
            ])
        );
    }

    #[test]
    fn test_social_body_carries_theme_only() {
        let links = SocialFields::new()
            .with(SocialPlatform::Facebook, SocialEntry::enabled("fb.com/me"))
            .links();
        let request = GenerationRequest {
            mode: GenerationMode::Social,
            size: 300,
            style: StyleSpec::Theme(Theme::Sunset),
            payload: Payload::Social(links),
        };

        let WireRequest::Json(body) = request.to_wire() else {
            panic!("social requests are posted as JSON");
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "type": "social",
                "size": 300,
                "payload": { "facebook": "fb.com/me" },
                "theme": "sunset"
            })
        );
    }

    #[test]
    fn test_image_body_carries_colors_only() {
        let request = GenerationRequest {
            mode: GenerationMode::ImageReference,
            size: 300,
            style: StyleSpec::custom("#000000", "#eeeeee"),
            payload: Payload::ImageUrl("https://store/abc.png".to_string()),
        };

        let WireRequest::Json(body) = request.to_wire() else {
            panic!("image requests are posted as JSON");
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "type": "imageUrl",
                "size": 300,
                "imageUrl": "https://store/abc.png",
                "fgColor": "#000000",
                "bgColor": "#eeeeee"
            })
        );
    }
}
