//! Farcaster frame documents (`fc:frame` meta tags).

use super::format::escape;

/// Frame protocol version advertised in `fc:frame`.
const FRAME_VERSION: &str = "vNext";

/// One frame button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameButton {
    /// Posts the frame action back to `target`.
    Post {
        /// Button label.
        label: String,
        /// Absolute URL receiving the action.
        target: String,
    },
    /// Opens `target` in the client.
    Link {
        /// Button label.
        label: String,
        /// URL to open.
        target: String,
    },
}

impl FrameButton {
    /// Post button.
    #[must_use]
    pub fn post(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self::Post {
            label: label.into(),
            target: target.into(),
        }
    }

    /// Link button.
    #[must_use]
    pub fn link(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self::Link {
            label: label.into(),
            target: target.into(),
        }
    }

    const fn action(&self) -> &'static str {
        match self {
            Self::Post { .. } => "post",
            Self::Link { .. } => "link",
        }
    }

    fn parts(&self) -> (&str, &str) {
        match self {
            Self::Post { label, target } | Self::Link { label, target } => (label, target),
        }
    }
}

/// A frame page: an image, an optional text input and up to four buttons.
#[derive(Debug, Clone)]
pub struct FrameDocument {
    title: String,
    image_url: String,
    post_url: String,
    input_placeholder: Option<String>,
    buttons: Vec<FrameButton>,
}

impl FrameDocument {
    /// Maximum number of buttons a frame may carry.
    pub const MAX_BUTTONS: usize = 4;

    /// Creates a frame showing `image_url` and posting to `post_url`.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        image_url: impl Into<String>,
        post_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            image_url: image_url.into(),
            post_url: post_url.into(),
            input_placeholder: None,
            buttons: Vec::new(),
        }
    }

    /// Adds a text input with `placeholder`.
    #[must_use]
    pub fn with_input(mut self, placeholder: impl Into<String>) -> Self {
        self.input_placeholder = Some(placeholder.into());
        self
    }

    /// Appends a button; buttons past [`Self::MAX_BUTTONS`] are dropped.
    #[must_use]
    pub fn with_button(mut self, button: FrameButton) -> Self {
        if self.buttons.len() < Self::MAX_BUTTONS {
            self.buttons.push(button);
        } else {
            tracing::warn!(title = %self.title, "frame button limit reached, dropping button");
        }
        self
    }

    /// Renders the HTML document.
    #[must_use]
    pub fn render(&self) -> String {
        let mut meta = vec![
            tag("og:title", &self.title),
            tag("og:image", &self.image_url),
            tag("fc:frame", FRAME_VERSION),
            tag("fc:frame:image", &self.image_url),
            tag("fc:frame:image:aspect_ratio", "1.91:1"),
            tag("fc:frame:post_url", &self.post_url),
        ];
        if let Some(placeholder) = &self.input_placeholder {
            meta.push(tag("fc:frame:input:text", placeholder));
        }
        for (index, button) in (1..).zip(&self.buttons) {
            let (label, target) = button.parts();
            meta.push(tag(&format!("fc:frame:button:{index}"), label));
            meta.push(tag(&format!("fc:frame:button:{index}:action"), button.action()));
            meta.push(tag(&format!("fc:frame:button:{index}:target"), target));
        }

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n{meta}\n</head>\n<body><img src=\"{image}\" alt=\"{title}\"></body>\n</html>\n",
            title = escape(&self.title),
            image = escape(&self.image_url),
            meta = meta.join("\n"),
        )
    }
}

fn tag(property: &str, content: &str) -> String {
    format!(
        "<meta property=\"{}\" content=\"{}\">",
        escape(property),
        escape(content)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FrameDocument {
        FrameDocument::new("Peanut", "https://x/image/stats/1", "https://x/")
            .with_input("Enter Farcaster FID...")
            .with_button(FrameButton::post("Check", "https://x/"))
            .with_button(FrameButton::link("Share", "https://warpcast.com/~/compose?text=a&b"))
    }

    #[test]
    fn renders_frame_meta_tags() {
        let html = sample().render();
        assert!(html.contains(r#"<meta property="fc:frame" content="vNext">"#));
        assert!(html.contains(r#"<meta property="fc:frame:image" content="https://x/image/stats/1">"#));
        assert!(html.contains(r#"<meta property="fc:frame:input:text" content="Enter Farcaster FID...">"#));
        assert!(html.contains(r#"<meta property="fc:frame:button:1" content="Check">"#));
        assert!(html.contains(r#"<meta property="fc:frame:button:1:action" content="post">"#));
        assert!(html.contains(r#"<meta property="fc:frame:button:2:action" content="link">"#));
    }

    #[test]
    fn escapes_attribute_values() {
        let html = sample().render();
        assert!(html.contains("compose?text=a&amp;b"));
    }

    #[test]
    fn caps_button_count() {
        let mut doc = FrameDocument::new("t", "i", "p");
        for n in 0..6 {
            doc = doc.with_button(FrameButton::post(format!("b{n}"), "p"));
        }
        let html = doc.render();
        assert!(html.contains("fc:frame:button:4\""));
        assert!(!html.contains("fc:frame:button:5"));
    }

    #[test]
    fn input_is_optional() {
        let html = FrameDocument::new("t", "i", "p").render();
        assert!(!html.contains("fc:frame:input:text"));
    }
}
