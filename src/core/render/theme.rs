//! Resolved terminal theme
//!
//! A theme maps semantic roles to style tokens (see [`crate::data::styles`]).
//! Themes arrive fully resolved; loading a theme file is someone else's job.

/// Style tokens per semantic role. `None` falls back to the built-in
/// default for that role.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub border: Option<String>,
    pub header: Option<String>,
    pub caption: Option<String>,
    pub emphasis: Option<String>,
    pub strong: Option<String>,
    pub code: Option<String>,
    pub link: Option<String>,
}

impl Theme {
    /// Border style; the default is a light gray in 256-color mode and
    /// plain white otherwise.
    pub fn border_token(&self, use_256_color: bool) -> &str {
        self.border
            .as_deref()
            .unwrap_or(if use_256_color { "38;5;250" } else { "white" })
    }

    pub fn header_token(&self) -> &str {
        self.header.as_deref().unwrap_or("b")
    }

    pub fn caption_token(&self) -> &str {
        self.caption.as_deref().unwrap_or("i")
    }

    pub fn emphasis_token(&self) -> &str {
        self.emphasis.as_deref().unwrap_or("i")
    }

    pub fn strong_token(&self) -> &str {
        self.strong.as_deref().unwrap_or("b")
    }

    pub fn code_token(&self) -> &str {
        self.code.as_deref().unwrap_or("cyan")
    }

    pub fn link_token(&self) -> &str {
        self.link.as_deref().unwrap_or("u blue")
    }
}
