/// Output formats: each one renders a finished [`ParsedRequest`] into text.
pub mod csharp;
pub mod http;
pub mod python;

use chrono::NaiveDateTime;

use crate::request::{ConvertError, ParsedRequest};

/// Target formats, in the order `all` generates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Python,
    CSharp,
    Http,
}

impl Format {
    pub const ALL: [Self; 3] = [Self::Python, Self::CSharp, Self::Http];

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::CSharp => "C#",
            Self::Http => "HTTP",
        }
    }

    /// What the output is, for "saved to" messages.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Python => "Python code",
            Self::CSharp => "C# code",
            Self::Http => ".http file",
        }
    }

    /// File extension without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Python => "py",
            Self::CSharp => "cs",
            Self::Http => "http",
        }
    }

    /// Text emitted in place of a rendering that failed with `NoUrl`.
    #[must_use]
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Python | Self::Http => "# Error: No URL found in curl command",
            Self::CSharp => "// Error: No URL found in curl command",
        }
    }

    /// Render `request` in this format.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::NoUrl` when the request has no URL.
    pub fn render(
        self,
        request: &ParsedRequest,
        opts: &RenderOptions,
    ) -> Result<String, ConvertError> {
        match self {
            Self::Python => python::render(request),
            Self::CSharp => csharp::render(request),
            Self::Http => http::render(request, opts),
        }
    }
}

/// Settings shared across formats.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Request title (only `.http` uses it).
    pub name: Option<String>,
    pub generated_at: NaiveDateTime,
}

impl RenderOptions {
    /// Options stamped with the current local time.
    #[must_use]
    pub fn now(name: Option<String>) -> Self {
        Self {
            name,
            generated_at: chrono::Local::now().naive_local(),
        }
    }
}

/// Outcome of rendering one format.
#[derive(Debug)]
pub struct Rendered {
    /// Text to write: the rendering, or the format's placeholder.
    pub text: String,
    /// Set when `text` is a placeholder.
    pub error: Option<ConvertError>,
}

/// Render, falling back to the placeholder on `NoUrl`.
#[must_use]
pub fn render_or_placeholder(
    format: Format,
    request: &ParsedRequest,
    opts: &RenderOptions,
) -> Rendered {
    match format.render(request, opts) {
        Ok(text) => Rendered { text, error: None },
        Err(err) => Rendered {
            text: format.placeholder().to_owned(),
            error: Some(err),
        },
    }
}
