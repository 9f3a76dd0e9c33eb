/// The normalized request model shared by every emitter.
///
/// A `ParsedRequest` is built once by [`super::parse::parse`] and only read afterwards.
/// Mappings are [`IndexMap`]s so emitters render entries in the order they
/// appeared on the command line. Re-inserting a key replaces its value and
/// keeps the original position.
use indexmap::IndexMap;
use serde::Serialize;

/// Default method when nothing else applies.
pub const DEFAULT_METHOD: &str = "GET";

/// Request body. The variants are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Body {
    #[default]
    None,
    /// Sent verbatim.
    Raw(String),
    /// A literal that parsed as JSON.
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` fields.
    Form(IndexMap<String, String>),
}

impl Body {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Basic auth credentials. `password` is empty when `-u` had no colon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// `user:pass` form, as fed to Basic auth encoding.
    #[must_use]
    pub fn joined(&self) -> String {
        format!("{}:{}", self.username, self.password)
    }
}

/// Everything extracted from one curl invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedRequest {
    /// Uppercase HTTP verb.
    pub method: String,
    /// Scheme, host and path. Never contains a query string.
    pub url: String,
    pub query_params: IndexMap<String, Vec<String>>,
    pub headers: IndexMap<String, String>,
    /// Effective content type: the `Content-Type` header, or one inferred from the body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub body: Body,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<Credentials>,
    pub cookies: IndexMap<String, String>,
    /// Multipart field name → local file path.
    pub files: IndexMap<String, String>,
    /// Applied to both `http` and `https`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    pub verify_tls: bool,
    pub follow_redirects: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<f64>,
}

impl Default for ParsedRequest {
    fn default() -> Self {
        Self {
            method: DEFAULT_METHOD.to_owned(),
            url: String::new(),
            query_params: IndexMap::new(),
            headers: IndexMap::new(),
            content_type: None,
            body: Body::None,
            auth: None,
            cookies: IndexMap::new(),
            files: IndexMap::new(),
            proxy_url: None,
            verify_tls: true,
            follow_redirects: true,
            timeout_seconds: None,
        }
    }
}

impl ParsedRequest {
    /// Whether a URL was found.
    #[must_use]
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }

    /// Query string rebuilt from `query_params` (without the leading `?`).
    ///
    /// Multi-valued keys repeat, in their original order. Values are
    /// form-urlencoded.
    #[must_use]
    pub fn query_string(&self) -> String {
        let mut ser = url::form_urlencoded::Serializer::new(String::new());
        for (key, values) in self.query_params.iter() {
            for value in values {
                ser.append_pair(key, value);
            }
        }
        ser.finish()
    }

    /// `url` with the query string re-attached.
    #[must_use]
    pub fn full_url(&self) -> String {
        if self.query_params.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, self.query_string())
        }
    }

    /// Whether the user gave a `Content-Type` header (any case).
    #[must_use]
    pub fn has_content_type_header(&self) -> bool {
        self.headers
            .keys()
            .any(|key| key.eq_ignore_ascii_case("content-type"))
    }
}
