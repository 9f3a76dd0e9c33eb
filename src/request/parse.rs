/// Flag-driven walk over curl tokens, producing a [`ParsedRequest`].
///
/// Tokens are consumed left to right. Recognized flags take the following
/// token as their value unless they are switches. Unknown flags are skipped
/// on their own: they are assumed to take no value, so the value of an
/// unknown valued flag (e.g. `-o out.txt`) is seen as a bare word and may be
/// picked up as the URL when no URL has been seen yet.
use indexmap::IndexMap;
use tracing::{debug, warn};

use super::errors::ConvertError;
use super::model::{Body, Credentials, ParsedRequest};
use super::tokenize::tokenize;

const CONTENT_TYPE: &str = "content-type";
const JSON_MEDIA_TYPE: &str = "application/json";
const FORM_MEDIA_TYPE: &str = "application/x-www-form-urlencoded";
const MULTIPART_MEDIA_TYPE: &str = "multipart/form-data";

/// Curl flags this parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Method,
    Header,
    Data,
    DataBinary,
    User,
    Cookie,
    Form,
    Insecure,
    Location,
    MaxTime,
    Proxy,
}

impl Flag {
    fn lookup(token: &str) -> Option<Self> {
        Some(match token {
            "-X" | "--request" => Self::Method,
            "-H" | "--header" => Self::Header,
            "-d" | "--data" | "--data-raw" => Self::Data,
            "--data-binary" => Self::DataBinary,
            "-u" | "--user" => Self::User,
            "-b" | "--cookie" => Self::Cookie,
            "-F" | "--form" => Self::Form,
            "-k" | "--insecure" => Self::Insecure,
            "-L" | "--location" => Self::Location,
            "--max-time" => Self::MaxTime,
            "--proxy" => Self::Proxy,
            _ => return None,
        })
    }

    fn takes_value(self) -> bool {
        !matches!(self, Self::Insecure | Self::Location)
    }
}

/// Accumulator threaded through the token walk.
#[derive(Debug, Default)]
struct RequestBuilder {
    request: ParsedRequest,
    /// Method from `-X`; wins over body-based inference.
    explicit_method: Option<String>,
}

impl RequestBuilder {
    fn apply_switch(&mut self, flag: Flag) {
        match flag {
            Flag::Insecure => self.request.verify_tls = false,
            Flag::Location => self.request.follow_redirects = true,
            _ => {}
        }
    }

    fn apply(&mut self, flag: Flag, value: &str) -> Result<(), ConvertError> {
        match flag {
            Flag::Method => self.explicit_method = Some(value.to_uppercase()),
            Flag::Header => self.add_header(value),
            Flag::Data => self.request.body = classify_data(value),
            Flag::DataBinary => self.request.body = Body::Raw(value.to_owned()),
            Flag::User => self.request.auth = Some(parse_credentials(value)),
            Flag::Cookie => {
                for (key, val) in parse_cookies(value) {
                    self.request.cookies.insert(key.to_owned(), val);
                }
            }
            Flag::Form => self.add_form_part(value),
            Flag::MaxTime => self.request.timeout_seconds = Some(parse_timeout(value)?),
            Flag::Proxy => self.request.proxy_url = Some(value.to_owned()),
            Flag::Insecure | Flag::Location => self.apply_switch(flag),
        }
        Ok(())
    }

    fn add_header(&mut self, header: &str) {
        let Some((key, value)) = header.split_once(':') else {
            warn!(header, "ignoring header without ':'");
            return;
        };
        let key = key.trim();
        let value = value.trim();

        if key.eq_ignore_ascii_case(CONTENT_TYPE) {
            self.request.content_type = Some(value.to_owned());
            if is_json_media_type(value) {
                self.reinterpret_raw_as_json();
            }
        }
        self.request
            .headers
            .insert(key.to_owned(), value.to_owned());
    }

    /// Upgrade an already captured raw body to JSON when it parses.
    fn reinterpret_raw_as_json(&mut self) {
        let Body::Raw(raw) = &self.request.body else {
            return;
        };
        match serde_json::from_str(raw) {
            Ok(value) => {
                debug!("raw body reinterpreted as JSON after Content-Type header");
                self.request.body = Body::Json(value);
            }
            Err(err) => debug!(%err, "raw body kept: not valid JSON"),
        }
    }

    fn add_form_part(&mut self, part: &str) {
        let Some((name, value)) = part.split_once('=') else {
            warn!(part, "ignoring form part without '='");
            return;
        };
        if let Some(path) = value.strip_prefix('@') {
            self.request
                .files
                .insert(name.to_owned(), path.to_owned());
            return;
        }
        if self.request.body.is_none() {
            self.request.body = Body::Form(IndexMap::new());
        }
        match &mut self.request.body {
            Body::Form(fields) => {
                fields.insert(name.to_owned(), value.to_owned());
            }
            _ => warn!(name, "ignoring form field: a non-form body is already set"),
        }
    }

    fn set_url(&mut self, token: &str) {
        if self.request.has_url() {
            debug!(token, "ignoring extra URL-like token");
            return;
        }
        let (base, query) = split_query(token);
        self.request.url = base.to_owned();
        if let Some(query) = query {
            for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
                self.request
                    .query_params
                    .entry(key.into_owned())
                    .or_default()
                    .push(value.into_owned());
            }
        }
    }

    fn finish(self) -> ParsedRequest {
        let Self {
            mut request,
            explicit_method,
        } = self;

        let has_payload = !request.body.is_none() || !request.files.is_empty();
        if let Some(method) = explicit_method {
            request.method = method;
        } else if has_payload {
            debug!("no -X given; inferring POST from request body");
            request.method = "POST".to_owned();
        }

        if request.content_type.is_none() {
            request.content_type = inferred_content_type(&request).map(str::to_owned);
        }
        request
    }
}

/// Parse a full curl command line.
///
/// # Errors
///
/// - `ConvertError::MalformedCommand` — the command could not be word-split
/// - `ConvertError::InvalidTimeout` — `--max-time` value is not a number
pub fn parse(command: &str) -> Result<ParsedRequest, ConvertError> {
    let tokens = tokenize(command)?;
    parse_tokens(&tokens)
}

/// Walk already split tokens.
///
/// # Errors
///
/// Returns `ConvertError::InvalidTimeout` when `--max-time` is not a number.
pub fn parse_tokens(tokens: &[String]) -> Result<ParsedRequest, ConvertError> {
    let mut builder = RequestBuilder::default();
    let mut iter = tokens.iter().map(String::as_str);

    while let Some(token) = iter.next() {
        if let Some(flag) = Flag::lookup(token) {
            if !flag.takes_value() {
                builder.apply_switch(flag);
                continue;
            }
            match iter.next() {
                Some(value) => builder.apply(flag, value)?,
                None => debug!(token, "flag at end of command has no value"),
            }
        } else if token.starts_with("http://") || token.starts_with("https://") {
            builder.set_url(token);
        } else if token.starts_with('-') {
            debug!(token, "skipping unknown flag");
        } else {
            builder.set_url(token);
        }
    }

    Ok(builder.finish())
}

/// Data literal classification, in order: JSON, form-encoded, raw.
fn classify_data(data: &str) -> Body {
    if let Ok(value) = serde_json::from_str(data) {
        return Body::Json(value);
    }
    if data.contains('=') && data.contains('&') {
        let fields = data
            .split('&')
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        return Body::Form(fields);
    }
    Body::Raw(data.to_owned())
}

fn parse_credentials(value: &str) -> Credentials {
    let (username, password) = value.split_once(':').unwrap_or((value, ""));
    Credentials {
        username: username.to_owned(),
        password: password.to_owned(),
    }
}

fn parse_cookies(value: &str) -> impl Iterator<Item = (&str, String)> {
    value
        .split(';')
        .filter_map(|cookie| cookie.split_once('='))
        .map(|(k, v)| (k.trim(), v.trim().to_owned()))
        .filter(|(k, _)| !k.is_empty())
}

fn parse_timeout(value: &str) -> Result<f64, ConvertError> {
    match value.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => Ok(secs),
        _ => Err(ConvertError::InvalidTimeout {
            value: value.to_owned(),
        }),
    }
}

/// Split `scheme://host/path?query#frag` into base and query. The fragment is dropped
/// when a query is present.
fn split_query(token: &str) -> (&str, Option<&str>) {
    match token.split_once('?') {
        Some((base, rest)) => {
            let query = rest.split_once('#').map_or(rest, |(q, _)| q);
            (base, Some(query))
        }
        None => (token, None),
    }
}

/// Media type match ignoring case and parameters such as `charset`.
fn is_json_media_type(value: &str) -> bool {
    value
        .split(';')
        .next()
        .is_some_and(|media| media.trim().eq_ignore_ascii_case(JSON_MEDIA_TYPE))
}

fn inferred_content_type(request: &ParsedRequest) -> Option<&'static str> {
    if !request.files.is_empty() {
        return Some(MULTIPART_MEDIA_TYPE);
    }
    match request.body {
        Body::Json(_) => Some(JSON_MEDIA_TYPE),
        Body::Form(_) => Some(FORM_MEDIA_TYPE),
        Body::Raw(_) | Body::None => None,
    }
}
