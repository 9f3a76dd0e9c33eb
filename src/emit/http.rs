/// `.http` request file rendering (REST Client / IDE HTTP client format).
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::RenderOptions;
use crate::request::{Body, ConvertError, ParsedRequest};

/// Title used when no request name is given.
pub const DEFAULT_TITLE: &str = "Generated from cURL command";

/// Usage notes appended to every generated file.
const USAGE_HELP: &[&str] = &[
    "###",
    "# .http file features you can use:",
    "# ",
    "# Variables:",
    "# @baseUrl = https://api.example.com",
    "# @authToken = your-token-here",
    "#",
    "# Then use them like:",
    "# GET {{baseUrl}}/users",
    "# Authorization: Bearer {{authToken}}",
    "#",
    "# Multiple requests in same file:",
    "# ###",
    "# POST {{baseUrl}}/users",
    "# Content-Type: application/json",
    "#",
    "# {",
    "#   \"name\": \"John Doe\"",
    "# }",
];

/// Render `request` as a `.http` file.
///
/// # Errors
///
/// Returns `ConvertError::NoUrl` when the request has no URL.
pub fn render(request: &ParsedRequest, opts: &RenderOptions) -> Result<String, ConvertError> {
    if !request.has_url() {
        return Err(ConvertError::NoUrl);
    }

    let title = opts.name.as_deref().unwrap_or(DEFAULT_TITLE);
    let mut lines = vec![
        format!("### {title}"),
        format!("# {}", opts.generated_at.format("%Y-%m-%d %H:%M:%S")),
        String::new(),
        format!("{} {}", request.method, request.full_url()),
    ];

    for (key, value) in request.headers.iter() {
        lines.push(format!("{key}: {value}"));
    }

    if let Some(auth) = &request.auth {
        lines.push(format!(
            "Authorization: Basic {}",
            STANDARD.encode(auth.joined())
        ));
    }

    if !request.cookies.is_empty() {
        let pairs: Vec<String> = request
            .cookies
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        lines.push(format!("Cookie: {}", pairs.join("; ")));
    }

    if let Some(content_type) = &request.content_type {
        if !request.has_content_type_header() {
            lines.push(format!("Content-Type: {content_type}"));
        }
    }

    push_body(&mut lines, request);

    lines.push(String::new());
    lines.extend(USAGE_HELP.iter().map(|&line| line.to_owned()));

    let notes = notes(request);
    if !notes.is_empty() {
        lines.push(String::new());
        lines.extend(notes);
    }

    Ok(lines.join("\n"))
}

fn push_body(lines: &mut Vec<String>, request: &ParsedRequest) {
    if !request.files.is_empty() {
        lines.push(String::new());
        lines.push(
            "# File uploads detected - you may need to manually configure multipart form data"
                .to_owned(),
        );
        if let Body::Form(fields) = &request.body {
            for (key, value) in fields.iter() {
                lines.push(format!("# {key} = {value}"));
            }
        }
        for (field, path) in request.files.iter() {
            lines.push(format!("# {field}: {path}"));
        }
        return;
    }

    match &request.body {
        Body::Json(value) => {
            lines.push(String::new());
            lines.push(serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()));
        }
        Body::Form(fields) => {
            let encoded: Vec<String> = fields.iter().map(|(k, v)| format!("{k}={v}")).collect();
            lines.push(String::new());
            lines.push(encoded.join("&"));
        }
        Body::Raw(raw) if !raw.is_empty() => {
            lines.push(String::new());
            lines.push(raw.clone());
        }
        Body::Raw(_) | Body::None => {}
    }
}

/// Curl options with no `.http` equivalent, as trailing comments.
fn notes(request: &ParsedRequest) -> Vec<String> {
    let mut notes = Vec::new();
    if !request.verify_tls {
        notes.push("# Note: cURL --insecure flag detected (SSL verification disabled)".to_owned());
    }
    if let Some(proxy) = &request.proxy_url {
        notes.push(format!("# Note: cURL proxy detected: {proxy}"));
    }
    if let Some(timeout) = request.timeout_seconds {
        notes.push(format!("# Note: cURL timeout detected: {timeout:?}s"));
    }
    notes
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::request::parse;

    fn opts() -> RenderOptions {
        RenderOptions {
            name: None,
            generated_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .and_then(|d| d.and_hms_opt(9, 30, 0))
                .unwrap(),
        }
    }

    fn render_cmd(cmd: &str) -> String {
        render(&parse(cmd).unwrap(), &opts()).unwrap()
    }

    fn first_request_line(text: &str) -> &str {
        text.lines()
            .find(|line| !line.is_empty() && !line.starts_with('#'))
            .unwrap()
    }

    #[test]
    fn test_request_line_restores_query() {
        let text = render_cmd("curl -X GET https://api.example.com/users?id=5");
        assert_eq!(first_request_line(&text), "GET https://api.example.com/users?id=5");
        assert!(text.starts_with("### Generated from cURL command\n# 2024-05-01 09:30:00\n\n"));
    }

    #[test]
    fn test_basic_auth_header() {
        let text = render_cmd("curl -u alice:secret https://h");
        assert!(text.contains("\nAuthorization: Basic YWxpY2U6c2VjcmV0\n"));
    }

    #[test]
    fn test_json_body_block() {
        let text = render_cmd(r#"curl https://h/items -d '{"name":"x","qty":2}'"#);
        let expected_head = "\
### Generated from cURL command
# 2024-05-01 09:30:00

POST https://h/items
Content-Type: application/json

{
  \"name\": \"x\",
  \"qty\": 2
}

###";
        assert!(text.starts_with(expected_head), "got:\n{text}");
    }

    #[test]
    fn test_form_body_keeps_every_segment() {
        let text = render_cmd("curl https://h -d 'flag&b=1'");
        assert!(text.contains("\n\nflag=&b=1\n"), "got:\n{text}");
    }

    #[test]
    fn test_explicit_content_type_not_duplicated() {
        let text = render_cmd(r#"curl https://h -H 'content-type: application/json' -d '{}'"#);
        assert_eq!(text.matches("ontent-type: application/json").count(), 1);
        assert!(!text.contains("Content-Type: application/json\n\n{}"));
    }

    #[test]
    fn test_cookies_line() {
        let text = render_cmd("curl https://h -b 'a=1 ;b=2'");
        assert!(text.contains("\nCookie: a=1; b=2\n"));
    }

    #[test]
    fn test_multipart_comment_block() {
        let text = render_cmd("curl https://h -F file=@a.txt");
        assert!(text.contains("# File uploads detected"));
        assert!(text.contains("\n# file: a.txt\n"));
    }

    #[test]
    fn test_custom_name_and_notes() {
        let req = parse("curl -k --proxy http://p --max-time 10 https://h").unwrap();
        let opts = RenderOptions {
            name: Some("Health check".to_owned()),
            ..opts()
        };
        let text = render(&req, &opts).unwrap();
        assert!(text.starts_with("### Health check\n"));
        assert!(text.contains("# Note: cURL --insecure flag detected"));
        assert!(text.contains("# Note: cURL proxy detected: http://p"));
        assert!(text.ends_with("# Note: cURL timeout detected: 10.0s"));
    }

    #[test]
    fn test_no_url() {
        let req = parse("curl -k").unwrap();
        assert!(matches!(render(&req, &opts()), Err(ConvertError::NoUrl)));
    }
}
