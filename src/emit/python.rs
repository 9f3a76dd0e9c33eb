/// Python `requests` snippet rendering.
use std::fmt::Write as _;

use indexmap::IndexMap;
use serde_json::Value;

use crate::request::{Body, ConvertError, ParsedRequest};

/// Verbs with a module-level shortcut in `requests`.
const SHORTCUT_VERBS: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "HEAD", "OPTIONS", "PATCH"];

const INDENT: &str = "    ";

/// Render `request` as a Python script using `requests`.
///
/// # Errors
///
/// Returns `ConvertError::NoUrl` when the request has no URL.
pub fn render(request: &ParsedRequest) -> Result<String, ConvertError> {
    if !request.has_url() {
        return Err(ConvertError::NoUrl);
    }

    let mut lines = vec!["import requests".to_owned(), String::new()];
    lines.push(format!("url = {}", py_str(&request.url)));

    let mut args = vec!["url".to_owned()];

    if !request.headers.is_empty() {
        push_dict(&mut lines, "headers", &request.headers);
        args.push("headers=headers".to_owned());
    }

    if !request.query_params.is_empty() {
        lines.push(String::new());
        lines.push("params = {".to_owned());
        for (key, values) in request.query_params.iter() {
            let value = match values.as_slice() {
                [single] => py_str(single),
                many => py_list(many),
            };
            lines.push(format!("{INDENT}{}: {value},", py_str(key)));
        }
        lines.push("}".to_owned());
        args.push("params=params".to_owned());
    }

    match &request.body {
        Body::Json(value) => {
            lines.push(String::new());
            lines.push(format!("json_data = {}", py_value(value, 0)));
            args.push("json=json_data".to_owned());
        }
        Body::Form(fields) => {
            push_dict(&mut lines, "data", fields);
            args.push("data=data".to_owned());
        }
        Body::Raw(raw) => {
            lines.push(String::new());
            lines.push(format!("data = {}", py_str(raw)));
            args.push("data=data".to_owned());
        }
        Body::None => {}
    }

    if !request.files.is_empty() {
        lines.push(String::new());
        lines.push("files = {".to_owned());
        for (field, path) in request.files.iter() {
            lines.push(format!(
                "{INDENT}{}: open({}, 'rb'),",
                py_str(field),
                py_str(path)
            ));
        }
        lines.push("}".to_owned());
        args.push("files=files".to_owned());
    }

    if !request.cookies.is_empty() {
        push_dict(&mut lines, "cookies", &request.cookies);
        args.push("cookies=cookies".to_owned());
    }

    if let Some(auth) = &request.auth {
        lines.push(String::new());
        lines.push(format!(
            "auth = ({}, {})",
            py_str(&auth.username),
            py_str(&auth.password)
        ));
        args.push("auth=auth".to_owned());
    }

    if let Some(proxy) = &request.proxy_url {
        let proxies: IndexMap<String, String> = ["http", "https"]
            .into_iter()
            .map(|scheme| (scheme.to_owned(), proxy.clone()))
            .collect();
        push_dict(&mut lines, "proxies", &proxies);
        args.push("proxies=proxies".to_owned());
    }

    if !request.verify_tls {
        args.push("verify=False".to_owned());
    }
    if !request.follow_redirects {
        args.push("allow_redirects=False".to_owned());
    }
    if let Some(timeout) = request.timeout_seconds {
        args.push(format!("timeout={timeout:?}"));
    }

    let call = if SHORTCUT_VERBS.contains(&request.method.as_str()) {
        format!("requests.{}", request.method.to_lowercase())
    } else {
        args.insert(0, py_str(&request.method));
        "requests.request".to_owned()
    };

    lines.push(String::new());
    lines.push(format!(
        "response = {call}(\n{INDENT}{}\n)",
        args.join(&format!(",\n{INDENT}"))
    ));

    lines.push(String::new());
    lines.push("print(f'Status Code: {response.status_code}')".to_owned());
    lines.push("print(f'Response Headers: {response.headers}')".to_owned());
    lines.push("print(f'Response Content: {response.text}')".to_owned());

    Ok(lines.join("\n"))
}

fn push_dict(lines: &mut Vec<String>, name: &str, entries: &IndexMap<String, String>) {
    lines.push(String::new());
    lines.push(format!("{name} = {{"));
    for (key, value) in entries.iter() {
        lines.push(format!("{INDENT}{}: {},", py_str(key), py_str(value)));
    }
    lines.push("}".to_owned());
}

/// Single-quoted Python string literal.
fn py_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn py_list(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|v| py_str(v)).collect();
    format!("[{}]", items.join(", "))
}

/// JSON value as a Python literal, indented four spaces per level.
fn py_value(value: &Value, depth: usize) -> String {
    match value {
        Value::Null => "None".to_owned(),
        Value::Bool(true) => "True".to_owned(),
        Value::Bool(false) => "False".to_owned(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => py_str(s),
        Value::Array(items) if items.is_empty() => "[]".to_owned(),
        Value::Object(map) if map.is_empty() => "{}".to_owned(),
        Value::Array(items) => {
            let inner = INDENT.repeat(depth + 1);
            let body: Vec<String> = items
                .iter()
                .map(|item| format!("{inner}{}", py_value(item, depth + 1)))
                .collect();
            format!("[\n{}\n{}]", body.join(",\n"), INDENT.repeat(depth))
        }
        Value::Object(map) => {
            let inner = INDENT.repeat(depth + 1);
            let mut out = String::from("{\n");
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                let _ = write!(out, "{inner}{}: {}", py_str(key), py_value(item, depth + 1));
            }
            let _ = write!(out, "\n{}}}", INDENT.repeat(depth));
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::request::parse;

    #[test]
    fn test_simple_get() {
        let req = parse("curl https://api.example.com/users?id=5").unwrap();
        let code = render(&req).unwrap();
        let expected = "\
import requests

url = 'https://api.example.com/users'

params = {
    'id': '5',
}

response = requests.get(
    url,
    params=params
)

print(f'Status Code: {response.status_code}')
print(f'Response Headers: {response.headers}')
print(f'Response Content: {response.text}')";
        assert_eq!(code, expected);
    }

    #[test]
    fn test_json_body_uses_python_literals() {
        let req = parse(r#"curl https://h -d '{"ok":true,"n":null,"tags":["a"]}'"#).unwrap();
        let code = render(&req).unwrap();
        assert!(code.contains(
            "json_data = {\n    'ok': True,\n    'n': None,\n    'tags': [\n        'a'\n    ]\n}"
        ));
        assert!(code.contains("response = requests.post("));
        assert!(code.contains("    json=json_data"));
    }

    #[test]
    fn test_big_json_integer_written_verbatim() {
        let req = parse(r#"curl https://h -d '{"id":123456789012345678901234}'"#).unwrap();
        let code = render(&req).unwrap();
        assert!(code.contains("    'id': 123456789012345678901234\n}"), "{code}");
    }

    #[test]
    fn test_form_segment_without_equals_kept() {
        let req = parse("curl https://h -d 'flag&b=1'").unwrap();
        let code = render(&req).unwrap();
        assert!(code.contains("data = {\n    'flag': '',\n    'b': '1',\n}"), "{code}");
    }

    #[test]
    fn test_options_and_auth() {
        let req = parse(
            "curl -k --max-time 5 --proxy http://p:3128 -u alice:secret -b 'a=1' https://h",
        )
        .unwrap();
        let code = render(&req).unwrap();
        assert!(code.contains("auth = ('alice', 'secret')"));
        assert!(code.contains("    'https': 'http://p:3128',"));
        assert!(code.contains("cookies = {\n    'a': '1',\n}"));
        assert!(code.contains("    verify=False"));
        assert!(code.contains("    timeout=5.0"));
    }

    #[test]
    fn test_multi_valued_params_and_files() {
        let req = parse("curl 'http://h/p?a=1&a=2' -F doc=@report.pdf").unwrap();
        let code = render(&req).unwrap();
        assert!(code.contains("    'a': ['1', '2'],"));
        assert!(code.contains("    'doc': open('report.pdf', 'rb'),"));
    }

    #[test]
    fn test_uncommon_verb_falls_back_to_request() {
        let req = parse("curl -X PROPFIND https://h").unwrap();
        let code = render(&req).unwrap();
        assert!(code.contains("response = requests.request(\n    'PROPFIND',\n    url\n)"));
    }

    #[test]
    fn test_quotes_escaped() {
        let req = parse(r#"curl https://h -d "it's""#).unwrap();
        let code = render(&req).unwrap();
        assert!(code.contains(r"data = 'it\'s'"));
    }

    #[test]
    fn test_no_url() {
        let req = parse("curl -X GET").unwrap();
        assert!(matches!(render(&req), Err(ConvertError::NoUrl)));
    }
}
