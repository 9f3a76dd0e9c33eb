/// C# `HttpClient` program rendering.
use crate::request::{Body, ConvertError, ParsedRequest};

/// `HttpMethod` static properties available in .NET.
const NAMED_METHODS: [&str; 7] = ["Get", "Post", "Put", "Delete", "Head", "Options", "Patch"];

/// Headers that are not set through `DefaultRequestHeaders`.
const CONTENT_HEADERS: [&str; 1] = ["content-type"];

/// Render `request` as a C# console program using `HttpClient`.
///
/// # Errors
///
/// Returns `ConvertError::NoUrl` when the request has no URL.
pub fn render(request: &ParsedRequest) -> Result<String, ConvertError> {
    if !request.has_url() {
        return Err(ConvertError::NoUrl);
    }

    let mut code = CodeBuilder::default();
    let has_form = matches!(request.body, Body::Form(_));
    let multipart = !request.files.is_empty();

    code.line(0, "using System;");
    if has_form && !multipart {
        code.line(0, "using System.Collections.Generic;");
    }
    if multipart {
        code.line(0, "using System.IO;");
    }
    code.line(0, "using System.Net.Http;");
    if request.auth.is_some() {
        code.line(0, "using System.Net.Http.Headers;");
    }
    code.line(0, "using System.Text;");
    code.line(0, "using System.Threading.Tasks;");
    code.blank();
    code.line(0, "public class HttpClientExample");
    code.line(0, "{");
    code.line(1, "public static async Task Main(string[] args)");
    code.line(1, "{");

    write_client_setup(&mut code, request);
    write_headers(&mut code, request);

    code.blank();
    code.line(2, &format!("var url = {};", cs_str(&request.full_url())));

    let has_content = write_content(&mut code, request);
    write_dispatch(&mut code, request, has_content);

    code.line(1, "}");
    code.line(0, "}");
    Ok(code.finish())
}

fn write_client_setup(code: &mut CodeBuilder, request: &ParsedRequest) {
    if request.verify_tls && request.proxy_url.is_none() && request.follow_redirects {
        code.line(2, "using var client = new HttpClient();");
    } else {
        code.line(2, "var handler = new HttpClientHandler();");
        if !request.verify_tls {
            code.line(
                2,
                "handler.ServerCertificateCustomValidationCallback = (sender, cert, chain, sslPolicyErrors) => true;",
            );
        }
        if let Some(proxy) = &request.proxy_url {
            code.line(
                2,
                &format!("handler.Proxy = new System.Net.WebProxy({});", cs_str(proxy)),
            );
        }
        if !request.follow_redirects {
            code.line(2, "handler.AllowAutoRedirect = false;");
        }
        code.line(2, "using var client = new HttpClient(handler);");
    }

    if let Some(timeout) = request.timeout_seconds {
        code.line(2, &format!("client.Timeout = TimeSpan.FromSeconds({timeout:?});"));
    }
}

fn write_headers(code: &mut CodeBuilder, request: &ParsedRequest) {
    let default_headers: Vec<(&String, &String)> = request
        .headers
        .iter()
        .filter(|(key, _)| !is_content_header(key))
        .filter(|(key, _)| request.auth.is_none() || !key.eq_ignore_ascii_case("authorization"))
        .collect();

    if !default_headers.is_empty() || !request.cookies.is_empty() {
        code.blank();
    }
    for (key, value) in default_headers {
        code.line(
            2,
            &format!(
                "client.DefaultRequestHeaders.TryAddWithoutValidation({}, {});",
                cs_str(key),
                cs_str(value)
            ),
        );
    }
    if !request.cookies.is_empty() {
        let cookie = request
            .cookies
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("; ");
        code.line(
            2,
            &format!(
                "client.DefaultRequestHeaders.TryAddWithoutValidation(\"Cookie\", {});",
                cs_str(&cookie)
            ),
        );
    }

    if let Some(auth) = &request.auth {
        code.blank();
        code.line(
            2,
            &format!(
                "var authToken = Convert.ToBase64String(Encoding.ASCII.GetBytes({}));",
                cs_str(&auth.joined())
            ),
        );
        code.line(
            2,
            "client.DefaultRequestHeaders.Authorization = new AuthenticationHeaderValue(\"Basic\", authToken);",
        );
    }
}

/// Emit the `content` variable. Returns whether one was declared.
fn write_content(code: &mut CodeBuilder, request: &ParsedRequest) -> bool {
    if !request.files.is_empty() {
        code.blank();
        code.line(2, "var content = new MultipartFormDataContent();");
        if let Body::Form(fields) = &request.body {
            for (key, value) in fields.iter() {
                code.line(
                    2,
                    &format!(
                        "content.Add(new StringContent({}), {});",
                        cs_str(value),
                        cs_str(key)
                    ),
                );
            }
        }
        for (i, (field, path)) in request.files.iter().enumerate() {
            let var = format!("fileContent{}", i + 1);
            code.line(
                2,
                &format!(
                    "var {var} = new ByteArrayContent(File.ReadAllBytes({}));",
                    cs_str(path)
                ),
            );
            code.line(
                2,
                &format!("content.Add({var}, {}, {});", cs_str(field), cs_str(file_name(path))),
            );
        }
        return true;
    }

    match &request.body {
        Body::Json(value) => {
            code.blank();
            code.line(2, &format!("var jsonData = {};", cs_str(&value.to_string())));
            code.line(
                2,
                "var content = new StringContent(jsonData, Encoding.UTF8, \"application/json\");",
            );
            true
        }
        Body::Form(fields) => {
            code.blank();
            code.line(2, "var formData = new List<KeyValuePair<string, string>>");
            code.line(2, "{");
            for (key, value) in fields.iter() {
                code.line(
                    3,
                    &format!(
                        "new KeyValuePair<string, string>({}, {}),",
                        cs_str(key),
                        cs_str(value)
                    ),
                );
            }
            code.line(2, "};");
            code.line(2, "var content = new FormUrlEncodedContent(formData);");
            true
        }
        Body::Raw(raw) => {
            let media_type = request
                .content_type
                .as_deref()
                .and_then(|ct| ct.split(';').next())
                .map_or("text/plain", str::trim);
            code.blank();
            code.line(
                2,
                &format!(
                    "var content = new StringContent({}, Encoding.UTF8, {});",
                    cs_str(raw),
                    cs_str(media_type)
                ),
            );
            true
        }
        Body::None => false,
    }
}

fn write_dispatch(code: &mut CodeBuilder, request: &ParsedRequest, has_content: bool) {
    let content = if has_content { "content" } else { "null" };

    code.blank();
    code.line(2, "try");
    code.line(2, "{");
    match request.method.as_str() {
        "GET" if !has_content => code.line(3, "var response = await client.GetAsync(url);"),
        "DELETE" if !has_content => code.line(3, "var response = await client.DeleteAsync(url);"),
        "POST" => code.line(
            3,
            &format!("var response = await client.PostAsync(url, {content});"),
        ),
        "PUT" => code.line(3, &format!("var response = await client.PutAsync(url, {content});")),
        other => {
            code.line(
                3,
                &format!("var request = new HttpRequestMessage({}, url);", http_method(other)),
            );
            if has_content {
                code.line(3, "request.Content = content;");
            }
            code.line(3, "var response = await client.SendAsync(request);");
        }
    }
    code.blank();
    code.line(3, "Console.WriteLine($\"Status Code: {response.StatusCode}\");");
    code.line(3, "Console.WriteLine($\"Response Headers: {response.Headers}\");");
    code.blank();
    code.line(3, "var responseContent = await response.Content.ReadAsStringAsync();");
    code.line(3, "Console.WriteLine($\"Response Content: {responseContent}\");");
    code.line(2, "}");
    code.line(2, "catch (HttpRequestException ex)");
    code.line(2, "{");
    code.line(3, "Console.WriteLine($\"Request error: {ex.Message}\");");
    code.line(2, "}");
    code.line(2, "catch (Exception ex)");
    code.line(2, "{");
    code.line(3, "Console.WriteLine($\"General error: {ex.Message}\");");
    code.line(2, "}");
}

/// `HttpMethod.Get`-style property when one exists, `new HttpMethod("X")` otherwise.
fn http_method(method: &str) -> String {
    let mut chars = method.chars();
    let title: String = chars
        .next()
        .map(|first| first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect())
        .unwrap_or_default();
    if NAMED_METHODS.contains(&title.as_str()) {
        format!("HttpMethod.{title}")
    } else {
        format!("new HttpMethod({})", cs_str(method))
    }
}

fn is_content_header(key: &str) -> bool {
    CONTENT_HEADERS.iter().any(|h| key.eq_ignore_ascii_case(h))
}

/// Last path segment, used as the multipart file name.
fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Regular (escaped) C# string literal.
fn cs_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Line accumulator with four-space indentation levels.
#[derive(Default)]
struct CodeBuilder {
    lines: Vec<String>,
}

impl CodeBuilder {
    fn line(&mut self, level: usize, text: &str) {
        self.lines.push(format!("{}{text}", "    ".repeat(level)));
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}
