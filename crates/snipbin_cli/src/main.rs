//! Command-line client for the snipbin API.

use clap::{ArgGroup, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use snipbin_core::models::browse::BrowseState;
use snipbin_core::models::language::{is_known_language, language_label};
use snipbin_core::models::paste::{ListQuery, Paste, PastePage};
use snipbin_core::text::{download_file_name, preview, ContentStats};
use snipbin_core::{DEFAULT_CLI_SERVER_URL, RECENT_PASTES_LIMIT};
use std::io::{self, Read};
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "snip", about = "snipbin CLI", version)]
struct Cli {
    /// Server URL (can also be set via SNIP_SERVER env var)
    #[arg(short, long, env = "SNIP_SERVER")]
    server: Option<String>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Print timing for API requests
    #[arg(long, global = true)]
    timing: bool,

    /// Request timeout in seconds
    #[arg(short = 't', long, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Create a paste from a file or stdin
    New {
        #[arg(short, long)]
        file: Option<String>,
        #[arg(short = 'T', long)]
        title: Option<String>,
        #[arg(short, long)]
        language: Option<String>,
        /// Keep the paste out of listings
        #[arg(long)]
        private: bool,
    },
    /// Print a paste's content
    Get {
        id: String,
        /// Show title, language, visibility and size instead of content
        #[arg(long)]
        meta: bool,
    },
    /// Download a paste's content
    Raw {
        id: String,
        /// Write to this path instead of stdout
        #[arg(short, long, conflicts_with = "save")]
        output: Option<String>,
        /// Write to the server-suggested file name in the current directory
        #[arg(long)]
        save: bool,
    },
    /// List public pastes, newest first
    List {
        #[arg(short, long)]
        query: Option<String>,
        #[arg(short, long, default_value = "all")]
        language: String,
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    /// Show the newest public pastes
    Recent {
        #[arg(short = 'n', long, default_value_t = RECENT_PASTES_LIMIT)]
        limit: usize,
    },
    /// Replace fields of an existing paste; omitted fields keep their values
    #[command(group(ArgGroup::new("visibility").args(["private", "public"])))]
    Edit {
        id: String,
        /// New content from this file ("-" for stdin)
        #[arg(short, long)]
        file: Option<String>,
        #[arg(short = 'T', long)]
        title: Option<String>,
        #[arg(short, long)]
        language: Option<String>,
        #[arg(long)]
        private: bool,
        #[arg(long)]
        public: bool,
    },
    /// Delete a paste
    Delete { id: String },
    /// List known languages
    Languages,
}

fn log_timing(timing: bool, label: &str, duration: Duration) {
    if timing {
        eprintln!(
            "[timing] {}: {:.1} ms",
            label,
            duration.as_secs_f64() * 1000.0
        );
    }
}

fn log_timing_parts(timing: bool, label: &str, request: Duration, parse: Option<Duration>) {
    if !timing {
        return;
    }
    if let Some(parse) = parse {
        let total = request + parse;
        eprintln!(
            "[timing] {}: request {:.1} ms, parse {:.1} ms, total {:.1} ms",
            label,
            request.as_secs_f64() * 1000.0,
            parse.as_secs_f64() * 1000.0,
            total.as_secs_f64() * 1000.0
        );
    } else {
        log_timing(timing, label, request);
    }
}

fn error_message_for_response(status: reqwest::StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return value
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or(body)
            .to_string();
    }

    body.to_string()
}

fn exit_with(action: &str, message: &str) -> ! {
    eprintln!("{} failed: {}", action, message);
    std::process::exit(1);
}

async fn ensure_success_or_exit(res: reqwest::Response, action: &str) -> reqwest::Response {
    let status = res.status();
    if status.is_success() {
        return res;
    }

    let body = match res.text().await {
        Ok(body) => body,
        Err(err) => format!("failed to read error response body: {}", err),
    };
    let message = error_message_for_response(status, &body);
    eprintln!("{} failed ({}): {}", action, status, message);
    std::process::exit(1);
}

async fn request_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    action: &str,
    timing: bool,
) -> Result<T, Box<dyn std::error::Error>> {
    let request_start = Instant::now();
    let res = request.send().await?;
    let request_elapsed = request_start.elapsed();
    let res = ensure_success_or_exit(res, action).await;

    let parse_start = Instant::now();
    let value = res.json::<T>().await?;
    let parse_elapsed = parse_start.elapsed();

    log_timing_parts(
        timing,
        &action.to_ascii_lowercase(),
        request_elapsed,
        Some(parse_elapsed),
    );
    Ok(value)
}

fn read_content(file: Option<&str>) -> io::Result<String> {
    match file {
        Some(path) if path != "-" => std::fs::read_to_string(path),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn warn_unknown_language(language: Option<&str>) {
    if let Some(language) = language {
        if !is_known_language(language) {
            eprintln!(
                "Warning: '{}' is not a known language; it will be shown as {}",
                language,
                language_label(language)
            );
        }
    }
}

fn new_paste_body(
    content: String,
    title: Option<String>,
    language: Option<String>,
    private: bool,
) -> Value {
    let mut body = json!({ "content": content, "is_public": !private });
    if let Some(title) = title {
        body["title"] = title.into();
    }
    if let Some(language) = language {
        body["language"] = language.into();
    }
    body
}

/// Full replacement body for `PUT`, keeping current values for omitted fields.
fn edit_paste_body(
    current: &Paste,
    content: Option<String>,
    title: Option<String>,
    language: Option<String>,
    is_public: Option<bool>,
) -> Value {
    json!({
        "title": title.unwrap_or_else(|| current.title.clone()),
        "content": content.unwrap_or_else(|| current.content.clone()),
        "language": language.unwrap_or_else(|| current.language.clone()),
        "is_public": is_public.unwrap_or(current.is_public),
    })
}

fn visibility_flag(private: bool, public: bool) -> Option<bool> {
    match (private, public) {
        (true, _) => Some(false),
        (_, true) => Some(true),
        _ => None,
    }
}

fn to_pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| format!("response encoding error: {}", err))
}

fn format_created_output(paste: &Paste, json: bool) -> Result<String, String> {
    if json {
        return to_pretty_json(paste);
    }
    let stats = ContentStats::of(&paste.content);
    Ok(format!(
        "Created: {} ({}) - {} lines, {} characters{}",
        paste.title,
        paste.id,
        stats.lines,
        stats.characters,
        if paste.is_public { "" } else { " [private]" }
    ))
}

fn format_get_output(paste: &Paste, json: bool) -> Result<String, String> {
    if json {
        return to_pretty_json(paste);
    }
    Ok(paste.content.clone())
}

fn format_meta_output(paste: &Paste, json: bool) -> Result<String, String> {
    if json {
        let stats = ContentStats::of(&paste.content);
        return to_pretty_json(&json!({
            "id": paste.id,
            "title": paste.title,
            "language": paste.language,
            "language_label": language_label(&paste.language),
            "is_public": paste.is_public,
            "created_at": paste.created_at,
            "updated_at": paste.updated_at,
            "stats": stats,
        }));
    }

    let stats = ContentStats::of(&paste.content);
    let mut lines = vec![
        format!("id:         {}", paste.id),
        format!("title:      {}", paste.title),
        format!(
            "language:   {} ({})",
            language_label(&paste.language),
            paste.language
        ),
        format!(
            "visibility: {}",
            if paste.is_public { "public" } else { "private" }
        ),
        format!("created:    {}", paste.created_at.to_rfc3339()),
    ];
    if paste.was_updated() {
        lines.push(format!("updated:    {}", paste.updated_at.to_rfc3339()));
    }
    lines.push(format!(
        "size:       {} lines, {} characters",
        stats.lines, stats.characters
    ));
    lines.push(format!(
        "download:   {}",
        download_file_name(&paste.title, &paste.language)
    ));
    Ok(lines.join("\n"))
}

fn summary_rows(pastes: &[Paste]) -> Vec<String> {
    let mut rows = Vec::with_capacity(pastes.len() * 2);
    for paste in pastes {
        rows.push(format!(
            "{:<36} {:<30} {}",
            paste.id,
            paste.title,
            language_label(&paste.language)
        ));
        let snippet = preview(&paste.content).replace(['\r', '\n', '\t'], " ");
        rows.push(format!("    {}", snippet));
    }
    rows
}

fn format_summary_output(pastes: &[Paste], json: bool) -> Result<String, String> {
    if json {
        return to_pretty_json(pastes);
    }
    Ok(summary_rows(pastes).join("\n"))
}

fn page_indicator(browse: &BrowseState, total_pages: usize) -> String {
    browse
        .page_window(total_pages)
        .into_iter()
        .map(|page| {
            if page == browse.page() {
                format!("[{}]", page)
            } else {
                page.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_list_output(page: &PastePage, json: bool) -> Result<String, String> {
    if json {
        return to_pretty_json(page);
    }
    if page.total_count == 0 {
        return Ok("No pastes found.".to_string());
    }

    let mut browse = BrowseState::default();
    browse.set_page(page.page, page.total_count);

    let mut rows = summary_rows(&page.items);
    if page.items.is_empty() {
        rows.push(format!("Page {} is past the end.", page.page));
    }
    rows.push(format!(
        "Page {} of {} ({} pastes)  {}",
        page.page,
        page.total_pages,
        page.total_count,
        page_indicator(&browse, page.total_pages)
    ));
    Ok(rows.join("\n"))
}

fn format_delete_output(id: &str, response: &Value, json: bool) -> Result<String, String> {
    if json {
        return to_pretty_json(response);
    }
    let deleted = response
        .get("deleted")
        .and_then(Value::as_bool)
        .unwrap_or(true);
    if deleted {
        Ok(format!("Deleted paste: {}", id))
    } else {
        Ok(format!("No paste with id {} (nothing deleted)", id))
    }
}

fn format_languages_output(languages: &[Value], json: bool) -> Result<String, String> {
    if json {
        return to_pretty_json(languages);
    }
    let mut rows = Vec::with_capacity(languages.len());
    for (index, language) in languages.iter().enumerate() {
        let field = |name: &str| language.get(name).and_then(Value::as_str);
        let (Some(value), Some(label), Some(extension)) =
            (field("value"), field("label"), field("extension"))
        else {
            return Err(format!(
                "response item {} missing 'value', 'label' or 'extension' field",
                index
            ));
        };
        rows.push(format!("{:<12} {:<12} .{}", value, label, extension));
    }
    Ok(rows.join("\n"))
}

/// File name from a `Content-Disposition: attachment; filename="..."` header.
fn filename_from_disposition(header: &str) -> Option<String> {
    header.split(';').find_map(|part| {
        let value = part.trim().strip_prefix("filename=")?;
        let value = value.trim_matches('"');
        // Never let a server-provided name escape the current directory.
        if value.is_empty() || value.contains(['/', '\\']) || value.starts_with('.') {
            None
        } else {
            Some(value.to_string())
        }
    })
}

fn print_output(action: &str, output: Result<String, String>) {
    match output {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(message) => exit_with(action, &message),
    }
}

fn api_url(server: &str, segments: &[&str]) -> Result<reqwest::Url, String> {
    let mut url = reqwest::Url::parse(server)
        .map_err(|err| format!("Invalid server URL '{}': {}", server, err))?;
    let mut path = url
        .path_segments_mut()
        .map_err(|_| "Server URL cannot be used as an API base".to_string())?;
    path.pop_if_empty();
    for segment in segments {
        path.push(segment);
    }
    drop(path);
    Ok(url)
}

fn api_url_or_exit(server: &str, action: &str, segments: &[&str]) -> reqwest::Url {
    match api_url(server, segments) {
        Ok(url) => url,
        Err(message) => exit_with(action, &message),
    }
}

fn normalize_server(server: String) -> String {
    if let Ok(mut url) = reqwest::Url::parse(&server) {
        let should_normalize_localhost =
            url.scheme().eq_ignore_ascii_case("http") && url.host_str() == Some("localhost");
        if should_normalize_localhost && url.set_host(Some("127.0.0.1")).is_err() {
            return server;
        }
        let mut normalized = url.to_string();
        while normalized.ends_with('/') {
            normalized.pop();
        }
        return normalized;
    }
    server
}

fn resolve_server(server: Option<String>) -> String {
    server
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_CLI_SERVER_URL.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Cli {
        server,
        json,
        timing,
        timeout,
        command,
    } = Cli::parse();

    if let Commands::Completions { shell } = &command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout))
        .build()?;
    let server = normalize_server(resolve_server(server));

    match command {
        Commands::Completions { .. } => unreachable!("completions handled before client setup"),
        Commands::New {
            file,
            title,
            language,
            private,
        } => {
            let endpoint = api_url_or_exit(&server, "New", &["api", "paste"]);
            let content = read_content(file.as_deref())?;
            warn_unknown_language(language.as_deref());
            let body = new_paste_body(content, title, language, private);
            let paste: Paste = request_json(client.post(endpoint).json(&body), "New", timing).await?;
            print_output("New", format_created_output(&paste, json));
        }
        Commands::Get { id, meta } => {
            let endpoint = api_url_or_exit(&server, "Get", &["api", "paste", id.as_str()]);
            let paste: Paste = request_json(client.get(endpoint), "Get", timing).await?;
            let output = if meta {
                format_meta_output(&paste, json)
            } else {
                format_get_output(&paste, json)
            };
            print_output("Get", output);
        }
        Commands::Raw { id, output, save } => {
            let endpoint = api_url_or_exit(&server, "Raw", &["api", "paste", id.as_str(), "raw"]);
            let request_start = Instant::now();
            let res = client.get(endpoint).send().await?;
            log_timing(timing, "raw", request_start.elapsed());
            let res = ensure_success_or_exit(res, "Raw").await;

            let suggested = res
                .headers()
                .get(reqwest::header::CONTENT_DISPOSITION)
                .and_then(|value| value.to_str().ok())
                .and_then(filename_from_disposition);
            let content = res.text().await?;

            let target = match (output, save) {
                (Some(path), _) => Some(path),
                (None, true) => Some(suggested.unwrap_or_else(|| format!("{}.txt", id))),
                (None, false) => None,
            };
            match target {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    eprintln!("Saved paste {} to {}", id, path);
                }
                None => print!("{}", content),
            }
        }
        Commands::List {
            query,
            language,
            page,
        } => {
            let endpoint = api_url_or_exit(&server, "List", &["api", "pastes"]);
            let mut browse = BrowseState::default();
            if let Some(query) = query {
                browse.set_query(query);
            }
            browse.set_language(language);
            let params = ListQuery {
                page: Some(page.max(1)),
                ..browse.list_query()
            };
            let page: PastePage =
                request_json(client.get(endpoint).query(&params), "List", timing).await?;
            print_output("List", format_list_output(&page, json));
        }
        Commands::Recent { limit } => {
            let endpoint = api_url_or_exit(&server, "Recent", &["api", "pastes", "recent"]);
            let pastes: Vec<Paste> = request_json(
                client.get(endpoint).query(&[("limit", limit)]),
                "Recent",
                timing,
            )
            .await?;
            print_output("Recent", format_summary_output(&pastes, json));
        }
        Commands::Edit {
            id,
            file,
            title,
            language,
            private,
            public,
        } => {
            let endpoint = api_url_or_exit(&server, "Edit", &["api", "paste", id.as_str()]);
            let current: Paste = request_json(client.get(endpoint.clone()), "Edit", timing).await?;
            let content = match file.as_deref() {
                Some(path) => Some(read_content(Some(path))?),
                None => None,
            };
            warn_unknown_language(language.as_deref());
            let body = edit_paste_body(
                &current,
                content,
                title,
                language,
                visibility_flag(private, public),
            );
            let paste: Paste = request_json(client.put(endpoint).json(&body), "Edit", timing).await?;
            let output = if json {
                to_pretty_json(&paste)
            } else {
                Ok(format!("Updated: {} ({})", paste.title, paste.id))
            };
            print_output("Edit", output);
        }
        Commands::Delete { id } => {
            let endpoint = api_url_or_exit(&server, "Delete", &["api", "paste", id.as_str()]);
            let response: Value = request_json(client.delete(endpoint), "Delete", timing).await?;
            print_output("Delete", format_delete_output(&id, &response, json));
        }
        Commands::Languages => {
            let endpoint = api_url_or_exit(&server, "Languages", &["api", "languages"]);
            let languages: Vec<Value> = request_json(client.get(endpoint), "Languages", timing).await?;
            print_output("Languages", format_languages_output(&languages, json));
        }
    }

    Ok(())
}
