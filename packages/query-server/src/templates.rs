//! HTML page templates: search form, results page, error page.
//!
//! Rendered server-side with no client JS, as hand-written `format!`
//! templates rather than pulling in a templating crate.

use search_core::SearchResult;

const STYLE: &str = r#"
    body { font-family: system-ui, sans-serif; max-width: 40rem; margin: 3rem auto; padding: 0 1rem; color: #1a1a2e; }
    h1 { font-size: 1.5rem; }
    form { display: flex; gap: 0.5rem; margin: 1.5rem 0; }
    input[type=text] { flex: 1; padding: 0.5rem; font-size: 1rem; }
    button { padding: 0.5rem 1rem; font-size: 1rem; cursor: pointer; }
    ol { padding-left: 1.25rem; }
    li { margin-bottom: 0.75rem; }
    .relevance { color: #666; font-size: 0.875rem; }
    .error { color: #b91c1c; }
    a.back { display: inline-block; margin-top: 1rem; }
"#;

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>"#
    )
}

fn search_form(query: &str) -> String {
    format!(
        r#"<form action="/search" method="get">
    <input type="text" name="query" placeholder="Search..." value="{query}" autofocus>
    <button type="submit">Search</button>
</form>"#,
        query = html_escape(query)
    )
}

/// `GET /` and `GET|POST /search` with no or empty query: bare search form.
pub fn index_page() -> String {
    page(
        "Search",
        &format!("<h1>Search</h1>\n{}", search_form("")),
    )
}

/// `200` results page for a valid query, possibly with zero matches.
pub fn results_page(original_query: &str, results: &[SearchResult]) -> String {
    let items: String = if results.is_empty() {
        "<p>No results found.</p>".to_string()
    } else {
        let rows: String = results
            .iter()
            .map(|r| {
                format!(
                    "<li><a href=\"{url}\">{url}</a><br><span class=\"relevance\">relevance: {relevance}</span></li>",
                    url = html_escape(&r.url),
                    relevance = r.relevance
                )
            })
            .collect();
        format!("<ol>{rows}</ol>")
    };

    page(
        "Search results",
        &format!(
            "<h1>Search</h1>\n{form}\n<p>{count} result(s) for \u{201c}{query}\u{201d}</p>\n{items}",
            form = search_form(original_query),
            count = results.len(),
            query = html_escape(original_query),
        ),
    )
}

/// `400`/`404`/`500` error page with a link back to the search form.
pub fn error_page(message: &str) -> String {
    page(
        "Error",
        &format!(
            "<h1>Search</h1>\n<p class=\"error\">{}</p>\n<a class=\"back\" href=\"/\">Back to search</a>",
            html_escape(message)
        ),
    )
}

fn html_escape(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            other => other.to_string(),
        })
        .collect()
}
