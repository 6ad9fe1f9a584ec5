//! HTML text/link extraction.

use scraper::{Html, Selector};

/// Depth-first text extraction: concatenate text nodes with a single
/// space separator, skipping `<script>`/`<style>` subtrees.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let skip: Selector = Selector::parse("script, style").expect("static selector is valid");
    let skip_ids: std::collections::HashSet<_> = document
        .select(&skip)
        .flat_map(|el| el.descendants().map(|n| n.id()))
        .collect();

    let mut out = String::new();
    for node in document.tree.root().descendants() {
        if skip_ids.contains(&node.id()) {
            continue;
        }
        if let Some(text) = node.value().as_text() {
            if !text.trim().is_empty() {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(text.trim());
            }
        }
    }
    out
}

/// Collects every `<a href=…>` value, resolved to an absolute URL against
/// `base_url`, in document order with duplicates preserved (the Frontier
/// dedups on push, not here).
pub fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchor: Selector = Selector::parse("a[href]").expect("static selector is valid");

    document
        .select(&anchor)
        .filter_map(|el| el.value().attr("href"))
        .filter(|href| is_followable(href))
        .map(|href| resolve_url(href, base_url))
        .collect()
}

fn is_followable(href: &str) -> bool {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return false;
    }
    let lower = href.to_ascii_lowercase();
    !(lower.starts_with("javascript:") || lower.starts_with("mailto:"))
}

/// Resolves `href` against `base_url`: absolute, protocol-relative (`//…`),
/// root-relative (`/…`), or directory-relative.
pub fn resolve_url(href: &str, base_url: &str) -> String {
    let lower = href.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return href.to_string();
    }

    if let Some(rest) = href.strip_prefix("//") {
        let scheme_end = base_url.find("://");
        return match scheme_end {
            Some(idx) => format!("{}://{}", &base_url[..idx], rest),
            None => format!("https://{}", rest),
        };
    }

    if let Some(path) = href.strip_prefix('/') {
        if let Some(scheme_end) = base_url.find("://") {
            let host_start = scheme_end + 3;
            let host_end = base_url[host_start..]
                .find('/')
                .map(|i| host_start + i)
                .unwrap_or(base_url.len());
            return format!("{}/{}", &base_url[..host_end], path);
        }
        return format!("{}/{}", base_url, path);
    }

    match base_url.rfind('/') {
        Some(last_slash) if last_slash >= base_url.find("://").map(|i| i + 2).unwrap_or(0) => {
            format!("{}{}", &base_url[..=last_slash], href)
        }
        _ => format!("{}/{}", base_url, href),
    }
}
