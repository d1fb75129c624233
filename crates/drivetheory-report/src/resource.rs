//! Plain-text rendering of reference resources for the terminal.

use std::collections::{HashMap, HashSet};

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use drivetheory_core::resource::{
    ImageResource, ListResource, PdfResource, Resource, TableResource,
};

/// Render a resource as terminal text.
pub fn render_text(resource: &Resource) -> String {
    let mut out = String::new();
    render_into(resource, 0, &mut out);
    out.trim_end().to_string()
}

fn render_into(resource: &Resource, depth: usize, out: &mut String) {
    match resource {
        Resource::Table(table) => render_table(table, out),
        Resource::Image(image) => render_image(image, out),
        Resource::Text(text) => {
            out.push_str(&strip_html(&text.content));
            out.push('\n');
        }
        Resource::Pdf(pdf) => render_pdf(pdf, out),
        Resource::List(list) => render_list(list, out),
        Resource::Composite(composite) => {
            for section in &composite.sections {
                if let Some(title) = &section.title {
                    let marker = "#".repeat((depth + 2).min(6));
                    out.push_str(&format!("{marker} {title}\n\n"));
                }
                render_into(&section.body, depth + 1, out);
                out.push('\n');
            }
        }
    }
}

fn push_description(description: &Option<String>, out: &mut String) {
    if let Some(description) = description {
        out.push_str(description);
        out.push_str("\n\n");
    }
}

fn render_table(table: &TableResource, out: &mut String) {
    if let Some(title) = &table.title {
        out.push_str(title);
        out.push('\n');
    }
    push_description(&table.description, out);

    let mut grid = Table::new();
    grid.load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(table.headers.clone());
    for row in &table.rows {
        grid.add_row(row.iter().map(|cell| cell.to_string()));
    }
    out.push_str(&grid.to_string());
    out.push('\n');

    if !table.notes.is_empty() {
        out.push_str("\nNotes:\n");
        for note in &table.notes {
            out.push_str(&format!("  - {note}\n"));
        }
    }
}

fn render_image(image: &ImageResource, out: &mut String) {
    push_description(&image.description, out);
    let alt = image.alt_text.as_deref().unwrap_or("Resource image");
    out.push_str(&format!("[image: {alt}] {}\n", image.url));
}

fn render_pdf(pdf: &PdfResource, out: &mut String) {
    push_description(&pdf.description, out);
    let label = pdf.button_text.as_deref().unwrap_or("View PDF");
    out.push_str(&format!("{label}: {}\n", pdf.url));
}

fn render_list(list: &ListResource, out: &mut String) {
    push_description(&list.description, out);
    for item in &list.items {
        out.push_str(&format!("  - {item}\n"));
    }
}

/// Tags kept through sanitizing; each maps to a line break or bullet below.
const LAYOUT_TAGS: [&str; 13] = [
    "p", "div", "br", "ul", "ol", "li", "tr", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Reduce an HTML fragment to readable text: block tags become line
/// breaks, list items get a bullet, other tags are dropped. Script and
/// style bodies are removed entirely.
pub fn strip_html(html: &str) -> String {
    let sanitized = ammonia::Builder::default()
        .tags(HashSet::from(LAYOUT_TAGS))
        .clean_content_tags(HashSet::from(["script", "style"]))
        .generic_attributes(HashSet::new())
        .tag_attributes(HashMap::new())
        .link_rel(None)
        .clean(html)
        .to_string();

    let mut text = String::with_capacity(sanitized.len());
    let mut rest = sanitized.as_str();

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        let closing = rest[open + 1..].starts_with('/');
        let tag = rest[open + 1..open + close]
            .trim_start_matches('/')
            .trim_end_matches('/')
            .trim();
        match tag {
            "br" => text.push('\n'),
            "li" if !closing => text.push_str("\n  - "),
            "li" => {}
            _ => text.push('\n'),
        }
        rest = &rest[open + close + 1..];
    }
    text.push_str(rest);

    // The serializer re-escapes only these in text.
    let decoded = text
        .replace("&nbsp;", " ")
        .replace('\u{a0}', " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");

    let mut lines: Vec<&str> = Vec::new();
    for line in decoded.lines().map(str::trim_end) {
        if line.trim().is_empty() && lines.last().map_or(true, |l| l.trim().is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivetheory_core::resource::ResourceKind;
    use serde_json::json;

    #[test]
    fn strips_tags_and_entities() {
        let text = strip_html("<h3>Speed</h3><p>Max 50&nbsp;km/h in towns &amp; villages.</p><ul><li>B: 90</li><li>C: 80</li></ul>");
        assert_eq!(text, "Speed\n\nMax 50 km/h in towns & villages.\n\n  - B: 90\n  - C: 80");
    }

    #[test]
    fn unterminated_tag_is_kept() {
        assert_eq!(strip_html("a < b"), "a < b");
    }

    #[test]
    fn drops_script_and_style_bodies() {
        let text = strip_html(
            "<p>Safe text</p><script>alert('x')</script><style>p{color:red}</style>",
        );
        assert_eq!(text, "Safe text");
    }

    #[test]
    fn decodes_numeric_entities_and_drops_attributes() {
        let text = strip_html(
            "<p onclick=\"steal()\">Zone 30&#8211;50 &#x2192; <a href=\"/rules\">rules</a></p>",
        );
        assert_eq!(text, "Zone 30\u{2013}50 \u{2192} rules");
    }

    #[test]
    fn renders_table_with_notes() {
        let resource = Resource::parse(
            ResourceKind::Table,
            json!({
                "title": "Speed limits",
                "headers": ["Category", "Town", "Highway"],
                "rows": [["B", 50, 140]],
                "notes": ["Weather may lower limits"]
            }),
        )
        .unwrap();
        let text = render_text(&resource);
        assert!(text.starts_with("Speed limits"));
        assert!(text.contains("Category"));
        assert!(text.contains("140"));
        assert!(text.contains("Notes:\n  - Weather may lower limits"));
    }

    #[test]
    fn renders_composite_sections() {
        let resource = Resource::parse(
            ResourceKind::Composite,
            json!({
                "sections": [
                    {"title": "Overview", "type": "text", "content": {"content": "<p>Read first.</p>"}},
                    {"title": "Download", "type": "pdf", "content": {"url": "/rules.pdf"}},
                    {"type": "image", "content": {"url": "/sign.png", "altText": "Stop sign"}}
                ]
            }),
        )
        .unwrap();
        let text = render_text(&resource);
        assert!(text.contains("## Overview\n\nRead first."));
        assert!(text.contains("View PDF: /rules.pdf"));
        assert!(text.contains("[image: Stop sign] /sign.png"));
    }

    #[test]
    fn renders_list_description() {
        let resource = Resource::parse(
            ResourceKind::List,
            json!({"description": "Documents to carry", "items": ["License", "Insurance"]}),
        )
        .unwrap();
        assert_eq!(
            render_text(&resource),
            "Documents to carry\n\n  - License\n  - Insurance"
        );
    }
}
