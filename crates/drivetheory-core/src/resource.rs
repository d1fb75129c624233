//! Reference resources (sign tables, fine lists, PDFs, ...).
//!
//! A resource document carries no type tag of its own: the type comes from
//! the index entry, or from the enclosing section of a composite. Parsing
//! therefore takes the [`ResourceKind`] and the raw JSON together.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Entry of the resource index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
}

/// The resource index document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceIndex {
    #[serde(default)]
    pub resources: Vec<ResourceEntry>,
}

impl ResourceIndex {
    pub fn get(&self, id: &str) -> Option<&ResourceEntry> {
        self.resources.iter().find(|r| r.id == id)
    }
}

/// The closed set of resource types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Table,
    Image,
    Text,
    Pdf,
    List,
    Composite,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceKind::Table => "table",
            ResourceKind::Image => "image",
            ResourceKind::Text => "text",
            ResourceKind::Pdf => "pdf",
            ResourceKind::List => "list",
            ResourceKind::Composite => "composite",
        };
        f.write_str(name)
    }
}

/// A parsed resource document.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Table(TableResource),
    Image(ImageResource),
    Text(TextResource),
    Pdf(PdfResource),
    List(ListResource),
    Composite(CompositeResource),
}

impl Resource {
    /// Interpret `data` as a resource of the given kind.
    pub fn parse(kind: ResourceKind, data: Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            ResourceKind::Table => Resource::Table(serde_json::from_value(data)?),
            ResourceKind::Image => Resource::Image(serde_json::from_value(data)?),
            ResourceKind::Text => Resource::Text(serde_json::from_value(data)?),
            ResourceKind::Pdf => Resource::Pdf(serde_json::from_value(data)?),
            ResourceKind::List => Resource::List(serde_json::from_value(data)?),
            ResourceKind::Composite => Resource::Composite(serde_json::from_value(data)?),
        })
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Table(_) => ResourceKind::Table,
            Resource::Image(_) => ResourceKind::Image,
            Resource::Text(_) => ResourceKind::Text,
            Resource::Pdf(_) => ResourceKind::Pdf,
            Resource::List(_) => ResourceKind::List,
            Resource::Composite(_) => ResourceKind::Composite,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableResource {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// A table cell. Numbers and booleans in the source data are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cell(pub String);

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Cell(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        }))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResource {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Rich text; `content` is an HTML fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextResource {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfResource {
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub button_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResource {
    #[serde(default)]
    pub description: Option<String>,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompositeResource {
    pub sections: Vec<Section>,
}

/// One titled part of a composite resource.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawSection")]
pub struct Section {
    pub title: Option<String>,
    pub body: Resource,
}

#[derive(Deserialize)]
struct RawSection {
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "type")]
    kind: ResourceKind,
    content: Value,
}

impl TryFrom<RawSection> for Section {
    type Error = serde_json::Error;

    fn try_from(raw: RawSection) -> Result<Self, Self::Error> {
        Ok(Section {
            title: raw.title,
            body: Resource::parse(raw.kind, raw.content)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn index_parses_kinds() {
        let index: ResourceIndex = serde_json::from_value(json!({
            "resources": [
                {"id": "fines", "title": "Fines", "description": "Fine amounts", "type": "table"},
                {"id": "signs", "title": "Signs", "type": "composite"}
            ]
        }))
        .unwrap();
        assert_eq!(index.resources.len(), 2);
        assert_eq!(index.get("signs").unwrap().kind, ResourceKind::Composite);
        assert!(index.get("nope").is_none());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = serde_json::from_value::<ResourceEntry>(
            json!({"id": "x", "title": "X", "type": "video"}),
        );
        assert!(err.is_err());
    }

    #[test]
    fn table_cells_accept_scalars() {
        let resource = Resource::parse(
            ResourceKind::Table,
            json!({
                "headers": ["Category", "Limit"],
                "rows": [["B", 90], ["C", null]],
                "notes": ["Inside towns: 50"]
            }),
        )
        .unwrap();
        let Resource::Table(table) = resource else {
            panic!("expected table");
        };
        assert_eq!(table.rows[0][1].0, "90");
        assert_eq!(table.rows[1][1].0, "");
        assert_eq!(table.notes.len(), 1);
    }

    #[test]
    fn table_without_rows_is_invalid() {
        assert!(Resource::parse(ResourceKind::Table, json!({"headers": []})).is_err());
    }

    #[test]
    fn composite_nests_sections() {
        let resource = Resource::parse(
            ResourceKind::Composite,
            json!({
                "sections": [
                    {"title": "Intro", "type": "text", "content": {"content": "<p>Hi</p>"}},
                    {"type": "list", "content": {"items": ["a", "b"]}},
                    {"type": "composite", "content": {"sections": [
                        {"type": "pdf", "content": {"url": "/x.pdf", "buttonText": "Open"}}
                    ]}}
                ]
            }),
        )
        .unwrap();
        let Resource::Composite(composite) = resource else {
            panic!("expected composite");
        };
        assert_eq!(composite.sections.len(), 3);
        assert_eq!(composite.sections[0].title.as_deref(), Some("Intro"));
        assert_eq!(composite.sections[1].body.kind(), ResourceKind::List);
        assert_eq!(composite.sections[2].body.kind(), ResourceKind::Composite);
    }

    #[test]
    fn kind_display() {
        assert_eq!(ResourceKind::Pdf.to_string(), "pdf");
    }
}
