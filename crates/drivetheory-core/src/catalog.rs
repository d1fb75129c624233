//! The topic catalog.

use anyhow::{Context, Result};

pub use crate::model::TopicInfo;

/// Ordered list of known topics.
#[derive(Debug, Clone)]
pub struct TopicCatalog {
    topics: Vec<TopicInfo>,
}

impl TopicCatalog {
    pub fn new(topics: Vec<TopicInfo>) -> Self {
        Self { topics }
    }

    /// The topics shipped with the application.
    pub fn builtin() -> Self {
        let topic = |id: &str, title: &str, link: &str, updated: &str, count: usize| TopicInfo {
            id: id.into(),
            title: title.into(),
            link: link.into(),
            last_updated: updated.into(),
            questions_count: count,
        };
        Self::new(vec![
            topic(
                "1",
                "1 - Basic concepts",
                "https://rta.government.bg/upload/11305/Category_1_Topic_1_13.10.2023+16_54_14_EN.pdf",
                "12.05.2025",
                84,
            ),
            topic(
                "2",
                "2 - The roads and streets",
                "https://rta.government.bg/upload/10474/Category_1_Topic_2_01.06.2023+16_30_48_EN.pdf",
                "18.05.2025",
                87,
            ),
            topic(
                "19",
                "19 - GENERAL INFORMATION ABOUT THE MOTOR VEHICLE STRUCTURE",
                "https://rta.government.bg/upload/10491/Category_1_Topic_19_01.06.2023+16_53_15_EN.pdf",
                "18.07.2025",
                50,
            ),
            topic("111", "[EXTRA] - Prohibitions", "", "17.05.2025", 12),
            topic(
                "22",
                "[EXTRA] - Random ones from avtoizpit",
                "https://avtoizpit.com/",
                "21.05.2025",
                12,
            ),
        ])
    }

    /// Parse a catalog from a JSON array of topics.
    pub fn from_json(json: &str) -> Result<Self> {
        let topics: Vec<TopicInfo> =
            serde_json::from_str(json).context("failed to parse topic catalog JSON")?;
        Ok(Self::new(topics))
    }

    pub fn topics(&self) -> &[TopicInfo] {
        &self.topics
    }

    pub fn get(&self, id: &str) -> Option<&TopicInfo> {
        self.topics.iter().find(|t| t.id == id)
    }

    /// The topic's title, or `Topic <id>` when the catalog has no such topic.
    pub fn display_name(&self, id: &str) -> String {
        self.get(id)
            .map(|t| t.title.clone())
            .unwrap_or_else(|| format!("Topic {id}"))
    }
}

impl Default for TopicCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
