use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToAction {
    pub label: String,
    pub href: String,
}

/// Two color tokens, e.g. `#10b981`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    pub primary: String,
    pub neutral: String,
}

/// Optional content carried by a section. Serialized inline next to the
/// section's `id` and `title`; empty parts are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tiers: Vec<String>,
}

impl SectionBody {
    pub fn is_empty(&self) -> bool {
        self.headline.is_none()
            && self.subtext.is_none()
            && self.items.is_empty()
            && self.steps.is_empty()
            && self.tiers.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub body: SectionBody,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: SectionBody::default(),
        }
    }

    pub fn with_body(mut self, body: SectionBody) -> Self {
        self.body = body;
        self
    }
}

/// Structured description of a prototype's content and branding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSpec {
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
    pub cta: CallToAction,
    pub branding: Branding,
    pub sections: Vec<Section>,
    pub generated_at: DateTime<Utc>,
}

impl ProjectSpec {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
