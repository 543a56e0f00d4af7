use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{Branding, CallToAction, ProjectSpec, Section, SectionBody, Transcript};

use super::fallback_chain::{FallbackChain, RunLog};
use super::model_output::{extract_json_object, truncate_chars};

const STAGE: &str = "spec";

pub const DEFAULT_TITLE: &str = "Generated MVP";
pub const MAX_TRANSCRIPT_CHARS: usize = 12_000;

const DEFAULT_DESCRIPTION: &str =
    "A focused prototype distilled from the ideas presented in the source video.";

const DEFAULT_FEATURES: [&str; 5] = [
    "User sign up and authentication",
    "Personal dashboard with key metrics",
    "Core workflow described in the video",
    "Email notifications for important events",
    "Subscription billing with tiered pricing",
];

const HERO_SUBTEXT: &str = "Built from your video";
const DEFAULT_STEPS: [&str; 3] = ["Paste URL", "Analyze", "Generate Prototype"];
const DEFAULT_TIERS: [&str; 3] = ["Free", "Pro", "Team"];

const DEFAULT_CTA_LABEL: &str = "Get started";
const DEFAULT_CTA_HREF: &str = "#pricing";
const DEFAULT_PRIMARY_COLOR: &str = "#10b981";
const DEFAULT_NEUTRAL_COLOR: &str = "#18181b";

const INSTRUCTION: &str = r##"You turn a video transcript into the specification of a small web product.
Reply with a single JSON object and nothing else, using exactly these keys:
{
  "title": string,
  "description": string,
  "features": [string, ...],
  "cta": {"label": string, "href": string},
  "branding": {"primary": "#rrggbb", "neutral": "#rrggbb"},
  "sections": [{"id": string, "title": string, ...}, ...]
}
A section may also carry "headline" and "subtext" strings and "items", "steps" or "tiers" string lists.
Keep the feature list between three and seven items. Section ids are lowercase and hyphenated."##;

/// Spec produced without any model call. Only `generated_at` varies between
/// calls with the same hint.
pub fn synthesize_deterministic(title_hint: Option<&str>) -> ProjectSpec {
    let title = resolve_title(title_hint);
    let features = owned(&DEFAULT_FEATURES);
    let sections = default_sections(&title, &features);

    ProjectSpec {
        title,
        description: DEFAULT_DESCRIPTION.to_string(),
        features,
        cta: CallToAction {
            label: DEFAULT_CTA_LABEL.to_string(),
            href: DEFAULT_CTA_HREF.to_string(),
        },
        branding: Branding {
            primary: DEFAULT_PRIMARY_COLOR.to_string(),
            neutral: DEFAULT_NEUTRAL_COLOR.to_string(),
        },
        sections,
        generated_at: Utc::now(),
    }
}

/// Hero, features, how-it-works and pricing, with content drawn from
/// `title` and `features`.
fn default_sections(title: &str, features: &[String]) -> Vec<Section> {
    vec![
        Section::new("hero", "Hero").with_body(SectionBody {
            headline: Some(title.to_string()),
            subtext: Some(HERO_SUBTEXT.to_string()),
            ..SectionBody::default()
        }),
        Section::new("features", "Features").with_body(SectionBody {
            items: features.to_vec(),
            ..SectionBody::default()
        }),
        Section::new("how-it-works", "How it works").with_body(SectionBody {
            steps: owned(&DEFAULT_STEPS),
            ..SectionBody::default()
        }),
        Section::new("pricing", "Pricing").with_body(SectionBody {
            tiers: owned(&DEFAULT_TIERS),
            ..SectionBody::default()
        }),
    ]
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn resolve_title(title_hint: Option<&str>) -> String {
    title_hint
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TITLE)
        .to_string()
}

pub struct SpecSynthesizer {
    llm: Option<Arc<dyn LlmClient>>,
}

impl SpecSynthesizer {
    pub fn new(llm: Option<Arc<dyn LlmClient>>) -> Self {
        Self { llm }
    }

    pub async fn synthesize(
        &self,
        transcript: &Transcript,
        title_hint: Option<&str>,
        log: &RunLog,
    ) -> ProjectSpec {
        let mut chain = FallbackChain::new(log, STAGE);

        chain = match &self.llm {
            Some(llm) => {
                chain
                    .attempt("generative-model", || {
                        synthesize_with_model(llm.as_ref(), transcript.text(), title_hint)
                    })
                    .await
            }
            None => {
                chain
                    .skip("generative-model", "no generative credential configured")
                    .await
            }
        };

        let spec = chain
            .finish("deterministic", || synthesize_deterministic(title_hint))
            .await;

        tracing::info!(
            title = %spec.title,
            features = spec.features.len(),
            sections = spec.sections.len(),
            sections_with_content = spec.sections.iter().filter(|s| !s.body.is_empty()).count(),
            "Project spec synthesized"
        );

        spec
    }
}

async fn synthesize_with_model(
    llm: &dyn LlmClient,
    transcript: &str,
    title_hint: Option<&str>,
) -> Result<Option<ProjectSpec>, LlmClientError> {
    let mut input = String::new();
    if let Some(hint) = title_hint.map(str::trim).filter(|t| !t.is_empty()) {
        input.push_str(&format!("Working title: {}\n\n", hint));
    }
    input.push_str("Transcript:\n");
    input.push_str(truncate_chars(transcript, MAX_TRANSCRIPT_CHARS));

    let raw = llm.complete(INSTRUCTION, &input).await?;

    let json = extract_json_object(&raw)
        .ok_or_else(|| LlmClientError::InvalidResponse("no JSON object in reply".to_string()))?;
    let draft: DraftSpec = serde_json::from_str(json)
        .map_err(|e| LlmClientError::InvalidResponse(format!("spec: {}", e)))?;

    Ok(Some(draft.complete(synthesize_deterministic(title_hint))))
}

/// Model output before backfilling; every field may be missing.
#[derive(Debug, Default, Deserialize)]
struct DraftSpec {
    title: Option<String>,
    description: Option<String>,
    features: Option<Vec<String>>,
    cta: Option<DraftCta>,
    branding: Option<DraftBranding>,
    sections: Option<Vec<DraftSection>>,
    generated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DraftCta {
    label: Option<String>,
    href: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DraftBranding {
    primary: Option<String>,
    neutral: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DraftSection {
    Named(String),
    Described {
        id: Option<String>,
        #[serde(alias = "name", alias = "heading")]
        title: Option<String>,
        headline: Option<String>,
        subtext: Option<String>,
        items: Option<Vec<serde_json::Value>>,
        steps: Option<Vec<serde_json::Value>>,
        tiers: Option<Vec<serde_json::Value>>,
    },
}

impl DraftSection {
    fn into_section(self) -> Option<Section> {
        let (id, title, body) = match self {
            DraftSection::Named(name) => (None, Some(name), SectionBody::default()),
            DraftSection::Described {
                id,
                title,
                headline,
                subtext,
                items,
                steps,
                tiers,
            } => (
                id,
                title,
                SectionBody {
                    headline: non_blank(headline),
                    subtext: non_blank(subtext),
                    items: text_list(items),
                    steps: text_list(steps),
                    tiers: text_list(tiers),
                },
            ),
        };
        let id = non_blank(id);
        let title = non_blank(title);
        let section = match (id, title) {
            (Some(id), Some(title)) => Section::new(id, title),
            (Some(id), None) => Section::new(id.clone(), id),
            (None, Some(title)) => Section::new(slugify(&title), title),
            (None, None) => return None,
        };
        Some(section.with_body(body))
    }
}

impl DraftSpec {
    /// Fills anything missing or blank from `defaults`, whose title already
    /// reflects the caller's hint.
    fn complete(self, defaults: ProjectSpec) -> ProjectSpec {
        let features: Vec<String> = self
            .features
            .unwrap_or_default()
            .into_iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();

        let sections: Vec<Section> = self
            .sections
            .unwrap_or_default()
            .into_iter()
            .filter_map(DraftSection::into_section)
            .collect();

        let title = non_blank(self.title).unwrap_or(defaults.title);
        let features = if features.is_empty() {
            defaults.features
        } else {
            features
        };
        let sections = if sections.is_empty() {
            default_sections(&title, &features)
        } else {
            sections
        };

        let (cta_label, cta_href) = match self.cta {
            Some(cta) => (non_blank(cta.label), non_blank(cta.href)),
            None => (None, None),
        };
        let (primary, neutral) = match self.branding {
            Some(b) => (non_blank(b.primary), non_blank(b.neutral)),
            None => (None, None),
        };

        let generated_at = self
            .generated_at
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc))
            .unwrap_or(defaults.generated_at);

        ProjectSpec {
            title,
            description: non_blank(self.description).unwrap_or(defaults.description),
            features,
            cta: CallToAction {
                label: cta_label.unwrap_or(defaults.cta.label),
                href: cta_href.unwrap_or(defaults.cta.href),
            },
            branding: Branding {
                primary: primary.unwrap_or(defaults.branding.primary),
                neutral: neutral.unwrap_or(defaults.branding.neutral),
            },
            sections,
            generated_at,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Keeps plain strings and the `name` or `title` of objects; anything else
/// in the list is dropped.
fn text_list(values: Option<Vec<serde_json::Value>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| match value {
            serde_json::Value::String(text) => Some(text),
            serde_json::Value::Object(fields) => ["name", "title"]
                .iter()
                .find_map(|key| fields.get(*key).and_then(|v| v.as_str()))
                .map(str::to_string),
            _ => None,
        })
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}
