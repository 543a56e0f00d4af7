use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Deserialize;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{Transcript, VerdictOrigin, ViabilityCategory, ViabilityVerdict};

use super::fallback_chain::{FallbackChain, RunLog};
use super::model_output::{extract_json_object, truncate_chars};

const STAGE: &str = "viability";

pub const MAX_TRANSCRIPT_CHARS: usize = 12_000;
pub const MIN_WORDS: usize = 120;

const INSTRUCTION: &str = r#"You judge whether a video describes a software product that could be built as a minimum viable product.
Reply with a single JSON object and nothing else:
{"category": "mvp-ready" | "idea-only" | "not-a-project", "score": <number between 0 and 1>, "reason": "<one sentence>"}
- mvp-ready: concrete product, features or build steps are described.
- idea-only: a product idea is present but too vague to build.
- not-a-project: music, vlogs, news, entertainment or anything without a product."#;

static PRODUCT_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:sign ?up|feature|dashboard|api|pricing|onboarding|user|auth|prototype|mvp|build|launch|roadmap)\b",
    )
    .unwrap()
});

static TUTORIAL_PHRASES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:how to|tutorial|we will build|let's build|step by step)\b").unwrap()
});

static NOISE_PHRASES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:lyrics|official video|music video|vlog|my day|travel vlog|reaction video|breaking news|press conference|announcement)\b",
    )
    .unwrap()
});

/// The four boolean signals the rule-based path decides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSignals {
    pub product: bool,
    pub long_enough: bool,
    pub tutorial: bool,
    pub noise: bool,
}

impl RuleSignals {
    pub fn detect(title: &str, transcript: &str) -> Self {
        let haystack = format!("{}\n{}", title, transcript).to_lowercase();
        Self {
            product: PRODUCT_KEYWORDS.is_match(&haystack),
            long_enough: transcript.split_whitespace().count() > MIN_WORDS,
            tutorial: TUTORIAL_PHRASES.is_match(&haystack),
            noise: NOISE_PHRASES.is_match(&haystack),
        }
    }
}

/// Deterministic verdict. Branch order and scores are fixed:
/// noise, then product with length or tutorial, then no signal at all,
/// otherwise idea-only.
pub fn classify_by_rules(title: &str, transcript: &str) -> ViabilityVerdict {
    let signals = RuleSignals::detect(title, transcript);

    let (category, score, reason) = if signals.noise {
        (
            ViabilityCategory::NotAProject,
            0.05,
            "Reads as entertainment or news content rather than a product.",
        )
    } else if signals.product && (signals.long_enough || signals.tutorial) {
        (
            ViabilityCategory::MvpReady,
            0.7,
            "Describes concrete product features with enough detail to prototype.",
        )
    } else if !signals.product && !signals.tutorial {
        (
            ViabilityCategory::NotAProject,
            0.15,
            "No product or build signals found in the transcript.",
        )
    } else {
        (
            ViabilityCategory::IdeaOnly,
            0.4,
            "Mentions a product idea but lacks the detail needed for an MVP.",
        )
    };

    ViabilityVerdict::new(category, score, reason, VerdictOrigin::Rules)
}

#[derive(Deserialize)]
struct ModelVerdict {
    #[serde(alias = "mvp_viability")]
    category: String,
    #[serde(default, alias = "viability_score")]
    score: Option<ModelScore>,
    #[serde(default, alias = "viability_reason")]
    reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModelScore {
    Number(f64),
    Text(String),
}

impl ModelScore {
    fn value(self) -> Option<f64> {
        match self {
            ModelScore::Number(n) => Some(n),
            ModelScore::Text(t) => t.trim().parse().ok(),
        }
    }
}

pub struct ViabilityClassifier {
    llm: Option<Arc<dyn LlmClient>>,
}

impl ViabilityClassifier {
    /// `llm` is `None` when no generative credential is configured.
    pub fn new(llm: Option<Arc<dyn LlmClient>>) -> Self {
        Self { llm }
    }

    pub fn rules_only() -> Self {
        Self { llm: None }
    }

    pub async fn classify(&self, title: &str, transcript: &Transcript, log: &RunLog) -> ViabilityVerdict {
        let mut chain = FallbackChain::new(log, STAGE);

        chain = match &self.llm {
            Some(llm) => {
                chain
                    .attempt("generative-model", || {
                        classify_with_model(llm.as_ref(), title, transcript.text())
                    })
                    .await
            }
            None => {
                chain
                    .skip("generative-model", "no generative credential configured")
                    .await
            }
        };

        let verdict = chain
            .finish("rules", || classify_by_rules(title, transcript.text()))
            .await;

        tracing::info!(
            category = %verdict.category,
            score = verdict.score,
            origin = ?verdict.origin,
            "Viability classified"
        );

        verdict
    }
}

async fn classify_with_model(
    llm: &dyn LlmClient,
    title: &str,
    transcript: &str,
) -> Result<Option<ViabilityVerdict>, LlmClientError> {
    let input = format!(
        "Title: {}\n\nTranscript:\n{}",
        title,
        truncate_chars(transcript, MAX_TRANSCRIPT_CHARS)
    );

    let raw = llm.complete(INSTRUCTION, &input).await?;
    parse_model_verdict(&raw).map(Some)
}

fn parse_model_verdict(raw: &str) -> Result<ViabilityVerdict, LlmClientError> {
    let json = extract_json_object(raw)
        .ok_or_else(|| LlmClientError::InvalidResponse("no JSON object in reply".to_string()))?;

    let parsed: ModelVerdict = serde_json::from_str(json)
        .map_err(|e| LlmClientError::InvalidResponse(format!("verdict: {}", e)))?;

    let category: ViabilityCategory = parsed
        .category
        .parse()
        .map_err(LlmClientError::InvalidResponse)?;

    // An absent score counts as 0; one that is present must be numeric.
    let score = match parsed.score {
        None => 0.0,
        Some(raw) => raw
            .value()
            .ok_or_else(|| LlmClientError::InvalidResponse("non-numeric score".to_string()))?,
    };

    let reason = parsed
        .reason
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| format!("Model classified the video as {}.", category));

    Ok(ViabilityVerdict::new(
        category,
        score as f32,
        reason,
        VerdictOrigin::Ai,
    ))
}
