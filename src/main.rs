use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use vid2mvp::application::services::{
    PipelineRequest, PrototypePackager, RunLog, ViabilityClassifier,
};
use vid2mvp::domain::{ProjectSpec, RunId, RunStatus, Transcript, TranscriptSource};
use vid2mvp::infrastructure::observability::{
    InMemoryDiagnosticSink, TracingConfig, init_tracing,
};
use vid2mvp::presentation::bootstrap::build_llm_client;
use vid2mvp::presentation::{Cli, Command, Environment, Settings, build_pipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(TracingConfig::new(
        environment.as_str(),
        settings.logging.level.clone(),
        settings.logging.json || cli.json_logs,
    ));

    match cli.command {
        Command::Run { url, title } => run(&settings, url, title).await,
        Command::Viability {
            title,
            transcript_file,
        } => {
            let text = tokio::fs::read_to_string(&transcript_file)
                .await
                .with_context(|| format!("failed to read {}", transcript_file.display()))?;
            viability(&settings, &title, text).await
        }
        Command::Package { spec, out } => {
            let raw = tokio::fs::read_to_string(&spec)
                .await
                .with_context(|| format!("failed to read {}", spec.display()))?;
            let spec: ProjectSpec = serde_json::from_str(&raw).context("invalid spec JSON")?;
            let bundle = PrototypePackager::default().package(&spec)?;
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&out, bundle.archive()).await?;
            tracing::info!(path = %out.display(), bytes = bundle.archive().len(), "Prototype packaged");
            println!("{}", out.display());
            Ok(())
        }
    }
}

async fn run(settings: &Settings, url: String, title: Option<String>) -> anyhow::Result<()> {
    let pipeline = build_pipeline(settings)?;
    let outcome = pipeline.run(PipelineRequest { url, title }).await?;

    let summary = serde_json::json!({
        "run_id": outcome.run_id.to_string(),
        "status": RunStatus::Complete.as_str(),
        "transcript_source": outcome.transcript.source().as_str(),
        "title": outcome.spec.title,
        "viability": outcome.verdict,
        "artifacts": {
            "transcript": outcome.artifacts.transcript,
            "spec": outcome.artifacts.spec,
            "prototype": outcome.artifacts.prototype,
        },
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

async fn viability(settings: &Settings, title: &str, text: String) -> anyhow::Result<()> {
    // Provenance does not influence classification.
    let transcript = Transcript::new(text, TranscriptSource::NativeCaptions)
        .unwrap_or_else(|| Transcript::synthetic(None));

    let sink = Arc::new(InMemoryDiagnosticSink::new());
    let log = RunLog::new(RunId::new(), sink.clone());
    let classifier = ViabilityClassifier::new(build_llm_client(settings)?);
    let verdict = classifier.classify(title, &transcript, &log).await;

    for event in sink.events() {
        tracing::debug!(
            stage = %event.stage,
            strategy = %event.strategy,
            outcome = event.outcome.as_str(),
            "Classification step"
        );
    }

    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(())
}
