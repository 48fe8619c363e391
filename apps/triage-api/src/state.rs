use std::sync::Arc;

use serde::Serialize;

use triage_domain::{Corpus, ingest};
use triage_engine::TriageService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<TriageService>,
}
impl AppState {
	pub async fn new(config: triage_config::Config) -> color_eyre::Result<Self> {
		let service = TriageService::new(config, Corpus::default());
		let corpus = load_corpus(&service).await?;

		tracing::info!(
			tickets = corpus.len(),
			dimensions = corpus.dimensions(),
			"Corpus loaded.",
		);
		service.replace_corpus(corpus);

		Ok(Self { service: Arc::new(service) })
	}
}

#[derive(Debug, Serialize)]
pub struct ReloadReport {
	pub tickets: usize,
	pub dimensions: usize,
}

/// Reads the corpus row dump, normalizes rows into tickets, and embeds
/// their problem texts in one batch.
pub async fn load_corpus(service: &TriageService) -> color_eyre::Result<Corpus> {
	let raw = std::fs::read_to_string(&service.cfg.corpus.path)?;
	let rows: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
	let tickets = ingest::tickets_from_rows(&rows);

	if tickets.is_empty() {
		tracing::warn!(path = %service.cfg.corpus.path.display(), "Corpus file yielded no usable tickets.");

		return Ok(Corpus::default());
	}

	let texts = tickets.iter().map(|ticket| ticket.problem_text.clone()).collect::<Vec<_>>();
	let embeddings =
		service.providers.embedding.embed(&service.cfg.providers.embedding, &texts).await?;

	Ok(Corpus::build(tickets, embeddings)?)
}
