pub mod retrieve;
pub mod suggest;

mod error;

use std::{
	future::Future,
	pin::Pin,
	sync::{Arc, RwLock},
};

pub use error::{Error, Result};
pub use retrieve::{RetrieveRequest, RetrieveResponse, ScoredMatch, rank_matches};
pub use suggest::{SuggestRequest, SuggestResponse};

use triage_config::{Config, EmbeddingProviderConfig, SuggestionProviderConfig};
use triage_domain::Corpus;
use triage_providers::{embedding, suggestion, suggestion::SuggestionExample};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>>;
}

pub trait SuggestionProvider
where
	Self: Send + Sync,
{
	fn suggest<'a>(
		&'a self,
		cfg: &'a SuggestionProviderConfig,
		query: &'a str,
		examples: &'a [SuggestionExample],
	) -> BoxFuture<'a, color_eyre::Result<String>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub suggestion: Arc<dyn SuggestionProvider>,
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl SuggestionProvider for DefaultProviders {
	fn suggest<'a>(
		&'a self,
		cfg: &'a SuggestionProviderConfig,
		query: &'a str,
		examples: &'a [SuggestionExample],
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(suggestion::suggest(cfg, query, examples))
	}
}

impl Providers {
	pub fn new(embedding: Arc<dyn EmbeddingProvider>, suggestion: Arc<dyn SuggestionProvider>) -> Self {
		Self { embedding, suggestion }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);
		Self { embedding: provider.clone(), suggestion: provider }
	}
}

pub struct TriageService {
	pub cfg: Config,
	corpus: RwLock<Arc<Corpus>>,
	pub providers: Providers,
}

impl TriageService {
	pub fn new(cfg: Config, corpus: Corpus) -> Self {
		Self::with_providers(cfg, corpus, Providers::default())
	}

	pub fn with_providers(cfg: Config, corpus: Corpus, providers: Providers) -> Self {
		Self { cfg, corpus: RwLock::new(Arc::new(corpus)), providers }
	}

	/// A read-only snapshot. Queries in flight keep the snapshot they
	/// started with even if the corpus is replaced underneath them.
	pub fn corpus(&self) -> Arc<Corpus> {
		self.corpus.read().unwrap_or_else(|err| err.into_inner()).clone()
	}

	/// Atomically swaps in a freshly ingested corpus. The old snapshot stays
	/// alive until the last in-flight query drops it.
	pub fn replace_corpus(&self, corpus: Corpus) {
		*self.corpus.write().unwrap_or_else(|err| err.into_inner()) = Arc::new(corpus);
	}

	pub async fn retrieve(&self, request: RetrieveRequest) -> Result<RetrieveResponse> {
		let k = request.top_k.unwrap_or(self.cfg.retrieval.top_k_default);

		if k == 0 {
			return Err(Error::InvalidRequest {
				message: "top_k must be greater than zero.".to_string(),
			});
		}
		if request.query.trim().is_empty() {
			return Err(Error::InvalidRequest { message: "query must be non-empty.".to_string() });
		}

		let corpus = self.corpus();

		if corpus.is_empty() {
			return Err(Error::NoMatch);
		}

		let query = self.embed_query(&request.query).await?;
		let response = rank_matches(
			&corpus,
			&query,
			request.category.as_deref(),
			k,
			self.cfg.retrieval.fallback_penalty,
		)?;

		tracing::info!(
			matches = response.matches.len(),
			used_fallback = response.used_fallback,
			corpus_size = corpus.len(),
			"Retrieval complete.",
		);

		Ok(response)
	}

	pub async fn suggest(&self, request: SuggestRequest) -> Result<SuggestResponse> {
		let retrieved = self
			.retrieve(RetrieveRequest {
				query: request.query.clone(),
				category: request.category,
				top_k: request.top_k,
			})
			.await?;
		let examples = retrieved
			.matches
			.iter()
			.map(|scored| SuggestionExample {
				problem: scored.ticket.problem_text.clone(),
				solution: scored.ticket.solution_text.clone(),
			})
			.collect::<Vec<_>>();
		let suggestion = self
			.providers
			.suggestion
			.suggest(&self.cfg.providers.suggestion, &request.query, &examples)
			.await?;

		Ok(SuggestResponse {
			suggestion,
			matches: retrieved.matches,
			used_fallback: retrieved.used_fallback,
		})
	}

	async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
		let texts = vec![text.to_string()];
		let mut vectors =
			self.providers.embedding.embed(&self.cfg.providers.embedding, &texts).await?;

		if vectors.len() != 1 {
			return Err(Error::Provider {
				message: format!("Expected one query embedding, got {}.", vectors.len()),
			});
		}

		Ok(vectors.remove(0))
	}
}
