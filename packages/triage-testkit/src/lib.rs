use std::collections::HashMap;

use serde_json::Map;

use triage_config::{
	Config, Corpus as CorpusConfig, EmbeddingProviderConfig, Providers as ProvidersConfig,
	Retrieval, Service, SuggestionProviderConfig,
};
use triage_domain::{Corpus, Ticket};
use triage_engine::{BoxFuture, EmbeddingProvider, SuggestionProvider};
use triage_providers::suggestion::SuggestionExample;

pub fn ticket(id: &str, category: &str, resolved: bool) -> Ticket {
	Ticket {
		id: id.to_string(),
		problem_text: format!("problem for {id}"),
		solution_text: if resolved { format!("solution for {id}") } else { String::new() },
		category: category.to_string(),
		resolved,
	}
}

/// A unit vector along one axis. Distinct axes are orthogonal, which makes
/// expected similarities easy to reason about in tests.
pub fn axis(dimensions: usize, index: usize) -> Vec<f32> {
	let mut vector = vec![0.0; dimensions];
	vector[index] = 1.0;

	vector
}

pub fn corpus(entries: Vec<(Ticket, Vec<f32>)>) -> Corpus {
	let (tickets, embeddings) = entries.into_iter().unzip();

	Corpus::build(tickets, embeddings).expect("Test corpus must build.")
}

pub fn sample_config(dimensions: u32) -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			admin_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		corpus: CorpusConfig { path: "unused.json".into() },
		providers: ProvidersConfig {
			embedding: EmbeddingProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://localhost".to_string(),
				api_key: "key".to_string(),
				path: "/v1/embeddings".to_string(),
				model: "test-embedding".to_string(),
				dimensions,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
			suggestion: SuggestionProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://localhost".to_string(),
				api_key: "key".to_string(),
				path: "/v1/chat/completions".to_string(),
				model: "test-chat".to_string(),
				temperature: 0.2,
				max_tokens: 150,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
		},
		retrieval: Retrieval::default(),
	}
}

/// Embedding provider that returns canned vectors by query text. Unknown
/// texts embed to the zero vector of the configured dimensionality.
pub struct StaticEmbedding {
	vectors: HashMap<String, Vec<f32>>,
	dimensions: usize,
}
impl StaticEmbedding {
	pub fn new(dimensions: usize) -> Self {
		Self { vectors: HashMap::new(), dimensions }
	}

	pub fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
		self.vectors.insert(text.to_string(), vector);

		self
	}
}
impl EmbeddingProvider for StaticEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		let vectors = texts
			.iter()
			.map(|text| {
				self.vectors.get(text).cloned().unwrap_or_else(|| vec![0.0; self.dimensions])
			})
			.collect();

		Box::pin(async move { Ok(vectors) })
	}
}

/// Suggestion provider that echoes a canned string and records nothing.
pub struct CannedSuggestion(pub String);
impl SuggestionProvider for CannedSuggestion {
	fn suggest<'a>(
		&'a self,
		_cfg: &'a SuggestionProviderConfig,
		_query: &'a str,
		_examples: &'a [SuggestionExample],
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(async move { Ok(self.0.clone()) })
	}
}
