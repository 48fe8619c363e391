mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, Corpus, EmbeddingProviderConfig, Providers, Retrieval, Service,
	SuggestionProviderConfig,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.admin_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.admin_bind must be non-empty.".to_string(),
		});
	}
	if cfg.corpus.path.as_os_str().is_empty() {
		return Err(Error::Validation { message: "corpus.path must be non-empty.".to_string() });
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.retrieval.top_k_default == 0 {
		return Err(Error::Validation {
			message: "retrieval.top_k_default must be greater than zero.".to_string(),
		});
	}
	if !cfg.retrieval.fallback_penalty.is_finite() {
		return Err(Error::Validation {
			message: "retrieval.fallback_penalty must be a finite number.".to_string(),
		});
	}
	if cfg.retrieval.fallback_penalty <= 0.0 || cfg.retrieval.fallback_penalty > 1.0 {
		return Err(Error::Validation {
			message: "retrieval.fallback_penalty must be greater than zero and at most 1.0."
				.to_string(),
		});
	}
	if cfg.providers.suggestion.max_tokens == 0 {
		return Err(Error::Validation {
			message: "providers.suggestion.max_tokens must be greater than zero.".to_string(),
		});
	}

	for (label, key) in [
		("embedding", &cfg.providers.embedding.api_key),
		("suggestion", &cfg.providers.suggestion.api_key),
	] {
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for api_base in
		[&mut cfg.providers.embedding.api_base, &mut cfg.providers.suggestion.api_base]
	{
		while api_base.ends_with('/') {
			api_base.pop();
		}
	}
}
