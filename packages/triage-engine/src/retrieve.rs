mod filter;
mod rank;
mod similarity;

use triage_domain::{Corpus, Ticket};

use crate::{Error, Result};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RetrieveRequest {
	pub query: String,
	pub category: Option<String>,
	pub top_k: Option<u32>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ScoredMatch {
	pub ticket: Ticket,
	/// Cosine similarity, already discounted for unresolved fallback
	/// candidates.
	pub similarity: f32,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RetrieveResponse {
	pub matches: Vec<ScoredMatch>,
	pub used_fallback: bool,
}

/// Ranks a query vector against the corpus.
///
/// Tier 1 considers resolved, category-matched tickets. When it cannot fill
/// `k`, tier 2 re-scores the category-matched corpus with unresolved
/// candidates discounted by `penalty`, drops anything tier 1 already
/// selected, and tops up. Tier-1 matches always precede tier-2 matches in
/// the output regardless of score.
pub fn rank_matches(
	corpus: &Corpus,
	query: &[f32],
	category: Option<&str>,
	k: u32,
	penalty: f32,
) -> Result<RetrieveResponse> {
	if k == 0 {
		return Err(Error::InvalidRequest {
			message: "top_k must be greater than zero.".to_string(),
		});
	}
	if corpus.is_empty() {
		return Err(Error::NoMatch);
	}
	if query.len() != corpus.dimensions() {
		return Err(Error::InvalidRequest {
			message: format!(
				"Query vector has {} dimensions, corpus has {}.",
				query.len(),
				corpus.dimensions(),
			),
		});
	}

	let k = k as usize;
	let masks = filter::tier_masks(corpus, category);
	let primary_scored = similarity::score_masked(corpus, query, &masks.primary);
	let mut selected = rank::top_k(primary_scored, k);
	let used_fallback = selected.len() < k;

	if used_fallback {
		let mut fallback_scored = similarity::score_masked(corpus, query, &masks.fallback);

		rank::apply_penalty(corpus, &mut fallback_scored, penalty);
		rank::drop_selected_ids(corpus, &mut fallback_scored, &selected);

		let secondary = rank::top_k(fallback_scored, k - selected.len());

		selected.extend(secondary);
	}

	if selected.is_empty() {
		return Err(Error::NoMatch);
	}

	let matches = selected
		.into_iter()
		.map(|(index, similarity)| ScoredMatch { ticket: corpus.ticket(index).clone(), similarity })
		.collect();

	Ok(RetrieveResponse { matches, used_fallback })
}
