use crate::retrieve::ScoredMatch;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SuggestRequest {
	pub query: String,
	pub category: Option<String>,
	pub top_k: Option<u32>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SuggestResponse {
	pub suggestion: String,
	pub matches: Vec<ScoredMatch>,
	pub used_fallback: bool,
}
