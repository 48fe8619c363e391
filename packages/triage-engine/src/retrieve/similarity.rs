use triage_domain::Corpus;

/// Cosine similarity clamped to [-1, 1]. Zero-norm or length-mismatched
/// pairs score 0.0 rather than propagating NaN.
pub(crate) fn cosine_similarity(lhs: &[f32], rhs: &[f32]) -> f32 {
	if lhs.is_empty() || lhs.len() != rhs.len() {
		return 0.0;
	}

	let mut dot = 0.0_f32;
	let mut lhs_norm = 0.0_f32;
	let mut rhs_norm = 0.0_f32;

	for (l, r) in lhs.iter().zip(rhs.iter()) {
		dot += l * r;
		lhs_norm += l * l;
		rhs_norm += r * r;
	}

	if lhs_norm <= f32::EPSILON || rhs_norm <= f32::EPSILON {
		return 0.0;
	}

	(dot / (lhs_norm.sqrt() * rhs_norm.sqrt())).clamp(-1.0, 1.0)
}

/// Scores every masked corpus entry against the query, preserving corpus
/// order. Each score is paired with its corpus index so later passes can
/// reach back to the ticket.
pub(crate) fn score_masked(corpus: &Corpus, query: &[f32], mask: &[bool]) -> Vec<(usize, f32)> {
	mask.iter()
		.enumerate()
		.filter(|(_, eligible)| **eligible)
		.map(|(index, _)| (index, cosine_similarity(query, corpus.embedding(index))))
		.collect()
}
