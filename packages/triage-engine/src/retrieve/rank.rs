use std::{cmp::Ordering, collections::HashSet};

use triage_domain::Corpus;

/// Sorts scored candidates descending by similarity, breaking ties by
/// original corpus order, and keeps the best `k`.
pub(crate) fn top_k(mut scored: Vec<(usize, f32)>, k: usize) -> Vec<(usize, f32)> {
	scored.sort_by(|left, right| {
		cmp_f32_desc(left.1, right.1).then_with(|| left.0.cmp(&right.0))
	});
	scored.truncate(k);

	scored
}

/// Discounts unresolved candidates. Resolved tickets inside the fallback
/// tier keep their raw score.
pub(crate) fn apply_penalty(corpus: &Corpus, scored: &mut [(usize, f32)], penalty: f32) {
	for (index, score) in scored.iter_mut() {
		if !corpus.ticket(*index).resolved {
			*score *= penalty;
		}
	}
}

/// Drops fallback candidates whose ticket id was already selected, so a
/// ticket can never appear twice in the final result.
pub(crate) fn drop_selected_ids(
	corpus: &Corpus,
	scored: &mut Vec<(usize, f32)>,
	selected: &[(usize, f32)],
) {
	let taken: HashSet<&str> =
		selected.iter().map(|(index, _)| corpus.ticket(*index).id.as_str()).collect();

	scored.retain(|(index, _)| !taken.contains(corpus.ticket(*index).id.as_str()));
}

pub(crate) fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}

#[cfg(test)]
mod tests {
	use triage_domain::Ticket;

	use super::*;

	fn corpus(resolved: &[bool]) -> Corpus {
		let tickets = resolved
			.iter()
			.enumerate()
			.map(|(index, resolved)| Ticket {
				id: format!("T-{index}"),
				problem_text: "p".to_string(),
				solution_text: String::new(),
				category: String::new(),
				resolved: *resolved,
			})
			.collect::<Vec<_>>();
		let embeddings = vec![vec![1.0]; resolved.len()];

		Corpus::build(tickets, embeddings).expect("corpus must build")
	}

	#[test]
	fn sorts_descending_and_truncates() {
		let picked = top_k(vec![(0, 0.2), (1, 0.9), (2, 0.5)], 2);

		assert_eq!(picked, vec![(1, 0.9), (2, 0.5)]);
	}

	#[test]
	fn ties_break_by_corpus_order() {
		let picked = top_k(vec![(2, 0.5), (0, 0.5), (1, 0.5)], 3);

		assert_eq!(picked, vec![(0, 0.5), (1, 0.5), (2, 0.5)]);
	}

	#[test]
	fn penalty_only_touches_unresolved() {
		let corpus = corpus(&[true, false]);
		let mut scored = vec![(0, 1.0), (1, 1.0)];

		apply_penalty(&corpus, &mut scored, 0.8);

		assert_eq!(scored, vec![(0, 1.0), (1, 0.8)]);
	}

	#[test]
	fn dedup_removes_already_selected_ids() {
		let corpus = corpus(&[true, true, false]);
		let mut scored = vec![(0, 0.9), (1, 0.8), (2, 0.7)];

		drop_selected_ids(&corpus, &mut scored, &[(1, 0.8)]);

		assert_eq!(scored, vec![(0, 0.9), (2, 0.7)]);
	}
}
