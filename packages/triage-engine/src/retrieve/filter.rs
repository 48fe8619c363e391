use triage_domain::Corpus;

/// Index-aligned eligibility masks for the two scoring tiers.
#[derive(Debug)]
pub(crate) struct TierMasks {
	/// Resolved tickets matching the category constraint.
	pub(crate) primary: Vec<bool>,
	/// Any ticket matching the category constraint, regardless of
	/// resolution state.
	pub(crate) fallback: Vec<bool>,
}

pub(crate) fn tier_masks(corpus: &Corpus, category: Option<&str>) -> TierMasks {
	let category = effective_category(corpus, category);
	let mut primary = Vec::with_capacity(corpus.len());
	let mut fallback = Vec::with_capacity(corpus.len());

	for ticket in corpus.tickets() {
		let in_category = category.map(|wanted| ticket.category == wanted).unwrap_or(true);

		primary.push(ticket.resolved && in_category);
		fallback.push(in_category);
	}

	TierMasks { primary, fallback }
}

/// The category constraint only applies when it actually narrows the corpus.
/// A constraint no record carries (a typo, a category that was never
/// ingested) is dropped so the search degrades to unfiltered instead of
/// returning nothing. An empty constraint is no constraint.
fn effective_category<'a>(corpus: &Corpus, category: Option<&'a str>) -> Option<&'a str> {
	let category = category.map(str::trim).filter(|category| !category.is_empty())?;

	if corpus.has_category(category) {
		Some(category)
	} else {
		tracing::debug!(category, "Category matches no ticket, searching unfiltered.");

		None
	}
}
