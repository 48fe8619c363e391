use serde::{Deserialize, Serialize};

/// A historical helpdesk ticket after ingestion has normalized it.
///
/// `resolved` is always a plain boolean here; tolerant parsing of the
/// loosely-typed source rows happens in [`crate::ingest`] so the retrieval
/// engine never sees stringly-typed booleans.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Ticket {
	pub id: String,
	pub problem_text: String,
	pub solution_text: String,
	pub category: String,
	pub resolved: bool,
}
