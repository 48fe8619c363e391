use std::collections::HashSet;

use serde_json::Value;

use crate::ticket::Ticket;

/// Converts loosely-typed loader rows into typed tickets.
///
/// The external loaders own file formats and column renaming; this step owns
/// everything that must hold before a row may reach the retrieval engine:
/// a non-empty problem text, a plain boolean `resolved`, and a unique id.
pub fn tickets_from_rows(rows: &[Value]) -> Vec<Ticket> {
	let mut tickets = Vec::with_capacity(rows.len());
	let mut seen_ids = HashSet::new();

	for (index, row) in rows.iter().enumerate() {
		let Some(ticket) = ticket_from_row(row, index) else {
			continue;
		};
		let ticket = if seen_ids.contains(ticket.id.as_str()) {
			tracing::warn!(ticket_id = %ticket.id, index, "Duplicate ticket id, suffixing row index.");

			Ticket { id: format!("{}_{index}", ticket.id), ..ticket }
		} else {
			ticket
		};

		seen_ids.insert(ticket.id.clone());
		tickets.push(ticket);
	}

	tickets
}

fn ticket_from_row(row: &Value, index: usize) -> Option<Ticket> {
	let problem_text = compose_problem_text(row);

	if problem_text.is_empty() {
		tracing::warn!(index, "Skipping row without issue or description text.");

		return None;
	}

	let id = field_string(row, "ticket_id")
		.filter(|id| !id.trim().is_empty())
		.unwrap_or_else(|| format!("row_{index}"));

	Some(Ticket {
		id,
		problem_text,
		solution_text: field_string(row, "solution_description").unwrap_or_default(),
		category: field_string(row, "category").unwrap_or_default(),
		resolved: normalize_resolved(row, index),
	})
}

/// Combines `issue` and `description` into one problem text, preferring an
/// already-composed `problem_description` when the loader provides one.
fn compose_problem_text(row: &Value) -> String {
	if let Some(text) = field_string(row, "problem_description")
		&& !text.trim().is_empty()
	{
		return text;
	}

	let issue = field_string(row, "issue").unwrap_or_default();
	let description = field_string(row, "description").unwrap_or_default();

	match (issue.trim().is_empty(), description.trim().is_empty()) {
		(false, false) => format!("Issue: {issue}. Description: {description}"),
		(false, true) => issue,
		(true, false) => description,
		(true, true) => String::new(),
	}
}

/// Accepts a JSON boolean or the strings "true"/"false" (any case); anything
/// else defaults to unresolved with a warning, so the engine only ever sees
/// plain booleans.
fn normalize_resolved(row: &Value, index: usize) -> bool {
	match row.get("resolved") {
		Some(Value::Bool(resolved)) => *resolved,
		Some(Value::String(text)) => match text.trim().to_ascii_lowercase().as_str() {
			"true" => true,
			"false" => false,
			_ => {
				tracing::warn!(index, raw = %text, "Unrecognized resolved value, defaulting to false.");

				false
			},
		},
		Some(other) => {
			tracing::warn!(index, raw = %other, "Non-boolean resolved value, defaulting to false.");

			false
		},
		None => {
			tracing::warn!(index, "Missing resolved value, defaulting to false.");

			false
		},
	}
}

fn field_string(row: &Value, key: &str) -> Option<String> {
	match row.get(key)? {
		Value::String(text) => Some(text.to_string()),
		Value::Number(number) => Some(number.to_string()),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn composes_problem_text_from_issue_and_description() {
		let row = serde_json::json!({
			"ticket_id": "T-1",
			"issue": "VPN down",
			"description": "Cannot reach the office network.",
			"resolved": true,
		});
		let ticket = ticket_from_row(&row, 0).expect("row must parse");

		assert_eq!(
			ticket.problem_text,
			"Issue: VPN down. Description: Cannot reach the office network."
		);
		assert!(ticket.resolved);
	}

	#[test]
	fn accepts_stringly_booleans_and_defaults_unknowns() {
		for (raw, expected) in
			[("true", true), ("TRUE", true), ("false", false), ("maybe", false)]
		{
			let row = serde_json::json!({ "issue": "x", "resolved": raw });

			assert_eq!(
				ticket_from_row(&row, 0).expect("row must parse").resolved,
				expected,
				"raw value {raw}",
			);
		}
	}

	#[test]
	fn skips_rows_without_any_problem_text() {
		let rows = vec![
			serde_json::json!({ "ticket_id": "T-1", "resolved": true }),
			serde_json::json!({ "ticket_id": "T-2", "issue": "printer jam" }),
		];
		let tickets = tickets_from_rows(&rows);

		assert_eq!(tickets.len(), 1);
		assert_eq!(tickets[0].id, "T-2");
		assert_eq!(tickets[0].problem_text, "printer jam");
	}

	#[test]
	fn suffixes_duplicate_ids_with_row_index() {
		let rows = vec![
			serde_json::json!({ "ticket_id": "T-1", "issue": "a" }),
			serde_json::json!({ "ticket_id": "T-1", "issue": "b" }),
		];
		let tickets = tickets_from_rows(&rows);

		assert_eq!(tickets[0].id, "T-1");
		assert_eq!(tickets[1].id, "T-1_1");
	}

	#[test]
	fn synthesizes_missing_ids() {
		let rows = vec![serde_json::json!({ "description": "no id on this row" })];
		let tickets = tickets_from_rows(&rows);

		assert_eq!(tickets[0].id, "row_0");
	}
}
