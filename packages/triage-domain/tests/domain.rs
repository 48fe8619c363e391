use triage_domain::{Corpus, ingest};

#[test]
fn ingested_rows_build_an_aligned_corpus() {
	let rows = vec![
		serde_json::json!({
			"ticket_id": "T-1",
			"issue": "VPN down",
			"description": "Cannot reach the office network.",
			"category": "network",
			"solution_description": "Restarted the VPN concentrator.",
			"resolved": "true",
		}),
		serde_json::json!({
			"ticket_id": "T-2",
			"description": "Monitor flickers.",
			"category": "hardware",
		}),
		serde_json::json!({ "ticket_id": "T-3" }),
	];
	let tickets = ingest::tickets_from_rows(&rows);

	assert_eq!(tickets.len(), 2);

	let embeddings = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
	let corpus = Corpus::build(tickets, embeddings).expect("corpus must build");

	assert_eq!(corpus.len(), 2);
	assert_eq!(corpus.dimensions(), 2);
	assert!(corpus.ticket(0).resolved);
	assert!(!corpus.ticket(1).resolved);
	assert!(corpus.has_category("hardware"));
	assert!(!corpus.has_category("software"));
}
