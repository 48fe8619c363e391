use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

/// A retrieved ticket reduced to what the suggestion prompt needs.
#[derive(Clone, Debug)]
pub struct SuggestionExample {
	pub problem: String,
	pub solution: String,
}

pub async fn suggest(
	cfg: &triage_config::SuggestionProviderConfig,
	query: &str,
	examples: &[SuggestionExample],
) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"max_tokens": cfg.max_tokens,
		"messages": [{ "role": "user", "content": build_prompt(query, examples) }],
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_suggestion_response(json)
}

fn build_prompt(query: &str, examples: &[SuggestionExample]) -> String {
	let history = examples
		.iter()
		.map(|example| format!("Problem: {}\nSolution: {}", example.problem, example.solution))
		.collect::<Vec<_>>()
		.join("\n");

	format!(
		"You are an IT helpdesk assistant. Based on the following past tickets, provide a \
		 concise suggestion to help an agent solve a new ticket with this problem: \
		 '{query}'\n\nPast tickets:\n{history}"
	)
}

fn parse_suggestion_response(json: Value) -> Result<String> {
	let content = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.ok_or_else(|| eyre::eyre!("Suggestion response is missing message content."))?;

	Ok(content.trim().to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_first_choice_content() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": " Restart the VPN concentrator. " } }
			]
		});
		let parsed = parse_suggestion_response(json).expect("parse failed");
		assert_eq!(parsed, "Restart the VPN concentrator.");
	}

	#[test]
	fn prompt_includes_query_and_examples() {
		let examples = vec![SuggestionExample {
			problem: "VPN down".to_string(),
			solution: "Restart concentrator".to_string(),
		}];
		let prompt = build_prompt("VPN unstable", &examples);

		assert!(prompt.contains("VPN unstable"));
		assert!(prompt.contains("Problem: VPN down"));
		assert!(prompt.contains("Solution: Restart concentrator"));
	}

	#[test]
	fn rejects_response_without_choices() {
		assert!(parse_suggestion_response(serde_json::json!({})).is_err());
	}
}
