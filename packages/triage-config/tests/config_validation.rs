use toml::Value;

use triage_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_value() -> Value {
	toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.")
}

fn parse(value: &Value) -> Config {
	let raw = toml::to_string(value).expect("Failed to render config.");

	toml::from_str(&raw).expect("Failed to parse rendered config.")
}

fn set(value: &mut Value, path: &[&str], new: Value) {
	let mut current = value;

	for key in &path[..path.len() - 1] {
		current = current
			.as_table_mut()
			.and_then(|table| table.get_mut(*key))
			.expect("Sample config must contain the path.");
	}

	current
		.as_table_mut()
		.expect("Config node must be a table.")
		.insert(path[path.len() - 1].to_string(), new);
}

fn validation_message(result: triage_config::Result<()>) -> String {
	match result {
		Err(Error::Validation { message }) => message,
		other => panic!("Expected a validation error, got {other:?}."),
	}
}

#[test]
fn sample_config_is_valid() {
	let cfg = parse(&sample_value());

	triage_config::validate(&cfg).expect("Sample config must validate.");
	assert_eq!(cfg.retrieval.top_k_default, 3);
	assert_eq!(cfg.retrieval.fallback_penalty, 0.8);
}

#[test]
fn retrieval_defaults_apply_when_table_is_omitted() {
	let mut value = sample_value();

	value.as_table_mut().expect("Config must be a table.").remove("retrieval");

	let cfg = parse(&value);

	triage_config::validate(&cfg).expect("Defaults must validate.");
	assert_eq!(cfg.retrieval.top_k_default, 3);
	assert_eq!(cfg.retrieval.fallback_penalty, 0.8);
}

#[test]
fn rejects_zero_top_k_default() {
	let mut value = sample_value();

	set(&mut value, &["retrieval", "top_k_default"], Value::Integer(0));

	let message = validation_message(triage_config::validate(&parse(&value)));

	assert!(message.contains("top_k_default"));
}

#[test]
fn rejects_out_of_range_fallback_penalty() {
	for penalty in [0.0, -0.5, 1.5] {
		let mut value = sample_value();

		set(&mut value, &["retrieval", "fallback_penalty"], Value::Float(penalty));

		let message = validation_message(triage_config::validate(&parse(&value)));

		assert!(message.contains("fallback_penalty"));
	}
}

#[test]
fn rejects_zero_embedding_dimensions() {
	let mut value = sample_value();

	set(&mut value, &["providers", "embedding", "dimensions"], Value::Integer(0));

	let message = validation_message(triage_config::validate(&parse(&value)));

	assert!(message.contains("dimensions"));
}

#[test]
fn rejects_empty_api_key() {
	let mut value = sample_value();

	set(&mut value, &["providers", "suggestion", "api_key"], Value::String(" ".to_string()));

	let message = validation_message(triage_config::validate(&parse(&value)));

	assert!(message.contains("suggestion"));
}

#[test]
fn load_trims_trailing_slash_from_api_base() {
	let mut value = sample_value();

	set(
		&mut value,
		&["providers", "embedding", "api_base"],
		Value::String("https://api.openai.com/".to_string()),
	);

	let dir = std::env::temp_dir().join(format!("triage-config-test-{}", std::process::id()));

	std::fs::create_dir_all(&dir).expect("Failed to create temp dir.");

	let path = dir.join("config.toml");

	std::fs::write(&path, toml::to_string(&value).expect("Failed to render config."))
		.expect("Failed to write config.");

	let cfg = triage_config::load(&path).expect("Config must load.");

	assert_eq!(cfg.providers.embedding.api_base, "https://api.openai.com");

	std::fs::remove_dir_all(&dir).ok();
}
