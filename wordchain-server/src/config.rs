use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

/// Prefix of every environment variable read by [`ServerConfig::from_env`].
pub const ENV_PREFIX: &str = "WORDCHAIN_";

/// Runtime configuration of the HTTP host.
///
/// Every field can be overridden with a `WORDCHAIN_{FIELD}` environment
/// variable, ex. `WORDCHAIN_PORT=8080`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
	/// Interface to bind.
	pub host: String,
	/// Port to bind.
	pub port: u16,
	/// Folder holding `<name>.dat` dictionaries, one word per line.
	pub data_dir: PathBuf,
	/// Chain order used when a load request does not give one.
	pub default_order: usize,
	/// Largest attempt budget a generate request may ask for.
	/// Requests for an unlimited budget are refused.
	pub max_attempts_cap: usize,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_owned(),
			port: 5000,
			data_dir: PathBuf::from("./data"),
			default_order: 3,
			max_attempts_cap: 1_000,
		}
	}
}

impl ServerConfig {
	/// Reads the configuration from the process environment.
	pub fn from_env() -> Result<Self, String> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Reads the configuration through `lookup`, falling back to defaults for
	/// missing keys.
	///
	/// # Errors
	/// Returns an error if a value cannot be parsed or fails validation.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut config = Self::default();
		if let Some(host) = lookup(&format!("{ENV_PREFIX}HOST")) {
			config.host = host;
		}
		config.port = parse_var(&lookup, "PORT", config.port)?;
		if let Some(dir) = lookup(&format!("{ENV_PREFIX}DATA_DIR")) {
			config.data_dir = wordchain_core::io::normalize_folder(&dir);
		}
		config.default_order = parse_var(&lookup, "ORDER", config.default_order)?;
		config.max_attempts_cap = parse_var(&lookup, "MAX_ATTEMPTS_CAP", config.max_attempts_cap)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks value ranges.
	pub fn validate(&self) -> Result<(), String> {
		if self.default_order == 0 {
			return Err(format!("{ENV_PREFIX}ORDER must be >= 1"));
		}
		if self.max_attempts_cap == 0 {
			return Err(format!("{ENV_PREFIX}MAX_ATTEMPTS_CAP must be >= 1"));
		}
		Ok(())
	}
}

fn parse_var<F, T>(lookup: &F, field: &str, default: T) -> Result<T, String>
where
	F: Fn(&str) -> Option<String>,
	T: FromStr,
	T::Err: Display,
{
	let key = format!("{ENV_PREFIX}{field}");
	match lookup(&key) {
		None => Ok(default),
		Some(raw) => raw
			.trim()
			.parse()
			.map_err(|e| format!("Invalid value for {key} ({raw:?}): {e}")),
	}
}
