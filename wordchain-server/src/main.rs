use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::{get, middleware, put, web, App, HttpResponse, HttpServer, Responder};
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use wordchain_core::io::{get_filename, list_files, read_dictionary};
use wordchain_core::model::generate_options::limit_from_signed;
use wordchain_core::{Chain, ChainError, GenerateOptions};

mod config;

use config::ServerConfig;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize, Default)]
struct GenerateParams {
	min_length: Option<usize>,
	max_length: Option<i64>, // <= 0 -> unlimited
	allow_duplicates: Option<bool>,
	max_attempts: Option<i64>, // <= 0 -> unlimited, refused by this host
	seed: Option<u64> // reproducible output when set
}

#[derive(Deserialize)]
struct LoadQuery {
	names: Option<String>,
	order: Option<usize>
}

/// Chain currently served, with the dictionaries it was built from.
#[derive(Default)]
struct SharedData {
	chain: Option<Chain>,
	names: Vec<String>
}

impl GenerateParams {
	/// Maps the query onto generation options, enforcing the host's attempt cap.
	fn options(&self, max_attempts_cap: usize) -> Result<GenerateOptions, String> {
		let defaults = GenerateOptions::default();
		let max_attempts = self
			.max_attempts
			.map(limit_from_signed)
			.unwrap_or(defaults.max_attempts);
		if max_attempts == 0 || max_attempts > max_attempts_cap {
			return Err(format!("max_attempts must be between 1 and {max_attempts_cap}"));
		}

		let options = GenerateOptions {
			min_length: self.min_length.unwrap_or(defaults.min_length),
			max_length: self.max_length.map(limit_from_signed).unwrap_or(defaults.max_length),
			allow_duplicates: self.allow_duplicates.unwrap_or(defaults.allow_duplicates),
			max_attempts,
		};
		options.validate().map_err(|e| e.to_string())?;
		Ok(options)
	}
}

/// Splits a comma separated list of dictionary names.
///
/// Names are file stems inside the data folder: path separators and `..`
/// are refused.
fn parse_names(raw: Option<&str>) -> Result<Vec<&str>, String> {
	let names: Vec<&str> = raw
		.unwrap_or_default()
		.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.collect();

	if names.is_empty() {
		return Err("Missing or empty dictionary name".into());
	}
	if let Some(bad) = names.iter().find(|n| n.contains(['/', '\\']) || n.contains("..")) {
		return Err(format!("Invalid dictionary name: {bad}"));
	}
	Ok(names)
}

/// Builds one chain out of every named dictionary, in the given order.
fn build_chain(config: &ServerConfig, names: &[&str], order: usize) -> Result<Chain, Box<dyn std::error::Error>> {
	let mut words = Vec::new();
	for name in names {
		let path = config.data_dir.join(format!("{name}.dat"));
		let mut dictionary = read_dictionary(&path)
			.map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
		info!("read {} words from {}", dictionary.len(), path.display());
		words.append(&mut dictionary);
	}
	Ok(Chain::from_words_parallel(order, &words)?)
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a word from the loaded chain based on query parameters.
/// Returns the word as the response body.
#[get("/v1/generate")]
async fn get_generated(
	data: web::Data<RwLock<SharedData>>,
	config: web::Data<ServerConfig>,
	query: web::Query<GenerateParams>,
) -> impl Responder {
	let options = match query.options(config.max_attempts_cap) {
		Ok(o) => o,
		Err(e) => return HttpResponse::BadRequest().body(e)
	};

	let shared_data = match data.read() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};
	let chain = match &shared_data.chain {
		Some(c) => c,
		None => return HttpResponse::Conflict().body("No dictionary loaded"),
	};

	let result = match query.seed {
		Some(seed) => chain.generate_with_rng(&options, &mut StdRng::seed_from_u64(seed)),
		None => chain.generate(&options),
	};

	match result {
		Ok(word) => HttpResponse::Ok().body(word),
		Err(e @ ChainError::GenerationExhausted { .. }) => {
			warn!("{e}");
			HttpResponse::UnprocessableEntity().body(e.to_string())
		}
		Err(e @ ChainError::InvalidArgument(_)) => HttpResponse::BadRequest().body(e.to_string()),
	}
}

#[get("/v1/dictionaries")]
async fn get_dictionaries(config: web::Data<ServerConfig>) -> impl Responder {
	match list_files(&config.data_dir, "dat") {
		Ok(files) => {
			let names: Vec<String> = files.iter().filter_map(|f| get_filename(f).ok()).collect();
			HttpResponse::Ok().body(names.join("\n"))
		}
		Err(e) => {
			error!("failed to list {}: {e}", config.data_dir.display());
			HttpResponse::InternalServerError().body("Failed to list dictionaries")
		}
	}
}

#[get("/v1/loaded_dictionaries")]
async fn get_loaded_dictionaries(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};
	HttpResponse::Ok().body(shared_data.names.join("\n"))
}

/// HTTP PUT endpoint `/v1/load_dictionaries`
///
/// Builds a new chain from `names` and replaces the served one. The chain is
/// built before taking the write lock, so generation keeps running meanwhile.
#[put("/v1/load_dictionaries")]
async fn put_dictionaries(
	data: web::Data<RwLock<SharedData>>,
	config: web::Data<ServerConfig>,
	query: web::Query<LoadQuery>,
) -> impl Responder {
	let names = match parse_names(query.names.as_deref()) {
		Ok(n) => n,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};
	let order = query.order.unwrap_or(config.default_order);
	if order == 0 {
		return HttpResponse::BadRequest().body("order must be >= 1");
	}

	let chain = match build_chain(&config, &names, order) {
		Ok(c) => c,
		Err(e) => {
			error!("{e}");
			return HttpResponse::InternalServerError().body(format!("Failed to load dictionaries: {e}"));
		}
	};
	info!("loaded {:?} (order {}, {} states)", names, order, chain.node_count());

	let mut shared_data = match data.write() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};
	shared_data.chain = Some(chain);
	shared_data.names = names.iter().map(|n| (*n).to_owned()).collect();

	HttpResponse::Ok().body("Dictionaries loaded successfully")
}

fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated)
		.service(get_dictionaries)
		.service(put_dictionaries)
		.service(get_loaded_dictionaries);
}

/// Main entry point for the server.
///
/// Reads `WORDCHAIN_*` settings, wraps the served chain in a `RwLock` so
/// generate requests run concurrently, and starts an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let config = ServerConfig::from_env()
		.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
	info!("starting with {:?}", config);

	let bind = (config.host.clone(), config.port);
	let shared_data = web::Data::new(RwLock::new(SharedData::default()));
	let config = web::Data::new(config);

	HttpServer::new(move || {
		let cors = Cors::default()
			.allow_any_origin()
			.allowed_methods(vec!["GET", "PUT"])
			.max_age(3600);
		App::new()
			.wrap(cors)
			.wrap(middleware::Logger::default())
			.app_data(shared_data.clone())
			.app_data(config.clone())
			.configure(configure)
	})
		.bind(bind)?
		.run()
		.await
}
