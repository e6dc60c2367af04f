use rand::rngs::StdRng;
use rand::SeedableRng;

use wordchain_core::{Chain, ChainError, GenerateOptions};

const WORDS: &[&str] = &[
	"amsterdam", "antwerp", "athens", "barcelona", "belgrade", "berlin", "bern", "bordeaux",
	"bratislava", "brussels", "bucharest", "budapest", "cardiff", "copenhagen", "dublin",
	"edinburgh", "florence", "frankfurt", "geneva", "genoa", "glasgow", "hamburg", "helsinki",
	"krakow", "lisbon", "ljubljana", "london", "luxembourg", "lyon", "madrid", "marseille",
	"milan", "monaco", "munich", "naples", "nantes", "nice", "oslo", "palermo", "paris",
	"porto", "prague", "reykjavik", "riga", "rome", "rotterdam", "salzburg", "seville",
	"sofia", "stockholm", "tallinn", "toulouse", "turin", "valencia", "venice", "vienna",
	"vilnius", "warsaw", "zagreb", "zurich",
];

fn city_chain(order: usize) -> Chain {
	let mut chain = Chain::new(order).unwrap();
	chain.add_words(WORDS);
	chain
}

#[test]
fn generated_words_respect_length_bounds() {
	let chain = city_chain(2);
	let options = GenerateOptions::default()
		.with_min_length(2)
		.with_max_length(5)
		.with_max_attempts(0);
	let mut rng = StdRng::seed_from_u64(2024);

	for _ in 0..100 {
		let word = chain.generate_with_rng(&options, &mut rng).unwrap();
		let length = word.chars().count();
		assert!((2..=5).contains(&length), "{} has length {}", word, length);
	}
}

#[test]
fn min_length_alone_is_respected() {
	let chain = city_chain(2);
	let options = GenerateOptions::default().with_min_length(4).with_max_attempts(0);
	let mut rng = StdRng::seed_from_u64(11);

	for _ in 0..100 {
		assert!(chain.generate_with_rng(&options, &mut rng).unwrap().chars().count() >= 4);
	}
}

#[test]
fn generated_words_are_not_substrings_of_training_words() {
	let chain = city_chain(2);
	let options = GenerateOptions::default()
		.with_min_length(2)
		.with_max_length(8)
		.with_allow_duplicates(false)
		.with_max_attempts(0);
	let mut rng = StdRng::seed_from_u64(99);

	for _ in 0..100 {
		let word = chain.generate_with_rng(&options, &mut rng).unwrap();
		assert!(
			WORDS.iter().all(|training| !training.contains(word.as_str())),
			"{} is a substring of a training word",
			word
		);
	}
}

#[test]
fn unreachable_min_length_exhausts_budget() {
	let mut chain = Chain::new(2).unwrap();
	chain.add_words(["cat", "dog"]);
	let options = GenerateOptions::default().with_min_length(1_000).with_max_attempts(25);

	assert_eq!(
		chain.generate(&options),
		Err(ChainError::GenerationExhausted { attempts: 25 })
	);
}

#[test]
fn duplicate_index_answers_substring_queries() {
	let mut chain = Chain::new(3).unwrap();
	chain.add_words(["hello", "help"]);

	assert!(chain.is_duplicate("hel"));
	assert!(!chain.is_duplicate("xyz"));
	assert!(chain.is_duplicate("ello"));
	assert!(chain.is_duplicate("HELP"));
}

#[test]
fn parallel_and_sequential_builds_generate_the_same_words() {
	let words: Vec<String> = WORDS.iter().cycle().take(WORDS.len() * 7).map(|w| w.to_string()).collect();
	let parallel = Chain::from_words_parallel(3, &words).unwrap();
	let mut sequential = Chain::new(3).unwrap();
	sequential.add_words(&words);

	assert_eq!(parallel.node_count(), sequential.node_count());

	let options = GenerateOptions::default().with_allow_duplicates(false).with_max_attempts(0);
	let mut left = StdRng::seed_from_u64(5);
	let mut right = StdRng::seed_from_u64(5);
	for _ in 0..20 {
		assert_eq!(
			parallel.generate_with_rng(&options, &mut left),
			sequential.generate_with_rng(&options, &mut right)
		);
	}
}

#[test]
fn chain_keeps_learning_after_generation() {
	let mut chain = Chain::new(1).unwrap();
	chain.add_word("ab");
	let options = GenerateOptions::default().with_allow_duplicates(false).with_max_attempts(5);
	assert!(chain.generate(&options).is_err());

	// "ba" makes "aba", "bab", ... reachable and none of them is a substring
	chain.add_word("ba");
	let word = chain
		.generate_with_rng(
			&options.with_min_length(3).with_max_attempts(0),
			&mut StdRng::seed_from_u64(1),
		)
		.unwrap();
	assert!(word.chars().count() >= 3);
	assert!(!chain.is_duplicate(&word));
}

#[test]
fn chain_is_shareable_across_threads() {
	let chain = city_chain(3);
	let options = GenerateOptions::default().with_max_length(12).with_max_attempts(0);

	std::thread::scope(|scope| {
		for seed in 0..4u64 {
			let chain = &chain;
			scope.spawn(move || {
				let mut rng = StdRng::seed_from_u64(seed);
				for _ in 0..25 {
					let word = chain.generate_with_rng(&options, &mut rng).unwrap();
					assert!(word.chars().count() <= 12);
				}
			});
		}
	});
}
