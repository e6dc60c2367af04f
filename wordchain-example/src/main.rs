use std::env;

use log::info;
use wordchain_core::io::read_dictionary;
use wordchain_core::{Chain, ChainError, GenerateOptions};

/// Used when no dictionary file is given on the command line.
const FALLBACK_WORDS: &[&str] = &[
    "amber", "anchor", "bramble", "candle", "cobble", "dapple", "ember", "fennel", "gable",
    "hollow", "juniper", "kettle", "lantern", "marble", "nettle", "orchard", "pebble",
    "quiver", "rubble", "saddle", "thistle", "umber", "willow", "yarrow",
];

const USAGE: &str = "Usage: wordchain-example [dictionary.dat] [order]";

/// Parses the optional order argument, defaulting to 3.
fn parse_order(raw: Option<&str>) -> Result<usize, String> {
    match raw {
        None => Ok(3),
        Some(raw) => match raw.parse::<usize>() {
            Ok(0) => Err("Invalid order \"0\": must be >= 1".to_owned()),
            Ok(order) => Ok(order),
            Err(e) => Err(format!("Invalid order {:?}: {}", raw, e)),
        },
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let words: Vec<String> = match args.next() {
        Some(path) => read_dictionary(&path)?,
        None => FALLBACK_WORDS.iter().map(|w| w.to_string()).collect(),
    };

    // Number of trailing characters used as context: lower is more random,
    // higher sticks closer to the dictionary
    let order = match parse_order(args.next().as_deref()) {
        Ok(order) => order,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            return Err(e.into());
        }
    };

    let chain = Chain::from_words_parallel(order, &words)?;
    info!("built order {} chain with {} states from {} words", order, chain.node_count(), words.len());

    // Words between 4 and 9 characters, never a piece of a dictionary word,
    // giving up after 100 rejected walks
    let options = GenerateOptions::default()
        .with_min_length(4)
        .with_max_length(9)
        .with_allow_duplicates(false)
        .with_max_attempts(100);

    // Inverted bounds are refused before any walk
    match chain.generate(&options.with_min_length(10)) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Refused: {}", e),
    }

    for i in 0..10 {
        match chain.generate(&options) {
            Ok(word) => println!("Generated word {}: {}", i + 1, word),
            Err(e @ ChainError::GenerationExhausted { .. }) => println!("Generated word {}: <{}>", i + 1, e),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
