use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use wapidx_reader::{DefinitionStore, Dictionary, SuggestionIndex, DEFAULT_SUGGESTION_LIMIT};

#[derive(Parser)]
#[command(name = "wapidx")]
#[command(about = "Query .wap definition stores and .idx suggestion indexes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the definition of a word
    Lookup {
        /// Path to the .wap file
        wap: PathBuf,
        /// Word to look up (case-sensitive)
        word: String,
    },

    /// List words starting with a prefix
    Suggest {
        /// Path to the .idx file
        idx: PathBuf,
        /// Prefix to complete (case-insensitive)
        prefix: String,
        /// Maximum number of suggestions
        #[arg(short, long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
        limit: usize,
    },

    /// Open a .wap/.idx pair, run the sanity check and print statistics
    Info {
        /// Path prefix of the pair, without extension (e.g. dicts/uk)
        prefix: PathBuf,
    },

    /// Print a random word
    Random {
        /// Path to the .idx file
        idx: PathBuf,
    },

    /// Print the word list in order
    Words {
        /// Path to the .idx file
        idx: PathBuf,
        /// Stop after this many words
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

fn run(command: Commands) -> wapidx_reader::Result<()> {
    match command {
        Commands::Lookup { wap, word } => {
            let mut store = DefinitionStore::open(&wap)?;
            println!("{}", store.lookup(&word)?);
        }
        Commands::Suggest { idx, prefix, limit } => {
            let mut index = SuggestionIndex::open(&idx)?;
            for word in index.suggest(&prefix, limit)? {
                println!("{}", word);
            }
        }
        Commands::Info { prefix } => {
            let mut dictionary = Dictionary::open(&prefix)?;
            let report = dictionary.verify()?;

            println!("Dictionary: {}", prefix.display());
            println!("{}", "=".repeat(60));
            println!("  Buckets: {}", dictionary.definitions.bucket_count());
            println!("  Suggestion chunks: {}", dictionary.suggestions.chunk_count());
            println!("  Words: {}", report.word_count);
            println!("  First word: {}", report.first_word);
            println!("  Last word: {}", report.last_word);
            println!("  Sanity lookups resolved: {}/2", report.definitions_found);

            dictionary.close();
        }
        Commands::Random { idx } => {
            let mut index = SuggestionIndex::open(&idx)?;
            println!("{}", index.random_word()?);
        }
        Commands::Words { idx, limit } => {
            let mut index = SuggestionIndex::open(&idx)?;
            for word in index.iter_words().take(limit.unwrap_or(usize::MAX)) {
                println!("{}", word?);
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_not_found() => {
            eprintln!("{}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
