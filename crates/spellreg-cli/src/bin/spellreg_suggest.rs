// spellreg-suggest: Generate spelling suggestions for words.
//
// Correctly spelled words are printed as-is; misspelled words are followed
// by their suggestions, best first.
//
// Usage:
//   spellreg-suggest [-d DICT_PATH] [-l LANGUAGE] [OPTIONS] [WORD...]
//
// Options:
//   -d, --dict-path PATH      Extra dictionary directory (repeatable)
//   -l, --language CODE       Dictionary to use (default: from locale)
//   -n, --max-suggestions N   Maximum number of suggestions (default: 5)
//   -h, --help                Print help

use std::io::{self, BufRead, Write};

use spellreg::Dictionary;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_paths, args) = spellreg_cli::parse_dict_paths(&args);
    let (language, args) = spellreg_cli::parse_language(&args);
    let (max_values, args) = spellreg_cli::take_option(&args, "-n", "--max-suggestions");

    if spellreg_cli::wants_help(&args) {
        println!("spellreg-suggest: Generate spelling suggestions.");
        println!();
        println!("Usage: spellreg-suggest [-d DICT_PATH] [-l LANGUAGE] [OPTIONS] [WORD...]");
        println!();
        println!("If WORD arguments are given, suggests for each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH     Extra dictionary directory (repeatable)");
        println!("  -l, --language CODE      Dictionary to use (default: from locale)");
        println!("  -n, --max-suggestions N  Maximum number of suggestions (default: 5)");
        println!("  -h, --help               Print this help");
        return;
    }

    spellreg_cli::init_logging();

    let max_suggestions: usize = match max_values.last() {
        Some(v) => v
            .parse()
            .unwrap_or_else(|_| spellreg_cli::fatal("invalid number for --max-suggestions")),
        None => 5,
    };
    let words: Vec<&String> = args.iter().filter(|a| !a.starts_with('-')).collect();

    let mut registry = spellreg_cli::load_registry(&dict_paths);
    let dict: &Dictionary = spellreg_cli::open_dictionary(&mut registry, &language)
        .unwrap_or_else(|e| spellreg_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let suggest_word = |word: &str, dict: &Dictionary, out: &mut io::BufWriter<io::StdoutLock<'_>>| {
        if dict.is_word_correct(word) {
            let _ = writeln!(out, "{word} (correct)");
            return;
        }
        let suggestions = dict.suggestions_for_word(word);
        if suggestions.is_empty() {
            let _ = writeln!(out, "{word}: (no suggestions)");
        } else {
            let _ = writeln!(out, "{word}:");
            for s in suggestions.iter().take(max_suggestions) {
                let _ = writeln!(out, "  {s}");
            }
        }
    };

    if words.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            suggest_word(word, dict, &mut out);
        }
    } else {
        for word in words {
            suggest_word(word, dict, &mut out);
        }
    }
}
