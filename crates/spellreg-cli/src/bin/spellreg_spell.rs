// spellreg-spell: Check spelling of words from stdin.
//
// Reads words from stdin (one per line) and reports whether each word
// is correctly spelled:
//   C: word    (correct)
//   W: word    (wrong / misspelled)
//   S: word    (suggestion, with -s)
//
// Usage:
//   spellreg-spell [-d DICT_PATH] [-l LANGUAGE] [OPTIONS]
//
// Options:
//   -d, --dict-path PATH    Extra dictionary directory (repeatable)
//   -l, --language CODE     Dictionary to use (default: from locale)
//   -s, --suggest           Also print suggestions for misspelled words
//   -i, --ignore WORD       Accept WORD for this run (repeatable)
//   -h, --help              Print help

use std::io::{self, BufRead, Write};

use tracing::info;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_paths, args) = spellreg_cli::parse_dict_paths(&args);
    let (language, args) = spellreg_cli::parse_language(&args);
    let (ignored, args) = spellreg_cli::take_option(&args, "-i", "--ignore");

    if spellreg_cli::wants_help(&args) {
        println!("spellreg-spell: Check spelling of words from stdin.");
        println!();
        println!("Usage: spellreg-spell [-d DICT_PATH] [-l LANGUAGE] [OPTIONS]");
        println!();
        println!("Reads words from stdin (one per line). Prints:");
        println!("  C: word    (correct)");
        println!("  W: word    (misspelled)");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Extra dictionary directory (repeatable)");
        println!("  -l, --language CODE    Dictionary to use (default: from locale)");
        println!("  -s, --suggest          Also print suggestions for misspelled words");
        println!("  -i, --ignore WORD      Accept WORD for this run (repeatable)");
        println!("  -h, --help             Print this help");
        return;
    }

    spellreg_cli::init_logging();
    let show_suggestions = args.iter().any(|a| a == "-s" || a == "--suggest");

    let mut registry = spellreg_cli::load_registry(&dict_paths);
    let dict = spellreg_cli::open_dictionary(&mut registry, &language)
        .unwrap_or_else(|e| spellreg_cli::fatal(&e));
    for word in &ignored {
        dict.ignore_word(word);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut checked = 0usize;
    let mut misspelled = 0usize;

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
        checked += 1;

        if dict.is_word_correct(word) {
            let _ = writeln!(out, "C: {word}");
        } else {
            misspelled += 1;
            let _ = writeln!(out, "W: {word}");
            if show_suggestions {
                for suggestion in dict.suggestions_for_word(word) {
                    let _ = writeln!(out, "S: {suggestion}");
                }
            }
        }
    }

    info!(language = %language, checked, misspelled, "spell check finished");
}
