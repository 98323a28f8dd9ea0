// spellreg-list: List installed dictionaries.
//
// Prints one line per dictionary found in the search paths, in search
// order. A language installed in several directories is listed once per
// directory; the first one is the one spellreg-spell would load.
//
// Usage:
//   spellreg-list [-d DICT_PATH] [OPTIONS]
//
// Options:
//   -d, --dict-path PATH   Extra dictionary directory (repeatable)
//   -p, --paths            Also print each dictionary's path
//   --json                 Print the catalog as JSON
//   --search-paths         Print the directories that are searched
//   -h, --help             Print help

use std::io::{self, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_paths, args) = spellreg_cli::parse_dict_paths(&args);

    if spellreg_cli::wants_help(&args) {
        println!("spellreg-list: List installed dictionaries.");
        println!();
        println!("Usage: spellreg-list [-d DICT_PATH] [OPTIONS]");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Extra dictionary directory (repeatable)");
        println!("  -p, --paths            Also print each dictionary's path");
        println!("  --json                 Print the catalog as JSON");
        println!("  --search-paths         Print the directories that are searched");
        println!("  -h, --help             Print this help");
        return;
    }

    spellreg_cli::init_logging();
    let show_paths = args.iter().any(|a| a == "-p" || a == "--paths");
    let as_json = args.iter().any(|a| a == "--json");
    let show_search_paths = args.iter().any(|a| a == "--search-paths");

    let mut registry = spellreg_cli::load_registry(&dict_paths);
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if show_search_paths {
        for dir in registry.search_paths() {
            let _ = writeln!(out, "{}", dir.display());
        }
        return;
    }

    let catalog = registry.catalog(false);
    if as_json {
        match serde_json::to_string_pretty(catalog) {
            Ok(json) => {
                let _ = writeln!(out, "{json}");
            }
            Err(e) => spellreg_cli::fatal(&format!("failed to serialize catalog: {e}")),
        }
        return;
    }

    for entry in catalog {
        if show_paths {
            let _ = writeln!(out, "{}\t{}", entry.name, entry.path.display());
        } else {
            let _ = writeln!(out, "{}", entry.name);
        }
    }
}
