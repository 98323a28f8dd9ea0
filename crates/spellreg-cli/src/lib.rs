// spellreg-cli: shared utilities for CLI tools.

use std::process;

use spellreg::{Dictionary, Registry, SearchPaths};
use tracing_subscriber::EnvFilter;

/// Language used when neither `-l` nor the locale names one.
pub const FALLBACK_LANGUAGE: &str = "en_US";

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Route `tracing` output to stderr, filtered by `RUST_LOG`.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build the search path list and a registry over it.
///
/// Search order:
/// 1. `dict_paths` arguments, in the order given
/// 2. `SPELLREG_DICT_PATH` environment variable
/// 3. User and system Hunspell directories
pub fn load_registry(dict_paths: &[String]) -> Registry {
    Registry::with_hunspell(build_search_paths(dict_paths))
}

/// Load `language` from `registry`, describing what went wrong if it can't.
pub fn open_dictionary<'r>(
    registry: &'r mut Registry,
    language: &str,
) -> Result<&'r mut Dictionary, String> {
    let searched = registry
        .search_paths()
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    let dict = registry.dictionary(language).ok_or_else(|| {
        format!("could not find {language}.aff and {language}.dic in any of the search paths:\n{searched}")
    })?;
    if let Some(err) = dict.load_error() {
        return Err(format!("failed to load dictionary {language}: {err}"));
    }
    Ok(dict)
}

fn build_search_paths(dict_paths: &[String]) -> SearchPaths {
    let mut paths = SearchPaths::system_default();
    for dir in dict_paths.iter().rev() {
        paths.prepend(dir);
    }
    paths
}

/// Collect every value of a `--long=VALUE`, `--long VALUE` or `-s VALUE`
/// option.
///
/// Returns `(values, remaining_args)`.
pub fn take_option(args: &[String], short: &str, long: &str) -> (Vec<String>, Vec<String>) {
    let mut values = Vec::new();
    let mut remaining = Vec::new();
    let inline_prefix = format!("{long}=");
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix(&inline_prefix) {
            values.push(val.to_string());
        } else if arg == long || arg == short {
            match iter.next() {
                Some(val) => values.push(val.clone()),
                None => fatal(&format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (values, remaining)
}

/// Parse `-d PATH` / `--dict-path PATH` (repeatable).
pub fn parse_dict_paths(args: &[String]) -> (Vec<String>, Vec<String>) {
    take_option(args, "-d", "--dict-path")
}

/// Parse `-l CODE` / `--language CODE`, defaulting to the locale's language.
pub fn parse_language(args: &[String]) -> (String, Vec<String>) {
    let (mut values, remaining) = take_option(args, "-l", "--language");
    let language = values.pop().unwrap_or_else(default_language);
    (language, remaining)
}

/// Language of the current locale (`LC_ALL`, `LC_MESSAGES`, `LANG`), or
/// [`FALLBACK_LANGUAGE`].
pub fn default_language() -> String {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
        .and_then(|locale| language_of(&locale).map(str::to_string))
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string())
}

/// Strip codeset and modifier from a locale name (`de_DE.UTF-8@euro` -> `de_DE`).
///
/// `C` and `POSIX` have no language.
pub fn language_of(locale: &str) -> Option<&str> {
    let language = locale.split(['.', '@']).next().unwrap_or(locale);
    match language {
        "" | "C" | "POSIX" => None,
        _ => Some(language),
    }
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dict_paths_in_all_forms() {
        let (paths, rest) =
            parse_dict_paths(&args(&["-d", "/a", "word", "--dict-path=/b", "--dict-path", "/c"]));
        assert_eq!(paths, ["/a", "/b", "/c"]);
        assert_eq!(rest, ["word"]);
    }

    #[test]
    fn explicit_language_wins() {
        let (language, rest) = parse_language(&args(&["-l", "de_DE", "-s"]));
        assert_eq!(language, "de_DE");
        assert_eq!(rest, ["-s"]);
    }

    #[test]
    fn last_language_wins() {
        let (language, _) = parse_language(&args(&["--language=fr_FR", "-l", "nl_NL"]));
        assert_eq!(language, "nl_NL");
    }

    #[test]
    fn locale_names() {
        assert_eq!(language_of("en_GB.UTF-8"), Some("en_GB"));
        assert_eq!(language_of("de_DE@euro"), Some("de_DE"));
        assert_eq!(language_of("pt_BR"), Some("pt_BR"));
        assert_eq!(language_of("C.UTF-8"), None);
        assert_eq!(language_of("POSIX"), None);
    }

    #[test]
    fn explicit_dirs_are_searched_first() {
        let paths = build_search_paths(&args(&["/first", "/second"]));
        assert_eq!(paths.as_slice()[0], std::path::Path::new("/first"));
        assert_eq!(paths.as_slice()[1], std::path::Path::new("/second"));
    }

    #[test]
    fn help_flags() {
        assert!(wants_help(&args(&["-h"])));
        assert!(wants_help(&args(&["x", "--help"])));
        assert!(!wants_help(&args(&["-s"])));
    }

    #[test]
    fn missing_dictionary_error_lists_search_paths() {
        let dir = tempfile::tempdir().unwrap();
        let dir_arg = dir.path().display().to_string();
        let mut registry = load_registry(&[dir_arg.clone()]);
        let err = open_dictionary(&mut registry, "zz_ZZ").unwrap_err();
        assert!(err.contains("zz_ZZ.aff"));
        assert!(err.contains(&dir_arg));
    }
}
