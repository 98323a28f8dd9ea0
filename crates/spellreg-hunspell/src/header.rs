// Affix file header directives.
//
// Only the directives needed before the file can be decoded are read here.
// Everything else is left to the engine once the text is UTF-8.

/// UTF-8 byte order mark, tolerated at the start of an affix file.
const BOM: &[u8] = b"\xef\xbb\xbf";

/// Find the encoding name declared by a `SET` directive.
///
/// Works on raw bytes since the file's encoding is exactly what is being
/// looked for; directive keywords and encoding names are ASCII in every
/// encoding Hunspell supports.
pub fn declared_encoding(affix: &[u8]) -> Option<String> {
    let affix = affix.strip_prefix(BOM).unwrap_or(affix);
    affix.split(|&b| b == b'\n').find_map(|line| {
        let mut fields = line
            .split(|b| b.is_ascii_whitespace())
            .filter(|field| !field.is_empty());
        if fields.next()? != b"SET" {
            return None;
        }
        fields
            .next()
            .map(|name| String::from_utf8_lossy(name).into_owned())
    })
}

/// Rewrite the `SET` directive of already-decoded affix text to `UTF-8`.
///
/// Returns the text unchanged when there is no directive.
pub fn with_utf8_directive(affix: &str) -> String {
    let mut out = String::with_capacity(affix.len());
    for line in affix.split_inclusive('\n') {
        if line.split_whitespace().next() == Some("SET") {
            out.push_str("SET UTF-8");
            if line.ends_with("\r\n") {
                out.push_str("\r\n");
            } else if line.ends_with('\n') {
                out.push('\n');
            }
        } else {
            out.push_str(line);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_set_directive() {
        let aff = b"# comment\nSET ISO8859-1\nTRY esiarntolcdugmphbyfvkwz\n";
        assert_eq!(declared_encoding(aff).as_deref(), Some("ISO8859-1"));
    }

    #[test]
    fn tolerates_bom_crlf_and_indentation() {
        let aff = b"\xef\xbb\xbf  SET\tUTF-8\r\nFLAG long\r\n";
        assert_eq!(declared_encoding(aff).as_deref(), Some("UTF-8"));
    }

    #[test]
    fn missing_directive() {
        assert_eq!(declared_encoding(b"TRY abc\nPFX A Y 1\n"), None);
        assert_eq!(declared_encoding(b""), None);
    }

    #[test]
    fn directive_without_value() {
        assert_eq!(declared_encoding(b"SET\n"), None);
    }

    #[test]
    fn keyword_must_match_exactly() {
        assert_eq!(declared_encoding(b"SETX UTF-8\n"), None);
    }

    #[test]
    fn rewrites_only_set_line() {
        let aff = "SET ISO8859-15\r\nTRY aeio\nKEY qwe\n";
        assert_eq!(with_utf8_directive(aff), "SET UTF-8\r\nTRY aeio\nKEY qwe\n");
    }

    #[test]
    fn rewrite_without_directive_is_identity() {
        let aff = "TRY aeio\n";
        assert_eq!(with_utf8_directive(aff), aff);
    }
}
