//! `require` directive recognition.
//!
//! A directive occupies a whole line:
//!
//! ```text
//! require 'Folder 2/File 2-1'
//! ```
//!
//! The keyword must be exactly `require` and the rest of the line must be a
//! single quoted path. The quoted path may contain spaces but not another
//! quote, so two directives on one line, trailing tokens or an unterminated
//! quote all cause the line to be ignored. No escapes are processed.

use camino::Utf8Path;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

/// Keyword introducing a dependency declaration.
pub const KEYWORD: &str = "require";

const QUOTE: char = '\'';

/// Extract the quoted path from `line` if it is a well-formed directive.
///
/// # Examples
///
/// ```
/// use catena::directive::parse_line;
///
/// assert_eq!(parse_line("require 'Folder 2/File 2-1'"), Some("Folder 2/File 2-1"));
/// assert_eq!(parse_line("require 'a' 'b'"), None);
/// assert_eq!(parse_line("requires 'a'"), None);
/// ```
#[must_use]
pub fn parse_line(line: &str) -> Option<&str> {
    let (keyword, rest) = line.trim().split_once(char::is_whitespace)?;
    if keyword != KEYWORD {
        return None;
    }
    let quoted = rest.trim_start();
    let inner = quoted.strip_prefix(QUOTE)?.strip_suffix(QUOTE)?;
    if inner.contains(QUOTE) {
        return None;
    }
    Some(inner)
}

/// Collect the raw directive paths from `lines`, in line order.
#[must_use]
pub fn parse_directives<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| parse_line(line.as_ref()).map(str::to_owned))
        .collect()
}

/// Read `path` and return the raw paths of every directive it declares.
///
/// Lines that are not valid UTF-8 are decoded lossily; a replacement
/// character can never form part of a matching directive keyword.
///
/// # Errors
///
/// Returns an [`io::Error`] if the file cannot be opened or read.
pub fn read_directives(path: &Utf8Path) -> io::Result<Vec<String>> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut raw = Vec::new();
    let mut directives = Vec::new();
    while reader.read_until(b'\n', &mut raw)? != 0 {
        let line = String::from_utf8_lossy(&raw);
        if let Some(target) = parse_line(&line) {
            directives.push(target.to_owned());
        }
        raw.clear();
    }
    Ok(directives)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "tests fail fast on setup errors")]
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("require 'Folder 2/File 2-1'", Some("Folder 2/File 2-1"))]
    #[case("require 'a.txt'", Some("a.txt"))]
    #[case("  require   'a.txt'  ", Some("a.txt"))]
    #[case("require\t'a.txt'", Some("a.txt"))]
    #[case("require 'a.txt'\r", Some("a.txt"))]
    #[case("require ''", Some(""))]
    #[case("require 'a' 'b'", None)]
    #[case("require 'a' extra", None)]
    #[case("require a.txt", None)]
    #[case("require 'a.txt", None)]
    #[case("require a.txt'", None)]
    #[case("require '", None)]
    #[case("require", None)]
    #[case("require \"a.txt\"", None)]
    #[case("Require 'a.txt'", None)]
    #[case("requires 'a.txt'", None)]
    #[case("# require 'a.txt'", None)]
    #[case("", None)]
    fn parse_line_matches_strictly(#[case] line: &str, #[case] expected: Option<&str>) {
        assert_eq!(parse_line(line), expected);
    }

    #[test]
    fn parse_directives_preserves_line_order() {
        let lines = [
            "require 'Folder 1/File 1-1'",
            "In pretium dictum lacinia.",
            "require 'Folder 2/File 2-1'",
            "require 'Folder 1/File 1-1'",
        ];
        assert_eq!(
            parse_directives(lines),
            vec!["Folder 1/File 1-1", "Folder 2/File 2-1", "Folder 1/File 1-1"]
        );
    }

    #[test]
    fn read_directives_handles_crlf_and_invalid_utf8() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("file");
        std::fs::write(&path, b"\xff\xfe junk\r\nrequire 'x/y'\r\ntext\nrequire 'z'")
            .expect("write fixture");
        let utf8 = Utf8Path::from_path(&path).expect("utf8 path");

        let directives = read_directives(utf8).expect("read directives");
        assert_eq!(directives, vec!["x/y", "z"]);
    }

    #[test]
    fn read_directives_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent");
        let utf8 = Utf8Path::from_path(&path).expect("utf8 path");
        assert!(read_directives(utf8).is_err());
    }
}
