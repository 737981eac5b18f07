pub mod lines;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use regex::Regex;

use crate::error::{Error, Result};
use lines::{DEFAULT_FRAGMENT_LEN, Fragments, LogicalLines};

/// Options for [`grep_file_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrepOptions {
    /// Largest physical read, in bytes (at least 2). Longer lines are
    /// reassembled.
    pub fragment_len: usize,
}

impl Default for GrepOptions {
    fn default() -> Self {
        Self {
            fragment_len: DEFAULT_FRAGMENT_LEN,
        }
    }
}

/// Return every line of `path` matching `pattern`, in file order.
///
/// Works like `grep -E`: `grep_file("^hello", "hello.txt")`. Lines come back
/// without their terminators. The pattern is compiled before the file is
/// opened, so a bad pattern is reported even when the file is missing.
pub fn grep_file(pattern: &str, path: impl AsRef<Path>) -> Result<Vec<String>> {
    grep_file_with(pattern, path, GrepOptions::default())
}

/// [`grep_file`] with explicit options.
pub fn grep_file_with(
    pattern: &str,
    path: impl AsRef<Path>,
    options: GrepOptions,
) -> Result<Vec<String>> {
    let path = path.as_ref();
    let re = Regex::new(pattern).map_err(|source| Error::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;
    let file = File::open(path).map_err(|e| Error::open(path, e))?;

    let reader = BufReader::new(file);
    let matches = matching_lines(&re, Fragments::with_max_len(reader, options.fragment_len))
        .map_err(|e| Error::io(path, e))?;

    tracing::debug!(
        "{} line(s) in {} matched {pattern:?}",
        matches.len(),
        path.display()
    );
    Ok(matches)
}

/// Return every line from `reader` matching `re`.
pub fn grep_reader<R: BufRead>(re: &Regex, reader: R) -> io::Result<Vec<String>> {
    matching_lines(re, Fragments::new(reader))
}

fn matching_lines<I>(re: &Regex, fragments: I) -> io::Result<Vec<String>>
where
    I: Iterator<Item = io::Result<lines::Fragment>>,
{
    let mut matches = Vec::new();
    for line in LogicalLines::new(fragments) {
        let line = line?;
        if re.is_match(&line) {
            matches.push(line);
        }
    }
    Ok(matches)
}
