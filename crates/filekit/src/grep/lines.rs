use std::io::{self, BufRead};

/// Default maximum fragment size, in bytes.
pub const DEFAULT_FRAGMENT_LEN: usize = 4096;
/// Smallest fragment size [`Fragments`] will use.
pub const MIN_FRAGMENT_LEN: usize = 2;

/// One physical read from a line source, with the line terminator removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub bytes: Vec<u8>,
    /// The logical line carries on in the next fragment.
    pub continues: bool,
}

impl Fragment {
    /// A fragment that does not end its line.
    pub fn prefix(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            continues: true,
        }
    }

    /// A fragment that completes its line.
    pub fn end(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            continues: false,
        }
    }
}

/// Splits a buffered reader into line fragments of at most `max_len` bytes.
///
/// A longer line comes back as one or more fragments flagged `continues`,
/// followed by a closing fragment. `\n` and `\r\n` terminators are
/// stripped. A trailing newline at the end of input does not produce an
/// extra empty line.
#[derive(Debug)]
pub struct Fragments<R> {
    reader: R,
    max_len: usize,
    // A `\r` held back from the end of a full fragment, in case the next
    // byte is the `\n` it belongs to.
    carry_cr: bool,
    done: bool,
}

impl<R: BufRead> Fragments<R> {
    pub fn new(reader: R) -> Self {
        Self::with_max_len(reader, DEFAULT_FRAGMENT_LEN)
    }

    /// `max_len` is clamped to at least two bytes, so a `\r` at the end of a
    /// full fragment can always be held back for its `\n`.
    pub fn with_max_len(reader: R, max_len: usize) -> Self {
        Self {
            reader,
            max_len: max_len.max(MIN_FRAGMENT_LEN),
            carry_cr: false,
            done: false,
        }
    }

    fn read_fragment(&mut self) -> io::Result<Option<Fragment>> {
        let mut buf = Vec::new();
        if std::mem::take(&mut self.carry_cr) {
            buf.push(b'\r');
        }

        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            if available.is_empty() {
                self.done = true;
                return Ok((!buf.is_empty()).then(|| Fragment::end(buf)));
            }

            let room = self.max_len - buf.len();
            let window = &available[..available.len().min(room)];

            if let Some(pos) = window.iter().position(|&b| b == b'\n') {
                buf.extend_from_slice(&window[..pos]);
                self.reader.consume(pos + 1);
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
                return Ok(Some(Fragment::end(buf)));
            }

            let taken = window.len();
            buf.extend_from_slice(window);
            self.reader.consume(taken);

            if buf.len() == self.max_len {
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                    self.carry_cr = true;
                }
                return Ok(Some(Fragment::prefix(buf)));
            }
        }
    }
}

impl<R: BufRead> Iterator for Fragments<R> {
    type Item = io::Result<Fragment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_fragment() {
            Ok(fragment) => fragment.map(Ok),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Folds a fragment stream into complete logical lines.
///
/// Fragments flagged `continues` accumulate until a closing fragment
/// arrives. If the stream ends while a line is still open, the accumulated
/// bytes are yielded as a final line. The first error ends the stream.
#[derive(Debug)]
pub struct LogicalLines<I> {
    fragments: I,
    pending: Vec<u8>,
    done: bool,
}

impl<I> LogicalLines<I>
where
    I: Iterator<Item = io::Result<Fragment>>,
{
    pub fn new(fragments: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            fragments: fragments.into_iter(),
            pending: Vec::new(),
            done: false,
        }
    }
}

impl<I> Iterator for LogicalLines<I>
where
    I: Iterator<Item = io::Result<Fragment>>,
{
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.fragments.next() {
                Some(Ok(fragment)) => {
                    self.pending.extend_from_slice(&fragment.bytes);
                    if !fragment.continues {
                        return Some(Ok(decode(std::mem::take(&mut self.pending))));
                    }
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    if self.pending.is_empty() {
                        return None;
                    }
                    return Some(Ok(decode(std::mem::take(&mut self.pending))));
                }
            }
        }
    }
}

fn decode(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
