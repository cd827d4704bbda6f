use linereader::LineReader;
use std::io::{self, Read};

/// Hands `handler` each batch of whole lines pulled off `reader`.
pub fn for_each_batch<R, F>(reader: R, mut handler: F) -> io::Result<()>
where
    R: Read,
    F: FnMut(&[u8]),
{
    let mut lines = LineReader::new(reader);
    while let Some(batch) = lines.next_batch() {
        handler(batch?);
    }
    Ok(())
}

/// Like [`for_each_batch`] but decoded to text. A character is never split
/// between two chunks, and undecodable bytes come through as U+FFFD.
pub fn for_each_chunk<R, F>(reader: R, mut handler: F) -> io::Result<()>
where
    R: Read,
    F: FnMut(&str),
{
    let mut carry = Utf8Carry::default();
    let mut text = String::new();
    for_each_batch(reader, |bytes| {
        text.clear();
        carry.decode(bytes, &mut text);
        if !text.is_empty() {
            handler(&text);
        }
    })?;
    text.clear();
    carry.finish(&mut text);
    if !text.is_empty() {
        handler(&text);
    }
    Ok(())
}

/// Streaming UTF-8 decoder that holds back an unfinished sequence at the
/// end of one buffer until the next one arrives. A byte order mark at the
/// very start of the stream is dropped.
#[derive(Debug, Default)]
pub struct Utf8Carry {
    pending: Vec<u8>,
    started: bool,
}

impl Utf8Carry {
    pub fn decode(&mut self, bytes: &[u8], out: &mut String) {
        let start = out.len();
        self.push(bytes, out);
        if !self.started && out.len() > start {
            self.started = true;
            if out[start..].starts_with('\u{FEFF}') {
                out.replace_range(start..start + '\u{FEFF}'.len_utf8(), "");
            }
        }
    }

    fn push(&mut self, bytes: &[u8], out: &mut String) {
        if self.pending.is_empty() {
            let rest = push_utf8(bytes, out);
            self.pending.extend_from_slice(rest);
        } else {
            let mut joined = std::mem::take(&mut self.pending);
            joined.extend_from_slice(bytes);
            let rest = push_utf8(&joined, out);
            self.pending.extend_from_slice(rest);
        }
    }

    /// End of input: a sequence still pending will never complete.
    pub fn finish(&mut self, out: &mut String) {
        if !self.pending.is_empty() {
            out.push(char::REPLACEMENT_CHARACTER);
            self.pending.clear();
        }
    }
}

// returns the incomplete tail, at most three bytes
fn push_utf8<'a>(mut bytes: &'a [u8], out: &mut String) -> &'a [u8] {
    loop {
        match std::str::from_utf8(bytes) {
            Ok(text) => {
                out.push_str(text);
                return &[];
            }
            Err(err) => {
                let (valid, rest) = bytes.split_at(err.valid_up_to());
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match err.error_len() {
                    Some(len) => {
                        out.push(char::REPLACEMENT_CHARACTER);
                        bytes = &rest[len..];
                    }
                    None => return rest,
                }
            }
        }
    }
}

#[cfg(test)]
struct Trickle<'a>(&'a [u8]);

#[cfg(test)]
impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match (self.0.split_first(), buf.first_mut()) {
            (Some((byte, rest)), Some(slot)) => {
                *slot = *byte;
                self.0 = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[test]
fn test_carry_joins_split_characters() {
    let bytes = "né".as_bytes();
    let mut carry = Utf8Carry::default();
    let mut out = String::new();
    carry.decode(&bytes[..2], &mut out);
    assert_eq!(out, "n");
    carry.decode(&bytes[2..], &mut out);
    assert_eq!(out, "né");
    carry.finish(&mut out);
    assert_eq!(out, "né");
}

#[test]
fn test_carry_replaces_bad_bytes() {
    let mut carry = Utf8Carry::default();
    let mut out = String::new();
    carry.decode(b"a\xffb", &mut out);
    assert_eq!(out, "a\u{FFFD}b");
    carry.decode(b"\xe2\x82", &mut out);
    carry.finish(&mut out);
    assert_eq!(out, "a\u{FFFD}b\u{FFFD}");
}

#[test]
fn test_leading_bom_is_dropped() {
    let bytes = "\u{FEFF}ab\u{FEFF}".as_bytes();
    let mut carry = Utf8Carry::default();
    let mut out = String::new();
    carry.decode(&bytes[..1], &mut out);
    carry.decode(&bytes[1..4], &mut out);
    assert_eq!(out, "a");
    carry.decode(&bytes[4..], &mut out);
    carry.finish(&mut out);
    assert_eq!(out, "ab\u{FEFF}");

    let mut seen = String::new();
    for_each_chunk("\u{FEFF}hi\n".as_bytes(), |chunk| seen.push_str(chunk)).unwrap();
    assert_eq!(seen, "hi\n");
}

#[test]
fn test_chunks_cover_the_whole_input() {
    let input = "héllo wörld\n日本語\nno newline at the end 🦀";
    let mut chunks = 0;
    let mut seen = String::new();
    for_each_chunk(Trickle(input.as_bytes()), |chunk| {
        chunks += 1;
        seen.push_str(chunk);
    })
    .unwrap();
    assert!(chunks > 0);
    assert_eq!(seen, input);
}

#[test]
fn test_empty_input_has_no_chunks() {
    let mut chunks = 0;
    for_each_chunk(io::empty(), |_| chunks += 1).unwrap();
    assert_eq!(chunks, 0);
}

#[test]
fn test_read_errors_propagate() {
    struct Broken;
    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "pipe went away"))
        }
    }
    let err = for_each_chunk(Broken, |_| {}).unwrap_err();
    assert_eq!(err.to_string(), "pipe went away");
}
