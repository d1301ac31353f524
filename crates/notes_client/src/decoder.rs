//! Incremental decoding of the notes stream.
//!
//! The notes service answers a list request with JSON objects written back to
//! back, without an enclosing array. Records are decoded as soon as they are
//! complete so that the caller can render them before the body has finished
//! arriving.

use entities::Note;
use futures_util::{stream::BoxStream, Stream, StreamExt};

use crate::ListError;

/// Buffers body bytes and splits them into note records.
///
/// Decoded records are skipped with a read offset; the consumed prefix is
/// dropped once per [`NoteDecoder::push`].
#[derive(Debug, Default)]
pub struct NoteDecoder {
    buf: Vec<u8>,
    pos: usize,
}

impl NoteDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk of body bytes.
    pub fn push(&mut self, chunk: &[u8]) {
        if self.pos > 0 {
            self.buf.drain(..self.pos);
            self.pos = 0;
        }
        self.buf.extend_from_slice(chunk);
    }

    /// Decodes the next complete record.
    ///
    /// Returns `None` when the buffer holds no complete record yet, and
    /// `Some(Err(_))` when the buffered bytes can never form a valid record.
    pub fn next_record(&mut self) -> Option<Result<Note, serde_json::Error>> {
        let (record, consumed) = {
            let pending = &self.buf[self.pos..];
            let mut records = serde_json::Deserializer::from_slice(pending).into_iter::<Note>();
            let record = records.next();
            (record, records.byte_offset())
        };

        match record {
            None => {
                self.buf.clear();
                self.pos = 0;
                None
            }
            Some(Ok(note)) => {
                self.pos += consumed;
                Some(Ok(note))
            }
            Some(Err(e)) if e.is_eof() => None,
            Some(Err(e)) => Some(Err(e)),
        }
    }

    /// Bytes received but not yet decoded.
    fn pending(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    /// Checks that nothing but whitespace is left once the body has ended.
    pub fn finish(&self) -> Result<(), ListError> {
        let pending = self.pending();
        if pending.iter().all(u8::is_ascii_whitespace) {
            Ok(())
        } else {
            Err(ListError::Decode(format!(
                "unexpected end of stream with {} undecoded bytes",
                pending.len()
            )))
        }
    }
}

/// Turns a stream of body chunks into a stream of notes.
///
/// The returned stream ends after the first error it yields.
pub fn decode_notes<S, B, E>(chunks: S) -> BoxStream<'static, Result<Note, ListError>>
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let stream = async_stream::stream! {
        let mut chunks = Box::pin(chunks);
        let mut decoder = NoteDecoder::new();

        loop {
            while let Some(record) = decoder.next_record() {
                match record {
                    Ok(note) => yield Ok(note),
                    Err(e) => {
                        yield Err(ListError::Decode(e.to_string()));
                        return;
                    }
                }
            }

            match chunks.next().await {
                Some(Ok(chunk)) => decoder.push(chunk.as_ref()),
                Some(Err(e)) => {
                    yield Err(ListError::Transport(e.to_string()));
                    return;
                }
                None => {
                    if let Err(e) = decoder.finish() {
                        yield Err(e);
                    }
                    return;
                }
            }
        }
    };

    stream.boxed()
}
