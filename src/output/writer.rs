//! Message writers

use super::messages::Message;
use crate::error::Result;
use crate::types::{JsonValue, Record};
use chrono::Utc;
use std::io::{BufWriter, Stdout, Write};

/// Where the sync sends schemas, records and state
pub trait MessageWriter {
    /// Write a single message
    fn write_message(&mut self, message: Message) -> Result<()>;

    /// Flush buffered output
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Announce a stream's schema; must precede its records
    fn write_schema(
        &mut self,
        stream: &str,
        schema: &JsonValue,
        key_properties: &[String],
    ) -> Result<()> {
        self.write_message(Message::schema(
            stream,
            schema.clone(),
            key_properties.iter().cloned(),
        ))
    }

    /// Emit a page of records, all stamped with the same extraction time
    fn write_records(&mut self, stream: &str, records: Vec<Record>) -> Result<()> {
        let time_extracted = Utc::now();
        for record in records {
            self.write_message(Message::record(stream, record, time_extracted))?;
        }
        Ok(())
    }

    /// Emit the state to resume from and flush it out
    fn write_state(&mut self, state: &JsonValue) -> Result<()> {
        self.write_message(Message::state(state.clone()))?;
        self.flush()
    }
}

/// Writes one JSON-encoded message per line
#[derive(Debug)]
pub struct JsonLinesWriter<W: Write> {
    inner: W,
    written: usize,
}

impl JsonLinesWriter<BufWriter<Stdout>> {
    /// Buffered writer on stdout
    pub fn stdout() -> Self {
        Self::new(BufWriter::new(std::io::stdout()))
    }
}

impl<W: Write> JsonLinesWriter<W> {
    /// Wrap an `io::Write`
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Number of messages written so far
    pub fn messages_written(&self) -> usize {
        self.written
    }

    /// Unwrap the underlying writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> MessageWriter for JsonLinesWriter<W> {
    fn write_message(&mut self, message: Message) -> Result<()> {
        serde_json::to_writer(&mut self.inner, &message)?;
        self.inner.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}

/// Keeps every message in memory
#[derive(Debug, Default)]
pub struct MemoryWriter {
    /// Messages in emission order
    pub messages: Vec<Message>,
}

impl MemoryWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Records emitted for a stream, in order
    pub fn records(&self, stream: &str) -> Vec<&Record> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::Record {
                    stream: s, record, ..
                } if s == stream => Some(record),
                _ => None,
            })
            .collect()
    }

    /// Every state value emitted
    pub fn states(&self) -> Vec<&JsonValue> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::State { value } => Some(value),
                _ => None,
            })
            .collect()
    }

    /// Streams that had a schema emitted, in order
    pub fn schema_streams(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.is_schema())
            .filter_map(Message::stream)
            .collect()
    }
}

impl MessageWriter for MemoryWriter {
    fn write_message(&mut self, message: Message) -> Result<()> {
        self.messages.push(message);
        Ok(())
    }
}
