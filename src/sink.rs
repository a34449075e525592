use std::io::Write;

use anyhow::{Context, Result};

use crate::error::RowSkip;
use crate::model::Record;

/// Where extracted records end up.
pub trait RecordSink {
    fn accept(&mut self, record: &Record) -> Result<()>;

    /// Skipped rows are already logged by the pipeline; most sinks drop them.
    fn skip(&mut self, _skip: &RowSkip) -> Result<()> {
        Ok(())
    }

    /// Called once after the last row.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// One JSON record per line.
pub struct JsonLinesSink<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        JsonLinesSink { out, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn accept(&mut self, record: &Record) -> Result<()> {
        serde_json::to_writer(&mut self.out, record)
            .with_context(|| format!("Failed to write record {:?}", record.name))?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush().context("Failed to flush output")
    }
}

/// Fan one stream out to several sinks.
impl<S: RecordSink + ?Sized> RecordSink for Vec<Box<S>> {
    fn accept(&mut self, record: &Record) -> Result<()> {
        self.iter_mut().try_for_each(|s| s.accept(record))
    }

    fn skip(&mut self, skip: &RowSkip) -> Result<()> {
        self.iter_mut().try_for_each(|s| s.skip(skip))
    }

    fn finish(&mut self) -> Result<()> {
        self.iter_mut().try_for_each(|s| s.finish())
    }
}
