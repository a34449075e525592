use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::{ExtractError, RowSkip};
use crate::model::RawRow;
use crate::parser::{extract_detailed, Extraction};
use crate::settings::Settings;
use crate::sink::RecordSink;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub total: usize,
    pub extracted: usize,
    pub skipped: usize,
    pub warnings: usize,
}

/// Stream rows through the extractor into `sink`, one chunk at a time.
///
/// Rows within a chunk are extracted in parallel when enabled; the sink
/// still sees them in input order. Unreadable input lines count as skips.
pub fn run<I, S>(rows: I, sink: &mut S, settings: &Settings) -> Result<RunStats>
where
    I: IntoIterator<Item = Result<RawRow>>,
    S: RecordSink + ?Sized,
{
    let pb = progress_bar(settings.progress);
    let chunk_size = settings.chunk_size.max(1);
    let mut stats = RunStats::default();
    let mut rows = rows.into_iter().peekable();

    while rows.peek().is_some() {
        let mut chunk = Vec::with_capacity(chunk_size);
        let mut unreadable = Vec::new();
        for (i, row) in rows.by_ref().take(chunk_size).enumerate() {
            match row {
                Ok(r) => chunk.push((i, r)),
                Err(e) => unreadable.push((i, e)),
            }
        }

        let mut results: Vec<(usize, Result<Extraction, RowSkip>)> = if settings.parallel {
            chunk.par_iter().map(|(i, r)| (*i, extract_detailed(r))).collect()
        } else {
            chunk.iter().map(|(i, r)| (*i, extract_detailed(r))).collect()
        };
        results.extend(unreadable.into_iter().map(|(i, e)| {
            let cause = ExtractError::UnreadableRow(format!("{:#}", e));
            (i, Err(RowSkip::new("", cause)))
        }));
        results.sort_by_key(|(i, _)| *i);

        for (_, result) in results {
            stats.total += 1;
            match result {
                Ok(ex) => {
                    for w in &ex.warnings {
                        warn!(name = %ex.record.name, url = %ex.record.url, "{}", w);
                    }
                    stats.warnings += ex.warnings.len();
                    stats.extracted += 1;
                    sink.accept(&ex.record)?;
                }
                Err(skip) => {
                    info!(url = %skip.url, reason = %skip.cause, "skipping row");
                    stats.skipped += 1;
                    sink.skip(&skip)?;
                }
            }
        }
        pb.set_position(stats.total as u64);
    }

    sink.finish()?;
    pb.finish_and_clear();
    info!(
        total = stats.total,
        extracted = stats.extracted,
        skipped = stats.skipped,
        warnings = stats.warnings,
        "run complete"
    );
    Ok(stats)
}

fn progress_bar(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {pos} rows ({per_sec})")
    {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
