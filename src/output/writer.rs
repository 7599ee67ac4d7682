use super::{OutputError, OutputResult};
use crate::monitor::ProgressHandle;
use crate::ngram::NgramTable;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Capacity of the result file buffer
pub const WRITE_BUFFER_SIZE: usize = 1024 * 1024;

/// Orders n-grams by descending count, ties broken by ascending byte order
pub fn rank_by_frequency(table: &NgramTable) -> Vec<(&str, u64)> {
    let mut ranked: Vec<(&str, u64)> = table.entries().collect();
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
}

/// Writes every n-gram of `table` to `path`, one per line
///
/// With `sorted`, lines follow [`rank_by_frequency`]; a presence-only table has
/// every count equal to 1, so its ranking is plain byte order. Otherwise lines
/// come out in the table's native order. The file is created (or truncated)
/// before anything is written and flushed once at the end.
///
/// Returns the number of lines written.
pub fn write_results(
    table: &NgramTable,
    path: &Path,
    sorted: bool,
    progress: &ProgressHandle,
) -> OutputResult<usize> {
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);

    let total = table.len();
    progress.reset(total as u64);

    let written = if sorted {
        tracing::info!("Sorting {} n-grams by frequency", total);
        let ranked = rank_by_frequency(table);
        write_lines(&mut writer, ranked.into_iter().map(|(key, _)| key), path, progress)?
    } else {
        write_lines(&mut writer, table.keys(), path, progress)?
    };

    writer.flush().map_err(|source| OutputError::Flush {
        path: path.to_path_buf(),
        source,
    })?;
    progress.advance_to(written as u64);

    tracing::debug!("Wrote {} n-grams to {}", written, path.display());
    Ok(written)
}

fn write_lines<'a, W: Write>(
    writer: &mut W,
    keys: impl Iterator<Item = &'a str>,
    path: &Path,
    progress: &ProgressHandle,
) -> OutputResult<usize> {
    let mut written = 0;
    for key in keys {
        writer
            .write_all(key.as_bytes())
            .and_then(|()| writer.write_all(b"\n"))
            .map_err(|source| OutputError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        written += 1;
        progress.advance_to(written as u64);
    }
    Ok(written)
}
