//! Table assembly and CSV export: fixed 14-column schema, permalink-keyed
//! first-wins deduplication, plain UTF-8 CSV with a header row and no index
//! column.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use harvest_core::{CoreError, PostRecord, REQUIRED_COLUMNS};
use tracing::info;

/// Deduplicate and write the records to `path`. Returns the number of rows
/// written (excluding the header). Write failures are fatal.
pub fn export_csv(records: Vec<PostRecord>, path: &Path) -> Result<usize, CoreError> {
    let deduped = dedupe(records);
    let written = write_csv(&deduped, path)?;
    info!("Wrote {} rows to {}", written, path.display());
    Ok(written)
}

/// Order-preserving deduplication. Records with a permalink are keyed on it;
/// records without one fall back to full-row identity. First occurrence wins.
pub fn dedupe(records: Vec<PostRecord>) -> Vec<PostRecord> {
    let before = records.len();
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(before);

    for record in records {
        let key = match &record.permalink {
            Some(permalink) => permalink.clone(),
            None => row_values(&record).join("\u{1f}"),
        };
        if seen.insert(key) {
            kept.push(record);
        }
    }

    info!(
        "Deduplicated: {} rows removed. Final rows: {}",
        before - kept.len(),
        kept.len()
    );
    kept
}

fn write_csv(records: &[PostRecord], path: &Path) -> Result<usize, CoreError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", REQUIRED_COLUMNS.join(","))?;
    for record in records {
        let fields: Vec<String> = row_values(record)
            .into_iter()
            .map(|v| escape_csv(&v))
            .collect();
        writeln!(writer, "{}", fields.join(","))?;
    }
    writer.flush()?;

    Ok(records.len())
}

/// Render a record as one value per required column, in column order.
/// None renders as an empty field.
pub fn row_values(record: &PostRecord) -> Vec<String> {
    vec![
        text(&record.title),
        number(record.score),
        fraction(record.upvote_ratio),
        number(record.num_comments),
        text(&record.author),
        text(&record.subreddit),
        text(&record.url),
        text(&record.permalink),
        number(record.created_utc),
        flag(record.is_self),
        text(&record.selftext),
        text(&record.flair),
        text(&record.domain),
        text(&record.search_query),
    ]
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn number(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn fraction(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn flag(value: Option<bool>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Quote a field when it contains a separator, quote, or newline.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
