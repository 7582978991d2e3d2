//! File exports: timestamped HTML and JSON summaries under the export
//! directory, plus the plain-text fallback used when no clipboard exists.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde_json::json;

use crate::export::table::SummaryRow;
use crate::measure::{beighton_total, leg_length_difference, MeasurementSet, ParamValue};
use crate::schema::{FieldKind, ParamKey, SCHEMA};

/// Write `knee-summary-<timestamp>.html` and `.json` into `dir`.
/// Returns both paths for the status line.
pub fn write_summary_files(
    set: &MeasurementSet,
    rows: &[SummaryRow],
    html: &str,
    dir: &Path,
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory at {}", dir.display()))?;

    let slug = timestamp_slug();
    let html_path = dir.join(format!("knee-summary-{}.html", slug));
    let json_path = dir.join(format!("knee-summary-{}.json", slug));

    write_atomic(&html_path, html.as_bytes())?;

    let payload = json!({
        "exportedAt": chrono::Local::now().to_rfc3339(),
        "measurements": measurements_json(set),
        "summary": rows
            .iter()
            .map(|row| {
                json!({
                    "Parameter": row.label.clone(),
                    "Rechts": row.right.clone(),
                    "Links": row.left.clone(),
                    "Referenzbereich": row.reference.clone(),
                })
            })
            .collect::<Vec<_>>(),
    });
    let body = serde_json::to_vec_pretty(&payload).context("Failed to serialize summary JSON")?;
    write_atomic(&json_path, &body)?;

    Ok((html_path, json_path))
}

/// Plain-text table fallback for clipboard-less sessions.
pub fn write_text_fallback(text: &str, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory at {}", dir.display()))?;
    let path = dir.join(format!("knee-summary-{}.txt", timestamp_slug()));
    write_atomic(&path, text.as_bytes())?;
    Ok(path)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open {} for writing", path.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to commit {}", path.display()))?;
    Ok(())
}

fn timestamp_slug() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Raw measurement dump with report keys. Derived values are included as
/// numbers (or null while incomputable); the summary filter does not apply
/// here.
fn measurements_json(set: &MeasurementSet) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for spec in SCHEMA {
        let value = match spec.kind {
            FieldKind::DerivedSingle => match spec.key {
                ParamKey::LegLengthDifference => match leg_length_difference(set) {
                    Some(diff) => json!(diff),
                    None => serde_json::Value::Null,
                },
                ParamKey::BeightonTotalScore => json!(beighton_total(set)),
                _ => serde_json::Value::Null,
            },
            _ => match set.value(spec.key) {
                Some(ParamValue::Text(pair)) => json!({
                    "right": pair.right.clone(),
                    "left": pair.left.clone(),
                }),
                Some(ParamValue::Flags(pair)) => json!({
                    "right": pair.right,
                    "left": pair.left,
                }),
                Some(ParamValue::Flag(value)) => json!(value),
                None => serde_json::Value::Null,
            },
        };
        map.insert(spec.key.as_str().to_string(), value);
    }
    serde_json::Value::Object(map)
}
