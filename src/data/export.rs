use std::path::Path;

use anyhow::{Context, Result};

use super::model::LaunchRecord;
use crate::error::DataError;

/// Write records to `path`, picking CSV or JSON by extension. The output uses
/// the same column names the loader reads, so an export can be loaded back.
pub fn export_records<'a, I>(path: &Path, records: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let mut writer = csv::Writer::from_path(path)
                .with_context(|| format!("creating {}", path.display()))?;
            let mut n = 0;
            for rec in records {
                writer.serialize(rec).context("writing CSV row")?;
                n += 1;
            }
            writer.flush().context("flushing CSV")?;
            Ok(n)
        }
        "json" => {
            let rows: Vec<&LaunchRecord> = records.into_iter().collect();
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            serde_json::to_writer_pretty(std::io::BufWriter::new(file), &rows)
                .context("writing JSON")?;
            Ok(rows.len())
        }
        other => Err(DataError::UnsupportedExtension(other.to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_file;
    use crate::data::model::tests::sample_dataset;

    #[test]
    fn csv_export_loads_back() {
        let ds = sample_dataset();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subset.csv");

        let written = export_records(&path, ds.records()).unwrap();
        assert_eq!(written, 3);

        let back = load_file(&path).unwrap();
        assert_eq!(back.records(), ds.records());
    }

    #[test]
    fn json_export_loads_back() {
        let ds = sample_dataset();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subset.json");

        export_records(&path, ds.records().iter().skip(1)).unwrap();
        let back = load_file(&path).unwrap();
        assert_eq!(back.records(), &ds.records()[1..]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_records(&dir.path().join("out.txt"), std::iter::empty()).unwrap_err();
        assert!(err.downcast_ref::<DataError>().is_some());
    }
}
