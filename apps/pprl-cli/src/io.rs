// [apps/pprl-cli/src/io.rs]
//! CSV/JSON entity and bit-vector file I/O, plus batch slicing. Every
//! subcommand reads one or more input files, concatenates their rows, and
//! slices the concatenated list into batches of the configured size before
//! issuing requests.

use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use pprl_model::{AttributeValueEntity, BitVectorEntity, Match};

use crate::error::CliError;

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        anyhow::bail!("CSV delimiter must be a single ASCII character, got `{delimiter}`")
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Reads one entity CSV/JSON file. CSV rows carry `id_column` plus
/// arbitrary additional string columns, each becoming an attribute.
fn read_entity_file(path: &Path, id_column: &str, delimiter: u8) -> Result<Vec<AttributeValueEntity>> {
    if is_json(path) {
        let file = File::open(path).with_context(|| format!("opening `{}`", path.display()))?;
        let entities: Vec<AttributeValueEntity> =
            serde_json::from_reader(file).with_context(|| format!("parsing JSON entities from `{}`", path.display()))?;
        return Ok(entities);
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("opening `{}`", path.display()))?;

    let headers = reader.headers()?.clone();
    if !headers.iter().any(|h| h == id_column) {
        return Err(CliError::MissingIdColumn {
            path: path.display().to_string(),
            id_column: id_column.to_string(),
        }
        .into());
    }

    let mut entities = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("reading a record from `{}`", path.display()))?;
        let mut id = None;
        let mut attributes = std::collections::HashMap::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            if header == id_column {
                id = Some(value.to_string());
            } else {
                attributes.insert(header.to_string(), value.to_string());
            }
        }
        let id = id.expect("id_column presence was checked against headers above");
        entities.push(AttributeValueEntity { id, attributes });
    }
    Ok(entities)
}

/// Reads and concatenates every entity file in `paths`, in order.
pub fn read_entities(paths: &[PathBuf], id_column: &str, delimiter: char) -> Result<Vec<AttributeValueEntity>> {
    let delimiter = delimiter_byte(delimiter)?;
    let mut entities = Vec::new();
    for path in paths {
        entities.extend(read_entity_file(path, id_column, delimiter)?);
    }
    Ok(entities)
}

/// Reads one bit-vector CSV/JSON file, returning each row paired with the
/// source file's name (used for the optional `domain_file`/`range_file`
/// match-output column).
fn read_bitvector_file(path: &Path, delimiter: u8) -> Result<Vec<(BitVectorEntity, String)>> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if is_json(path) {
        let file = File::open(path).with_context(|| format!("opening `{}`", path.display()))?;
        let entities: Vec<BitVectorEntity> =
            serde_json::from_reader(file).with_context(|| format!("parsing JSON bit vectors from `{}`", path.display()))?;
        return Ok(entities.into_iter().map(|e| (e, file_name.clone())).collect());
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("opening `{}`", path.display()))?;

    let headers = reader.headers()?.clone();
    let id_idx = headers.iter().position(|h| h == "id").ok_or_else(|| CliError::MissingIdColumn {
        path: path.display().to_string(),
        id_column: "id".to_string(),
    })?;
    let value_idx = headers
        .iter()
        .position(|h| h == "value")
        .ok_or_else(|| anyhow::anyhow!("`{}` has no `value` column", path.display()))?;

    let mut out = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("reading a record from `{}`", path.display()))?;
        out.push((
            BitVectorEntity {
                id: record[id_idx].to_string(),
                value: record[value_idx].to_string(),
            },
            file_name.clone(),
        ));
    }
    Ok(out)
}

/// Reads and concatenates every bit-vector file in `paths`, pairing each
/// vector with the file it came from.
pub fn read_bitvectors_with_source(paths: &[PathBuf], delimiter: char) -> Result<Vec<(BitVectorEntity, String)>> {
    let delimiter = delimiter_byte(delimiter)?;
    let mut out = Vec::new();
    for path in paths {
        out.extend(read_bitvector_file(path, delimiter)?);
    }
    Ok(out)
}

/// Splits `items` into consecutive chunks of at most `batch_size`.
pub fn batches<T: Clone>(items: &[T], batch_size: usize) -> impl Iterator<Item = Vec<T>> + '_ {
    items.chunks(batch_size.max(1)).map(|chunk| chunk.to_vec())
}

/// Writes transformed entities to a CSV with `id_column` plus the union of
/// every attribute name seen, sorted for deterministic column ordering.
pub fn write_entities_csv(path: &Path, entities: &[AttributeValueEntity], id_column: &str, delimiter: char) -> Result<()> {
    let delimiter = delimiter_byte(delimiter)?;
    let mut columns: BTreeSet<String> = BTreeSet::new();
    for entity in entities {
        columns.extend(entity.attributes.keys().cloned());
    }
    let columns: Vec<String> = columns.into_iter().collect();

    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("creating `{}`", path.display()))?;

    let mut header = vec![id_column.to_string()];
    header.extend(columns.iter().cloned());
    writer.write_record(&header)?;

    for entity in entities {
        let mut row = vec![entity.id.clone()];
        for column in &columns {
            row.push(entity.attributes.get(column).cloned().unwrap_or_default());
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes bit vectors to a CSV with `id`, `value` columns.
pub fn write_bitvectors_csv(path: &Path, entities: &[BitVectorEntity], delimiter: char) -> Result<()> {
    let delimiter = delimiter_byte(delimiter)?;
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("creating `{}`", path.display()))?;

    writer.write_record(["id", "value"])?;
    for entity in entities {
        writer.write_record([&entity.id, &entity.value])?;
    }
    writer.flush()?;
    Ok(())
}

/// One emitted match, annotated with the source file each side was read
/// from (emitted as `domain_file`/`range_file` columns only when more than
/// one file was given on that side).
pub struct MatchRow {
    /// The match itself.
    pub m: Match,
    /// Name of the file `m.domain` was read from.
    pub domain_file: String,
    /// Name of the file `m.range` was read from.
    pub range_file: String,
}

/// Writes matches to a CSV: `domain_id[, domain_file], range_id[, range_file], similarity`.
/// The file columns are included only when more than one file was given on
/// that side, as optional columns.
pub fn write_matches_csv(
    path: &Path,
    rows: &[MatchRow],
    delimiter: char,
    include_domain_file: bool,
    include_range_file: bool,
) -> Result<()> {
    let delimiter = delimiter_byte(delimiter)?;
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("creating `{}`", path.display()))?;

    let mut header = vec!["domain_id".to_string()];
    if include_domain_file {
        header.push("domain_file".to_string());
    }
    header.push("range_id".to_string());
    if include_range_file {
        header.push("range_file".to_string());
    }
    header.push("similarity".to_string());
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![row.m.domain.id.clone()];
        if include_domain_file {
            record.push(row.domain_file.clone());
        }
        record.push(row.m.range.id.clone());
        if include_range_file {
            record.push(row.range_file.clone());
        }
        record.push(row.m.similarity.to_string());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_entity_csv_with_arbitrary_attribute_columns() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "id,given_name,last_name").unwrap();
        writeln!(file, "1,anna,schmidt").unwrap();
        file.flush().unwrap();

        let entities = read_entities(&[file.path().to_path_buf()], "id", ',').unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].id, "1");
        assert_eq!(entities[0].attributes.get("given_name").unwrap(), "anna");
    }

    #[test]
    fn missing_id_column_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "given_name").unwrap();
        writeln!(file, "anna").unwrap();
        file.flush().unwrap();

        let err = read_entities(&[file.path().to_path_buf()], "id", ',').unwrap_err();
        assert!(err.to_string().contains("no `id` column"));
    }

    #[test]
    fn batches_splits_into_chunks_of_at_most_the_configured_size() {
        let items: Vec<i32> = (0..10).collect();
        let chunks: Vec<Vec<i32>> = batches(&items, 3).collect();
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0], vec![0, 1, 2]);
        assert_eq!(chunks[3], vec![9]);
    }

    #[test]
    fn write_entities_csv_unions_attribute_columns_across_entities() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let entities = vec![
            AttributeValueEntity {
                id: "1".to_string(),
                attributes: [("a".to_string(), "x".to_string())].into_iter().collect(),
            },
            AttributeValueEntity {
                id: "2".to_string(),
                attributes: [("b".to_string(), "y".to_string())].into_iter().collect(),
            },
        ];
        write_entities_csv(&path, &entities, "id", ',').unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("id,a,b\n"));
    }
}
