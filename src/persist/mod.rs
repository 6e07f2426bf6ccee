//! Flat-file snapshot codec.
//!
//! One entry per line, in ascending key order:
//!
//! ```text
//! <key>:<value>;
//! ```
//!
//! Keys and values are written with `Display` and read back with `FromStr`,
//! so any key type with a textual form works, integers being the common case.
//! Nothing is escaped: a value containing a newline, or a key containing
//! `:`, does not survive a round trip.
//!
//! This is a snapshot, not a log. There is no header, no checksum and no
//! protection against a crash halfway through a dump.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Separates key from value. The first occurrence on a line wins.
pub const KEY_VALUE_SEPARATOR: char = ':';

/// Terminates a record. Optional when loading.
pub const RECORD_TERMINATOR: char = ';';

/// What a load did with each line of the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records inserted into the list.
    pub inserted: usize,
    /// Well-formed records whose key was already present.
    pub duplicates: usize,
    /// Non-blank lines that were not valid records.
    pub malformed: usize,
}

impl LoadReport {
    /// Total records that were skipped for any reason.
    pub fn skipped(&self) -> usize {
        self.duplicates + self.malformed
    }
}

/// Write one record line.
pub fn write_record<W, K, V>(writer: &mut W, key: &K, value: &V) -> std::io::Result<()>
where
    W: Write,
    K: Display + ?Sized,
    V: Display + ?Sized,
{
    writeln!(
        writer,
        "{key}{KEY_VALUE_SEPARATOR}{value}{RECORD_TERMINATOR}"
    )
}

/// Parse one snapshot line.
///
/// The line is split at the first `:`. Everything after it is the value,
/// minus one trailing `;`, so values may themselves contain `:`. Whitespace
/// around the key is ignored. An empty key or value, or a key `K::from_str`
/// rejects, makes the line malformed.
pub fn parse_record<K, V>(line: &str, line_no: usize) -> Result<(K, V)>
where
    K: FromStr,
    V: FromStr,
{
    let malformed = |reason| Error::MalformedRecord {
        line: line_no,
        reason,
    };

    let (key, rest) = line
        .split_once(KEY_VALUE_SEPARATOR)
        .ok_or_else(|| malformed("missing ':' separator"))?;
    let key = key.trim();
    let value = rest.strip_suffix(RECORD_TERMINATOR).unwrap_or(rest);

    if key.is_empty() {
        return Err(malformed("empty key"));
    }
    if value.is_empty() {
        return Err(malformed("empty value"));
    }

    let key = key.parse().map_err(|_| malformed("unparsable key"))?;
    let value = value.parse().map_err(|_| malformed("unparsable value"))?;
    Ok((key, value))
}

/// Write a full snapshot to `path`, truncating whatever was there.
///
/// Missing parent directories are created. The file is flushed and
/// fsync'd before returning. Returns the number of records written.
pub fn write_snapshot<'a, K, V, I>(path: &Path, entries: I) -> Result<usize>
where
    K: Display + 'a,
    V: Display + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::Open {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    let mut written = 0;
    for (key, value) in entries {
        write_record(&mut writer, key, value)?;
        written += 1;
    }

    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(written)
}

/// Read every valid record from the snapshot at `path`.
///
/// Blank lines are ignored. Malformed lines are logged and counted, never
/// returned as errors. Returns the records in file order and the number of
/// malformed lines.
pub fn read_snapshot<K, V>(path: &Path) -> Result<(Vec<(K, V)>, usize)>
where
    K: FromStr,
    V: FromStr,
{
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    let mut malformed = 0;
    for (index, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let bytes = raw.strip_suffix(b"\r").unwrap_or(&raw[..]);
        if bytes.is_empty() {
            continue;
        }
        let parsed = match std::str::from_utf8(bytes) {
            Ok(line) => parse_record(line, index + 1),
            Err(_) => Err(Error::MalformedRecord {
                line: index + 1,
                reason: "invalid UTF-8",
            }),
        };
        match parsed {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping snapshot line");
                malformed += 1;
            }
        }
    }

    Ok((records, malformed))
}
