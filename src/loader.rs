//! Reads delimited rating files: one `user item rating timestamp` record per
//! line, fields separated by tabs or spaces, ids 1-indexed.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use crate::errors::{RecommenderError, Result};
use crate::ratings::RatingRecord;

/// Parse records from any buffered reader. Blank lines are skipped.
pub fn parse_ratings<R: BufRead>(reader: R) -> Result<Vec<RatingRecord>> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| RecommenderError::Parse {
            line: line_no,
            message: e.to_string(),
        })?;
        let l = line.trim();
        if l.is_empty() {
            continue;
        }
        records.push(parse_line(l, line_no)?);
    }
    debug!("Parsed {} rating records", records.len());
    Ok(records)
}

fn parse_line(line: &str, line_no: usize) -> Result<RatingRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(RecommenderError::Parse {
            line: line_no,
            message: format!("expected 4 fields, found {}", fields.len()),
        });
    }

    let field_err = |name: &str, value: &str| RecommenderError::Parse {
        line: line_no,
        message: format!("invalid {} `{}`", name, value),
    };
    let user = fields[0].parse::<usize>().map_err(|_| field_err("user", fields[0]))?;
    let item = fields[1].parse::<usize>().map_err(|_| field_err("item", fields[1]))?;
    let rating = fields[2].parse::<f64>().map_err(|_| field_err("rating", fields[2]))?;
    let timestamp = fields[3]
        .parse::<u64>()
        .map_err(|_| field_err("timestamp", fields[3]))?;

    Ok(RatingRecord::new(user, item, rating, timestamp))
}

/// Read every record of the file at `path`.
pub fn load_ratings<P: AsRef<Path>>(path: P) -> Result<Vec<RatingRecord>> {
    let path = path.as_ref();
    info!("Loading ratings from {:?}", path);
    let file = File::open(path).map_err(|source| RecommenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_ratings(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tab_separated() {
        let data = "196\t242\t3\t881250949\n\n186\t302\t3\t891717742\n";
        let records = parse_ratings(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], RatingRecord::new(196, 242, 3.0, 881250949));
    }

    #[test]
    fn test_parse_reports_line() {
        let data = "1 1 5 0\n1 x 4 0\n";
        match parse_ratings(data.as_bytes()) {
            Err(RecommenderError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_ratings("/nonexistent/ratings").unwrap_err();
        assert!(matches!(err, RecommenderError::Io { .. }));
    }
}
