//! The aggregation engine.
//!
//! Each source fills exactly one column of the table, determined by its
//! position in the input list. Sources are consumed sequentially and to
//! exhaustion; any malformed line aborts the whole run. After the last
//! source, rows whose maximum value does not exceed the cutoff are dropped.

use crate::error::FingerprintError;
use crate::models::{FrequencyTable, ResiduePair};
use crate::sources::FrequencySource;
use std::io::BufRead;
use tracing::{debug, info};

/// Number of tab-separated fields a data line must have.
const MIN_FIELDS: usize = 4;

/// Field holding the frequency value. Field 2 is a free-form annotation
/// (e.g. the interaction type) and is not interpreted here.
const FREQUENCY_FIELD: usize = 3;

/// Merge `sources` into one table and drop rows with no value strictly
/// above `cutoff`.
///
/// An empty source list yields an empty zero-column table. A source with
/// no valid lines contributes no keys but still owns its column: rows
/// discovered by other sources keep 0.0 in that position.
pub fn aggregate<R: BufRead>(
    sources: Vec<FrequencySource<R>>,
    cutoff: f64,
) -> Result<FrequencyTable, FingerprintError> {
    let columns = sources.len();
    let mut table = FrequencyTable::new(columns);

    // The column index is an explicit loop parameter; nothing about the
    // fill order of a column depends on when other sources are read.
    for (column, source) in sources.into_iter().enumerate() {
        consume_source(&mut table, source, column)?;
    }

    let before = table.len();
    table.retain_above(cutoff);
    info!(
        "Aggregated {} interactions across {} file(s); {} above cutoff {}",
        before,
        columns,
        table.len(),
        cutoff
    );

    Ok(table)
}

/// Read one source to exhaustion, filling `column` of the table.
fn consume_source<R: BufRead>(
    table: &mut FrequencyTable,
    source: FrequencySource<R>,
    column: usize,
) -> Result<(), FingerprintError> {
    let name = source.name;
    let mut keys_seen = 0usize;

    for (idx, line) in source.reader.lines().enumerate() {
        let line = line.map_err(|e| FingerprintError::Source {
            path: name.clone().into(),
            source: e,
        })?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (pair, freq) = parse_line(&name, idx + 1, line)?;
        // Last write wins when a source repeats a pair.
        table.set(pair, column, freq);
        keys_seen += 1;
    }

    debug!("{}: {} data line(s)", name, keys_seen);
    Ok(())
}

/// Tokenize one non-comment line into its interaction key and frequency.
fn parse_line(
    source_name: &str,
    line_no: usize,
    line: &str,
) -> Result<(ResiduePair, f64), FingerprintError> {
    let tokens: Vec<&str> = line.split('\t').collect();

    if tokens.len() < MIN_FIELDS {
        return Err(FingerprintError::malformed(
            source_name,
            line_no,
            line,
            format!(
                "expected at least {} tab-separated fields, found {}",
                MIN_FIELDS,
                tokens.len()
            ),
        ));
    }

    let freq: f64 = tokens[FREQUENCY_FIELD].parse().map_err(|_| {
        FingerprintError::malformed(
            source_name,
            line_no,
            line,
            format!("frequency field {:?} is not a number", tokens[FREQUENCY_FIELD]),
        )
    })?;

    Ok((ResiduePair::new(tokens[0], tokens[1]), freq))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::source_from_str;

    fn pair(a: &str, b: &str) -> ResiduePair {
        ResiduePair::new(a, b)
    }

    #[test]
    fn test_merges_two_sources_into_aligned_rows() {
        let a = source_from_str("a", "r1\tr2\thbbb\t0.9\nr3\tr4\thbbb\t0.2\n");
        let b = source_from_str("b", "r1\tr2\thbbb\t0.1\n");

        let table = aggregate(vec![a, b], 0.6).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&pair("r1", "r2")), Some(&[0.9, 0.1][..]));
        // max 0.2 is below the cutoff
        assert!(table.get(&pair("r3", "r4")).is_none());
    }

    #[test]
    fn test_every_row_spans_all_sources() {
        let a = source_from_str("a", "r1\tr2\tx\t0.9\n");
        let b = source_from_str("b", "r3\tr4\tx\t0.8\n");
        let c = source_from_str("c", "");

        let table = aggregate(vec![a, b, c], 0.0).unwrap();

        for (_, row) in table.iter() {
            assert_eq!(row.len(), 3);
        }
        // The empty third source still occupies a zeroed column.
        assert_eq!(table.get(&pair("r1", "r2")), Some(&[0.9, 0.0, 0.0][..]));
        assert_eq!(table.get(&pair("r3", "r4")), Some(&[0.0, 0.8, 0.0][..]));
    }

    #[test]
    fn test_empty_source_list_yields_empty_table() {
        let table = aggregate(Vec::<FrequencySource<std::io::Cursor<Vec<u8>>>>::new(), 0.6).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns(), 0);
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let src = source_from_str(
            "a",
            "# total_frames:1000\n\n   \nr1\tr2\tvdw\t0.7\n  # indented comment\n",
        );
        let table = aggregate(vec![src], 0.0).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_last_write_wins_within_a_source() {
        let a = source_from_str("a", "r1\tr2\tx\t0.2\nr1\tr2\tx\t0.95\n");
        let b = source_from_str("b", "r1\tr2\tx\t0.5\n");

        let table = aggregate(vec![a, b], 0.0).unwrap();

        assert_eq!(table.get(&pair("r1", "r2")), Some(&[0.95, 0.5][..]));
    }

    #[test]
    fn test_row_exactly_at_cutoff_is_dropped() {
        // The user-facing wording used to promise "at least this
        // frequently", but filtering has always been strictly greater:
        // a row whose best value equals the cutoff does not survive.
        let src = source_from_str("a", "r1\tr2\tx\t0.6\nr3\tr4\tx\t0.6000001\n");
        let table = aggregate(vec![src], 0.6).unwrap();

        assert!(table.get(&pair("r1", "r2")).is_none());
        assert!(table.get(&pair("r3", "r4")).is_some());
    }

    #[test]
    fn test_too_few_fields_is_fatal() {
        let src = source_from_str("freqs.tsv", "r1\tr2\tBACKBONE\n");
        let err = aggregate(vec![src], 0.6).unwrap_err();

        match err {
            FingerprintError::MalformedLine {
                source_name, line, ..
            } => {
                assert_eq!(source_name, "freqs.tsv");
                assert_eq!(line, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_frequency_is_the_same_error_class() {
        let src = source_from_str("a", "# header\nr1\tr2\tx\tnot-a-number\n");
        let err = aggregate(vec![src], 0.6).unwrap_err();

        match err {
            FingerprintError::MalformedLine { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("not-a-number"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_column_fill_is_independent_of_source_order() {
        // Same data, sources listed in both orders: each key's value must
        // land in the column of the source that reported it.
        let table_ab = aggregate(
            vec![
                source_from_str("a", "r1\tr2\tx\t0.9\n"),
                source_from_str("b", "r1\tr2\tx\t0.7\nr5\tr6\tx\t0.8\n"),
            ],
            0.0,
        )
        .unwrap();
        let table_ba = aggregate(
            vec![
                source_from_str("b", "r1\tr2\tx\t0.7\nr5\tr6\tx\t0.8\n"),
                source_from_str("a", "r1\tr2\tx\t0.9\n"),
            ],
            0.0,
        )
        .unwrap();

        assert_eq!(table_ab.get(&pair("r1", "r2")), Some(&[0.9, 0.7][..]));
        assert_eq!(table_ba.get(&pair("r1", "r2")), Some(&[0.7, 0.9][..]));
        assert_eq!(table_ab.get(&pair("r5", "r6")), Some(&[0.0, 0.8][..]));
    }

    #[test]
    fn test_negative_cutoff_keeps_all_zero_rows() {
        let a = source_from_str("a", "r1\tr2\tx\t0.0\n");
        let table = aggregate(vec![a], -1.0).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_aggregates_fixture_files() {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
        let paths = vec![root.join("wild_type.tsv"), root.join("mutant.tsv")];
        let inputs = crate::sources::open_sources(&paths).unwrap();

        let table = aggregate(inputs, 0.6).unwrap();

        // Pairs only one condition reports still span both columns.
        assert_eq!(
            table.get(&pair("A:PHE:12", "A:LEU:88")),
            Some(&[0.977, 0.0][..])
        );
        assert_eq!(
            table.get(&pair("A:GLN:61", "A:HIS:95")),
            Some(&[0.0, 0.733][..])
        );
        // Reported by both; wild-type value lands in column 0.
        assert_eq!(
            table.get(&pair("A:ARG:123", "B:GLU:45")),
            Some(&[0.921, 0.108][..])
        );
        // 0.412 / 0.844: survives because of the mutant column alone.
        assert_eq!(
            table.get(&pair("A:TYR:27", "A:SER:99")),
            Some(&[0.412, 0.844][..])
        );
        assert_eq!(table.len(), 5);
    }
}
