//! TSV emission of the frequency table.
//!
//! One header line, then one line per interaction in table order. The
//! header carries two leading empty cells so each label sits over its
//! frequency column rather than over the residue identifiers.
//!
//! Callers must guarantee `labels.len() == table.columns()`; labels are
//! opaque strings here and never checked against the data.

use crate::models::FrequencyTable;
use std::io::Write;

/// Render the table as text lines, without trailing newlines.
pub fn emit(table: &FrequencyTable, labels: &[String]) -> Vec<String> {
    let mut lines = Vec::with_capacity(table.len() + 1);
    lines.push(header_line(labels));

    for (pair, row) in table.iter() {
        let mut cells = vec![pair.first.clone(), pair.second.clone()];
        cells.extend(row.iter().map(|freq| freq.to_string()));
        lines.push(cells.join("\t"));
    }

    lines
}

/// Stream the emitted table to any writer, newline-terminated.
pub fn write_table<W: Write>(
    table: &FrequencyTable,
    labels: &[String],
    writer: &mut W,
) -> std::io::Result<()> {
    for line in emit(table, labels) {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()
}

/// Two empty cells over the residue-identifier columns, then the labels.
fn header_line(labels: &[String]) -> String {
    let mut cells = vec![String::new(), String::new()];
    cells.extend(labels.iter().cloned());
    cells.join("\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResiduePair;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_header_aligns_labels_over_value_columns() {
        let table = FrequencyTable::new(2);
        let lines = emit(&table, &labels(&["wt", "mutant"]));

        assert_eq!(lines, vec!["\t\twt\tmutant"]);
        // cell count = key columns (2) + value columns (2)
        assert_eq!(lines[0].split('\t').count(), 4);
    }

    #[test]
    fn test_empty_table_with_no_labels_is_header_only() {
        let table = FrequencyTable::new(0);
        let lines = emit(&table, &[]);
        assert_eq!(lines, vec!["\t"]);
    }

    #[test]
    fn test_rows_follow_table_order() {
        let mut table = FrequencyTable::new(2);
        table.set(ResiduePair::new("r3", "r4"), 0, 0.8);
        table.set(ResiduePair::new("r1", "r2"), 1, 0.7);

        let lines = emit(&table, &labels(&["a", "b"]));

        assert_eq!(lines[1], "r3\tr4\t0.8\t0");
        assert_eq!(lines[2], "r1\tr2\t0\t0.7");
    }

    #[test]
    fn test_write_table_terminates_every_line() {
        let mut table = FrequencyTable::new(1);
        table.set(ResiduePair::new("r1", "r2"), 0, 0.9);

        let mut buf = Vec::new();
        write_table(&table, &labels(&["a"]), &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "\t\ta\nr1\tr2\t0.9\n");
    }

    #[test]
    fn test_emitted_rows_reparse_to_the_same_values() {
        let mut table = FrequencyTable::new(2);
        table.set(ResiduePair::new("A:ARG:123", "B:GLU:45"), 0, 0.75);
        table.set(ResiduePair::new("A:ASP:100", "A:LYS:31"), 1, 0.125);

        let lines = emit(&table, &labels(&["a", "b"]));

        // Trivial re-reader: skip the header, split each data row back
        // into its key and values.
        for line in &lines[1..] {
            let cells: Vec<&str> = line.split('\t').collect();
            let pair = ResiduePair::new(cells[0], cells[1]);
            let values: Vec<f64> = cells[2..].iter().map(|c| c.parse().unwrap()).collect();
            assert_eq!(table.get(&pair), Some(values.as_slice()));
        }
        assert_eq!(lines.len() - 1, table.len());
    }
}
