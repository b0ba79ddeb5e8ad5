//! NDJSON output.

use std::io::{self, Write};
use trustgrade_core::EvaluationRecord;

/// Write one JSON object per line and flush.
pub fn write_ndjson<W: Write>(mut writer: W, records: &[EvaluationRecord]) -> io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use trustgrade_core::evaluator::{MetricResults, NetScore};

    #[test]
    fn test_one_line_per_record() {
        let records = vec![
            EvaluationRecord::new("a", NetScore::default(), &MetricResults::new()),
            EvaluationRecord::new("b", NetScore::default(), &MetricResults::new()),
        ];
        let mut buffer = Vec::new();
        write_ndjson(&mut buffer, &records).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(r#"{"name":"a","category":"MODEL""#));
        let parsed: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed["name"], "b");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_empty_writes_nothing() {
        let mut buffer = Vec::new();
        write_ndjson(&mut buffer, &[]).unwrap();
        assert!(buffer.is_empty());
    }
}
