//! PAF overlap-file parsing.
//!
//! Twelve required tab-separated columns (`QNAME QLEN QSTART QEND STRAND TNAME TLEN TSTART TEND
//! NRM ABL MQUAL`) followed by an arbitrary number of optional `tag:type:value` columns, which
//! this crate has no use for and ignores. Header lines starting with `#`, `track`, or `browser`
//! are skipped, matching the convention used by every PAF-producing aligner.
use std::io::Read;
use std::path::Path;

use crate::error::ScaffoldError;
use crate::io::compress::open_file;
use crate::overlap::{RawOverlap, Strand};

const REQUIRED_COLUMNS: usize = 12;

/// Load every overlap record from a (optionally compressed) PAF file.
pub fn load_overlaps<P: AsRef<Path>>(path: P) -> Result<Vec<RawOverlap>, ScaffoldError> {
    let path = path.as_ref();
    let reader = open_file(path)?;
    parse_overlaps(reader).map_err(|e| ScaffoldError::PafFormatError(format!("{}: {e}", path.display())))
}

fn parse_overlaps<R: Read>(reader: R) -> Result<Vec<RawOverlap>, String> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(reader);

    let mut out = Vec::new();
    for (lineno, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| format!("line {}: {e}", lineno + 1))?;
        if is_header_line(&record) {
            continue;
        }
        let overlap = parse_record(&record).map_err(|e| format!("line {}: {e}", lineno + 1))?;
        out.push(overlap);
    }

    Ok(out)
}

fn is_header_line(record: &csv::StringRecord) -> bool {
    match record.get(0) {
        Some(first) => first.starts_with('#') || first == "track" || first == "browser",
        None => true,
    }
}

fn parse_record(record: &csv::StringRecord) -> Result<RawOverlap, String> {
    if record.len() < REQUIRED_COLUMNS {
        return Err(format!(
            "expected at least {REQUIRED_COLUMNS} columns, found {}",
            record.len()
        ));
    }

    let field = |i: usize| -> Result<&str, String> {
        record
            .get(i)
            .ok_or_else(|| format!("missing column {i}"))
    };
    let parse_u32 = |i: usize| -> Result<u32, String> {
        field(i)?
            .parse::<u32>()
            .map_err(|e| format!("column {i}: {e}"))
    };

    let strand_str = field(4)?;
    let strand = strand_str
        .chars()
        .next()
        .and_then(Strand::from_char)
        .ok_or_else(|| format!("invalid strand `{strand_str}`"))?;

    let abl = parse_u32(10)?;
    if abl == 0 {
        return Err("alignment block length (ABL) is zero".to_string());
    }

    Ok(RawOverlap {
        qname: field(0)?.to_string(),
        qlen: parse_u32(1)?,
        qstart: parse_u32(2)?,
        qend: parse_u32(3)?,
        strand,
        tname: field(5)?.to_string(),
        tlen: parse_u32(6)?,
        tstart: parse_u32(7)?,
        tend: parse_u32(8)?,
        nrm: parse_u32(9)?,
        abl,
        mq: field(11)?.parse::<u16>().map_err(|e| format!("column 11: {e}"))?.min(255) as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(s: &str) -> Result<Vec<RawOverlap>, String> {
        parse_overlaps(Cursor::new(s.as_bytes()))
    }

    #[test]
    fn parses_minimal_record() {
        let line = "r1\t100\t10\t90\t+\tr2\t200\t20\t150\t70\t80\t60\n";
        let overlaps = parse(line).unwrap();
        assert_eq!(overlaps.len(), 1);
        let o = &overlaps[0];
        assert_eq!(o.qname, "r1");
        assert_eq!(o.qlen, 100);
        assert_eq!(o.strand, Strand::Forward);
        assert_eq!(o.tname, "r2");
        assert_eq!(o.mq, 60);
    }

    #[test]
    fn ignores_optional_trailing_tags() {
        let line = "r1\t100\t10\t90\t+\tr2\t200\t20\t150\t70\t80\t60\ttp:A:P\tcm:i:12\n";
        let overlaps = parse(line).unwrap();
        assert_eq!(overlaps.len(), 1);
    }

    #[test]
    fn skips_header_lines() {
        let text = "# this is a header\ntrack name=foo\nbrowser position chr1\nr1\t100\t10\t90\t+\tr2\t200\t20\t150\t70\t80\t60\n";
        let overlaps = parse(text).unwrap();
        assert_eq!(overlaps.len(), 1);
    }

    #[test]
    fn rejects_zero_alignment_block_length() {
        let line = "r1\t100\t10\t90\t+\tr2\t200\t20\t150\t70\t0\t60\n";
        assert!(parse(line).is_err());
    }

    #[test]
    fn rejects_too_few_columns() {
        let line = "r1\t100\t10\t90\t+\n";
        assert!(parse(line).is_err());
    }

    #[test]
    fn rejects_bad_strand() {
        let line = "r1\t100\t10\t90\t*\tr2\t200\t20\t150\t70\t80\t60\n";
        assert!(parse(line).is_err());
    }

    #[test]
    fn mapping_quality_255_is_kept_as_absent_sentinel() {
        let line = "r1\t100\t10\t90\t+\tr2\t200\t20\t150\t70\t80\t255\n";
        let overlaps = parse(line).unwrap();
        assert_eq!(overlaps[0].mq, 255);
    }
}
