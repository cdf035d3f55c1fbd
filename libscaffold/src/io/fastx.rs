//! FASTA/FASTQ loading for contigs and reads.
use std::path::Path;

use needletail::parse_fastx_reader;

use crate::error::ScaffoldError;
use crate::io::compress::open_file;
use crate::seq::Sequence;

/// The needletail `id()` method returns the whole header line, comment included. The rest of
/// this crate only ever needs the first whitespace-delimited token.
pub(crate) trait FastxRecordExt {
    fn short_id(&self) -> &[u8];
}

impl FastxRecordExt for needletail::parser::SequenceRecord<'_> {
    fn short_id(&self) -> &[u8] {
        let id = self.id();
        id.split(|&b| b.is_ascii_whitespace())
            .next()
            .unwrap_or_default()
    }
}

/// Load every record of a FASTA or FASTQ file (optionally compressed) into [`Sequence`]s.
///
/// Format is auto-detected from content, not extension, matching the way `needletail` itself
/// distinguishes FASTA from FASTQ.
pub fn load_sequences<P: AsRef<Path>>(path: P) -> Result<Vec<Sequence>, ScaffoldError> {
    let path = path.as_ref();
    let reader = open_file(path)?;
    let mut fastx_reader = parse_fastx_reader(reader).map_err(|e| {
        ScaffoldError::FastxParseError(format!("{}: {e}", path.display()))
    })?;

    let mut out = Vec::new();
    while let Some(record) = fastx_reader.next() {
        let record = record
            .map_err(|e| ScaffoldError::FastxParseError(format!("{}: {e}", path.display())))?;
        let id = String::from_utf8_lossy(record.short_id()).into_owned();
        let bases = record.seq().into_owned();
        let quality = record.qual().map(|q| q.to_owned());
        out.push(Sequence {
            id,
            bases,
            quality,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    fn write_temp(contents: &[u8]) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents).unwrap();
        f
    }

    #[test]
    fn load_fasta_strips_comments_from_id() {
        let f = write_temp(b">ctg1 some comment\nACGTACGT\n");
        let seqs = load_sequences(f.path()).unwrap();
        assert_eq!(seqs.len(), 1);
        assert_eq!(seqs[0].id, "ctg1");
        assert_eq!(seqs[0].bases, b"ACGTACGT");
        assert!(seqs[0].quality.is_none());
    }

    #[test]
    fn load_fastq_keeps_quality() {
        let f = write_temp(b"@read1\nACGT\n+\n!!!!\n");
        let seqs = load_sequences(f.path()).unwrap();
        assert_eq!(seqs.len(), 1);
        assert_eq!(seqs[0].id, "read1");
        assert_eq!(seqs[0].quality.as_deref(), Some(b"!!!!".as_ref()));
    }

    #[test]
    fn load_multi_record_fasta() {
        let f = write_temp(b">a\nACGT\n>b\nTTTT\n");
        let seqs = load_sequences(f.path()).unwrap();
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0].id, "a");
        assert_eq!(seqs[1].id, "b");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_sequences("/no/such/path.fasta").unwrap_err();
        assert!(matches!(err, ScaffoldError::IoError(_)));
    }
}
