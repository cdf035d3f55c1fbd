//! Compression-format sniffing shared by every file this crate reads.
use std::fs::File;
use std::io;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

#[cfg(feature = "bzip2")]
use bzip2::bufread::BzDecoder;
#[cfg(feature = "gzip")]
use flate2::bufread::MultiGzDecoder;
#[cfg(feature = "xz")]
use liblzma::read::XzDecoder;
#[cfg(feature = "zstd")]
use zstd::stream::read::Decoder as ZstdDecoder;

/// The compression format of a file, detected from its magic bytes.
#[derive(Debug, PartialEq, Copy, Clone, Default)]
enum CompressionFormat {
    #[cfg(feature = "bzip2")]
    Bzip2,
    #[cfg(feature = "gzip")]
    Gzip,
    #[default]
    None,
    #[cfg(feature = "xz")]
    Xz,
    #[cfg(feature = "zstd")]
    Zstd,
}

/// Detects the compression format of a file by reading the magic bytes at the start of the file.
fn detect_compression_format<R: Read + Seek>(reader: &mut R) -> io::Result<CompressionFormat> {
    let original_position = reader.stream_position()?;

    reader.seek(SeekFrom::Start(0))?;

    let mut magic = [0; 5];
    reader
        .read_exact(&mut magic)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let format = match magic {
        #[cfg(feature = "gzip")]
        [0x1f, 0x8b, ..] => CompressionFormat::Gzip,
        #[cfg(feature = "bzip2")]
        [0x42, 0x5a, ..] => CompressionFormat::Bzip2,
        #[cfg(feature = "zstd")]
        [0x28, 0xb5, 0x2f, 0xfd, ..] => CompressionFormat::Zstd,
        #[cfg(feature = "xz")]
        [0xfd, 0x37, 0x7a, 0x58, 0x5a] => CompressionFormat::Xz,
        _ => CompressionFormat::None,
    };

    reader.seek(SeekFrom::Start(original_position))?;

    Ok(format)
}

/// Opens a file and returns a reader, transparently decompressing gzip/zstd/bzip2/xz input if the
/// corresponding feature is enabled. Used for contigs, reads, and PAF overlap files alike.
pub(crate) fn open_file<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn Read + Send>> {
    let mut buf = File::open(&path).map(BufReader::new)?;
    let compression_format = detect_compression_format(&mut buf)?;

    let reader: Box<dyn Read + Send> = match compression_format {
        #[cfg(feature = "gzip")]
        CompressionFormat::Gzip => Box::new(MultiGzDecoder::new(buf)),

        #[cfg(feature = "zstd")]
        CompressionFormat::Zstd => Box::new(ZstdDecoder::new(buf)?),

        #[cfg(feature = "bzip2")]
        CompressionFormat::Bzip2 => Box::new(BzDecoder::new(buf)),

        #[cfg(feature = "xz")]
        CompressionFormat::Xz => Box::new(XzDecoder::new(buf)),

        CompressionFormat::None => Box::new(buf),
    };

    Ok(reader)
}
