//! The overlap record: raw PAF fields plus the scalars derived from them during classification.

/// Which strand the alignment is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Strand::Forward),
            '-' => Some(Strand::Reverse),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

/// The raw fields of one PAF alignment record, as read from an overlap file.
#[derive(Debug, Clone, PartialEq)]
pub struct RawOverlap {
    pub qname: String,
    pub qlen: u32,
    pub qstart: u32,
    pub qend: u32,
    pub strand: Strand,
    pub tname: String,
    pub tlen: u32,
    pub tstart: u32,
    pub tend: u32,
    pub nrm: u32,
    pub abl: u32,
    pub mq: u8,
}

impl RawOverlap {
    pub fn q_overhang_left(&self) -> i64 {
        self.qstart as i64
    }

    pub fn q_overhang_right(&self) -> i64 {
        self.qlen as i64 - self.qend as i64
    }

    pub fn t_overhang_left(&self) -> i64 {
        self.tstart as i64
    }

    pub fn t_overhang_right(&self) -> i64 {
        self.tlen as i64 - self.tend as i64
    }
}

/// An overlap record that has passed classification, annotated with its derived scores.
///
/// Immutable after construction: classification is the only place these scalars are computed.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapRecord {
    pub raw: RawOverlap,
    /// Sequence identity, `nrm / abl`.
    pub si: f64,
    /// Average overlap length between the query- and target-side spans.
    pub ol: f64,
    /// Overlap score, `ol * si`.
    pub os: f64,
    /// Left query extension score.
    pub qes1: f64,
    /// Right query extension score.
    pub qes2: f64,
    /// Left target extension score.
    pub tes1: f64,
    /// Right target extension score.
    pub tes2: f64,
}
