//! Overlap classification: scoring a raw PAF record and deciding whether it is usable.
use std::collections::HashSet;

use crate::overlap::{OverlapRecord, RawOverlap};

/// Maximum combined-overhang-to-overlap-length ratio before a record is rejected as `short`.
pub const OH_MAX: f64 = 0.40;
/// Minimum sequence identity before a record is rejected as `low-quality`.
pub const SI_MIN: f64 = 0.10;

/// Which check rejected an overlap record, or that it was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectKind {
    Short,
    Contained,
    LowQuality,
    ZeroExtension,
}

/// Which of the optional classification checks are enabled. All are on by default; the
/// orchestrator never turns them off today, but the classifier keeps them as independent knobs
/// because the three checks are logically unrelated passes, matching `test_overlap`'s structure
/// in the original implementation.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyFlags {
    pub check_short: bool,
    pub check_contained: bool,
    pub check_lowq: bool,
}

impl Default for ClassifyFlags {
    fn default() -> Self {
        ClassifyFlags {
            check_short: true,
            check_contained: true,
            check_lowq: true,
        }
    }
}

/// Classify one raw overlap record.
///
/// On containment, the contained read's identifier is added to `discard`. Returns the
/// fully-scored [`OverlapRecord`] on acceptance, or the [`RejectKind`] that rejected it.
pub fn classify(
    raw: &RawOverlap,
    discard: &mut HashSet<String>,
    flags: ClassifyFlags,
) -> Result<OverlapRecord, RejectKind> {
    let q_oh1 = raw.q_overhang_left() as f64;
    let q_oh2 = raw.q_overhang_right() as f64;
    let t_oh1 = raw.t_overhang_left() as f64;
    let t_oh2 = raw.t_overhang_right() as f64;

    let si = raw.nrm as f64 / raw.abl as f64;
    let avg_ol = ((raw.qend - raw.qstart) as f64 + (raw.tend - raw.tstart) as f64) / 2.0;
    let os = avg_ol * si;

    let mut qes1 = os + t_oh1 / 2.0 - (q_oh1 + t_oh2) / 2.0;
    let mut qes2 = os + t_oh2 / 2.0 - (q_oh2 + t_oh1) / 2.0;
    let mut tes1 = os + q_oh1 / 2.0 - (q_oh2 + t_oh1) / 2.0;
    let mut tes2 = os + q_oh2 / 2.0 - (q_oh1 + t_oh2) / 2.0;

    if q_oh1 >= t_oh1 {
        qes1 = 0.0;
    } else {
        tes1 = 0.0;
    }
    if q_oh2 >= t_oh2 {
        qes2 = 0.0;
    } else {
        tes2 = 0.0;
    }

    if flags.check_short {
        let min_oh1 = q_oh1.min(t_oh1);
        let min_oh2 = q_oh2.min(t_oh2);
        if (min_oh1 + min_oh2) / avg_ol > OH_MAX {
            return Err(RejectKind::Short);
        }
    }

    if flags.check_contained {
        if q_oh1 >= t_oh1 && q_oh2 >= t_oh2 {
            discard.insert(raw.tname.clone());
            return Err(RejectKind::Contained);
        } else if t_oh1 >= q_oh1 && t_oh2 >= q_oh2 {
            discard.insert(raw.qname.clone());
            return Err(RejectKind::Contained);
        }
    }

    if flags.check_lowq && si < SI_MIN {
        return Err(RejectKind::LowQuality);
    }

    if qes1 <= 0.0 && qes2 <= 0.0 && tes1 <= 0.0 && tes2 <= 0.0 {
        return Err(RejectKind::ZeroExtension);
    }

    Ok(OverlapRecord {
        raw: raw.clone(),
        si,
        ol: avg_ol,
        os,
        qes1,
        qes2,
        tes1,
        tes2,
    })
}
