use crate::model::{MatchStatus, ResolveSummary, UploadRow};

/// Count resolved rows per status for the upload report.
pub fn summarize(rows: &[UploadRow]) -> ResolveSummary {
    let mut summary = ResolveSummary {
        total_rows: rows.len(),
        ..ResolveSummary::default()
    };

    for row in rows {
        match row.resolution.as_ref().map(|r| r.status) {
            Some(MatchStatus::Matched) => summary.matched += 1,
            Some(MatchStatus::Multiple) => summary.multiple += 1,
            Some(MatchStatus::New) => summary.new += 1,
            Some(MatchStatus::Unresolved) => summary.unresolved += 1,
            None => summary.pending += 1,
        }
    }

    summary
}
