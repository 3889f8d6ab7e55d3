//! Text rendering shared by the commands.

use taskflow_core::StageRow;

/// `MM:SS`, zero-padded. Minutes are not capped at 59.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn format_stage_row(row: &StageRow) -> String {
    let marker = if row.is_current { "  <- current" } else { "" };
    format!(
        "{} {:<8} {} / {} sessions{}",
        row.icon, row.label, row.sessions_done, row.required_sessions, marker
    )
}
