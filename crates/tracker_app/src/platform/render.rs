use std::fmt::Write;

use tracker_core::{DashboardView, JobRowView, NoticeLevel, Priority, Stage};

pub fn render(view: &DashboardView, show_stats: bool) -> String {
    let mut out = String::new();

    if show_stats {
        render_stats(&mut out, view);
    } else if view.rows.is_empty() {
        let text = if view.filter_active {
            "No jobs match the current filters."
        } else {
            "No jobs yet."
        };
        let _ = writeln!(out, "{text}");
    } else {
        for row in &view.rows {
            let _ = writeln!(out, "{}", render_row(row));
        }
        let _ = writeln!(out, "{} of {} jobs", view.rows.len(), view.job_count);
    }

    if let Some(notice) = &view.notice {
        let marker = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Error => "error",
        };
        let _ = writeln!(out, "[{marker}] {}", notice.text);
    }
    out
}

fn render_row(row: &JobRowView) -> String {
    let mut line = format!(
        "{:<26} {} @ {} [{}] ({}) applied {}",
        row.id,
        row.title,
        row.company,
        row.stage,
        row.priority,
        row.applied_at.format("%b %-d, %Y")
    );
    if !row.tags.is_empty() {
        let _ = write!(line, " #{}", row.tags.join(" #"));
    }
    if row.note_count > 0 {
        let _ = write!(line, " notes:{}", row.note_count);
    }
    if row.pending {
        line.push_str(" (saving)");
    }
    line
}

fn render_stats(out: &mut String, view: &DashboardView) {
    let _ = writeln!(out, "Total jobs: {}", view.stage_stats.total);
    for stage in Stage::ALL {
        let _ = writeln!(out, "  {:<10} {}", stage.label(), view.stage_stats.count(stage));
    }
    let _ = writeln!(out, "By priority:");
    for priority in Priority::ALL {
        let _ = writeln!(
            out,
            "  {:<10} {}",
            priority.label(),
            view.priority_stats.count(priority)
        );
    }
}
