use crate::errors::AppResult;
use crate::storage::log::{ActivityLog, LogEntry};
use crate::ui::messages::info;
use ansi_term::Colour;

const OP_WIDTH: usize = 60;

/// Colour of the operation word in `log --print`.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "save" => Colour::Green,
        "submit" => Colour::Cyan,
        "clear" => Colour::Yellow,
        "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        other if other.ends_with("_failed") => Colour::Red,
        _ => Colour::White,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut out: String = s.chars().take(max - 3).collect();
        out.push_str("...");
        out
    } else {
        s.to_string()
    }
}

/// `operation (target)` padded to `width`, with only the operation coloured.
fn op_column(entry: &LogEntry, width: usize) -> String {
    let plain = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };
    let visible = truncate(&plain, OP_WIDTH);
    let padding = " ".repeat(width.saturating_sub(visible.chars().count()));

    let color = color_for_operation(&entry.operation);
    let painted = match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    };
    format!("{painted}{padding}")
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(log: &ActivityLog) -> AppResult<()> {
        let entries = log.entries()?;
        if entries.is_empty() {
            info("The internal log is empty.");
            return Ok(());
        }

        let date = |e: &LogEntry| {
            chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| e.date.clone())
        };

        let op_w = entries
            .iter()
            .map(|e| e.operation.len() + e.target.len() + 3)
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH);
        let id_w = entries.len().to_string().len();

        println!("📜 Internal log:\n");
        for (i, entry) in entries.iter().enumerate() {
            println!(
                "{:>id_w$}: {} | {} => {}",
                i + 1,
                date(entry),
                op_column(entry, op_w),
                entry.message,
            );
        }

        Ok(())
    }
}
