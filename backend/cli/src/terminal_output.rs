//! Terminal output utilities: ANSI notes, table rendering, verdict display.

use leafscan_core::{AnalysisResult, VerdictCategory};

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

/// Strip ANSI escape codes from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

fn paint(color: &str, text: &str) -> String {
    if supports_color() {
        format!("{color}{BOLD}{text}{RESET}")
    } else {
        text.to_string()
    }
}

pub fn note_info(msg: &str) {
    if supports_color() {
        println!("{CYAN}{BOLD}ℹ{RESET} {msg}");
    } else {
        println!("INFO: {msg}");
    }
}

pub fn note_warn(msg: &str) {
    if supports_color() {
        println!("{YELLOW}{BOLD}⚠{RESET} {msg}");
    } else {
        println!("WARN: {msg}");
    }
}

pub fn note_error(msg: &str) {
    if supports_color() {
        eprintln!("{RED}{BOLD}✗{RESET} {msg}");
    } else {
        eprintln!("ERROR: {msg}");
    }
}

pub fn note_success(msg: &str) {
    if supports_color() {
        println!("{GREEN}{BOLD}✓{RESET} {msg}");
    } else {
        println!("OK: {msg}");
    }
}

/// Column alignment.
pub enum Align {
    Left,
    Right,
}

/// A table column definition.
pub struct Column {
    pub header: String,
    pub align: Align,
}

impl Column {
    pub fn left(header: impl Into<String>) -> Self {
        Self { header: header.into(), align: Align::Left }
    }
    pub fn right(header: impl Into<String>) -> Self {
        Self { header: header.into(), align: Align::Right }
    }
}

/// Render a table with given columns and rows.
pub fn render_table(columns: &[Column], rows: &[Vec<String>]) -> String {
    let num_cols = columns.len();
    let mut widths: Vec<usize> = columns
        .iter()
        .map(|c| strip_ansi(&c.header).chars().count())
        .collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(num_cols) {
            widths[i] = widths[i].max(strip_ansi(cell).chars().count());
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| pad_cell(&col.header, widths[i], &col.align))
        .collect();
    out.push_str(&format!("  {}\n", header_cells.join("  ").trim_end()));

    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("  {}\n", sep.join("  ")));

    for row in rows {
        let cells: Vec<String> = (0..num_cols)
            .map(|i| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                pad_cell(cell, widths[i], &columns[i].align)
            })
            .collect();
        out.push_str(&format!("  {}\n", cells.join("  ").trim_end()));
    }
    out
}

fn pad_cell(s: &str, width: usize, align: &Align) -> String {
    let pad = width.saturating_sub(strip_ansi(s).chars().count());
    match align {
        Align::Left => format!("{s}{}", " ".repeat(pad)),
        Align::Right => format!("{}{s}", " ".repeat(pad)),
    }
}

fn verdict_color(category: VerdictCategory) -> &'static str {
    match category {
        VerdictCategory::Healthy => GREEN,
        VerdictCategory::PotentiallyDiseased => RED,
        VerdictCategory::NeedsFurtherAnalysis => YELLOW,
        VerdictCategory::Unknown => DIM,
    }
}

/// Human-readable rendering of an analysis result.
pub fn render_result(result: &AnalysisResult) -> String {
    let mut out = format!(
        "\n{} ({}% confidence)\n\n",
        paint(verdict_color(result.health_status), result.health_status.as_str()),
        result.confidence
    );

    if result.detected_labels.is_empty() {
        out.push_str("  No plant-related labels detected.\n");
    } else {
        let rows: Vec<Vec<String>> = result
            .detected_labels
            .iter()
            .map(|l| vec![l.name.clone(), format!("{}%", l.confidence)])
            .collect();
        out.push_str(&render_table(
            &[Column::left("Label"), Column::right("Confidence")],
            &rows,
        ));
    }

    if !result.recommendations.is_empty() {
        out.push_str("\nRecommendations:\n");
        for advice in &result.recommendations {
            out.push_str(&format!("  - {advice}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use leafscan_core::DetectedLabel;

    #[test]
    fn strips_ansi() {
        let colored = format!("{GREEN}hello{RESET}");
        assert_eq!(strip_ansi(&colored), "hello");
    }

    #[test]
    fn table_aligns_columns() {
        let table = render_table(
            &[Column::left("Label"), Column::right("Confidence")],
            &[vec!["Leaf".into(), "92%".into()]],
        );
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "  Label  Confidence");
        assert_eq!(lines[2], "  Leaf          92%");
    }

    #[test]
    fn result_lists_labels_and_advice() {
        let result = AnalysisResult {
            health_status: VerdictCategory::Healthy,
            confidence: 92,
            detected_labels: vec![DetectedLabel { name: "Green Leaf".into(), confidence: 92 }],
            recommendations: vec!["Continue current care routine".into()],
        };
        let text = strip_ansi(&render_result(&result));
        assert!(text.contains("Healthy (92% confidence)"));
        assert!(text.contains("Green Leaf"));
        assert!(text.contains("  - Continue current care routine"));
    }
}
