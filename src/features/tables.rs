//! Markdown table conversion
//!
//! Finds maximal contiguous runs of pipe-delimited lines and converts
//! each run into a LaTeX `table`/`tabular` environment with booktabs
//! rules. Columns are left-aligned only; caption and label are fixed
//! placeholder text. Tables convert only in the academic-paper
//! pipeline; base LaTeX conversion leaves them untouched.

use std::fmt::Write;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref TABLE_RUN: Regex = Regex::new(r"(?m)((?:^\|.*\|[ \t]*\r?\n?)+)").unwrap();
    static ref SEPARATOR_CELL: Regex = Regex::new(r"^[-:]+$").unwrap();
}

/// Transient parse of one pipe-delimited run
#[derive(Debug, Clone)]
pub struct Table {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
    pub columns: usize,
}

/// Parse a run of pipe-delimited lines. If every cell of the second
/// line is a separator (dashes/colons) and the run has more than two
/// lines, row 1 is the header and rows 3+ are data; otherwise every
/// line is data with the column count taken from the first row.
pub fn parse_table(block: &str) -> Option<Table> {
    let lines: Vec<&str> = block.trim().lines().collect();
    if lines.len() < 2 {
        return None;
    }

    let rows: Vec<Vec<String>> = lines.iter().map(|line| split_row(line)).collect();

    let has_header_separator =
        !rows[1].is_empty() && rows[1].iter().all(|cell| SEPARATOR_CELL.is_match(cell));

    if has_header_separator && rows.len() > 2 {
        Some(Table {
            columns: rows[0].len(),
            header: Some(rows[0].clone()),
            rows: rows[2..].to_vec(),
        })
    } else {
        Some(Table {
            columns: rows[0].len(),
            header: None,
            rows,
        })
    }
}

/// Render a parsed table as a LaTeX table environment
pub fn to_latex(table: &Table) -> String {
    let mut latex = String::from("\\begin{table}[h]\n\\centering\n");
    let _ = writeln!(latex, "\\begin{{tabular}}{{{}}}", "l".repeat(table.columns));
    latex.push_str("\\toprule\n");

    if let Some(header) = &table.header {
        let _ = writeln!(latex, "{} \\\\", header.join(" & "));
        latex.push_str("\\midrule\n");
    }

    for row in &table.rows {
        let _ = writeln!(latex, "{} \\\\", row.join(" & "));
    }

    latex.push_str("\\bottomrule\n\\end{tabular}\n");
    // Placeholder caption/label, filled in by the author afterwards
    latex.push_str("\\caption{Table caption}\n\\label{tab:label}\n\\end{table}\n");
    latex
}

/// Convert every pipe-table run in the text; runs that fail to parse
/// are left untouched
pub fn convert_tables(text: &str) -> String {
    TABLE_RUN
        .replace_all(text, |caps: &Captures| match parse_table(&caps[1]) {
            Some(table) => to_latex(&table),
            None => caps[1].to_string(),
        })
        .into_owned()
}

fn split_row(line: &str) -> Vec<String> {
    line.trim()
        .trim_start_matches('|')
        .trim_end_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SIMPLE: &str = "| A | B |\n|---|---|\n| 1 | 2 |\n";

    #[test]
    fn test_parse_header_table() {
        let table = parse_table(SIMPLE).unwrap();
        assert_eq!(table.columns, 2);
        assert_eq!(table.header.as_ref().unwrap(), &vec!["A", "B"]);
        assert_eq!(table.rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_parse_headerless_table() {
        let table = parse_table("| x | y |\n| 1 | 2 |\n").unwrap();
        assert!(table.header.is_none());
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.columns, 2);
    }

    #[test]
    fn test_alignment_colons_count_as_separator() {
        let table = parse_table("| A | B |\n|:--|--:|\n| 1 | 2 |\n").unwrap();
        assert!(table.header.is_some());
    }

    #[test]
    fn test_render_simple_table() {
        let table = parse_table(SIMPLE).unwrap();
        let latex = to_latex(&table);
        assert!(latex.contains("\\begin{tabular}{ll}"));
        assert!(latex.contains("A & B \\\\"));
        assert!(latex.contains("\\midrule"));
        assert!(latex.contains("1 & 2 \\\\"));
        assert!(latex.contains("\\toprule"));
        assert!(latex.contains("\\bottomrule"));
        assert!(latex.contains("\\caption{Table caption}"));
    }

    #[test]
    fn test_convert_tables_in_document() {
        let input = format!("before\n\n{}\nafter\n", SIMPLE);
        let result = convert_tables(&input);
        assert!(result.contains("\\begin{table}[h]"));
        assert!(result.contains("before"));
        assert!(result.contains("after"));
        assert!(!result.contains("| A |"));
    }

    #[test]
    fn test_single_pipe_line_left_untouched() {
        let input = "| lonely |\ntext\n";
        assert_eq!(convert_tables(input), input);
    }

    #[test]
    fn test_two_adjacent_tables_stay_one_run() {
        // Contiguous pipe lines are by definition one maximal run
        let input = "| A |\n|---|\n| 1 |\n\n| B |\n|---|\n| 2 |\n";
        let result = convert_tables(input);
        assert_eq!(result.matches("\\begin{table}").count(), 2);
    }
}
