//! Fixed-width terminal rendering of a [`Frame`] for the `--table` preview.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::data::Value;
use crate::frame::Frame;

/// Renders up to `limit` rows of the frame as an elastic table: every column
/// padded to its widest cell, missing cells blank.
pub fn render_frame(frame: &Frame, limit: usize) -> String {
    let rows: Vec<Vec<String>> = frame
        .rows()
        .take(limit)
        .map(|row| {
            row.iter()
                .map(|cell| cell.as_ref().map(Value::as_display).unwrap_or_default())
                .collect()
        })
        .collect();

    let headers = frame.columns();
    let mut widths = headers
        .iter()
        .map(|header| header.chars().count())
        .collect::<Vec<_>>();
    for row in &rows {
        for (idx, cell) in row.iter().enumerate().take(widths.len()) {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }
    for width in &mut widths {
        *width = (*width).max(1);
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(headers, &widths));

    let separators = widths
        .iter()
        .map(|width| "-".repeat((*width).max(3)))
        .collect::<Vec<_>>();
    let separator_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&separators, &separator_widths));

    for row in &rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }

    output
}

pub fn print_frame(frame: &Frame, limit: usize) {
    print!("{}", render_frame(frame, limit));
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let mut cells = Vec::with_capacity(values.len());
    for (idx, value) in values.iter().enumerate() {
        if idx >= widths.len() {
            break;
        }
        let sanitized = sanitize_cell(value);
        let displayed = sanitized.chars().count();
        let mut cell = sanitized.into_owned();
        let padding = widths[idx].saturating_sub(displayed);
        if padding > 0 {
            cell.push_str(&" ".repeat(padding));
        }
        cells.push(cell);
    }
    let mut line = cells.join("  ");
    while line.ends_with(' ') {
        line.pop();
    }
    line
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        let mut sanitized = String::with_capacity(value.len());
        for ch in value.chars() {
            match ch {
                '\n' | '\r' | '\t' => sanitized.push(' '),
                other => sanitized.push(other),
            }
        }
        Cow::Owned(sanitized)
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Frame {
        let mut frame = Frame::new(["business_id", "country"]).unwrap();
        frame
            .push_row(vec![
                Some(Value::String("auto_000001".to_string())),
                Some(Value::String("eswatini".to_string())),
            ])
            .unwrap();
        frame
            .push_row(vec![Some(Value::String("auto_000002".to_string())), None])
            .unwrap();
        frame
    }

    #[test]
    fn renders_padded_header_separator_and_rows() {
        let rendered = render_frame(&sample(), 10);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "business_id  country");
        assert_eq!(lines[1], "-----------  --------");
        assert_eq!(lines[2], "auto_000001  eswatini");
        assert_eq!(lines[3], "auto_000002");
    }

    #[test]
    fn limit_caps_the_displayed_rows() {
        let rendered = render_frame(&sample(), 1);
        assert_eq!(rendered.lines().count(), 3);
        assert!(!rendered.contains("auto_000002"));
    }

    #[test]
    fn control_characters_are_flattened_to_spaces() {
        let mut frame = Frame::new(["note"]).unwrap();
        frame
            .push_row(vec![Some(Value::String("line\none".to_string()))])
            .unwrap();
        let rendered = render_frame(&frame, 10);
        assert!(rendered.contains("line one"));
    }
}
