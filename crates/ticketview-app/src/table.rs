// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::{ColumnSpec, TICKET_COLUMNS, TicketField, TicketRecord};
use crate::timestamp::{DISPLAY_TIMESTAMP_LEN, FormatError, normalize_timestamp};

/// One space of breathing room on each side of the widest value.
const CELL_PADDING: usize = 2;

fn text_len(value: &str) -> usize {
    value.chars().count()
}

/// Minimum printable width of each column, padding included.
///
/// `updated_at` is pinned to the normalized timestamp length because raw API
/// values are converted before display. Null values do not count.
pub fn column_widths(records: &[TicketRecord], columns: &[ColumnSpec]) -> Vec<usize> {
    columns
        .iter()
        .map(|column| {
            let widest = if column.field == TicketField::UpdatedAt {
                DISPLAY_TIMESTAMP_LEN
            } else {
                records
                    .iter()
                    .filter_map(|record| record.field_text(column.field))
                    .map(|text| text_len(&text))
                    .fold(text_len(column.header), usize::max)
            };
            widest + CELL_PADDING
        })
        .collect()
}

/// Lays out a single cell `width` characters wide, plus a leading `|` for
/// every column but the first.
///
/// Front and back padding are `ceil(gap / 2)` and `floor(gap / 2)`. A
/// left-indented cell swaps the front padding for one fixed space and drops
/// the last space of the back padding.
pub fn format_cell(value: &str, width: usize, first_column: bool, left_indent: bool) -> String {
    let gap = width.saturating_sub(text_len(value));
    let front = " ".repeat(gap.div_ceil(2));
    let back = " ".repeat(gap / 2);
    let border = if first_column { "" } else { "|" };

    if left_indent {
        let trimmed_back = back.strip_suffix(' ').unwrap_or(&back);
        format!("{border} {value}{front}{trimmed_back}")
    } else {
        format!("{border}{front}{value}{back}")
    }
}

pub fn header_row(columns: &[ColumnSpec], widths: &[usize]) -> String {
    columns
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(idx, (column, width))| format_cell(column.header, *width, idx == 0, false))
        .collect()
}

pub fn format_row(
    record: &TicketRecord,
    columns: &[ColumnSpec],
    widths: &[usize],
) -> Result<String, FormatError> {
    let mut row = String::new();
    for (column, width) in columns.iter().zip(widths) {
        let raw = record.field_text(column.field).unwrap_or_default();
        let value = if column.field == TicketField::UpdatedAt {
            normalize_timestamp(&raw)?
        } else {
            raw
        };
        row.push_str(&format_cell(
            &value,
            *width,
            column.field == TicketField::Id,
            column.field == TicketField::Subject,
        ));
    }
    Ok(row)
}

/// Renders the header, a dashed rule and one line per ticket. Each line ends
/// with a newline; no tickets means no output at all.
pub fn render_table(records: &[TicketRecord]) -> Result<String, FormatError> {
    render_table_with(records, &TICKET_COLUMNS)
}

pub fn render_table_with(
    records: &[TicketRecord],
    columns: &[ColumnSpec],
) -> Result<String, FormatError> {
    if records.is_empty() {
        return Ok(String::new());
    }

    let widths = column_widths(records, columns);
    let header = header_row(columns, &widths);

    let mut out = String::new();
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"-".repeat(text_len(&header)));
    out.push('\n');
    for record in records {
        out.push_str(&format_row(record, columns, &widths)?);
        out.push('\n');
    }
    Ok(out)
}
