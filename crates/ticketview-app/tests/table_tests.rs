// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use ticketview_app::{
    TICKET_COLUMNS, TicketRecord, column_widths, format_row, header_row, render_table,
};
use ticketview_testkit::{numbered_tickets, sample_tickets};

#[test]
fn sample_fixture_widths() {
    assert_eq!(
        column_widths(&sample_tickets(), &TICKET_COLUMNS),
        vec![9, 21, 10, 10, 9, 65]
    );
}

#[test]
fn sample_fixture_first_row() -> Result<()> {
    let tickets = sample_tickets();
    let row = format_row(&tickets[0], &TICKET_COLUMNS, &[9, 21, 10, 10, 9, 65])?;
    assert_eq!(
        row,
        "  23971  | 01 Dec 2021 10:35AM |  problem |  urgent  |   new   \
         | Unable to access toilet in the office                           "
    );
    Ok(())
}

#[test]
fn widths_ignore_order_and_duplicates() {
    let tickets = sample_tickets();
    let expected = column_widths(&tickets, &TICKET_COLUMNS);

    let mut reversed = tickets.clone();
    reversed.reverse();
    assert_eq!(column_widths(&reversed, &TICKET_COLUMNS), expected);

    let mut doubled = tickets.clone();
    doubled.extend(tickets);
    assert_eq!(column_widths(&doubled, &TICKET_COLUMNS), expected);
}

#[test]
fn every_row_matches_header_length() -> Result<()> {
    let tickets = numbered_tickets(990, 25);
    let widths = column_widths(&tickets, &TICKET_COLUMNS);
    let header = header_row(&TICKET_COLUMNS, &widths);
    for ticket in &tickets {
        assert_eq!(format_row(ticket, &TICKET_COLUMNS, &widths)?.len(), header.len());
    }
    Ok(())
}

#[test]
fn rendered_sample_table() -> Result<()> {
    let table = render_table(&sample_tickets())?;
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 7);
    assert_eq!(
        lines[0],
        "    ID   |   Updated at (SGT)  |   Type   | Priority |  Status |                             Subject                             "
    );
    assert_eq!(lines[1].len(), lines[0].len());
    assert!(lines[1].chars().all(|c| c == '-'));
    assert!(lines[5].starts_with(" 7662451 | 28 Nov 2021 02:02AM | question |    low   | pending "));
    Ok(())
}

#[test]
fn tickets_decode_from_api_json() -> Result<()> {
    let raw = r#"{
        "id": 35436,
        "url": "https://example.zendesk.com/api/v2/tickets/35436.json",
        "updated_at": "2021-11-25T21:35:43Z",
        "type": null,
        "subject": "Help, my printer is on fire!",
        "priority": "high",
        "status": "open",
        "tags": ["enterprise"]
    }"#;
    let record: TicketRecord = serde_json::from_str(raw)?;
    assert_eq!(record.id, Some(35436));
    assert_eq!(record.ticket_type, None);
    assert_eq!(record.priority.as_deref(), Some("high"));

    let table = render_table(&[record])?;
    assert!(table.contains("| 26 Nov 2021 05:35AM |"));
    Ok(())
}
