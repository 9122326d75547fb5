// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::HashMap;
use ticketview_app::{ApiStatus, Fetch, PAGE_SIZE, TicketPage, TicketRecord, TicketSource};
use time::macros::{datetime, format_description};
use time::{Duration, OffsetDateTime};

const SUBJECTS: [&str; 8] = [
    "Printer keeps jamming on the third floor",
    "Cannot log in to the VPN",
    "Request for a second monitor",
    "Coffee machine is leaking",
    "Password reset link expired",
    "Projector in room B has no signal",
    "Invoice shows the wrong billing address",
    "Parking badge stopped working",
];
const TYPES: [&str; 4] = ["problem", "incident", "question", "task"];
const PRIORITIES: [&str; 4] = ["low", "normal", "high", "urgent"];
const STATUSES: [&str; 4] = ["new", "open", "pending", "solved"];

pub fn ticket(
    id: u64,
    updated_at: &str,
    ticket_type: &str,
    priority: &str,
    status: &str,
    subject: &str,
) -> TicketRecord {
    TicketRecord {
        id: Some(id),
        updated_at: Some(updated_at.to_owned()),
        ticket_type: Some(ticket_type.to_owned()),
        subject: Some(subject.to_owned()),
        priority: Some(priority.to_owned()),
        status: Some(status.to_owned()),
    }
}

/// Five tickets with uneven field lengths; the longest subject is 63
/// characters.
pub fn sample_tickets() -> Vec<TicketRecord> {
    vec![
        ticket(
            23971,
            "2021-12-01T02:35:51Z",
            "problem",
            "urgent",
            "new",
            "Unable to access toilet in the office",
        ),
        ticket(
            24,
            "2021-11-30T01:15:51Z",
            "question",
            "low",
            "open",
            "Is Santa going to give me a Christmas gift?",
        ),
        ticket(
            9561,
            "2021-11-25T21:35:43Z",
            "task",
            "high",
            "solved",
            "Book a dinner reservation for parents' 25th wedding anniversary",
        ),
        ticket(
            7662451,
            "2021-11-27T18:02:10Z",
            "question",
            "low",
            "pending",
            "Can shark eat chocolate?",
        ),
        ticket(
            199,
            "2021-11-22T07:30:01Z",
            "incident",
            "normal",
            "solved",
            "I accidently dropped my Mom's  flower vase",
        ),
    ]
}

/// `count` generated tickets with ids starting at `first_id`, each updated
/// one hour before the previous one.
pub fn numbered_tickets(first_id: u64, count: usize) -> Vec<TicketRecord> {
    let newest: OffsetDateTime = datetime!(2021-12-01 12:00:00 UTC);
    (0..count)
        .map(|offset| {
            let id = first_id + offset as u64;
            let updated = newest - Duration::hours(offset as i64);
            let updated_at = updated
                .format(format_description!(
                    "[year]-[month]-[day]T[hour]:[minute]:[second]Z"
                ))
                .expect("fixture timestamp should format");
            ticket(
                id,
                &updated_at,
                TYPES[offset % TYPES.len()],
                PRIORITIES[offset % PRIORITIES.len()],
                STATUSES[offset % STATUSES.len()],
                SUBJECTS[offset % SUBJECTS.len()],
            )
        })
        .collect()
}

pub fn page(tickets: Vec<TicketRecord>, prev: Option<&str>, next: Option<&str>) -> TicketPage {
    TicketPage {
        tickets,
        prev_cursor: prev.map(str::to_owned),
        next_cursor: next.map(str::to_owned),
    }
}

pub fn page_cursor(index: usize) -> String {
    format!("page-{index}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceCall {
    Count,
    List(Option<String>),
    Get(String),
}

/// In-memory [`TicketSource`] that answers from canned responses and records
/// every call it receives.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    count: Fetch<u64>,
    first_page: Fetch<TicketPage>,
    linked_pages: HashMap<String, Fetch<TicketPage>>,
    tickets: HashMap<String, Fetch<TicketRecord>>,
    calls: Vec<SourceCall>,
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self {
            count: Ok(0),
            first_page: Ok(TicketPage::default()),
            linked_pages: HashMap::new(),
            tickets: HashMap::new(),
            calls: Vec::new(),
        }
    }
}

impl ScriptedSource {
    /// A source holding `total` generated tickets split into linked pages
    /// of [`PAGE_SIZE`]. Cursors past either end answer with an empty page.
    pub fn paged(total: usize) -> Self {
        let tickets = numbered_tickets(1, total);
        let chunks: Vec<Vec<TicketRecord>> = tickets
            .chunks(PAGE_SIZE)
            .map(<[TicketRecord]>::to_vec)
            .collect();

        let mut source = Self::default().with_count(total as u64);
        for (index, chunk) in chunks.into_iter().enumerate() {
            let page = TicketPage {
                tickets: chunk,
                prev_cursor: Some(
                    index
                        .checked_sub(1)
                        .map_or_else(|| "page-start".to_owned(), page_cursor),
                ),
                next_cursor: Some(page_cursor(index + 1)),
            };
            if index == 0 {
                source.first_page = Ok(page.clone());
            }
            source.linked_pages.insert(page_cursor(index), Ok(page));
        }
        for record in tickets {
            if let Some(id) = record.id {
                source.tickets.insert(id.to_string(), Ok(record));
            }
        }
        source
    }

    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Ok(count);
        self
    }

    pub fn with_count_failure(mut self, status: ApiStatus) -> Self {
        self.count = Err(status);
        self
    }

    pub fn with_first_page(mut self, page: Fetch<TicketPage>) -> Self {
        self.first_page = page;
        self
    }

    pub fn with_linked_page(mut self, cursor: &str, page: Fetch<TicketPage>) -> Self {
        self.linked_pages.insert(cursor.to_owned(), page);
        self
    }

    pub fn with_ticket(mut self, record: TicketRecord) -> Self {
        let key = record.id.map(|id| id.to_string()).unwrap_or_default();
        self.tickets.insert(key, Ok(record));
        self
    }

    pub fn with_ticket_failure(mut self, id: &str, status: ApiStatus) -> Self {
        self.tickets.insert(id.to_owned(), Err(status));
        self
    }

    pub fn calls(&self) -> &[SourceCall] {
        &self.calls
    }
}

impl TicketSource for ScriptedSource {
    fn count_tickets(&mut self) -> Fetch<u64> {
        self.calls.push(SourceCall::Count);
        self.count
    }

    fn list_tickets(&mut self, cursor: Option<&str>) -> Fetch<TicketPage> {
        self.calls.push(SourceCall::List(cursor.map(str::to_owned)));
        match cursor {
            None => self.first_page.clone(),
            Some(cursor) => self
                .linked_pages
                .get(cursor)
                .cloned()
                .unwrap_or_else(|| Ok(TicketPage::default())),
        }
    }

    fn get_ticket(&mut self, id: &str) -> Fetch<TicketRecord> {
        self.calls.push(SourceCall::Get(id.to_owned()));
        self.tickets
            .get(id)
            .cloned()
            .unwrap_or(Err(ApiStatus::NotFound))
    }
}
