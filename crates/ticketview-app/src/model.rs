// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Deserialize;

/// Number of tickets requested per page.
pub const PAGE_SIZE: usize = 25;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TicketRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, rename = "type")]
    pub ticket_type: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl TicketRecord {
    /// Display text for a field, `None` when the API sent null.
    pub fn field_text(&self, field: TicketField) -> Option<String> {
        match field {
            TicketField::Id => self.id.map(|id| id.to_string()),
            TicketField::UpdatedAt => self.updated_at.clone(),
            TicketField::Type => self.ticket_type.clone(),
            TicketField::Subject => self.subject.clone(),
            TicketField::Priority => self.priority.clone(),
            TicketField::Status => self.status.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketField {
    Id,
    UpdatedAt,
    Type,
    Subject,
    Priority,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub header: &'static str,
    pub field: TicketField,
}

impl ColumnSpec {
    pub const fn new(header: &'static str, field: TicketField) -> Self {
        Self { header, field }
    }
}

pub const TICKET_COLUMNS: [ColumnSpec; 6] = [
    ColumnSpec::new("ID", TicketField::Id),
    ColumnSpec::new("Updated at (SGT)", TicketField::UpdatedAt),
    ColumnSpec::new("Type", TicketField::Type),
    ColumnSpec::new("Priority", TicketField::Priority),
    ColumnSpec::new("Status", TicketField::Status),
    ColumnSpec::new("Subject", TicketField::Subject),
];

/// One page of tickets plus the opaque links the source hands back for its
/// neighbours.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketPage {
    pub tickets: Vec<TicketRecord>,
    pub prev_cursor: Option<String>,
    pub next_cursor: Option<String>,
}

impl TicketPage {
    pub fn is_full(&self) -> bool {
        self.tickets.len() >= PAGE_SIZE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Previous => "prev",
            Self::Next => "next",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "prev" => Some(Self::Previous),
            "next" => Some(Self::Next),
            _ => None,
        }
    }
}

/// Paging directions that may still hold unseen tickets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionSet {
    previous: bool,
    next: bool,
}

impl DirectionSet {
    pub const fn both() -> Self {
        Self {
            previous: true,
            next: true,
        }
    }

    pub const fn empty() -> Self {
        Self {
            previous: false,
            next: false,
        }
    }

    pub const fn contains(self, direction: Direction) -> bool {
        match direction {
            Direction::Previous => self.previous,
            Direction::Next => self.next,
        }
    }

    pub fn remove(&mut self, direction: Direction) {
        match direction {
            Direction::Previous => self.previous = false,
            Direction::Next => self.next = false,
        }
    }

    pub fn without(mut self, direction: Direction) -> Self {
        self.remove(direction);
        self
    }

    pub const fn len(self) -> usize {
        self.previous as usize + self.next as usize
    }

    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }
}
