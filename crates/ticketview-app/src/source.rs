// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::{TicketPage, TicketRecord};
use crate::status::ApiStatus;

pub type Fetch<T> = Result<T, ApiStatus>;

/// Read-only access to a helpdesk's tickets. Every call makes a single
/// attempt and reports failures as an [`ApiStatus`].
pub trait TicketSource {
    fn count_tickets(&mut self) -> Fetch<u64>;

    /// Without a cursor, returns the most recently updated tickets first.
    fn list_tickets(&mut self, cursor: Option<&str>) -> Fetch<TicketPage>;

    fn get_ticket(&mut self, id: &str) -> Fetch<TicketRecord>;
}

impl<S: TicketSource + ?Sized> TicketSource for &mut S {
    fn count_tickets(&mut self) -> Fetch<u64> {
        (**self).count_tickets()
    }

    fn list_tickets(&mut self, cursor: Option<&str>) -> Fetch<TicketPage> {
        (**self).list_tickets(cursor)
    }

    fn get_ticket(&mut self, id: &str) -> Fetch<TicketRecord> {
        (**self).get_ticket(id)
    }
}
