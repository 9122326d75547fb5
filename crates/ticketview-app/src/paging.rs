// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::debug;

use crate::model::{Direction, DirectionSet, PAGE_SIZE, TicketPage, TicketRecord};
use crate::source::TicketSource;
use crate::status::ApiStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingSession {
    pub prev_cursor: Option<String>,
    pub next_cursor: Option<String>,
    pub viable: DirectionSet,
}

impl PagingSession {
    fn from_page(page: &TicketPage, viable: DirectionSet) -> Self {
        Self {
            prev_cursor: page.prev_cursor.clone(),
            next_cursor: page.next_cursor.clone(),
            viable,
        }
    }

    fn cursor(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::Previous => self.prev_cursor.as_deref(),
            Direction::Next => self.next_cursor.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PagerState {
    #[default]
    Idle,
    Paging(PagingSession),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerCommand {
    Go(Direction),
    Menu,
    Unrecognized,
}

impl PagerCommand {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input == "menu" {
            return Self::Menu;
        }
        Direction::parse(input).map_or(Self::Unrecognized, Self::Go)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingNotice {
    /// One direction is used up but the other is still open.
    EndOfDirection,
    /// Neither direction has anything left.
    Exhausted,
    InvalidInput,
}

impl PagingNotice {
    pub const fn message(self) -> &'static str {
        match self {
            Self::EndOfDirection => {
                "It seems that you have reached the end of the table. \
                 You may choose to go in the opposite direction."
            }
            Self::Exhausted => {
                "It seems that there are no other tickets to see. \
                 You may go back to the main menu and try again."
            }
            Self::InvalidInput => "Invalid input. Please try again.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagerAction {
    ShowPage {
        tickets: Vec<TicketRecord>,
        notice: Option<PagingNotice>,
    },
    Notice(PagingNotice),
    /// The fetch failed and the pager is idle again.
    Failed(ApiStatus),
    ReturnToMenu,
}

/// Tracks cursors and which directions may still hold tickets while the
/// user pages through a result set larger than one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pager {
    state: PagerState,
}

impl Pager {
    pub fn state(&self) -> &PagerState {
        &self.state
    }

    pub fn is_paging(&self) -> bool {
        matches!(self.state, PagerState::Paging(_))
    }

    /// Directions the user may still ask for. Empty when idle.
    pub fn viable(&self) -> DirectionSet {
        match &self.state {
            PagerState::Idle => DirectionSet::empty(),
            PagerState::Paging(session) => session.viable,
        }
    }

    /// Starts paging from the first page of a result set.
    pub fn enter(&mut self, page: &TicketPage) {
        debug!(tickets = page.tickets.len(), "entering paging");
        self.state = PagerState::Paging(PagingSession::from_page(page, DirectionSet::both()));
    }

    /// Enters paging only when `total` tickets do not fit on one page.
    /// Returns whether the pager is now paging.
    pub fn open(&mut self, total: u64, page: &TicketPage) -> bool {
        if total > PAGE_SIZE as u64 {
            self.enter(page);
            true
        } else {
            self.leave();
            false
        }
    }

    pub fn leave(&mut self) {
        self.state = PagerState::Idle;
    }

    pub fn handle_input<S: TicketSource>(&mut self, input: &str, source: &mut S) -> PagerAction {
        self.dispatch(PagerCommand::parse(input), source)
    }

    pub fn dispatch<S: TicketSource>(
        &mut self,
        command: PagerCommand,
        source: &mut S,
    ) -> PagerAction {
        match command {
            PagerCommand::Menu => {
                self.leave();
                PagerAction::ReturnToMenu
            }
            PagerCommand::Unrecognized => PagerAction::Notice(PagingNotice::InvalidInput),
            PagerCommand::Go(direction) => self.request(direction, source),
        }
    }

    fn request<S: TicketSource>(&mut self, direction: Direction, source: &mut S) -> PagerAction {
        let PagerState::Paging(session) = &mut self.state else {
            return PagerAction::Notice(PagingNotice::InvalidInput);
        };

        if !session.viable.contains(direction) {
            let notice = if session.viable.is_empty() {
                PagingNotice::InvalidInput
            } else {
                PagingNotice::EndOfDirection
            };
            return PagerAction::Notice(notice);
        }

        let fetched = match session.cursor(direction) {
            Some(cursor) => source.list_tickets(Some(cursor)),
            None => Ok(TicketPage::default()),
        };

        let page = match fetched {
            Ok(page) => page,
            Err(status) => {
                debug!(direction = direction.as_str(), %status, "page fetch failed");
                self.leave();
                return PagerAction::Failed(status);
            }
        };

        debug!(
            direction = direction.as_str(),
            tickets = page.tickets.len(),
            "fetched page"
        );

        if page.tickets.is_empty() {
            session.viable.remove(direction);
            let notice = if session.viable.is_empty() {
                PagingNotice::Exhausted
            } else {
                PagingNotice::EndOfDirection
            };
            return PagerAction::Notice(notice);
        }

        let (viable, notice) = if page.is_full() {
            (DirectionSet::both(), None)
        } else {
            (
                DirectionSet::both().without(direction),
                Some(PagingNotice::EndOfDirection),
            )
        };
        *session = PagingSession::from_page(&page, viable);

        PagerAction::ShowPage {
            tickets: page.tickets,
            notice,
        }
    }
}
