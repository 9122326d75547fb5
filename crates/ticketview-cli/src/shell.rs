// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use ticketview_app::{
    ApiStatus, Direction, Pager, PagerAction, PagingNotice, TicketRecord, TicketSource,
    render_table,
};
use tracing::{debug, info, warn};

const WELCOME: &str = "Welcome to the Ticket Viewer.";
const GOODBYE: &str = "Thank you for using Ticket Viewer. Bye. :D";
const MAIN_MENU: &str = "Select view options:\n\
    * Type '1' to view all tickets\n\
    * Type '2' to view a specific ticket\n\
    * Type 'quit' to exit";
const NO_TICKETS: &str = "There are no tickets to see.";
const TICKET_ID_PROMPT: &str = "Enter ticket ID:";
const NOT_AN_INTEGER: &str = "Ticket number has to be an integer. Please try again.";
const INVALID_INPUT: &str = "Invalid input. Please try again.";
const RENDER_FAILED: &str = "Oops some of these tickets could not be displayed. \
    Please try other options.";

const QUIT: &str = "quit";

/// Line-oriented front end: reads commands from `input`, talks to the ticket
/// source and writes menus and tables to `out`.
pub struct Shell<S> {
    source: S,
    pager: Pager,
}

impl<S: TicketSource> Shell<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            pager: Pager::default(),
        }
    }

    /// Runs until the user types `quit` or the input ends.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(out, "\n{WELCOME}")?;
        write_main_menu(out)?;

        let mut lines = input.lines();
        while let Some(line) = lines.next() {
            let line = line.context("read command")?;
            let command = line.trim();
            if command == QUIT {
                return write_goodbye(out);
            }

            if self.pager.is_paging() {
                self.page(command, out)?;
                continue;
            }

            match command {
                "1" => self.view_all(out)?,
                "2" => {
                    writeln!(out, "\n{TICKET_ID_PROMPT}")?;
                    out.flush()?;
                    let Some(id_line) = lines.next() else {
                        break;
                    };
                    let id_line = id_line.context("read ticket ID")?;
                    let id = id_line.trim();
                    if id == QUIT {
                        return write_goodbye(out);
                    }
                    self.view_one(id, out)?;
                }
                other => {
                    debug!(command = other, "unrecognized main menu command");
                    writeln!(out, "\n{INVALID_INPUT}")?;
                    write_main_menu(out)?;
                }
            }
        }

        debug!("input closed");
        Ok(())
    }

    fn view_all<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let total = match self.source.count_tickets() {
            Ok(total) => total,
            Err(status) => return write_failure(status, out),
        };
        info!(total, "counted tickets");

        if total == 0 {
            writeln!(out, "\n{NO_TICKETS}")?;
            return write_main_menu(out);
        }

        let page = match self.source.list_tickets(None) {
            Ok(page) => page,
            Err(status) => return write_failure(status, out),
        };

        let paging = self.pager.open(total, &page);
        if !self.write_table(&page.tickets, out)? {
            return Ok(());
        }
        if paging {
            self.write_paging_menu(out)
        } else {
            write_main_menu(out)
        }
    }

    fn view_one<W: Write>(&mut self, id: &str, out: &mut W) -> Result<()> {
        if id.is_empty() || !id.bytes().all(|byte| byte.is_ascii_digit()) {
            writeln!(out, "\n{NOT_AN_INTEGER}")?;
            return write_main_menu(out);
        }

        let ticket = match self.source.get_ticket(id) {
            Ok(ticket) => ticket,
            Err(status) => return write_failure(status, out),
        };
        if self.write_table(std::slice::from_ref(&ticket), out)? {
            write_main_menu(out)?;
        }
        Ok(())
    }

    fn page<W: Write>(&mut self, command: &str, out: &mut W) -> Result<()> {
        match self.pager.handle_input(command, &mut self.source) {
            PagerAction::ShowPage { tickets, notice } => {
                if !self.write_table(&tickets, out)? {
                    return Ok(());
                }
                if let Some(notice) = notice {
                    write_notice(notice, out)?;
                }
                self.write_paging_menu(out)
            }
            PagerAction::Notice(notice) => {
                write_notice(notice, out)?;
                self.write_paging_menu(out)
            }
            PagerAction::Failed(status) => write_failure(status, out),
            PagerAction::ReturnToMenu => write_main_menu(out),
        }
    }

    /// Writes the tickets as a table. On a rendering failure, writes a
    /// plain message, leaves paging and shows the main menu instead.
    /// Returns whether the table was written.
    fn write_table<W: Write>(&mut self, tickets: &[TicketRecord], out: &mut W) -> Result<bool> {
        match render_table(tickets) {
            Ok(table) => {
                write!(out, "\n{table}")?;
                Ok(true)
            }
            Err(error) => {
                warn!(input = error.input(), "cannot render tickets");
                self.pager.leave();
                writeln!(out, "\n{RENDER_FAILED}")?;
                write_main_menu(out)?;
                Ok(false)
            }
        }
    }

    fn write_paging_menu<W: Write>(&self, out: &mut W) -> Result<()> {
        let viable = self.pager.viable();
        let option = match (
            viable.contains(Direction::Next),
            viable.contains(Direction::Previous),
        ) {
            (true, true) => Some("* Type 'next' or 'prev' to see other tickets"),
            (true, false) => Some("* Type 'next' to see other tickets"),
            (false, true) => Some("* Type 'prev' to see other tickets"),
            (false, false) => None,
        };

        writeln!(out, "\nSelect view options:")?;
        if let Some(option) = option {
            writeln!(out, "{option}")?;
        }
        writeln!(out, "* Type 'menu' to go back to the main menu")?;
        writeln!(out, "* Type '{QUIT}' to exit")?;
        out.flush()?;
        Ok(())
    }
}

fn write_main_menu<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "\n{MAIN_MENU}")?;
    out.flush()?;
    Ok(())
}

fn write_notice<W: Write>(notice: PagingNotice, out: &mut W) -> Result<()> {
    writeln!(out, "\n{}", notice.message())?;
    Ok(())
}

fn write_failure<W: Write>(status: ApiStatus, out: &mut W) -> Result<()> {
    warn!(%status, code = status.code(), "helpdesk request failed");
    writeln!(out, "\n{}", status.user_message())?;
    write_main_menu(out)
}

fn write_goodbye<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "\n{GOODBYE}\n")?;
    out.flush()?;
    Ok(())
}
