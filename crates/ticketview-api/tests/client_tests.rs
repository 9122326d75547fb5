// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use std::thread;
use std::time::Duration;
use ticketview_api::{Client, ping};
use ticketview_app::{ApiStatus, TicketSource};
use tiny_http::{Header, Response, Server};

const TICKET_JSON: &str = r#"{
    "id": 1,
    "url": "https://example.zendesk.com/api/v2/tickets/1.json",
    "updated_at": "2021-11-25T21:35:43Z",
    "type": "incident",
    "subject": "Sample ticket: Meet the ticket",
    "priority": "normal",
    "status": "open",
    "tags": ["sample", "support"]
}"#;

fn json_response(status: u16, body: String) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(body)
        .with_status_code(status)
        .with_header(
            Header::from_bytes("Content-Type", "application/json")
                .expect("valid content type header"),
        )
}

fn client(base_url: &str) -> Result<Client> {
    Client::new(base_url, "agent@example.com", "hunter2", Duration::from_secs(1))
}

#[test]
fn unreachable_helpdesk_is_a_transport_failure() -> Result<()> {
    let mut client = Client::new(
        "http://127.0.0.1:1",
        "agent@example.com",
        "hunter2",
        Duration::from_millis(50),
    )?;

    assert_eq!(client.count_tickets(), Err(ApiStatus::Transport));
    assert_eq!(client.list_tickets(None).err(), Some(ApiStatus::Transport));

    let error = ping(&client).expect_err("ping should fail for unreachable endpoint");
    assert!(error.to_string().contains("check api.url"));
    Ok(())
}

#[test]
fn count_sends_basic_auth_and_reads_value() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/api/v2/tickets/count.json");
        let auth = request
            .headers()
            .iter()
            .find(|header| header.field.equiv("Authorization"))
            .map(|header| header.value.as_str().to_owned());
        assert_eq!(
            auth.as_deref(),
            Some("Basic YWdlbnRAZXhhbXBsZS5jb206aHVudGVyMg==")
        );
        let body = r#"{"count":{"value":26,"refreshed_at":"2021-11-25T21:35:43Z"}}"#;
        request
            .respond(json_response(200, body.to_owned()))
            .expect("response should succeed");
    });

    let mut client = client(&addr)?;
    assert_eq!(client.count_tickets(), Ok(26));

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn list_pages_follow_links() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());
    let next_link = format!("{addr}/api/v2/tickets.json?page[size]=25&page[after]=abc");
    let prev_link = format!("{addr}/api/v2/tickets.json?page[size]=25&page[before]=xyz");

    let first_body = format!(
        r#"{{"tickets":[{TICKET_JSON}],"meta":{{"has_more":true}},"links":{{"prev":"{prev_link}","next":"{next_link}"}}}}"#
    );
    let handle = thread::spawn(move || {
        let request = server.recv().expect("first request expected");
        assert!(request.url().starts_with("/api/v2/tickets.json?"));
        assert!(request.url().contains("sort=-updated_at"));
        request
            .respond(json_response(200, first_body))
            .expect("response should succeed");

        let request = server.recv().expect("second request expected");
        assert!(request.url().contains("page[after]=abc"));
        request
            .respond(json_response(
                200,
                r#"{"tickets":[],"links":{"prev":null,"next":null}}"#.to_owned(),
            ))
            .expect("response should succeed");
    });

    let mut client = client(&addr)?;
    let first = client.list_tickets(None)?;
    assert_eq!(first.tickets.len(), 1);
    assert_eq!(first.tickets[0].id, Some(1));
    assert_eq!(
        first.tickets[0].subject.as_deref(),
        Some("Sample ticket: Meet the ticket")
    );
    assert_eq!(first.next_cursor.as_deref(), Some(next_link.as_str()));
    assert_eq!(first.prev_cursor.as_deref(), Some(prev_link.as_str()));

    let second = client.list_tickets(first.next_cursor.as_deref())?;
    assert!(second.tickets.is_empty());
    assert!(second.next_cursor.is_none());

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn get_ticket_maps_http_statuses() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let replies = [
            (
                "/api/v2/tickets/1.json",
                200,
                format!(r#"{{"ticket":{TICKET_JSON}}}"#),
            ),
            (
                "/api/v2/tickets/999.json",
                404,
                r#"{"error":"RecordNotFound","description":"Not found"}"#.to_owned(),
            ),
            (
                "/api/v2/tickets/2.json",
                401,
                r#"{"error":"Couldn't authenticate you"}"#.to_owned(),
            ),
            ("/api/v2/tickets/3.json", 429, String::new()),
            ("/api/v2/tickets/4.json", 503, String::new()),
        ];
        for (path, status, body) in replies {
            let request = server.recv().expect("request expected");
            assert_eq!(request.url(), path);
            request
                .respond(json_response(status, body))
                .expect("response should succeed");
        }
    });

    let mut client = client(&addr)?;
    let ticket = client.get_ticket("1")?;
    assert_eq!(ticket.status.as_deref(), Some("open"));
    assert_eq!(ticket.ticket_type.as_deref(), Some("incident"));

    assert_eq!(client.get_ticket("999"), Err(ApiStatus::NotFound));
    assert_eq!(client.get_ticket("2"), Err(ApiStatus::Unauthorized));
    assert_eq!(client.get_ticket("3"), Err(ApiStatus::RateLimited));
    assert_eq!(client.get_ticket("4"), Err(ApiStatus::Other(503)));

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn malformed_body_is_a_transport_failure() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        request
            .respond(json_response(200, "<html>maintenance</html>".to_owned()))
            .expect("response should succeed");
    });

    let mut client = client(&addr)?;
    assert_eq!(client.count_tickets(), Err(ApiStatus::Transport));

    handle.join().expect("server thread should join");
    Ok(())
}
