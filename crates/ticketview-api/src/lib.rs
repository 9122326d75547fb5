// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use reqwest::blocking::{Client as HttpClient, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use ticketview_app::{ApiStatus, Fetch, PAGE_SIZE, TicketPage, TicketRecord, TicketSource};
use tracing::{debug, warn};
use url::Url;

/// Blocking client for the helpdesk tickets API, authenticated with HTTP
/// basic auth.
#[derive(Clone)]
pub struct Client {
    base_url: String,
    email: String,
    password: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, email: &str, password: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("api.url must not be empty");
        }
        let parsed = Url::parse(&base_url)
            .with_context(|| format!("api.url {base_url:?} is not a valid URL"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "api.url {base_url:?} must use http or https, got {}",
                parsed.scheme()
            );
        }
        if email.trim().is_empty() {
            bail!("api.email must not be empty");
        }
        if password.is_empty() {
            bail!("api.password must not be empty");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            email: email.to_owned(),
            password: password.to_owned(),
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn count_url(&self) -> String {
        format!("{}/api/v2/tickets/count.json", self.base_url)
    }

    pub fn first_page_url(&self) -> String {
        format!(
            "{}/api/v2/tickets.json?page[size]={PAGE_SIZE}&sort=-updated_at",
            self.base_url
        )
    }

    pub fn ticket_url(&self, id: &str) -> String {
        format!("{}/api/v2/tickets/{id}.json", self.base_url)
    }

    pub fn count(&self) -> Fetch<u64> {
        let body: CountResponse = self.get_json(&self.count_url())?;
        Ok(body.count.value)
    }

    /// Fetches one page. `cursor` is a full link taken from a previous
    /// page's `links` object.
    pub fn list_page(&self, cursor: Option<&str>) -> Fetch<TicketPage> {
        let url = cursor.map_or_else(|| self.first_page_url(), str::to_owned);
        let body: TicketListResponse = self.get_json(&url)?;
        Ok(TicketPage {
            tickets: body.tickets,
            prev_cursor: body.links.prev,
            next_cursor: body.links.next,
        })
    }

    pub fn ticket(&self, id: &str) -> Fetch<TicketRecord> {
        let body: SingleTicketResponse = self.get_json(&self.ticket_url(id))?;
        Ok(body.ticket)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Fetch<T> {
        debug!(url, "GET");
        let response = self
            .http
            .get(url)
            .basic_auth(&self.email, Some(&self.password))
            .send()
            .map_err(|error| transport_failure(url, &error))?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "response");
        if !status.is_success() {
            return Err(ApiStatus::from_code(i32::from(status.as_u16())));
        }

        decode(url, response)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl TicketSource for Client {
    fn count_tickets(&mut self) -> Fetch<u64> {
        self.count()
    }

    fn list_tickets(&mut self, cursor: Option<&str>) -> Fetch<TicketPage> {
        self.list_page(cursor)
    }

    fn get_ticket(&mut self, id: &str) -> Fetch<TicketRecord> {
        self.ticket(id)
    }
}

/// Checks that the helpdesk accepts the configured credentials.
pub fn ping(client: &Client) -> Result<u64> {
    client.count().map_err(|status| {
        anyhow!(
            "cannot query {} -- {status}; check api.url, api.email and api.password",
            client.base_url()
        )
    })
}

fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Fetch<T> {
    response.json().map_err(|error| {
        warn!(url, %error, "undecodable helpdesk response");
        ApiStatus::Transport
    })
}

fn transport_failure(url: &str, error: &reqwest::Error) -> ApiStatus {
    debug!(url, %error, "request failed before a response arrived");
    ApiStatus::Transport
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: CountValue,
}

#[derive(Debug, Deserialize)]
struct CountValue {
    value: u64,
}

#[derive(Debug, Deserialize)]
struct TicketListResponse {
    tickets: Vec<TicketRecord>,
    #[serde(default)]
    links: PageLinks,
}

#[derive(Debug, Default, Deserialize)]
struct PageLinks {
    prev: Option<String>,
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SingleTicketResponse {
    ticket: TicketRecord,
}

#[cfg(test)]
mod tests {
    use super::{Client, CountResponse, TicketListResponse};
    use anyhow::Result;
    use std::time::Duration;

    fn client(base_url: &str) -> Result<Client> {
        Client::new(base_url, "agent@example.com", "hunter2", Duration::from_secs(5))
    }

    #[test]
    fn new_trims_trailing_slashes() -> Result<()> {
        let client = client("https://example.zendesk.com///")?;
        assert_eq!(client.base_url(), "https://example.zendesk.com");
        assert_eq!(client.email(), "agent@example.com");
        Ok(())
    }

    #[test]
    fn new_rejects_bad_urls_and_missing_credentials() {
        assert!(client("").is_err());
        assert!(client("example.zendesk.com").is_err());
        assert!(client("ftp://example.zendesk.com").is_err());
        assert!(
            Client::new("https://x.zendesk.com", " ", "pw", Duration::from_secs(1)).is_err()
        );
        assert!(
            Client::new("https://x.zendesk.com", "a@b.c", "", Duration::from_secs(1)).is_err()
        );
    }

    #[test]
    fn debug_output_hides_password() -> Result<()> {
        let rendered = format!("{:?}", client("https://example.zendesk.com")?);
        assert!(rendered.contains("agent@example.com"));
        assert!(!rendered.contains("hunter2"));
        Ok(())
    }

    #[test]
    fn endpoint_urls() -> Result<()> {
        let client = client("https://example.zendesk.com")?;
        assert_eq!(
            client.count_url(),
            "https://example.zendesk.com/api/v2/tickets/count.json"
        );
        assert_eq!(
            client.first_page_url(),
            "https://example.zendesk.com/api/v2/tickets.json?page[size]=25&sort=-updated_at"
        );
        assert_eq!(
            client.ticket_url("42"),
            "https://example.zendesk.com/api/v2/tickets/42.json"
        );
        Ok(())
    }

    #[test]
    fn list_response_tolerates_missing_links() -> Result<()> {
        let parsed: TicketListResponse = serde_json::from_str(r#"{"tickets":[]}"#)?;
        assert!(parsed.tickets.is_empty());
        assert!(parsed.links.next.is_none());
        Ok(())
    }

    #[test]
    fn count_response_reads_nested_value() -> Result<()> {
        let parsed: CountResponse = serde_json::from_str(
            r#"{"count":{"value":26,"refreshed_at":"2021-11-25T21:35:43Z"}}"#,
        )?;
        assert_eq!(parsed.count.value, 26);
        Ok(())
    }
}
