// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;

/// Status code reported when no HTTP response was received at all.
pub const TRANSPORT_FAILURE_CODE: i32 = -1;

const UNAUTHORIZED_MESSAGE: &str = "Oops it seems that something is wrong.\n\
    We could not authenticate you.\n\
    Please check your credentials in the .env file and restart the app.";

const FORBIDDEN_MESSAGE: &str = "Oops it seems that something is wrong.\n\
    You do not seem to have the required permission to perform this action.\n\
    Please try other options.";

const NOT_FOUND_MESSAGE: &str = "Oops the ticket number you provided does not exist.";

const RATE_LIMITED_MESSAGE: &str =
    "You hit the rate limit. Please get a coffee and retry after some time.";

const FALLBACK_MESSAGE: &str = "Something seems off.\n\
    Please get a coffee and retry after some time while we are figuring things out.\n\
    You might want to check your .env file too to make sure the inputs are correct.";

/// Why a ticket source call did not produce data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiStatus {
    #[error("helpdesk unreachable or sent an unreadable response")]
    Transport,
    #[error("helpdesk rejected the credentials (401)")]
    Unauthorized,
    #[error("helpdesk denied access (403)")]
    Forbidden,
    #[error("ticket not found (404)")]
    NotFound,
    #[error("helpdesk rate limit hit (429)")]
    RateLimited,
    #[error("helpdesk returned status {0}")]
    Other(u16),
}

impl ApiStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            TRANSPORT_FAILURE_CODE => Self::Transport,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            other => u16::try_from(other).map_or(Self::Transport, Self::Other),
        }
    }

    pub const fn code(self) -> i32 {
        match self {
            Self::Transport => TRANSPORT_FAILURE_CODE,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::RateLimited => 429,
            Self::Other(code) => code as i32,
        }
    }

    pub const fn user_message(self) -> &'static str {
        match self {
            Self::Unauthorized => UNAUTHORIZED_MESSAGE,
            Self::Forbidden => FORBIDDEN_MESSAGE,
            Self::NotFound => NOT_FOUND_MESSAGE,
            Self::RateLimited => RATE_LIMITED_MESSAGE,
            Self::Transport | Self::Other(_) => FALLBACK_MESSAGE,
        }
    }
}

/// User-facing text for any status code, including ones the app does not
/// know about.
pub fn message_for(code: i32) -> &'static str {
    ApiStatus::from_code(code).user_message()
}
