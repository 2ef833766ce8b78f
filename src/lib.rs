//! # monarkfx-api
//!
//! `monarkfx-api` is the lead-capture service behind the Monark FX
//! trading-education site. It accepts contact and registration form
//! submissions over HTTP and relays each accepted submission to an SMTP
//! relay as a pair of transactional emails: an admin notification and a
//! thank-you acknowledgment to the submitter.

pub mod email;
pub mod error;
pub mod http;
pub mod server;
pub mod templating;
