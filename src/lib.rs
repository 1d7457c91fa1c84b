//! foliocms - flat-file content management for small portfolio sites
//!
//! One JSON document of editable site content, an HTTP API to read and
//! edit it, and an admin login in front of the edits.

pub mod auth;
pub mod cli;
pub mod content;
pub mod http_server;
pub mod observability;
