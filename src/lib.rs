//! ragdesk - message orchestration core.
//!
//! Each user message is either routed to a tool (schema-checked and rate
//! limited) or answered from a knowledge base with verified citations.
//! The core is hexagonal: `domain` holds pure logic, `ports` the
//! collaborator contracts, `adapters` their implementations and
//! `application` the handlers that tie them together.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
