//! A client for the problems API: submit a problem with its known answer,
//! then fetch a worked solution for it.
//!
//! [`orchestrator::Orchestrator`] owns the form and sequences the two
//! calls. It talks to the API through [`service::ProblemService`] and reads
//! the bearer token through [`auth::CredentialSource`], so both can be
//! swapped out in tests.

pub mod auth;
pub mod banner;
pub mod commands;
pub mod config;
pub mod consts;
pub mod events;
pub mod orchestrator;
pub mod render;
pub mod service;
pub mod spinner;
