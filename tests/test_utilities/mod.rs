//! Shared test utilities
#![allow(dead_code)]

pub mod fake_api_server;
pub mod mocks;
