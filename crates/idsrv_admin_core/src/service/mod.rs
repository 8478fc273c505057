//! Core use-case services.
//!
//! # Responsibility
//! - Map command parameters onto entities (`mapper`).
//! - Orchestrate store calls behind one connection (`admin_service`).

pub mod admin_service;
pub mod mapper;
