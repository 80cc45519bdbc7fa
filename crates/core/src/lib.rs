//! Core business logic for Aqsat.
//!
//! This crate contains the financial consistency engine with ZERO storage
//! dependencies. Every operation works on full in-memory collections and
//! reports what the caller has to persist.
//!
//! # Modules
//!
//! - `calculator` - Plan pricing preview and due-date arithmetic
//! - `customer` - Customer registry and classification
//! - `treasury` - Multi-safe cash ledger and balances
//! - `plan` - Installment plan lifecycle and payment mirroring
//! - `advisory` - Best-effort advisory notes from an external generator

pub mod advisory;
pub mod calculator;
pub mod customer;
pub mod plan;
pub mod treasury;
