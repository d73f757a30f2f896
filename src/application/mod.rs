//! Application layer orchestrating edits against stored receipts.
//!
//! `ReceiptEngine` is the entry point: it looks up the addressed receipt row,
//! hands it to the reconciler and persists the result.

pub mod engine;
