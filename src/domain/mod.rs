//! Domain layer: receipt rows, their quantities and the rules that keep them consistent.

pub mod edit;
pub mod line_item;
pub mod ports;
pub mod quantity;
pub mod receipt;
pub mod reconciler;
