//! Input and output formats for the command-line front end.

pub mod csv;
pub mod json;
