use crate::domain::line_item::FieldPrecision;
use crate::domain::quantity::RoundingRule;
use crate::error::Result;
use std::str::FromStr;

/// How the final receipt rows are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

/// Settings for a reconciliation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcilerConfig {
    pub precision: FieldPrecision,
    pub rounding: RoundingRule,
    pub format: OutputFormat,
    /// Fail the run when any row is left inconsistent.
    pub strict: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            precision: FieldPrecision::default(),
            rounding: RoundingRule::default(),
            format: OutputFormat::default(),
            strict: false,
        }
    }
}

/// Per-field precision as given on the command line.
///
/// `base` applies to every field without its own override.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrecisionOverrides {
    pub base: Option<u32>,
    pub qty: Option<u32>,
    pub received_qty: Option<u32>,
    pub rejected_qty: Option<u32>,
}

impl PrecisionOverrides {
    pub fn resolve(self) -> Result<FieldPrecision> {
        let base = self.base.unwrap_or(FieldPrecision::DEFAULT_DIGITS);
        FieldPrecision::new(
            self.qty.unwrap_or(base),
            self.received_qty.unwrap_or(base),
            self.rejected_qty.unwrap_or(base),
        )
    }
}

impl ReconcilerConfig {
    pub fn new(
        precision: PrecisionOverrides,
        rounding: RoundingRule,
        format: OutputFormat,
        strict: bool,
    ) -> Result<Self> {
        Ok(Self {
            precision: precision.resolve()?,
            rounding,
            format,
            strict,
        })
    }
}
