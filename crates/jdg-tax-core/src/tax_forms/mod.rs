pub mod linear;
pub mod lump_sum;
pub mod tax_scale;

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three ways a sole proprietorship can settle income tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxForm {
    /// Progressive scale with a tax-free allowance
    TaxScale,
    /// Flat rate on income
    LinearTax,
    /// Rates on recorded revenue, costs ignored
    LumpSum,
}

impl TaxForm {
    /// Tie-break order: when totals are equal the earlier form wins.
    pub const PRIORITY: [TaxForm; 3] = [TaxForm::TaxScale, TaxForm::LinearTax, TaxForm::LumpSum];

    pub fn id(&self) -> &'static str {
        match self {
            TaxForm::TaxScale => "tax_scale",
            TaxForm::LinearTax => "linear_tax",
            TaxForm::LumpSum => "lump_sum",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaxForm::TaxScale => "tax scale",
            TaxForm::LinearTax => "linear tax",
            TaxForm::LumpSum => "lump sum",
        }
    }

    /// Position in [`TaxForm::PRIORITY`]; lower wins ties.
    pub fn priority(&self) -> usize {
        match self {
            TaxForm::TaxScale => 0,
            TaxForm::LinearTax => 1,
            TaxForm::LumpSum => 2,
        }
    }
}

impl fmt::Display for TaxForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
