use clap::Args;
use serde_json::Value;

use jdg_tax_core::report;

use super::load_params;

/// Arguments for listing lump-sum rates
#[derive(Args)]
pub struct RatesArgs {
    /// Path to a tax-year parameter file (defaults to 2025)
    #[arg(long)]
    pub params: Option<String>,
}

pub fn run_rates(args: RatesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(args.params.as_deref())?;
    let catalogue = report::rate_catalogue(&params);
    Ok(serde_json::json!({ "result": catalogue }))
}
