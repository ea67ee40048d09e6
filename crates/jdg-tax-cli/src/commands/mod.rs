pub mod compare;
pub mod rates;

use jdg_tax_core::TaxYearParameters;

use crate::input;

/// The tax-year parameters from `--params`, or the 2025 defaults.
pub fn load_params(path: Option<&str>) -> Result<TaxYearParameters, Box<dyn std::error::Error>> {
    let params = match path {
        Some(path) => input::file::read_json::<TaxYearParameters>(path)?,
        None => TaxYearParameters::default(),
    };
    params.validate()?;
    Ok(params)
}
