use napi::Result as NapiResult;
use napi_derive::napi;

use jdg_tax_core::TaxYearParameters;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parameters from JSON when given, the 2025 defaults otherwise.
fn parse_params(params_json: Option<String>) -> NapiResult<TaxYearParameters> {
    let params = match params_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error)?,
        None => TaxYearParameters::default(),
    };
    params.validate().map_err(to_napi_error)?;
    Ok(params)
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_tax_forms(input_json: String, params_json: Option<String>) -> NapiResult<String> {
    let input: jdg_tax_core::simulation::TaxComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let params = parse_params(params_json)?;
    let output =
        jdg_tax_core::report::calculate_comparison(&input, &params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

#[napi]
pub fn lump_sum_rates(params_json: Option<String>) -> NapiResult<String> {
    let params = parse_params(params_json)?;
    let catalogue = jdg_tax_core::report::rate_catalogue(&params);
    serde_json::to_string(&catalogue).map_err(to_napi_error)
}

#[napi]
pub fn default_parameters() -> NapiResult<String> {
    serde_json::to_string(&TaxYearParameters::default()).map_err(to_napi_error)
}
