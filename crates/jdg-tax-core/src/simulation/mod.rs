pub mod compare;
pub mod input;
pub mod regime;
pub mod summary;

pub use compare::{compare_tax_forms, ComparisonResult};
pub use input::{OneTimeCost, Scenario, TaxComparisonInput};
pub use regime::{simulate_regime, MonthlyResult, RegimeSimulation};
pub use summary::PeriodSummary;
