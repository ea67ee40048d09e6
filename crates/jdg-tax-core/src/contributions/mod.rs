pub mod health;
pub mod social;
pub mod stage;

pub use stage::ContributionStage;
