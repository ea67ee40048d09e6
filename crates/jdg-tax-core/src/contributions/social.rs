use crate::contributions::stage::ContributionStage;
use crate::params::SocialParams;
use crate::types::Money;

/// Monthly social contribution for a stage. Start relief owes nothing.
pub fn monthly_contribution(stage: ContributionStage, params: &SocialParams) -> Money {
    match stage {
        ContributionStage::StartRelief => params.relief_monthly,
        ContributionStage::Preferential => params.preferential_monthly,
        ContributionStage::Full => params.full_monthly,
    }
}
