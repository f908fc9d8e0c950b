//! Housing costs: LHA lookup and bedroom entitlement

mod bedrooms;
mod lha;

pub use bedrooms::calculate_bedroom_entitlement;
pub use lha::{convert_lha_to_monthly, LhaService, DEFAULT_LHA_PATH};
