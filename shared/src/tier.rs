use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Qualitative rank category stored on a user document. This service only
/// ever assigns [`TierLabel::Bronze`]; the remaining variants exist because
/// stored documents may already carry them. Promotion between tiers is an
/// external concern.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
pub enum TierLabel {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
}
