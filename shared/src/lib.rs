mod ranking;
mod referral;
mod tier;
mod user;

pub use ranking::*;
pub use referral::*;
pub use tier::*;
pub use user::*;

pub type UserId = String;
