//! cashlens-core: canonical transaction model and category types

pub mod category;
pub mod merchant;
pub mod transaction;

pub use category::{IncomeType, MacroCategory, MerchantCategory};
pub use merchant::{is_internal_transfer, normalize_merchant, UNKNOWN_MERCHANT};
pub use transaction::{MonthKey, Transaction};
