pub mod currency;
pub mod percentage;

pub use currency::CurrencyCode;
pub use percentage::ChangeDirection;
