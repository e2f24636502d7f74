pub mod datetime;
pub mod extractor;
pub mod phone;
pub mod test_utils;

pub use datetime::{parse_date_time, DateTimeInput};
pub use extractor::JsonBody;
pub use phone::{normalize_phone, PhoneInput, PHONE_DIGITS};
