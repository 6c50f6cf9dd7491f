pub mod draw;
pub mod prompt;
pub mod reading;
pub mod sanitize;
