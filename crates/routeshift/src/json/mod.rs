pub mod document;
pub mod input;
pub mod location;
pub mod output;
pub mod payload;
pub mod schema;
pub mod shift_time;
