/// API endpoint modules
pub mod body;
pub mod forward;
pub mod generate;
pub mod health;
