pub mod click_outside;
pub mod config;
pub mod events;
pub mod logging;
pub mod screens;
pub mod types;
pub mod word;

pub use click_outside::{attach, ClickOutside};
