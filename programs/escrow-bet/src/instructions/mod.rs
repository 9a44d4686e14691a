pub mod create_market;
pub mod deposit;
pub mod set_window;
pub mod settle;
pub mod views;

pub use create_market::*;
pub use deposit::*;
pub use set_window::*;
pub use settle::*;
pub use views::*;
