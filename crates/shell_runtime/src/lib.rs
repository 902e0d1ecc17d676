pub mod accounts;
pub mod catalog;
pub mod economy;
pub mod model;
pub mod notify;
pub mod persistence;
pub mod reducer;
pub mod session;
pub mod windows;

pub use accounts::RegisterRequest;
pub use model::*;
pub use persistence::load_initial_state;
pub use reducer::{reduce, ShellAction, ShellEffect, ShellError};
pub use session::ShellSession;
