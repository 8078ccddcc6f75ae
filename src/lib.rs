pub mod chain;
pub mod config;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod storage;
pub mod utils;
pub mod view;

// Re-export commonly used items
pub use chain::*;
pub use config::*;
pub use di::*;
pub use entity::*;
pub use interactor::*;
pub use storage::*;
pub use view::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
