pub mod console;

pub use console::{Console, LineConsole, StdConsole};
