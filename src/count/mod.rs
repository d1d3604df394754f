pub mod core;
pub mod lucy;

#[cfg(test)]
mod tests;

pub use self::core::*;
pub use self::lucy::*;
