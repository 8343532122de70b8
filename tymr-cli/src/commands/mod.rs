pub mod check;
pub mod config;
pub mod expand;
pub mod month;
pub mod search;
pub mod stats;
pub mod suggest;

use anyhow::Result;
use serde::Serialize;

/// How command results are printed.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    /// Print `value` as pretty JSON. Returns false in formatted mode so the
    /// caller renders instead.
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<bool> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(self.json)
    }
}
