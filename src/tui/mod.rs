// src/tui/mod.rs  —  ratatui terminal interface
#[cfg(feature = "tui")]
mod inner;
#[cfg(feature = "tui")]
mod input;
#[cfg(feature = "tui")]
pub use inner::Tui;
#[cfg(feature = "tui")]
pub use input::handle_key;

#[cfg(not(feature = "tui"))]
pub struct Tui;
#[cfg(not(feature = "tui"))]
impl Tui {
    pub fn new() -> anyhow::Result<Self> {
        anyhow::bail!("built without the `tui` feature; use --text or --json for batch mode")
    }
}
