//! Alternate app icon switching

use crate::error::Result;

/// Trait for the platform's alternate icon API (async)
#[allow(async_fn_in_trait)]
pub trait IconSwitcher {
    /// Switch to the named alternate icon; `None` restores the primary icon
    async fn set_alternate_icon(&self, name: Option<&str>) -> Result<()>;

    /// Whether this device can change its icon at all
    fn supports_alternate_icons(&self) -> bool {
        true
    }
}

/// Icon switcher for devices without alternate icons
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedIconSwitcher;

impl IconSwitcher for UnsupportedIconSwitcher {
    async fn set_alternate_icon(&self, _name: Option<&str>) -> Result<()> {
        Ok(())
    }

    fn supports_alternate_icons(&self) -> bool {
        false
    }
}
