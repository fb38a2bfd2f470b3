//! Viewport meta switching for narrow windows.

use tokio::sync::{mpsc, Mutex};
use tracing::debug;

use crate::constants::DEVICE_WIDTH;
use crate::dom::{RenderTarget, Selector, SelectorError};

const VIEWPORT_SELECTOR: &str = "meta[name=\"viewport\"]";
const RESPONSIVE_CONTENT: &str = "width=device-width, initial-scale=1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportMode {
    /// Layout pinned to [`DEVICE_WIDTH`]
    Narrow,
    Responsive,
}

impl ViewportMode {
    pub fn for_width(width: u32) -> Self {
        if width < DEVICE_WIDTH {
            Self::Narrow
        } else {
            Self::Responsive
        }
    }

    /// Value of the meta tag's `content` attribute
    pub fn content(self) -> String {
        match self {
            Self::Narrow => format!("width={DEVICE_WIDTH}"),
            Self::Responsive => RESPONSIVE_CONTENT.to_string(),
        }
    }
}

/// Keeps `meta[name="viewport"]` in line with the window width. Holds no
/// state of its own; the attribute in the document is the only record of
/// the current mode.
#[derive(Debug, Clone)]
pub struct ViewportSwitcher {
    selector: Selector,
}

impl ViewportSwitcher {
    pub fn new() -> Result<Self, SelectorError> {
        Ok(Self {
            selector: Selector::parse(VIEWPORT_SELECTOR)?,
        })
    }

    /// Writes the mode for `width`. Returns `None` when the document has no
    /// viewport meta tag.
    pub fn apply<T: RenderTarget + ?Sized>(&self, target: &mut T, width: u32) -> Option<ViewportMode> {
        let meta = target.query(target.root(), &self.selector)?;
        let mode = ViewportMode::for_width(width);
        target.set_attribute(meta, "content", &mode.content());
        debug!(width, ?mode, "Viewport updated");
        Some(mode)
    }

    /// Applies `initial_width`, then every width received until the sender
    /// side closes. Returns the last mode written.
    pub async fn run<T: RenderTarget + ?Sized>(
        &self,
        target: &Mutex<T>,
        initial_width: u32,
        mut resizes: mpsc::UnboundedReceiver<u32>,
    ) -> Option<ViewportMode> {
        let mut last = self.apply(&mut *target.lock().await, initial_width);
        while let Some(width) = resizes.recv().await {
            last = self.apply(&mut *target.lock().await, width);
        }
        last
    }
}
