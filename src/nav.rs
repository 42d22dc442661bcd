//! Navigation bar state: the scrolled marker, in-page anchor targets and the
//! mobile menu.

pub const NAV_ID: &str = "nav";
pub const NAV_TOGGLE_ID: &str = "navToggle";
pub const NAV_LINKS_SELECTOR: &str = ".nav-links";
pub const NAV_CONTAINER_SELECTOR: &str = ".nav-container";
pub const IN_PAGE_ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

pub const SCROLLED_CLASS: &str = "scrolled";
pub const ACTIVE_CLASS: &str = "active";

/// The bar is "scrolled" strictly above the threshold.
pub fn is_scrolled(scroll_y: f64, threshold_px: u32) -> bool {
    scroll_y > f64::from(threshold_px)
}

/// Element id named by an in-page `href`, or `None` for a bare `#`.
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scroll destination that keeps the target clear of the fixed bar.
pub fn anchor_scroll_top(target_offset_top: i32, nav_height: i32) -> f64 {
    f64::from(target_offset_top) - f64::from(nav_height)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
}

impl MenuState {
    pub fn from_active(active: bool) -> Self {
        if active {
            Self::Open
        } else {
            Self::Closed
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// State after a document click; clicks outside the nav always close.
    pub fn after_document_click(self, inside_nav_container: bool) -> Self {
        if inside_nav_container {
            self
        } else {
            Self::Closed
        }
    }
}
