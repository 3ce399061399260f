//! Viewport breakpoints.

/// Widths above this show the full sidebar.
pub const FULL_SIDEBAR_MIN_WIDTH: u32 = 1150;
/// Widths at or below this render the compact app details layout.
pub const SMALL_LAYOUT_MAX_WIDTH: u32 = 1010;

pub fn sidebar_is_full(screen_width: u32) -> bool {
    screen_width > FULL_SIDEBAR_MIN_WIDTH
}

pub fn renders_small(screen_width: u32) -> bool {
    screen_width <= SMALL_LAYOUT_MAX_WIDTH
}
