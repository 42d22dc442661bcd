//! The bat-signal icon that appears once the hero section leaves the viewport.

pub const HERO_ID: &str = "hero";
pub const BAT_SIGNAL_ID: &str = "batSignal";
pub const VISIBLE_CLASS: &str = "visible";

pub const FLASH_KEYFRAMES: &str = "
    @keyframes flashPulse {
        0% { opacity: 0; transform: scale(0.5); }
        50% { opacity: 1; transform: scale(1.5); }
        100% { opacity: 0; transform: scale(2); }
    }
";

const FLASH_CENTER_OFFSET_PX: i32 = 30;

/// Icon visibility after a batch of hero entries; the last entry wins.
///
/// `None` for an empty batch leaves the icon as it is.
pub fn icon_visible_after(hero_intersecting: &[bool]) -> Option<bool> {
    hero_intersecting.last().map(|intersecting| !intersecting)
}

/// Inline style for the full-viewport flash centred on the icon.
pub fn flash_overlay_css(icon_offset_left: i32, icon_offset_top: i32) -> String {
    let x = icon_offset_left.saturating_add(FLASH_CENTER_OFFSET_PX);
    let y = icon_offset_top.saturating_add(FLASH_CENTER_OFFSET_PX);

    format!(
        "position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
         background: radial-gradient(circle at {x}px {y}px, rgba(0, 168, 232, 0.3) 0%, transparent 50%); \
         pointer-events: none; z-index: 998; animation: flashPulse 1s ease-out forwards;"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_is_visible_iff_hero_is_not_intersecting() {
        assert_eq!(icon_visible_after(&[true]), Some(false));
        assert_eq!(icon_visible_after(&[false]), Some(true));
        assert_eq!(icon_visible_after(&[]), None);
    }

    #[test]
    fn icon_follows_repeated_scroll_reversals() {
        let mut visible = false;
        for intersecting in [true, false, true, false, false, true] {
            if let Some(next) = icon_visible_after(&[intersecting]) {
                visible = next;
            }
            assert_eq!(visible, !intersecting);
        }
    }

    #[test]
    fn last_entry_in_batch_decides() {
        assert_eq!(icon_visible_after(&[false, true]), Some(false));
        assert_eq!(icon_visible_after(&[true, false]), Some(true));
    }

    #[test]
    fn flash_is_centred_on_icon() {
        let css = flash_overlay_css(100, 200);

        assert!(css.contains("circle at 130px 230px"));
        assert!(css.contains("position: fixed"));
        assert!(css.contains("animation: flashPulse 1s ease-out forwards"));
    }

    #[test]
    fn keyframes_name_matches_overlay_animation() {
        assert!(FLASH_KEYFRAMES.contains("@keyframes flashPulse"));
    }
}
