pub const SKILL_BAR_SELECTOR: &str = ".skill-bar-fill";
pub const WIDTH_ATTRIBUTE: &str = "data-width";
pub const TARGET_WIDTH_PROPERTY: &str = "--target-width";
pub const ANIMATED_CLASS: &str = "animated";

#[derive(Clone, Debug, PartialEq)]
pub enum SkillBarAction {
    /// Not in view yet; keep observing.
    Wait,
    /// Set the target width, mark as animated, stop observing.
    Animate { target_width: String },
    /// Nothing usable to animate; stop observing.
    Release,
}

/// Decides what to do with a skill bar for one intersection entry.
pub fn skill_bar_action(intersecting: bool, already_animated: bool, data_width: Option<&str>) -> SkillBarAction {
    if !intersecting {
        return SkillBarAction::Wait;
    }

    if already_animated {
        return SkillBarAction::Release;
    }

    match data_width.and_then(parse_width_percent) {
        Some(percent) => SkillBarAction::Animate {
            target_width: format!("{percent}%"),
        },
        None => SkillBarAction::Release,
    }
}

fn parse_width_percent(raw: &str) -> Option<f64> {
    let value = raw.trim().trim_end_matches('%').trim().parse::<f64>().ok()?;
    // Adding zero folds -0.0 into 0.0.
    value.is_finite().then(|| value.clamp(0.0, 100.0) + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animate(width: &str) -> SkillBarAction {
        SkillBarAction::Animate {
            target_width: width.to_string(),
        }
    }

    #[test]
    fn bar_waits_until_visible() {
        assert_eq!(skill_bar_action(false, false, Some("85")), SkillBarAction::Wait);
    }

    #[test]
    fn visible_bar_takes_configured_width() {
        assert_eq!(skill_bar_action(true, false, Some("85")), animate("85%"));
        assert_eq!(skill_bar_action(true, false, Some(" 62.5 ")), animate("62.5%"));
        assert_eq!(skill_bar_action(true, false, Some("40%")), animate("40%"));
    }

    #[test]
    fn widths_are_clamped_to_percent_range() {
        assert_eq!(skill_bar_action(true, false, Some("140")), animate("100%"));
        assert_eq!(skill_bar_action(true, false, Some("-3")), animate("0%"));
        assert_eq!(skill_bar_action(true, false, Some("-0")), animate("0%"));
    }

    #[test]
    fn missing_or_bad_width_releases_bar() {
        assert_eq!(skill_bar_action(true, false, None), SkillBarAction::Release);
        assert_eq!(skill_bar_action(true, false, Some("lots")), SkillBarAction::Release);
        assert_eq!(skill_bar_action(true, false, Some("NaN")), SkillBarAction::Release);
    }

    #[test]
    fn bar_animates_once_across_reentries() {
        let mut animated = false;
        let mut animations = 0;

        for intersecting in [false, true, false, true, true] {
            if let SkillBarAction::Animate { .. } = skill_bar_action(intersecting, animated, Some("70")) {
                animations += 1;
                animated = true;
            }
        }

        assert_eq!(animations, 1);
    }
}
