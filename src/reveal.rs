pub const ANIMATED_SELECTORS: [&str; 7] = [
    ".about-card",
    ".about-bio",
    ".project-card",
    ".timeline-item",
    ".skill-category",
    ".interest-card",
    ".contact-link",
];

pub const ANIMATE_ON_SCROLL_CLASS: &str = "animate-on-scroll";
pub const VISIBLE_CLASS: &str = "visible";

pub fn animated_selector_list() -> String {
    ANIMATED_SELECTORS.join(", ")
}

/// What an intersection entry looked like when its batch arrived.
#[derive(Clone, Copy, Debug)]
pub struct EntrySnapshot {
    pub intersecting: bool,
    pub already_revealed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealStep {
    pub entry_index: usize,
    pub delay_ms: u32,
}

/// Staggers the reveals of one observer batch.
///
/// Only entries that reveal now take a stagger slot, so `n` reveals get
/// delays `0, stagger, .., (n - 1) * stagger` in batch order. Entries that
/// already carry the visible marker never reveal again.
pub fn plan_reveals(entries: &[EntrySnapshot], stagger_ms: u32) -> Vec<RevealStep> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.intersecting && !entry.already_revealed)
        .enumerate()
        .map(|(slot, (entry_index, _))| RevealStep {
            entry_index,
            delay_ms: u32::try_from(slot)
                .unwrap_or(u32::MAX)
                .saturating_mul(stagger_ms),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(intersecting: bool) -> EntrySnapshot {
        EntrySnapshot {
            intersecting,
            already_revealed: false,
        }
    }

    #[test]
    fn selector_list_covers_every_content_class() {
        let selectors = animated_selector_list();
        assert_eq!(
            selectors,
            ".about-card, .about-bio, .project-card, .timeline-item, .skill-category, .interest-card, .contact-link"
        );
    }

    #[test]
    fn simultaneous_reveals_are_staggered_in_batch_order() {
        let batch = vec![entry(true); 5];
        let delays: Vec<u32> = plan_reveals(&batch, 100).iter().map(|step| step.delay_ms).collect();

        assert_eq!(delays, vec![0, 100, 200, 300, 400]);
    }

    #[test]
    fn non_intersecting_entries_take_no_slot() {
        let batch = [entry(false), entry(true), entry(false), entry(true)];
        let steps = plan_reveals(&batch, 100);

        assert_eq!(
            steps,
            vec![
                RevealStep { entry_index: 1, delay_ms: 0 },
                RevealStep { entry_index: 3, delay_ms: 100 },
            ]
        );
    }

    #[test]
    fn revealed_elements_are_never_rescheduled() {
        let mut revealed = [false; 3];
        let mut reveal_count = [0u32; 3];

        for round in 0..4 {
            let batch: Vec<EntrySnapshot> = revealed
                .iter()
                .map(|already_revealed| EntrySnapshot {
                    intersecting: round % 2 == 0,
                    already_revealed: *already_revealed,
                })
                .collect();

            for step in plan_reveals(&batch, 100) {
                reveal_count[step.entry_index] += 1;
                revealed[step.entry_index] = true;
            }
        }

        assert_eq!(reveal_count, [1, 1, 1]);
    }

    #[test]
    fn empty_batch_plans_nothing() {
        assert!(plan_reveals(&[], 100).is_empty());
    }
}
