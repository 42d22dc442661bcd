//! Random quote popup shown when the bat signal is clicked.

use serde::Serialize;

pub const POPUP_CLASS: &str = "bat-quote-popup";
pub const TEXT_CLASS: &str = "bat-quote-text";
pub const SOURCE_CLASS: &str = "bat-quote-source";
pub const VISIBLE_CLASS: &str = "visible";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub text: &'static str,
    pub source: &'static str,
}

pub const QUOTES: [Quote; 12] = [
    Quote { text: "Why do we fall? So we can learn to pick ourselves up.", source: "Batman Begins" },
    Quote { text: "It's not who I am underneath, but what I do that defines me.", source: "Batman Begins" },
    Quote {
        text: "You either die a hero, or you live long enough to see yourself become the villain.",
        source: "The Dark Knight",
    },
    Quote { text: "Some men just want to watch the world burn.", source: "The Dark Knight" },
    Quote { text: "A hero can be anyone.", source: "The Dark Knight Rises" },
    Quote { text: "The night is darkest just before the dawn.", source: "The Dark Knight" },
    Quote { text: "I'm not afraid. I'm angry.", source: "Batman Begins" },
    Quote {
        text: "Endure. You can be the outcast. You can make the choice no one else can make.",
        source: "The Dark Knight",
    },
    Quote { text: "Do not go gentle into that good night.", source: "Interstellar" },
    Quote { text: "We used to look up at the sky and wonder at our place in the stars.", source: "Interstellar" },
    Quote { text: "Time is the one thing we can't get back.", source: "Tenet" },
    Quote { text: "You miss 100% of the shots you don't take. - Wayne Gretzky", source: "Michael Scott" },
];

impl Quote {
    pub fn display_text(&self) -> String {
        format!("\"{}\"", self.text)
    }

    pub fn display_source(&self) -> String {
        format!("— {}", self.source)
    }
}

/// Maps a uniform sample in `[0, 1)` onto the quote list.
pub fn pick_quote(unit_sample: f64) -> &'static Quote {
    let sample = if unit_sample.is_finite() { unit_sample.clamp(0.0, 1.0) } else { 0.0 };
    let index = ((sample * QUOTES.len() as f64) as usize).min(QUOTES.len() - 1);
    &QUOTES[index]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopupPhase {
    Absent,
    Inserted,
    Visible,
    Fading,
    Removed,
}

impl PopupPhase {
    pub fn next(self) -> Self {
        match self {
            Self::Absent => Self::Inserted,
            Self::Inserted => Self::Visible,
            Self::Visible => Self::Fading,
            Self::Fading | Self::Removed => Self::Removed,
        }
    }
}

/// Delays between popup phases, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopupTimeline {
    pub enter_delay_ms: u32,
    pub dwell_ms: u32,
    pub exit_ms: u32,
}

impl PopupTimeline {
    fn offset_ms(&self, phase: PopupPhase) -> Option<u32> {
        match phase {
            PopupPhase::Absent | PopupPhase::Inserted => None,
            PopupPhase::Visible => Some(self.enter_delay_ms),
            PopupPhase::Fading => Some(self.dwell_ms),
            PopupPhase::Removed => Some(self.dwell_ms.saturating_add(self.exit_ms)),
        }
    }

    /// Timed phase transitions after insertion, as offsets from insertion.
    pub fn schedule(&self) -> Vec<(PopupPhase, u32)> {
        let mut steps = Vec::new();
        let mut phase = PopupPhase::Inserted;

        while phase != PopupPhase::Removed {
            phase = phase.next();
            if let Some(at_ms) = self.offset_ms(phase) {
                steps.push((phase, at_ms));
            }
        }

        steps
    }
}

/// Holds the popup currently in the document. Showing a new one removes the
/// previous one straight away, so at most one is ever present.
#[derive(Debug)]
pub struct PopupSlot<T> {
    current: Option<T>,
}

impl<T> Default for PopupSlot<T> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<T: PartialEq> PopupSlot<T> {
    pub fn show(&mut self, popup: T, remove: impl FnOnce(T)) {
        if let Some(previous) = self.current.replace(popup) {
            remove(previous);
        }
    }

    /// Clears the slot if `popup` is still the current one.
    pub fn release(&mut self, popup: &T) -> bool {
        if self.current.as_ref() == Some(popup) {
            self.current = None;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    fn is_occupied(&self) -> bool {
        self.current.is_some()
    }
}
