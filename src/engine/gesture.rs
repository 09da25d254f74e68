//! Horizontal swipe detection for the carousels.

use serde::{Deserialize, Serialize};

use super::paginator::Paginator;

pub const SWIPE_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageCommand {
    Next,
    Prev,
}

impl PageCommand {
    pub fn apply(self, pager: &mut Paginator) {
        match self {
            PageCommand::Next => pager.next(),
            PageCommand::Prev => pager.prev(),
        }
    }
}

/// Maps a drag from `start_x` to `end_x` onto a page command.
/// Dragging left (content moves towards the next page) yields `Next`.
pub fn classify(start_x: f64, end_x: f64, threshold: f64) -> Option<PageCommand> {
    let delta = start_x - end_x;
    if delta > threshold {
        Some(PageCommand::Next)
    } else if delta < -threshold {
        Some(PageCommand::Prev)
    } else {
        None
    }
}

// Tracks a single touch. Holds no page state of its own.
#[derive(Debug, Clone)]
pub struct GestureController {
    threshold: f64,
    touch_start_x: Option<f64>,
    touch_end_x: Option<f64>,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD)
    }
}

impl GestureController {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            touch_start_x: None,
            touch_end_x: None,
        }
    }

    pub fn touch_start(&mut self, x: f64) {
        self.touch_start_x = Some(x);
        // a tap without movement must not reuse the previous gesture's end point
        self.touch_end_x = Some(x);
    }

    pub fn touch_move(&mut self, x: f64) {
        if self.touch_start_x.is_some() {
            self.touch_end_x = Some(x);
        }
    }

    pub fn touch_end(&mut self) -> Option<PageCommand> {
        let start = self.touch_start_x.take()?;
        let end = self.touch_end_x.take()?;
        classify(start, end, self.threshold)
    }
}
