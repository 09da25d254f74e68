// Landing page hero carousel: featured cars, rotated by an autoplay timer

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::catalog::CatalogSnapshot;
use crate::config::Settings;
use crate::engine::{Autoplay, AutoplayHandle, CarBrowser, GestureController, PageCommand, PageView};
use crate::error::{AppError, EngineError};
use crate::models::FilterCriteria;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowroomView {
    #[serde(flatten)]
    pub page: PageView,
    pub autoplay: bool,
}

pub struct Showroom {
    // Shared with the autoplay task
    browser: Arc<Mutex<CarBrowser>>,
    criteria: FilterCriteria,
    interval: Duration,
    swipe_threshold: f64,
    autoplay: Option<AutoplayHandle>,
}

impl Showroom {
    pub fn new(settings: &Settings) -> Result<Self, EngineError> {
        Ok(Self {
            browser: Arc::new(Mutex::new(CarBrowser::new(settings.showroom_page_size)?)),
            criteria: FilterCriteria::featured_only(),
            interval: settings.autoplay_interval(),
            swipe_threshold: settings.swipe_threshold,
            autoplay: None,
        })
    }

    fn browser(&self) -> Result<MutexGuard<'_, CarBrowser>> {
        self.browser
            .lock()
            .map_err(|_| anyhow!("Showroom state lock poisoned"))
    }

    /// Brings the carousel in line with a catalog snapshot. A new generation
    /// resets to the first slide and restarts the timer.
    pub fn sync(&mut self, snapshot: &CatalogSnapshot) -> Result<()> {
        if self.browser()?.is_current(snapshot.generation, &self.criteria) {
            return Ok(());
        }
        // Stop the old timer first so none of its ticks land after the reset
        self.autoplay = None;
        self.browser()?
            .apply(snapshot.generation, &snapshot.cars, &self.criteria);
        tracing::info!(generation = snapshot.generation, "Showroom carousel reset for new catalog.");
        self.restart_autoplay()
    }

    pub fn view(&self) -> Result<ShowroomView> {
        Ok(ShowroomView {
            page: self.browser()?.view(),
            autoplay: self.autoplay.is_some(),
        })
    }

    pub fn navigate(&mut self, command: PageCommand) -> Result<()> {
        self.browser()?.command(command);
        self.restart_autoplay()
    }

    pub fn goto(&mut self, page: usize) -> Result<(), AppError> {
        self.browser()?.goto(page)?;
        self.restart_autoplay()?;
        Ok(())
    }

    /// Applies a completed horizontal drag. Returns the command it produced, if any.
    pub fn swipe(&mut self, start_x: f64, end_x: f64) -> Result<Option<PageCommand>> {
        let mut gesture = GestureController::new(self.swipe_threshold);
        gesture.touch_start(start_x);
        gesture.touch_move(end_x);
        let command = gesture.touch_end();
        if let Some(command) = command {
            self.navigate(command)?;
        }
        Ok(command)
    }

    fn restart_autoplay(&mut self) -> Result<()> {
        // The old timer must be gone before a new one can observe the new page count
        self.autoplay = None;
        let (total_pages, generation) = {
            let browser = self.browser()?;
            (browser.total_pages(), browser.generation())
        };
        let browser = Arc::clone(&self.browser);
        self.autoplay = Autoplay::start(self.interval, total_pages, move || {
            if let Ok(mut browser) = browser.lock() {
                // A tick already in flight when the catalog changed is dropped
                if browser.generation() == generation {
                    browser.next();
                }
            }
        });
        Ok(())
    }
}
