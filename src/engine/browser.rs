//! Stateful view-model tying filtering, summary and pagination together.

use std::sync::Arc;

use serde::Serialize;

use super::filter::filter_cars;
use super::gesture::PageCommand;
use super::paginator::Paginator;
use super::summary::{describe, FilterSummary};
use crate::error::EngineError;
use crate::models::{Car, FilterCriteria};

/// What the rendering side consumes for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub items: Vec<Car>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl PageView {
    pub fn of(filtered: &[Car], pager: &Paginator) -> Self {
        Self {
            items: pager.slice(filtered).to_vec(),
            current_page: pager.current_page(),
            total_pages: pager.total_pages(),
            total_items: filtered.len(),
        }
    }
}

#[derive(Debug)]
pub struct CarBrowser {
    criteria: FilterCriteria,
    summary: FilterSummary,
    // Catalog generation the filtered list was computed from
    generation: Option<u64>,
    filtered: Arc<Vec<Car>>,
    pager: Paginator,
}

impl CarBrowser {
    pub fn new(page_size: usize) -> Result<Self, EngineError> {
        let criteria = FilterCriteria::default();
        Ok(Self {
            summary: describe(&criteria),
            criteria,
            generation: None,
            filtered: Arc::new(Vec::new()),
            pager: Paginator::new(page_size, 0)?,
        })
    }

    /// Recomputes the filtered list when either the catalog generation or the
    /// criteria changed, returning to page 0 in that case. Returns whether
    /// anything was recomputed.
    pub fn apply(&mut self, generation: u64, cars: &[Car], criteria: &FilterCriteria) -> bool {
        if self.is_current(generation, criteria) {
            return false;
        }
        self.apply_filtered(generation, criteria, Arc::new(filter_cars(cars, criteria)))
    }

    /// Same as [`CarBrowser::apply`] for a list that was already filtered
    /// with `criteria` (e.g. from a memo).
    pub fn apply_filtered(&mut self, generation: u64, criteria: &FilterCriteria, filtered: Arc<Vec<Car>>) -> bool {
        if self.is_current(generation, criteria) {
            return false;
        }
        if self.criteria != *criteria {
            self.summary = describe(criteria);
            self.criteria = criteria.clone();
        }
        self.set_filtered(generation, filtered);
        true
    }

    /// Whether `apply` with these inputs would be a no-op.
    pub fn is_current(&self, generation: u64, criteria: &FilterCriteria) -> bool {
        self.generation == Some(generation) && self.criteria == *criteria
    }

    fn set_filtered(&mut self, generation: u64, filtered: Arc<Vec<Car>>) {
        self.generation = Some(generation);
        self.pager.set_total_items(filtered.len());
        self.filtered = filtered;
    }

    pub fn generation(&self) -> Option<u64> {
        self.generation
    }

    pub fn summary(&self) -> &FilterSummary {
        &self.summary
    }

    pub fn current_page(&self) -> usize {
        self.pager.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages()
    }

    pub fn next(&mut self) {
        self.pager.next();
    }

    pub fn goto(&mut self, page: usize) -> Result<(), EngineError> {
        self.pager.goto(page)
    }

    pub fn command(&mut self, command: PageCommand) {
        command.apply(&mut self.pager);
    }

    pub fn view(&self) -> PageView {
        PageView::of(&self.filtered, &self.pager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::filter::fixtures::{car, numbered};

    #[test]
    fn first_apply_computes_page_zero() {
        let mut browser = CarBrowser::new(6).unwrap();
        assert!(browser.apply(1, &numbered(14), &FilterCriteria::default()));

        let view = browser.view();
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.current_page, 0);
        assert_eq!(view.items.iter().map(|c| c.id).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn last_page_is_short() {
        let mut browser = CarBrowser::new(6).unwrap();
        browser.apply(1, &numbered(14), &FilterCriteria::default());
        browser.goto(2).unwrap();

        let ids: Vec<i64> = browser.view().items.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![12, 13]);
    }

    #[test]
    fn same_inputs_keep_the_current_page() {
        let cars = numbered(14);
        let mut browser = CarBrowser::new(6).unwrap();
        browser.apply(1, &cars, &FilterCriteria::default());
        browser.next();

        assert!(!browser.apply(1, &cars, &FilterCriteria::default()));
        assert_eq!(browser.current_page(), 1);
    }

    #[test]
    fn criteria_change_resets_to_first_page() {
        let mut cars = numbered(14);
        cars.push(car(99, "BYD", "Seal", 2024, Some(1.0)));
        let mut browser = CarBrowser::new(6).unwrap();
        browser.apply(1, &cars, &FilterCriteria::default());
        browser.goto(2).unwrap();

        let tesla = FilterCriteria { manufacturer: Some("Tesla".into()), ..Default::default() };
        assert!(browser.apply(1, &cars, &tesla));
        assert_eq!(browser.current_page(), 0);
        assert_eq!(browser.view().total_items, 14);
        assert_eq!(browser.summary().active_filter_count, 1);
    }

    #[test]
    fn new_catalog_generation_resets_to_first_page() {
        let mut browser = CarBrowser::new(6).unwrap();
        browser.apply(1, &numbered(14), &FilterCriteria::default());
        browser.next();

        assert!(browser.apply(2, &numbered(20), &FilterCriteria::default()));
        assert_eq!(browser.current_page(), 0);
        assert_eq!(browser.total_pages(), 4);
    }

    #[test]
    fn empty_result_is_an_empty_view() {
        let mut browser = CarBrowser::new(6).unwrap();
        let none = FilterCriteria { manufacturer: Some("Nobody".into()), ..Default::default() };
        browser.apply(1, &numbered(5), &none);

        let view = browser.view();
        assert_eq!(view.total_pages, 0);
        assert!(view.items.is_empty());
        assert!(browser.goto(0).is_err());
    }

    #[test]
    fn commands_delegate_to_the_paginator() {
        let mut browser = CarBrowser::new(6).unwrap();
        browser.apply(1, &numbered(14), &FilterCriteria::default());
        browser.command(PageCommand::Prev);
        assert_eq!(browser.current_page(), 2);
        browser.command(PageCommand::Next);
        assert_eq!(browser.current_page(), 0);
    }
}
