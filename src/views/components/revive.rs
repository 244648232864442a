//! Revive progress bar.

use super::progress;
use crate::dom::Document;
use crate::dom::layout::ids;

#[derive(Default)]
pub struct ReviveProgress {
    active: bool,
}

impl ReviveProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, doc: &mut Document, progress: f64) {
        let Some(revive) = doc.find_mut(ids::REVIVE) else {
            return;
        };
        revive.set_visible(true);
        self.active = true;
        self.update(doc, progress);
    }

    pub fn update(&mut self, doc: &mut Document, percent: f64) {
        if let Some(bar) = doc.find_mut(ids::REVIVE_BAR) {
            bar.set_style("width", progress::width(percent));
        }
    }

    pub fn hide(&mut self, doc: &mut Document) {
        let Some(revive) = doc.find_mut(ids::REVIVE) else {
            return;
        };
        revive.set_visible(false);
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_update_hide() {
        let mut doc = Document::overlay();
        let mut revive = ReviveProgress::new();
        revive.show(&mut doc, 0.0);
        assert!(doc.get(ids::REVIVE).unwrap().is_visible());
        assert_eq!(doc.get(ids::REVIVE_BAR).unwrap().style("width"), Some("0%"));
        revive.update(&mut doc, 62.5);
        assert_eq!(doc.get(ids::REVIVE_BAR).unwrap().style("width"), Some("62.5%"));
        revive.hide(&mut doc);
        revive.hide(&mut doc);
        assert!(!doc.get(ids::REVIVE).unwrap().is_visible());
        assert!(!revive.is_active());
    }
}
