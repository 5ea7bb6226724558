//! Filter state for the operator list
//!
//! Holds the class, branch and guide-only selections and derives the
//! visible operator subset from the catalog.

use super::catalog::Catalog;
use super::operator::{Operator, Profession, SubProfessionId};
use super::store::{Listeners, Subscription};

/// Snapshot of the current filter selections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSettings {
    pub show_only_guide_available: bool,
    pub selected_profession: Option<Profession>,
    pub selected_sub_profession_id: Option<SubProfessionId>,
}

impl FilterSettings {
    /// Whether an operator passes every active filter
    pub fn matches(&self, operator: &Operator, has_guide: bool) -> bool {
        self.selected_profession
            .map_or(true, |p| operator.profession == p)
            && self
                .selected_sub_profession_id
                .as_ref()
                .map_or(true, |s| operator.sub_profession_id == *s)
            && (!self.show_only_guide_available || has_guide)
    }

    pub fn has_class_filter(&self) -> bool {
        self.selected_profession.is_some() || self.selected_sub_profession_id.is_some()
    }
}

pub struct FilterState {
    show_only_guide_available: bool,
    selected_profession: Option<Profession>,
    selected_sub_profession_id: Option<SubProfessionId>,
    listeners: Listeners<FilterSettings>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl FilterState {
    pub fn new(show_only_guide_available: bool) -> Self {
        Self {
            show_only_guide_available,
            selected_profession: None,
            selected_sub_profession_id: None,
            listeners: Listeners::new(),
        }
    }

    pub fn settings(&self) -> FilterSettings {
        FilterSettings {
            show_only_guide_available: self.show_only_guide_available,
            selected_profession: self.selected_profession,
            selected_sub_profession_id: self.selected_sub_profession_id.clone(),
        }
    }

    /// Alias of `settings`, for callers that treat this as a store
    pub fn get_state(&self) -> FilterSettings {
        self.settings()
    }

    pub fn selected_profession(&self) -> Option<Profession> {
        self.selected_profession
    }

    pub fn selected_sub_profession_id(&self) -> Option<&SubProfessionId> {
        self.selected_sub_profession_id.as_ref()
    }

    pub fn show_only_guide_available(&self) -> bool {
        self.show_only_guide_available
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&FilterSettings) + 'static) -> Subscription {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.listeners.unsubscribe(subscription)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Select a class. A different class clears the branch selection.
    pub fn set_profession(&mut self, profession: Option<Profession>) {
        let before = self.settings();
        if self.selected_profession != profession {
            self.selected_sub_profession_id = None;
        }
        self.selected_profession = profession;
        self.publish(before);
    }

    pub fn set_sub_profession(&mut self, sub_profession_id: Option<SubProfessionId>) {
        let before = self.settings();
        self.selected_sub_profession_id = sub_profession_id;
        self.publish(before);
    }

    /// Set class and branch together, as one change
    pub fn filter_by_branch(&mut self, profession: Profession, sub_profession_id: SubProfessionId) {
        let before = self.settings();
        self.selected_profession = Some(profession);
        self.selected_sub_profession_id = Some(sub_profession_id);
        self.publish(before);
    }

    pub fn set_guide_only(&mut self, flag: bool) {
        let before = self.settings();
        self.show_only_guide_available = flag;
        self.publish(before);
    }

    pub fn toggle_guide_only(&mut self) {
        self.set_guide_only(!self.show_only_guide_available);
    }

    /// Clear class and branch; the guide-only flag is kept
    pub fn reset(&mut self) {
        let before = self.settings();
        self.selected_profession = None;
        self.selected_sub_profession_id = None;
        self.publish(before);
    }

    fn publish(&mut self, before: FilterSettings) {
        let after = self.settings();
        if after != before {
            tracing::debug!(
                profession = ?after.selected_profession,
                branch = ?after.selected_sub_profession_id,
                guide_only = after.show_only_guide_available,
                "Filter changed"
            );
            self.listeners.notify(&after);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derivation
    // ─────────────────────────────────────────────────────────────────────────

    /// Operators passing the current filters, in catalog order
    pub fn visible_operators<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Operator> {
        let settings = self.settings();
        catalog
            .operators()
            .iter()
            .filter(|op| settings.matches(op, catalog.has_guide(op)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::fixtures::sample_catalog;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn names(ops: &[&Operator]) -> Vec<String> {
        ops.iter().map(|o| o.name.clone()).collect()
    }

    #[test]
    fn test_profession_filter_matches_exactly_that_profession() {
        let catalog = sample_catalog();
        let mut filter = FilterState::new(false);

        for profession in Profession::all() {
            filter.set_profession(Some(profession));
            let visible = filter.visible_operators(&catalog);
            let expected: Vec<&Operator> = catalog
                .operators()
                .iter()
                .filter(|o| o.profession == profession)
                .collect();
            assert_eq!(names(&visible), names(&expected), "profession {:?}", profession);
        }
    }

    #[test]
    fn test_no_filters_shows_everything() {
        let catalog = sample_catalog();
        let filter = FilterState::new(false);
        assert_eq!(filter.visible_operators(&catalog).len(), catalog.len());
    }

    #[test]
    fn test_guide_only_hides_operators_without_guides() {
        let catalog = sample_catalog();
        let filter = FilterState::new(true);
        assert_eq!(names(&filter.visible_operators(&catalog)), vec!["Blaze", "Ptilopsis"]);
    }

    #[test]
    fn test_branch_filter_narrows_within_class() {
        let catalog = sample_catalog();
        let mut filter = FilterState::new(false);
        filter.set_profession(Some(Profession::Warrior));
        filter.set_sub_profession(Some(SubProfessionId::new("centurion")));
        assert_eq!(names(&filter.visible_operators(&catalog)), vec!["Blaze", "Specter"]);
    }

    #[test]
    fn test_new_profession_clears_branch() {
        let mut filter = FilterState::new(false);
        filter.filter_by_branch(Profession::Warrior, SubProfessionId::new("centurion"));

        filter.set_profession(Some(Profession::Medic));

        assert_eq!(filter.selected_profession(), Some(Profession::Medic));
        assert_eq!(filter.selected_sub_profession_id(), None);
    }

    #[test]
    fn test_same_profession_keeps_branch() {
        let mut filter = FilterState::new(false);
        filter.filter_by_branch(Profession::Warrior, SubProfessionId::new("centurion"));

        filter.set_profession(Some(Profession::Warrior));

        assert_eq!(
            filter.selected_sub_profession_id(),
            Some(&SubProfessionId::new("centurion"))
        );
    }

    #[test]
    fn test_reset_clears_class_and_branch_but_not_guide_flag() {
        for guide_only in [true, false] {
            let mut filter = FilterState::new(guide_only);
            filter.filter_by_branch(Profession::Caster, SubProfessionId::new("corecaster"));

            filter.reset();

            let settings = filter.settings();
            assert_eq!(settings.selected_profession, None);
            assert_eq!(settings.selected_sub_profession_id, None);
            assert_eq!(settings.show_only_guide_available, guide_only);
        }

        // Reset from an empty state is also fine
        let mut filter = FilterState::new(true);
        filter.reset();
        assert!(!filter.settings().has_class_filter());
    }

    #[test]
    fn test_filter_by_branch_notifies_once_with_both_fields() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut filter = FilterState::new(false);
        let sink = Rc::clone(&seen);
        filter.subscribe(move |s: &FilterSettings| sink.borrow_mut().push(s.clone()));

        filter.filter_by_branch(Profession::Warrior, SubProfessionId::new("artsfghter"));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].selected_profession, Some(Profession::Warrior));
        assert_eq!(
            seen[0].selected_sub_profession_id,
            Some(SubProfessionId::new("artsfghter"))
        );
    }

    #[test]
    fn test_unchanged_state_does_not_notify_and_unsubscribe_stops_updates() {
        let count = Rc::new(RefCell::new(0));
        let mut filter = FilterState::new(true);
        let sink = Rc::clone(&count);
        let sub = filter.subscribe(move |_| *sink.borrow_mut() += 1);

        filter.set_guide_only(true);
        assert_eq!(*count.borrow(), 0);

        filter.toggle_guide_only();
        assert_eq!(*count.borrow(), 1);

        assert!(filter.unsubscribe(sub));
        filter.toggle_guide_only();
        assert_eq!(*count.borrow(), 1);
    }
}
