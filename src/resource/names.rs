//! Signal-kind vocabulary for one resource type.
//!
//! Kinds are literal strings because other code pattern-matches on them.
//! They are derived once from the resource name and shared by reference
//! between the action factory and the reducer, so both always agree.

use std::collections::HashSet;

/// Suffix appended to every error kind.
pub const ERROR_SUFFIX: &str = "_ERROR";

/// Reset kind used when none is configured.
pub const DEFAULT_RESET_KIND: &str = "RESET_ALL_DATA";

/// Every signal kind a resource can emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTypes {
    pub request: String,
    pub receive: String,
    pub receive_error: String,
    pub saving: String,
    pub saved: String,
    pub save_error: String,
    pub request_one: String,
    pub receive_one: String,
    pub receive_one_error: String,
    pub deleting: String,
    pub deleted: String,
    pub delete_error: String,
    pub reset_all: String,
}

impl ActionTypes {
    /// Derive the vocabulary for `singular`, using `plural` for list kinds
    /// when given and `<singular>S` otherwise.
    pub fn new(singular: &str, plural: Option<&str>, reset_kind: &str) -> Self {
        let plural = plural
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}S", singular));

        Self {
            request: format!("REQUEST_{}", plural),
            receive: format!("RECEIVED_{}", plural),
            receive_error: format!("RECEIVED_{}{}", plural, ERROR_SUFFIX),
            saving: format!("SAVING_{}", singular),
            saved: format!("SAVED_{}", singular),
            save_error: format!("SAVE_{}{}", singular, ERROR_SUFFIX),
            request_one: format!("REQUEST_{}", singular),
            receive_one: format!("RECEIVED_{}", singular),
            receive_one_error: format!("RECEIVED_{}{}", singular, ERROR_SUFFIX),
            deleting: format!("DELETING_{}", singular),
            deleted: format!("DELETED_{}", singular),
            delete_error: format!("DELETE_{}{}", singular, ERROR_SUFFIX),
            reset_all: reset_kind.to_string(),
        }
    }

    /// Per-resource kinds, excluding the shared reset kind.
    pub fn resource_kinds(&self) -> [&str; 12] {
        [
            self.request.as_str(),
            self.receive.as_str(),
            self.receive_error.as_str(),
            self.saving.as_str(),
            self.saved.as_str(),
            self.save_error.as_str(),
            self.request_one.as_str(),
            self.receive_one.as_str(),
            self.receive_one_error.as_str(),
            self.deleting.as_str(),
            self.deleted.as_str(),
            self.delete_error.as_str(),
        ]
    }

    /// Kinds produced by more than one operation of this vocabulary, as
    /// happens when the plural equals the singular.
    pub fn duplicates(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.resource_kinds()
            .into_iter()
            .filter(|kind| !seen.insert(*kind))
            .collect()
    }

    /// Kinds this vocabulary shares with `other`, ignoring the reset kind.
    ///
    /// Two resources are safe to run through one channel only when this
    /// is empty and neither vocabulary reuses the other's reset kind.
    pub fn collisions<'a>(&'a self, other: &ActionTypes) -> Vec<&'a str> {
        let theirs: HashSet<&str> = other
            .resource_kinds()
            .into_iter()
            .chain(std::iter::once(other.reset_all.as_str()))
            .collect();

        self.resource_kinds()
            .into_iter()
            .filter(|kind| theirs.contains(kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_list_kinds_from_default_plural() {
        let types = ActionTypes::new("WIDGET", None, DEFAULT_RESET_KIND);
        assert_eq!(types.request, "REQUEST_WIDGETS");
        assert_eq!(types.receive, "RECEIVED_WIDGETS");
        assert_eq!(types.receive_error, "RECEIVED_WIDGETS_ERROR");
    }

    #[test]
    fn derives_item_kinds_from_singular() {
        let types = ActionTypes::new("WIDGET", None, DEFAULT_RESET_KIND);
        assert_eq!(types.saving, "SAVING_WIDGET");
        assert_eq!(types.saved, "SAVED_WIDGET");
        assert_eq!(types.save_error, "SAVE_WIDGET_ERROR");
        assert_eq!(types.request_one, "REQUEST_WIDGET");
        assert_eq!(types.receive_one, "RECEIVED_WIDGET");
        assert_eq!(types.receive_one_error, "RECEIVED_WIDGET_ERROR");
        assert_eq!(types.deleting, "DELETING_WIDGET");
        assert_eq!(types.deleted, "DELETED_WIDGET");
        assert_eq!(types.delete_error, "DELETE_WIDGET_ERROR");
    }

    #[test]
    fn explicit_plural_overrides_suffix() {
        let types = ActionTypes::new("PERSON", Some("PEOPLE"), DEFAULT_RESET_KIND);
        assert_eq!(types.request, "REQUEST_PEOPLE");
        assert_eq!(types.request_one, "REQUEST_PERSON");
    }

    #[test]
    fn reset_kind_is_taken_verbatim() {
        let types = ActionTypes::new("WIDGET", None, "RESET_DATA");
        assert_eq!(types.reset_all, "RESET_DATA");
    }

    #[test]
    fn all_resource_kinds_are_distinct() {
        let types = ActionTypes::new("WIDGET", None, DEFAULT_RESET_KIND);
        let kinds: HashSet<&str> = types.resource_kinds().into_iter().collect();
        assert_eq!(kinds.len(), 12);
    }

    #[test]
    fn plural_equal_to_singular_duplicates_kinds() {
        let types = ActionTypes::new("SHEEP", Some("SHEEP"), DEFAULT_RESET_KIND);
        assert_eq!(
            types.duplicates(),
            vec!["REQUEST_SHEEP", "RECEIVED_SHEEP", "RECEIVED_SHEEP_ERROR"]
        );
        assert!(ActionTypes::new("SHEEP", None, DEFAULT_RESET_KIND)
            .duplicates()
            .is_empty());
    }

    #[test]
    fn distinct_names_do_not_collide() {
        let widgets = ActionTypes::new("WIDGET", None, DEFAULT_RESET_KIND);
        let gadgets = ActionTypes::new("GADGET", None, DEFAULT_RESET_KIND);
        assert!(widgets.collisions(&gadgets).is_empty());
    }

    #[test]
    fn singular_matching_other_plural_collides() {
        // "ITEMS" singular produces REQUEST_ITEMS, the list kind of "ITEM".
        let item = ActionTypes::new("ITEM", None, DEFAULT_RESET_KIND);
        let items = ActionTypes::new("ITEMS", None, DEFAULT_RESET_KIND);
        assert_eq!(
            item.collisions(&items),
            vec!["REQUEST_ITEMS", "RECEIVED_ITEMS", "RECEIVED_ITEMS_ERROR"]
        );
    }
}
