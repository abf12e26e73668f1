//! Partial-match filter for entry searches.

use uuid::Uuid;

use crate::{Entry, EntryStatus, EntryType};

/// Constraints for [`EntryService::search`](crate::EntryService::search).
///
/// `None` fields are unconstrained. The description matches as a
/// case-insensitive substring, every other field by equality.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub description: Option<String>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub user_id: Option<Uuid>,
    pub kind: Option<EntryType>,
    pub status: Option<EntryStatus>,
}

impl EntryFilter {
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn month(mut self, month: i32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Whether `entry` satisfies every constraint set on the filter.
    pub fn matches(&self, entry: &Entry) -> bool {
        if let Some(needle) = &self.description {
            let needle = needle.to_lowercase();
            let found = entry
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }

        fn equal<T: PartialEq>(wanted: Option<T>, actual: Option<T>) -> bool {
            wanted.is_none_or(|wanted| actual == Some(wanted))
        }

        equal(self.month, entry.month)
            && equal(self.year, entry.year)
            && equal(self.user_id, entry.user_id)
            && equal(self.kind, entry.kind)
            && equal(self.status, Some(entry.status))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn entry(description: &str, month: i32, year: i32, user_id: Uuid) -> Entry {
        Entry::new(description, month, year, dec!(10), EntryType::Income, user_id)
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = EntryFilter::default();
        assert!(filter.matches(&entry("Salário", 1, 2022, Uuid::new_v4())));
        assert!(filter.matches(&Entry::default()));
    }

    #[test]
    fn description_is_a_case_insensitive_substring() {
        let user_id = Uuid::new_v4();
        let filter = EntryFilter::default().description("sal");
        assert!(filter.matches(&entry("Salário", 1, 2022, user_id)));
        assert!(filter.matches(&entry("SALARIO", 1, 2022, user_id)));
        assert!(filter.matches(&entry("Adiantamento salarial", 1, 2022, user_id)));
        assert!(!filter.matches(&entry("Aluguel", 1, 2022, user_id)));
        assert!(!filter.matches(&Entry::default()));
    }

    #[test]
    fn non_ascii_description_folds_case() {
        let filter = EntryFilter::default().description("SALÁ");
        assert!(filter.matches(&entry("salário", 1, 2022, Uuid::new_v4())));
    }

    #[test]
    fn other_fields_match_by_equality() {
        let user_id = Uuid::new_v4();
        let filter = EntryFilter::for_user(user_id).month(3).year(2023);
        assert!(filter.matches(&entry("Luz", 3, 2023, user_id)));
        assert!(!filter.matches(&entry("Luz", 4, 2023, user_id)));
        assert!(!filter.matches(&entry("Luz", 3, 2022, user_id)));
        assert!(!filter.matches(&entry("Luz", 3, 2023, Uuid::new_v4())));
    }

    #[test]
    fn status_and_kind_constrain_when_present() {
        let user_id = Uuid::new_v4();
        let mut confirmed = entry("Luz", 3, 2023, user_id);
        confirmed.status = EntryStatus::Confirmed;

        let filter = EntryFilter {
            status: Some(EntryStatus::Confirmed),
            kind: Some(EntryType::Income),
            ..Default::default()
        };
        assert!(filter.matches(&confirmed));
        assert!(!filter.matches(&entry("Luz", 3, 2023, user_id)));

        let filter = EntryFilter {
            kind: Some(EntryType::Expense),
            ..Default::default()
        };
        assert!(!filter.matches(&confirmed));
    }
}
