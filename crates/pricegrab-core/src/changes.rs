//! Change detection over the observation history of one SKU.
//!
//! Both queries take the history in ascending order (oldest first) and
//! compare only discount, price, inventory and availability.

use serde::{Deserialize, Serialize};

use crate::ObservationRow;

/// An earlier observation paired with the latest one it differs from.
pub type ChangePair<'a> = (&'a ObservationRow, &'a ObservationRow);

/// Which change query a report is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Latest observation vs. the closest earlier one that differs.
    Ever,
    /// Last two observations, only when they differ.
    Recent,
}

impl ChangeKind {
    /// Applies the matching query to `history`.
    #[must_use]
    pub fn detect(self, history: &[ObservationRow]) -> Option<ChangePair<'_>> {
        match self {
            ChangeKind::Ever => ever_changed(history),
            ChangeKind::Recent => recent_change(history),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ChangeKind::Ever => "CHANGED",
            ChangeKind::Recent => "RECENTLY changed",
        }
    }
}

/// Returns the last two observations when they differ.
#[must_use]
pub fn recent_change(history: &[ObservationRow]) -> Option<ChangePair<'_>> {
    let [.., prev, last] = history else {
        return None;
    };
    (!prev.same_readings(last)).then_some((prev, last))
}

/// Scans backward from the second-to-last observation and pairs the first
/// one that differs from the latest with the latest.
#[must_use]
pub fn ever_changed(history: &[ObservationRow]) -> Option<ChangePair<'_>> {
    let (last, earlier) = history.split_last()?;
    earlier
        .iter()
        .rev()
        .find(|candidate| !candidate.same_readings(last))
        .map(|candidate| (candidate, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(date: &str, price: &str) -> ObservationRow {
        ObservationRow {
            date: date.to_string(),
            discount: "10%".to_string(),
            price: price.to_string(),
            inventory: "IN STOCK".to_string(),
            available: "true".to_string(),
            skuid: "sku000001".to_string(),
        }
    }

    #[test]
    fn empty_history_has_no_changes() {
        assert!(recent_change(&[]).is_none());
        assert!(ever_changed(&[]).is_none());
    }

    #[test]
    fn single_observation_has_no_changes() {
        let history = vec![obs("20200101", "€10")];
        assert!(recent_change(&history).is_none());
        assert!(ever_changed(&history).is_none());
    }

    #[test]
    fn recent_change_is_none_when_last_two_match() {
        let history = vec![obs("20200101", "€10"), obs("20200102", "€10")];
        assert!(recent_change(&history).is_none());
    }

    #[test]
    fn recent_change_returns_last_two_when_they_differ() {
        let history = vec![obs("20200101", "€10"), obs("20200102", "€12")];
        let (before, after) = recent_change(&history).expect("expected a change");
        assert_eq!(before.price, "€10");
        assert_eq!(after.price, "€12");
    }

    #[test]
    fn recent_change_only_looks_at_the_tail() {
        let history = vec![
            obs("20200101", "€10"),
            obs("20200102", "€12"),
            obs("20200103", "€12"),
        ];
        assert!(recent_change(&history).is_none());
    }

    #[test]
    fn ever_changed_skips_equal_run() {
        let history = vec![
            obs("20200101", "€10"),
            obs("20200102", "€12"),
            obs("20200103", "€12"),
            obs("20200104", "€12"),
        ];
        let (before, after) = ever_changed(&history).expect("expected a change");
        assert_eq!(before.date, "20200101");
        assert_eq!(before.price, "€10");
        assert_eq!(after.date, "20200104");
    }

    #[test]
    fn ever_changed_picks_the_closest_difference() {
        let history = vec![
            obs("20200101", "€8"),
            obs("20200102", "€10"),
            obs("20200103", "€12"),
        ];
        let (before, _) = ever_changed(&history).expect("expected a change");
        assert_eq!(before.date, "20200102");
    }

    #[test]
    fn ever_changed_is_none_when_all_equal() {
        let history = vec![
            obs("20200101", "€12"),
            obs("20200102", "€12"),
            obs("20200103", "€12"),
        ];
        assert!(ever_changed(&history).is_none());
    }

    #[test]
    fn date_only_difference_is_not_a_change() {
        let mut later = obs("20200102", "€10");
        later.skuid = "other".to_string();
        let history = vec![obs("20200101", "€10"), later];
        assert!(ever_changed(&history).is_none());
        assert!(recent_change(&history).is_none());
    }

    #[test]
    fn change_kind_dispatches_to_matching_query() {
        let history = vec![
            obs("20200101", "€10"),
            obs("20200102", "€12"),
            obs("20200103", "€12"),
        ];
        assert!(ChangeKind::Ever.detect(&history).is_some());
        assert!(ChangeKind::Recent.detect(&history).is_none());
    }

    #[test]
    fn change_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ChangeKind::Recent).unwrap(), "\"recent\"");
        let kind: ChangeKind = serde_json::from_str("\"ever\"").unwrap();
        assert_eq!(kind, ChangeKind::Ever);
    }
}
