//! Delay policy for reboot reminders
//!
//! Pure functions deciding which delay choices are still legal given how
//! long the user has already deferred. Choices shrink as deferral
//! accumulates and collapse to the 10-minute option once the 48-hour
//! ceiling is effectively reached.

use serde::Serialize;

/// Hard ceiling on cumulative deferred time within one uptime epoch.
pub const DEFER_CEILING_SECONDS: u64 = 48 * 60 * 60;

/// A single delay choice offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DelayOption {
    pub label: &'static str,
    pub seconds: u64,
}

/// Fixed delay catalog, longest first. The presentation layer renders
/// choices in exactly this order.
pub const DELAY_CATALOG: [DelayOption; 6] = [
    DelayOption { label: "24 hours", seconds: 24 * 3600 },
    DelayOption { label: "10 hours", seconds: 10 * 3600 },
    DelayOption { label: "5 hours", seconds: 5 * 3600 },
    DelayOption { label: "3 hours", seconds: 3 * 3600 },
    DelayOption { label: "1 hour", seconds: 3600 },
    DelayOption { label: "10 minutes", seconds: 600 },
];

/// The shortest option, offered unconditionally once everything else is
/// ruled out. The user is never left without a choice.
const FALLBACK: DelayOption = DELAY_CATALOG[5];

/// Return the legal delay choices for the given cumulative deferral,
/// longest first. A candidate survives iff taking it would not push the
/// total past [`DEFER_CEILING_SECONDS`].
pub fn legal_choices(total_deferred_seconds: u64) -> Vec<DelayOption> {
    let choices: Vec<DelayOption> = DELAY_CATALOG
        .iter()
        .copied()
        .filter(|option| total_deferred_seconds + option.seconds <= DEFER_CEILING_SECONDS)
        .collect();

    if choices.is_empty() {
        return vec![FALLBACK];
    }
    choices
}

/// Look up a legal choice by its duration. Returns `None` for durations
/// that are not currently offered, including catalog entries already
/// ruled out by the ceiling.
pub fn find_choice(total_deferred_seconds: u64, seconds: u64) -> Option<DelayOption> {
    legal_choices(total_deferred_seconds)
        .into_iter()
        .find(|option| option.seconds == seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_epoch_offers_full_catalog() {
        let choices = legal_choices(0);
        assert_eq!(choices.len(), 6);
        assert_eq!(choices[0].seconds, 86400);
        assert_eq!(choices[5].seconds, 600);
    }

    #[test]
    fn moderate_deferral_drops_longest_option() {
        // 25 hours already deferred: 24h no longer fits under the ceiling.
        let choices = legal_choices(90_000);
        let seconds: Vec<u64> = choices.iter().map(|c| c.seconds).collect();
        assert_eq!(seconds, vec![36_000, 18_000, 10_800, 3_600, 600]);
    }

    #[test]
    fn heavy_deferral_collapses_to_fallback() {
        // ~47h55m deferred: only the 10-minute option remains.
        let choices = legal_choices(172_300);
        assert_eq!(choices.len(), 1);
        assert_eq!(choices[0].seconds, 600);
        assert_eq!(choices[0].label, "10 minutes");
    }

    #[test]
    fn ceiling_boundary_is_inclusive() {
        // 24h fits exactly when 24h has been deferred: 86400 + 86400 == ceiling.
        let choices = legal_choices(86_400);
        assert_eq!(choices[0].seconds, 86_400);

        // One second past that, the 24h option is gone.
        let choices = legal_choices(86_401);
        assert_eq!(choices[0].seconds, 36_000);
    }

    #[test]
    fn fallback_region_starts_at_ceiling_minus_fallback() {
        // At exactly ceiling - 600 the filter itself leaves only 10 minutes.
        let at_edge = legal_choices(DEFER_CEILING_SECONDS - 600);
        assert_eq!(at_edge.len(), 1);
        assert_eq!(at_edge[0].seconds, 600);

        // Beyond the ceiling nothing fits; the fallback is still offered.
        let past = legal_choices(DEFER_CEILING_SECONDS + 5_000);
        assert_eq!(past.len(), 1);
        assert_eq!(past[0].seconds, 600);
    }

    #[test]
    fn choices_never_empty_and_strictly_descending() {
        for total in (0..200_000).step_by(300) {
            let choices = legal_choices(total);
            assert!(!choices.is_empty(), "no choices at total={total}");
            for pair in choices.windows(2) {
                assert!(
                    pair[0].seconds > pair[1].seconds,
                    "ordering violated at total={total}"
                );
            }
        }
    }

    #[test]
    fn find_choice_respects_the_ratchet() {
        assert_eq!(find_choice(0, 86_400).map(|c| c.label), Some("24 hours"));
        assert!(find_choice(172_300, 86_400).is_none());
        assert!(find_choice(172_300, 600).is_some());
        assert!(find_choice(0, 1234).is_none());
    }
}
