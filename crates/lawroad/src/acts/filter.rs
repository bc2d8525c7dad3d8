//! Stable predicate filtering over act listings.
//!
//! The "all acts" view and the per-category view share this engine; the
//! category page merely pre-seeds the category criterion. Unset criteria
//! impose no constraint, so the empty criteria set is the identity.

use super::domain::{ActStatus, Category, Priority, ProgressTag, Sponsor};
use super::model::Act;
use serde::{Deserialize, Serialize};

/// Optional filter criteria, AND-ed together. `None` is the single
/// "no filter" sentinel; the HTTP layer folds the legacy `""`/`"all"`
/// query values into `None` before they reach the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ActStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<Sponsor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kadencja: Option<String>,
}

impl FilterCriteria {
    pub fn for_category(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }

    /// Whether a single act satisfies every present criterion. The title
    /// match is case-insensitive substring containment; everything else
    /// is exact equality. A blank title criterion passes everything.
    pub fn matches(&self, act: &Act) -> bool {
        if let Some(title) = &self.title {
            let needle = title.trim().to_lowercase();
            if !needle.is_empty() && !act.title.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if let Some(category) = self.category {
            if act.category != category {
                return false;
            }
        }
        if let Some(status) = self.status {
            if act.status != status {
                return false;
            }
        }
        if let Some(progress) = self.progress {
            if act.progress != progress {
                return false;
            }
        }
        if let Some(sponsor) = self.sponsor {
            if act.sponsor != sponsor {
                return false;
            }
        }
        if let Some(kadencja) = &self.kadencja {
            if &act.kadencja != kadencja {
                return false;
            }
        }
        true
    }
}

/// Select the matching subset, preserving input order. An empty result is
/// a valid, non-error outcome.
pub fn filter_acts<'a>(acts: &'a [Act], criteria: &FilterCriteria) -> Vec<&'a Act> {
    acts.iter().filter(|act| criteria.matches(act)).collect()
}

/// High-priority acts for the landing view, capped at four.
pub fn featured_acts(acts: &[Act]) -> Vec<&Act> {
    acts.iter()
        .filter(|act| act.priority == Priority::High)
        .take(4)
        .collect()
}
