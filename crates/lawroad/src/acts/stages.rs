//! Canonical stage catalogue and progress derivation.
//!
//! The catalogue fixes the chronological order of every named step of the
//! legislative process, from ministry intake through publication in the
//! journal of laws. Individual acts instantiate a subsequence of it;
//! free-text or legacy names are tolerated and merely reported as
//! non-canonical.

use super::domain::StageStatus;
use super::model::Stage;
use serde::Serialize;

/// Every recognized stage name, in process chronology.
pub const CANONICAL_STAGES: [&str; 38] = [
    "Projekt został przyjęty do prac rady ministrów",
    "Zgłoszenia lobbingowe",
    "Uzgodnienia",
    "Konsultacje publiczne",
    "Opiniowanie",
    "Komitet Rady Ministrów do Spraw Cyfryzacji",
    "Komitet do Spraw Europejskich",
    "Komitet Społeczny Rady Ministrów",
    "Komitet Ekonomiczny Rady Ministrów",
    "Stały Komitet Rady Ministrów",
    "Komisja Prawnicza",
    "Potwierdzenie projektu przez Stały Komitet Rady Ministrów",
    "Rada Ministrów",
    "Notyfikacja",
    "Skierowanie projektu ustawy do Sejmu",
    "Wpłynięcie projektu do Sejmu",
    "I czytanie na posiedzeniu Sejmu",
    "Praca w komisjach po I czytaniu",
    "Sprawozdanie komisji po I czytaniu",
    "II czytanie na posiedzeniu Sejmu",
    "Praca w komisjach po II czytaniu",
    "Sprawozdanie komisji po II czytaniu",
    "III czytanie na posiedzeniu Sejmu",
    "Głosowanie w Sejmie",
    "Przekazanie ustawy Prezydentowi i Marszałkowi Senatu",
    "Wpłynięcie ustawy do Prezydenta",
    "Wpłynięcie ustawy do Marszałka Senatu",
    "Skierowanie ustawy do Komisji Senackich",
    "Rozpatrzenie ustawy przez Komisje Senackie",
    "Rozpatrzenie ustawy przez Senat",
    "Przekazanie uchwały do Sejmu",
    "Wpłynięcie do Sejmu stanowisko Senatu",
    "Praca w komisjach nad stanowiskiem Senatu",
    "Sprawozdanie komisji",
    "Rozpatrywanie na forum Sejmu stanowiska Senatu",
    "Przekazanie Ustawy Prezydentowi do podpisu",
    "Podpisanie przez Prezydenta Ustawy",
    "Przekazanie Ustawy do dziennika ustaw",
];

/// Position of a stage name in canonical order, if it is a known name.
pub fn position(name: &str) -> Option<usize> {
    CANONICAL_STAGES.iter().position(|stage| *stage == name)
}

pub fn is_canonical(name: &str) -> bool {
    position(name).is_some()
}

/// Indices of stages whose names are not in the canonical catalogue.
/// Reported for diagnostics; such stages are never dropped.
pub fn non_canonical_indices(stages: &[Stage]) -> Vec<usize> {
    stages
        .iter()
        .enumerate()
        .filter(|(_, stage)| !is_canonical(&stage.name))
        .map(|(index, _)| index)
        .collect()
}

/// The stage the act is at right now: the first `in_progress` stage, else
/// the last `done` stage, else `None` for an act that has not started.
/// The tie-break (prefer `in_progress` over trailing `done`) is what the
/// portal labels "current stage".
pub fn current_stage(stages: &[Stage]) -> Option<&Stage> {
    stages
        .iter()
        .find(|stage| stage.status == StageStatus::InProgress)
        .or_else(|| {
            stages
                .iter()
                .rev()
                .find(|stage| stage.status == StageStatus::Done)
        })
}

/// Index companion to [`current_stage`].
pub fn current_stage_index(stages: &[Stage]) -> Option<usize> {
    stages
        .iter()
        .position(|stage| stage.status == StageStatus::InProgress)
        .or_else(|| {
            stages
                .iter()
                .rposition(|stage| stage.status == StageStatus::Done)
        })
}

/// Fraction of stages completed, in `[0, 1]`. An `in_progress` stage
/// contributes nothing: partial progress within a stage does not count.
/// The empty list degenerates to `0.0`.
pub fn percent_complete(stages: &[Stage]) -> f32 {
    if stages.is_empty() {
        return 0.0;
    }
    let done = stages
        .iter()
        .filter(|stage| stage.status == StageStatus::Done)
        .count();
    done as f32 / stages.len() as f32
}

/// First `n` stages for sidebar summaries. Order-preserving and
/// non-mutating; returns at most `min(n, len)` entries.
pub fn compact_slice(stages: &[Stage], n: usize) -> &[Stage] {
    &stages[..n.min(stages.len())]
}

/// Adjacent-pair chronology defect: the later stage is `done` while the
/// earlier one is still `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChronologyViolation {
    pub earlier_index: usize,
    pub later_index: usize,
}

/// Report every adjacent pair where a `done` stage follows a `pending`
/// one. Violations are data for the caller to surface as warnings; the
/// timeline renders the stages as given regardless.
pub fn validate_chronology(stages: &[Stage]) -> Vec<ChronologyViolation> {
    stages
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| {
            pair[0].status == StageStatus::Pending && pair[1].status == StageStatus::Done
        })
        .map(|(index, _)| ChronologyViolation {
            earlier_index: index,
            later_index: index + 1,
        })
        .collect()
}
