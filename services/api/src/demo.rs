//! Demo dataset used by the `seed` subcommand and by non-production
//! server bootstraps. Mirrors the sample acts the public portal ships
//! with so the API is explorable out of the box.

use chrono::NaiveDate;
use clap::Args;
use lawroad::acts::domain::{
    ActStatus, Category, Priority, ProgressTag, Reading, Sponsor, StageStatus, UserRole,
};
use lawroad::acts::model::{
    Act, ActId, ActVersion, ConsultationWindow, Identity, ReadingVote, Stage,
};
use lawroad::acts::service::plain_language_explanation;
use lawroad::acts::stages::{current_stage, percent_complete};
use lawroad::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct SeedArgs {
    /// Include the generated plain-language explanation for each act
    #[arg(long)]
    pub(crate) explain: bool,
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    // Demo dates are compile-time constants; an invalid one is a bug in
    // this file, not an input error.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn done(name: &str, year: i32, month: u32, day: u32) -> Stage {
    Stage {
        name: name.to_string(),
        date: Some(date(year, month, day)),
        status: StageStatus::Done,
    }
}

fn in_progress(name: &str, year: i32, month: u32, day: u32) -> Stage {
    Stage {
        name: name.to_string(),
        date: Some(date(year, month, day)),
        status: StageStatus::InProgress,
    }
}

fn version(number: u32, day: NaiveDate, kind: &str, act_id: &str) -> ActVersion {
    ActVersion {
        version: number,
        date: day,
        kind: kind.to_string(),
        file_path: Some(format!("/docs/{act_id}_v{number}.pdf")),
    }
}

fn vote(reading: Reading, in_favor: u32, against: u32, abstain: u32) -> ReadingVote {
    ReadingVote {
        reading,
        in_favor,
        against,
        abstain,
    }
}

/// Demo bearer tokens, printed at startup outside production.
pub(crate) fn demo_identities() -> Vec<(&'static str, Identity)> {
    vec![
        (
            "token-obywatel",
            Identity {
                name: "Jan Kowalski".to_string(),
                email: "obywatel@example.com".to_string(),
                role: UserRole::Citizen,
            },
        ),
        (
            "token-urzednik",
            Identity {
                name: "Anna Nowak".to_string(),
                email: "urzednik@example.com".to_string(),
                role: UserRole::Officer,
            },
        ),
        (
            "token-admin",
            Identity {
                name: "Piotr Wiśniewski".to_string(),
                email: "admin@example.com".to_string(),
                role: UserRole::Admin,
            },
        ),
    ]
}

pub(crate) fn sample_acts() -> Vec<Act> {
    vec![
        Act {
            id: ActId("PL_2025_001".to_string()),
            title: "Projekt ustawy o zmianie ustawy o podatku dochodowym od osób fizycznych"
                .to_string(),
            summary: "Ustawa wprowadza zmiany w progach podatkowych oraz nowe ulgi dla rodzin \
                      wielodzietnych. Projekt ma na celu zmniejszenie obciążeń podatkowych dla \
                      klasy średniej."
                .to_string(),
            status: ActStatus::Procedowany,
            progress: ProgressTag::WToku,
            category: Category::Finanse,
            tags: vec![
                "podatkowe".to_string(),
                "obywatele".to_string(),
                "budżet_panstwa".to_string(),
            ],
            priority: Priority::High,
            sponsor: Sponsor::MinisterFinansow,
            date_submitted: date(2025, 1, 15),
            last_updated: date(2025, 6, 1),
            kadencja: "X".to_string(),
            stages: vec![
                done("Projekt został przyjęty do prac rady ministrów", 2025, 1, 15),
                done("Zgłoszenia lobbingowe", 2025, 1, 20),
                done("Uzgodnienia", 2025, 1, 25),
                done("Konsultacje publiczne", 2025, 2, 1),
                done("Opiniowanie", 2025, 2, 15),
                done("Stały Komitet Rady Ministrów", 2025, 3, 1),
                done("Komisja Prawnicza", 2025, 3, 10),
                done("Rada Ministrów", 2025, 3, 20),
                done("Skierowanie projektu ustawy do Sejmu", 2025, 4, 1),
                done("I czytanie na posiedzeniu Sejmu", 2025, 4, 15),
                in_progress("Praca w komisjach po I czytaniu", 2025, 5, 1),
                Stage::pending("II czytanie na posiedzeniu Sejmu"),
                Stage::pending("III czytanie na posiedzeniu Sejmu"),
                Stage::pending("Głosowanie w Sejmie"),
            ],
            consultation: Some(ConsultationWindow {
                start: date(2025, 2, 1),
                end: date(2025, 2, 28),
            }),
            versions: vec![
                version(1, date(2025, 1, 15), "projekt", "PL_2025_001"),
                version(2, date(2025, 3, 20), "po_komisji", "PL_2025_001"),
            ],
            votes: vec![vote(Reading::First, 245, 180, 15)],
        },
        Act {
            id: ActId("PL_2025_002".to_string()),
            title: "Projekt ustawy o cyberbezpieczeństwie systemów informatycznych".to_string(),
            summary: "Ustawa określa wymogi bezpieczeństwa dla systemów informatycznych \
                      podmiotów publicznych oraz operatorów usług kluczowych."
                .to_string(),
            status: ActStatus::Procedowany,
            progress: ProgressTag::WToku,
            category: Category::Bezpieczenstwo,
            tags: vec![
                "cyfryzacja".to_string(),
                "administracja_publiczna".to_string(),
                "przedsiębiorcy".to_string(),
            ],
            priority: Priority::High,
            sponsor: Sponsor::MinisterCyfryzacji,
            date_submitted: date(2025, 2, 1),
            last_updated: date(2025, 5, 15),
            kadencja: "X".to_string(),
            stages: vec![
                done("Projekt został przyjęty do prac rady ministrów", 2025, 2, 1),
                done("Konsultacje publiczne", 2025, 2, 15),
                done("Opiniowanie", 2025, 3, 20),
                done("Komitet Rady Ministrów do Spraw Cyfryzacji", 2025, 4, 1),
                in_progress("Stały Komitet Rady Ministrów", 2025, 4, 15),
                Stage::pending("Rada Ministrów"),
            ],
            consultation: Some(ConsultationWindow {
                start: date(2025, 2, 15),
                end: date(2025, 3, 15),
            }),
            versions: vec![version(1, date(2025, 2, 1), "projekt", "PL_2025_002")],
            votes: Vec::new(),
        },
        Act {
            id: ActId("PL_2025_003".to_string()),
            title: "Ustawa o wsparciu dla rolników w okresie suszy".to_string(),
            summary: "Ustawa wprowadza mechanizmy wsparcia finansowego dla gospodarstw rolnych \
                      dotkniętych skutkami suszy."
                .to_string(),
            status: ActStatus::Uchwalony,
            progress: ProgressTag::Przyjety,
            category: Category::Rolnictwo,
            tags: vec![
                "rolnictwo".to_string(),
                "budżet_panstwa".to_string(),
                "obywatele".to_string(),
            ],
            priority: Priority::High,
            sponsor: Sponsor::MinisterRolnictwa,
            date_submitted: date(2024, 11, 1),
            last_updated: date(2025, 3, 1),
            kadencja: "X".to_string(),
            stages: vec![
                done("Projekt został przyjęty do prac rady ministrów", 2024, 11, 1),
                done("Konsultacje publiczne", 2024, 11, 15),
                done("Rada Ministrów", 2025, 1, 10),
                done("I czytanie na posiedzeniu Sejmu", 2025, 1, 25),
                done("II czytanie na posiedzeniu Sejmu", 2025, 2, 10),
                done("III czytanie na posiedzeniu Sejmu", 2025, 2, 15),
                done("Głosowanie w Sejmie", 2025, 2, 15),
                done("Rozpatrzenie ustawy przez Senat", 2025, 2, 25),
                done("Podpisanie przez Prezydenta Ustawy", 2025, 3, 1),
            ],
            consultation: Some(ConsultationWindow {
                start: date(2024, 11, 15),
                end: date(2024, 12, 15),
            }),
            versions: vec![
                version(1, date(2024, 11, 1), "projekt", "PL_2025_003"),
                version(2, date(2025, 2, 15), "uchwalona", "PL_2025_003"),
            ],
            votes: vec![
                vote(Reading::First, 280, 120, 40),
                vote(Reading::Third, 310, 100, 30),
            ],
        },
        Act {
            id: ActId("PL_2025_004".to_string()),
            title: "Projekt ustawy o reformie systemu oświaty".to_string(),
            summary: "Kompleksowa reforma programów nauczania oraz systemu egzaminacyjnego w \
                      szkołach podstawowych i ponadpodstawowych."
                .to_string(),
            status: ActStatus::Procedowany,
            progress: ProgressTag::WToku,
            category: Category::Edukacja,
            tags: vec![
                "edukacyjne".to_string(),
                "obywatele".to_string(),
                "samorząd".to_string(),
            ],
            priority: Priority::High,
            sponsor: Sponsor::MinisterEdukacji,
            date_submitted: date(2025, 3, 1),
            last_updated: date(2025, 5, 20),
            kadencja: "X".to_string(),
            stages: vec![
                done("Projekt został przyjęty do prac rady ministrów", 2025, 3, 1),
                in_progress("Konsultacje publiczne", 2025, 3, 15),
                Stage::pending("Opiniowanie"),
                Stage::pending("Rada Ministrów"),
            ],
            // Kept open far into the future so the comment flow is
            // exercisable against the demo dataset.
            consultation: Some(ConsultationWindow {
                start: date(2025, 3, 15),
                end: date(2035, 12, 31),
            }),
            versions: vec![version(1, date(2025, 3, 1), "projekt", "PL_2025_004")],
            votes: Vec::new(),
        },
        Act {
            id: ActId("PL_2025_005".to_string()),
            title: "Projekt ustawy o ochronie danych medycznych".to_string(),
            summary: "Ustawa reguluje zasady przetwarzania i ochrony danych medycznych \
                      pacjentów w systemach informatycznych."
                .to_string(),
            status: ActStatus::Planowany,
            progress: ProgressTag::WToku,
            category: Category::Zdrowie,
            tags: vec![
                "zdrowotne".to_string(),
                "cyfryzacja".to_string(),
                "obywatele".to_string(),
            ],
            priority: Priority::Normal,
            sponsor: Sponsor::MinisterZdrowia,
            date_submitted: date(2025, 4, 1),
            last_updated: date(2025, 4, 15),
            kadencja: "X".to_string(),
            stages: vec![
                done("Projekt został przyjęty do prac rady ministrów", 2025, 4, 1),
                in_progress("Uzgodnienia", 2025, 4, 10),
                Stage::pending("Konsultacje publiczne"),
            ],
            consultation: None,
            versions: vec![version(1, date(2025, 4, 1), "projekt", "PL_2025_005")],
            votes: Vec::new(),
        },
        Act {
            id: ActId("PL_2025_006".to_string()),
            title: "Projekt ustawy o odnawialnych źródłach energii".to_string(),
            summary: "Nowelizacja ustawy wprowadzająca ułatwienia dla prosumentów oraz nowe \
                      mechanizmy wsparcia farm fotowoltaicznych."
                .to_string(),
            status: ActStatus::Procedowany,
            progress: ProgressTag::WToku,
            category: Category::Energetyka,
            tags: vec![
                "energetyczne".to_string(),
                "ochrona_środowiska".to_string(),
                "przedsiębiorcy".to_string(),
            ],
            priority: Priority::High,
            sponsor: Sponsor::MinisterKlimatu,
            date_submitted: date(2025, 1, 20),
            last_updated: date(2025, 5, 25),
            kadencja: "X".to_string(),
            stages: vec![
                done("Projekt został przyjęty do prac rady ministrów", 2025, 1, 20),
                done("Konsultacje publiczne", 2025, 2, 1),
                done("Rada Ministrów", 2025, 3, 15),
                done("I czytanie na posiedzeniu Sejmu", 2025, 4, 1),
                done("II czytanie na posiedzeniu Sejmu", 2025, 5, 1),
                in_progress("III czytanie na posiedzeniu Sejmu", 2025, 5, 20),
            ],
            consultation: Some(ConsultationWindow {
                start: date(2025, 2, 1),
                end: date(2025, 3, 1),
            }),
            versions: vec![
                version(1, date(2025, 1, 20), "projekt", "PL_2025_006"),
                version(2, date(2025, 5, 1), "po_komisji", "PL_2025_006"),
            ],
            votes: vec![
                vote(Reading::First, 260, 150, 30),
                vote(Reading::Second, 275, 140, 25),
            ],
        },
        Act {
            id: ActId("PL_2025_007".to_string()),
            title: "Projekt ustawy o wspieraniu mobilności osób niepełnosprawnych".to_string(),
            summary: "Ustawa wprowadza nowe ulgi i dofinansowania dla osób niepełnosprawnych \
                      korzystających z transportu publicznego oraz indywidualnego. Projekt \
                      zakłada również modernizację infrastruktury dostępności w miastach."
                .to_string(),
            status: ActStatus::Procedowany,
            progress: ProgressTag::WToku,
            category: Category::Transport,
            tags: vec![
                "społeczne".to_string(),
                "transport".to_string(),
                "osoby niepełnosprawne".to_string(),
            ],
            priority: Priority::High,
            sponsor: Sponsor::MinisterInfrastruktury,
            date_submitted: date(2025, 5, 1),
            last_updated: date(2025, 11, 30),
            kadencja: "X".to_string(),
            stages: vec![
                done("Projekt został przyjęty do prac rady ministrów", 2025, 5, 1),
                done("Zgłoszenia lobbingowe", 2025, 5, 10),
                in_progress("Konsultacje publiczne", 2025, 11, 15),
                Stage::pending("Opiniowanie"),
                Stage::pending("Rada Ministrów"),
            ],
            consultation: Some(ConsultationWindow {
                start: date(2025, 11, 15),
                end: date(2025, 12, 20),
            }),
            versions: vec![version(1, date(2025, 5, 1), "projekt", "PL_2025_007")],
            votes: Vec::new(),
        },
    ]
}

pub(crate) fn run_seed_listing(args: SeedArgs) -> Result<(), AppError> {
    for act in sample_acts() {
        let stage = current_stage(&act.stages)
            .map(|stage| stage.name.as_str())
            .unwrap_or("(brak etapów)");
        println!(
            "{}  {:<10}  {:>5.1}%  {}",
            act.id,
            act.status.label(),
            percent_complete(&act.stages) * 100.0,
            act.title
        );
        println!("    etap: {stage}");
        if args.explain {
            println!("    {}", plain_language_explanation(&act));
        }
    }
    Ok(())
}
