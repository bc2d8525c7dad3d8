use serde::{Deserialize, Serialize};

/// Coarse process phase of a legislative act. The variants are mutually
/// exclusive and follow the lifecycle used by the government process
/// registry (planned, in process, passed, rejected, withdrawn).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActStatus {
    Planowany,
    Procedowany,
    Uchwalony,
    Odrzucony,
    Wycofany,
}

impl ActStatus {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Planowany,
            Self::Procedowany,
            Self::Uchwalony,
            Self::Odrzucony,
            Self::Wycofany,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Planowany => "Planowany",
            Self::Procedowany => "Procedowany",
            Self::Uchwalony => "Uchwalony",
            Self::Odrzucony => "Odrzucony",
            Self::Wycofany => "Wycofany",
        }
    }
}

/// Summary tag shown in listings. Correlated with, but independent of,
/// [`ActStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTag {
    Przyjety,
    WToku,
    Archiwalny,
}

impl ProgressTag {
    pub const fn ordered() -> [Self; 3] {
        [Self::Przyjety, Self::WToku, Self::Archiwalny]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Przyjety => "Przyjęty",
            Self::WToku => "W toku",
            Self::Archiwalny => "Archiwalny",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Normal,
    High,
}

/// Status of a single legislative stage. At most one stage per act should
/// be `InProgress`; that invariant is upheld by the data producer, not
/// enforced by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Done,
    InProgress,
    Pending,
}

impl StageStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Done => "Zakończony",
            Self::InProgress => "W trakcie",
            Self::Pending => "Oczekuje",
        }
    }
}

/// Subject-matter category of an act. Slugs match the identifiers the
/// public portal uses in links and filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Finanse,
    Sprawiedliwosc,
    Bezpieczenstwo,
    Edukacja,
    Zdrowie,
    Energetyka,
    Transport,
    Gospodarka,
    Rolnictwo,
    Administracja,
    Kultura,
    Samorzady,
}

impl Category {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::Finanse,
            Self::Sprawiedliwosc,
            Self::Bezpieczenstwo,
            Self::Edukacja,
            Self::Zdrowie,
            Self::Energetyka,
            Self::Transport,
            Self::Gospodarka,
            Self::Rolnictwo,
            Self::Administracja,
            Self::Kultura,
            Self::Samorzady,
        ]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Finanse => "finanse",
            Self::Sprawiedliwosc => "sprawiedliwosc",
            Self::Bezpieczenstwo => "bezpieczenstwo",
            Self::Edukacja => "edukacja",
            Self::Zdrowie => "zdrowie",
            Self::Energetyka => "energetyka",
            Self::Transport => "transport",
            Self::Gospodarka => "gospodarka",
            Self::Rolnictwo => "rolnictwo",
            Self::Administracja => "administracja",
            Self::Kultura => "kultura",
            Self::Samorzady => "samorzady",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Finanse => "Finanse i podatki",
            Self::Sprawiedliwosc => "Sprawiedliwość i prawo karne",
            Self::Bezpieczenstwo => "Bezpieczeństwo i cyberbezpieczeństwo",
            Self::Edukacja => "Edukacja i nauka",
            Self::Zdrowie => "Zdrowie i polityka społeczna",
            Self::Energetyka => "Energetyka i środowisko",
            Self::Transport => "Transport i infrastruktura",
            Self::Gospodarka => "Gospodarka i przedsiębiorczość",
            Self::Rolnictwo => "Rolnictwo i rozwój wsi",
            Self::Administracja => "Administracja publiczna i cyfryzacja",
            Self::Kultura => "Kultura i media",
            Self::Samorzady => "Samorządy i sprawy wewnętrzne",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|category| category.slug() == slug)
    }
}

/// Sponsoring body (wnioskodawca) of an act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sponsor {
    MinisterFinansow,
    MinisterSprawiedliwosci,
    MinisterCyfryzacji,
    MinisterZdrowia,
    MinisterEdukacji,
    MinisterKlimatu,
    MinisterInfrastruktury,
    MinisterSprawWewnetrznych,
    MinisterObronyNarodowej,
    MinisterKultury,
    MinisterRolnictwa,
    MinisterRodziny,
    PrezesRadyMinistrow,
    SzefKancelariiPremiera,
}

impl Sponsor {
    pub const fn ordered() -> [Self; 14] {
        [
            Self::MinisterFinansow,
            Self::MinisterSprawiedliwosci,
            Self::MinisterCyfryzacji,
            Self::MinisterZdrowia,
            Self::MinisterEdukacji,
            Self::MinisterKlimatu,
            Self::MinisterInfrastruktury,
            Self::MinisterSprawWewnetrznych,
            Self::MinisterObronyNarodowej,
            Self::MinisterKultury,
            Self::MinisterRolnictwa,
            Self::MinisterRodziny,
            Self::PrezesRadyMinistrow,
            Self::SzefKancelariiPremiera,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MinisterFinansow => "Minister Finansów",
            Self::MinisterSprawiedliwosci => "Minister Sprawiedliwości",
            Self::MinisterCyfryzacji => "Minister Cyfryzacji",
            Self::MinisterZdrowia => "Minister Zdrowia",
            Self::MinisterEdukacji => "Minister Edukacji",
            Self::MinisterKlimatu => "Minister Klimatu i Środowiska",
            Self::MinisterInfrastruktury => "Minister Infrastruktury",
            Self::MinisterSprawWewnetrznych => {
                "Minister Spraw Wewnętrznych i Administracji"
            }
            Self::MinisterObronyNarodowej => "Minister Obrony Narodowej",
            Self::MinisterKultury => "Minister Kultury i Dziedzictwa Narodowego",
            Self::MinisterRolnictwa => "Minister Rolnictwa i Rozwoju Wsi",
            Self::MinisterRodziny => "Minister Rodziny, Pracy i Polityki Społecznej",
            Self::PrezesRadyMinistrow => "Prezes Rady Ministrów",
            Self::SzefKancelariiPremiera => "Szef Kancelarii Prezesa Rady Ministrów",
        }
    }
}

/// Role attached to an authenticated identity. Resolution of a token to a
/// role is the identity provider's concern; the domain only dispatches on
/// the closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Citizen,
    Officer,
    Admin,
}

impl UserRole {
    /// Officers and admins share moderation and editing rights.
    pub const fn can_moderate(self) -> bool {
        matches!(self, Self::Officer | Self::Admin)
    }
}

/// Sejm reading to which a recorded vote belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reading {
    First,
    Second,
    Third,
}

impl Reading {
    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "I czytanie",
            Self::Second => "II czytanie",
            Self::Third => "III czytanie",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_slug_round_trips() {
        for category in Category::ordered() {
            assert_eq!(Category::from_slug(category.slug()), Some(category));
        }
        assert_eq!(Category::from_slug("nieznana"), None);
    }

    #[test]
    fn moderation_rights_exclude_citizens() {
        assert!(!UserRole::Citizen.can_moderate());
        assert!(UserRole::Officer.can_moderate());
        assert!(UserRole::Admin.can_moderate());
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&ActStatus::Procedowany).expect("serializes");
        assert_eq!(json, "\"procedowany\"");
        let tag: ProgressTag = serde_json::from_str("\"w_toku\"").expect("deserializes");
        assert_eq!(tag, ProgressTag::WToku);
    }
}
