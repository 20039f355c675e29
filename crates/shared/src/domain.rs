use serde::{Deserialize, Serialize};

pub const UNNAMED_CHART: &str = "Unnamed Chart";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChartId {
    Text(String),
    Numeric(i64),
}

impl std::fmt::Display for ChartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(id) => f.write_str(id),
            Self::Numeric(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanetName {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
}

impl PlanetName {
    /// Fixed display order of the planets panel.
    pub const DISPLAY_ORDER: [PlanetName; 5] = [
        PlanetName::Sun,
        PlanetName::Moon,
        PlanetName::Mercury,
        PlanetName::Venus,
        PlanetName::Mars,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub sign: String,
    pub degree: f64,
}

/// The five planets a chart carries. Decoding rejects a missing or an extra
/// planet, so a `Chart` always holds exactly these keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanetPositions {
    pub sun: PlanetPosition,
    pub moon: PlanetPosition,
    pub mercury: PlanetPosition,
    pub venus: PlanetPosition,
    pub mars: PlanetPosition,
}

impl PlanetPositions {
    pub fn get(&self, planet: PlanetName) -> &PlanetPosition {
        match planet {
            PlanetName::Sun => &self.sun,
            PlanetName::Moon => &self.moon,
            PlanetName::Mercury => &self.mercury,
            PlanetName::Venus => &self.venus,
            PlanetName::Mars => &self.mars,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub birth_date: String,
    pub birth_time: String,
    pub birth_location: String,
    pub sun_sign: String,
    pub moon_sign: String,
    pub rising_sign: String,
    pub planets: PlanetPositions,
}

impl Chart {
    pub fn chart_id(&self) -> Option<ChartId> {
        if let Some(id) = &self.object_id {
            return Some(ChartId::Text(id.clone()));
        }
        self.id.map(ChartId::Numeric)
    }

    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNNAMED_CHART,
        }
    }
}
