use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Strike,
    Lockout,
    Picket,
    Boycott,
    WorkStoppage,
    Other,
}

impl ActionType {
    pub fn to_str(&self) -> &'static str {
        match self {
            ActionType::Strike => "strike",
            ActionType::Lockout => "lockout",
            ActionType::Picket => "picket",
            ActionType::Boycott => "boycott",
            ActionType::WorkStoppage => "work_stoppage",
            ActionType::Other => "other",
        }
    }

    /// Lenient parse for provider payloads: case and separator differences
    /// are tolerated and anything unrecognised becomes [`ActionType::Other`].
    pub fn parse_lenient(s: &str) -> Self {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "strike" => ActionType::Strike,
            "lockout" => ActionType::Lockout,
            "picket" | "picket_line" => ActionType::Picket,
            "boycott" => ActionType::Boycott,
            "work_stoppage" | "workstoppage" => ActionType::WorkStoppage,
            _ => ActionType::Other,
        }
    }

    /// Human-readable label, e.g. "Work Stoppage".
    pub fn display_name(&self) -> &'static str {
        match self {
            ActionType::Strike => "Strike",
            ActionType::Lockout => "Lockout",
            ActionType::Picket => "Picket",
            ActionType::Boycott => "Boycott",
            ActionType::WorkStoppage => "Work Stoppage",
            ActionType::Other => "Labor Action",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}
