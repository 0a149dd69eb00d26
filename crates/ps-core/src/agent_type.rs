//! Pedestrian type tag shared by agents, clusters, and the view layer.

/// Kind of pedestrian an agent represents.
///
/// The numeric codes are stable so scenario files and renderers can refer to
/// types by integer.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AgentType {
    #[default]
    Adult   = 0,
    Child   = 1,
    Robot   = 2,
    Elder   = 3,
}

impl AgentType {
    /// Integer code of this type.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Map an integer code back to a type.  Unknown codes yield `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(AgentType::Adult),
            1 => Some(AgentType::Child),
            2 => Some(AgentType::Robot),
            3 => Some(AgentType::Elder),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentType::Adult => "adult",
            AgentType::Child => "child",
            AgentType::Robot => "robot",
            AgentType::Elder => "elder",
        }
    }
}

impl std::fmt::Display for AgentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
