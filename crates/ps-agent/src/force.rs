//! Names of the forces the movement model applies to an agent.
//!
//! The force model itself lives outside this workspace; agents only record
//! which forces are switched off for them.

/// A named force of the social-force movement model.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Force {
    Desired,
    Obstacle,
    Social,
    Random,
    GroupCoherence,
    GroupGaze,
    GroupRepulsion,
    AlongWall,
}

impl Force {
    pub const ALL: [Force; 8] = [
        Force::Desired,
        Force::Obstacle,
        Force::Social,
        Force::Random,
        Force::GroupCoherence,
        Force::GroupGaze,
        Force::GroupRepulsion,
        Force::AlongWall,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Force::Desired        => "Desired",
            Force::Obstacle       => "Obstacle",
            Force::Social         => "Social",
            Force::Random         => "Random",
            Force::GroupCoherence => "GroupCoherence",
            Force::GroupGaze      => "GroupGaze",
            Force::GroupRepulsion => "GroupRepulsion",
            Force::AlongWall      => "AlongWall",
        }
    }

    /// Look a force up by its name.
    pub fn from_name(name: &str) -> Option<Force> {
        Force::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl std::fmt::Display for Force {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
