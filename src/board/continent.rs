//! Continents: fixed groups of territories with a troop bonus.

use serde::{Deserialize, Serialize};

use crate::core::{Color, TerritoryId};

/// A continent. Its owner is derived: set while one color holds every
/// member territory, cleared otherwise.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Continent {
    pub name: String,

    /// Extra troops per turn for the monopolizing player.
    pub bonus: u32,

    pub members: Vec<TerritoryId>,

    owner: Option<Color>,
}

impl Continent {
    pub fn new(name: impl Into<String>, bonus: u32, members: Vec<TerritoryId>) -> Self {
        Self {
            name: name.into(),
            bonus,
            members,
            owner: None,
        }
    }

    /// Color holding every member, if any.
    #[must_use]
    pub fn owner(&self) -> Option<Color> {
        self.owner
    }

    #[must_use]
    pub fn contains(&self, id: TerritoryId) -> bool {
        self.members.contains(&id)
    }

    pub(crate) fn monopolize(&mut self, color: Color) {
        self.owner = Some(color);
    }

    pub(crate) fn demonopolize(&mut self) {
        self.owner = None;
    }
}
