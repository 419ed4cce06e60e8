//! Team identification and per-team data storage.
//!
//! ## Team
//!
//! Type-safe team identifier. Team membership is the only ally/enemy
//! discriminator the engine knows about.
//!
//! ## TeamMap
//!
//! Per-team data storage backed by `Vec` for O(1) access.
//! Used for team-shared pools such as grog and energy.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Team identifier. Battles usually have two teams, but nothing assumes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Team(pub u8);

impl Team {
    /// Create a new team ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw team index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all teams for a battle with `team_count` teams.
    ///
    /// ```
    /// use relic_engine::core::Team;
    ///
    /// let teams: Vec<_> = Team::all(2).collect();
    /// assert_eq!(teams, vec![Team::new(0), Team::new(1)]);
    /// ```
    pub fn all(team_count: usize) -> impl Iterator<Item = Team> {
        (0..team_count as u8).map(Team)
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {}", self.0)
    }
}

/// Per-team data storage with O(1) access.
///
/// ```
/// use relic_engine::core::{Team, TeamMap};
///
/// let mut grog: TeamMap<u32> = TeamMap::with_value(2, 3);
/// grog[Team::new(1)] += 2;
/// assert_eq!(grog[Team::new(0)], 3);
/// assert_eq!(grog[Team::new(1)], 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMap<T> {
    data: Vec<T>,
}

impl<T> TeamMap<T> {
    /// Create a new TeamMap with values from a factory function.
    pub fn new(team_count: usize, factory: impl Fn(Team) -> T) -> Self {
        assert!(team_count > 0, "Must have at least 1 team");
        assert!(team_count <= 255, "At most 255 teams supported");

        let data = (0..team_count as u8).map(|i| factory(Team(i))).collect();

        Self { data }
    }

    /// Create a new TeamMap with all entries set to the same value.
    pub fn with_value(team_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(team_count, |_| value.clone())
    }

    /// Create a new TeamMap with default values.
    pub fn with_default(team_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(team_count, |_| T::default())
    }

    /// Get the number of teams.
    #[must_use]
    pub fn team_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a team's data, or `None` for an unknown team.
    #[must_use]
    pub fn get(&self, team: Team) -> Option<&T> {
        self.data.get(team.index())
    }

    /// Get a mutable reference to a team's data, or `None` for an unknown team.
    pub fn get_mut(&mut self, team: Team) -> Option<&mut T> {
        self.data.get_mut(team.index())
    }

    /// Iterate over (Team, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Team, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (Team(i as u8), v))
    }
}

impl<T> Index<Team> for TeamMap<T> {
    type Output = T;

    fn index(&self, team: Team) -> &Self::Output {
        &self.data[team.index()]
    }
}

impl<T> IndexMut<Team> for TeamMap<T> {
    fn index_mut(&mut self, team: Team) -> &mut Self::Output {
        &mut self.data[team.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_basics() {
        assert_eq!(Team::new(1).index(), 1);
        assert_eq!(format!("{}", Team::new(0)), "Team 0");
    }

    #[test]
    fn test_team_map_factory() {
        let map: TeamMap<i32> = TeamMap::new(3, |t| t.index() as i32 * 10);

        assert_eq!(map[Team::new(0)], 0);
        assert_eq!(map[Team::new(2)], 20);
        assert_eq!(map.team_count(), 3);
    }

    #[test]
    fn test_team_map_get_out_of_range() {
        let mut map: TeamMap<u32> = TeamMap::with_default(2);

        assert!(map.get(Team::new(5)).is_none());
        assert!(map.get_mut(Team::new(5)).is_none());
        *map.get_mut(Team::new(1)).unwrap() = 4;
        assert_eq!(map.get(Team::new(1)), Some(&4));
    }

    #[test]
    fn test_team_map_iter() {
        let map: TeamMap<u32> = TeamMap::with_value(2, 7);
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Team::new(0), &7), (Team::new(1), &7)]);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 team")]
    fn test_team_map_zero_teams() {
        let _: TeamMap<u32> = TeamMap::with_value(0, 0);
    }
}
