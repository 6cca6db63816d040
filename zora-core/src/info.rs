//! Player profile record shared between the two titles.
//!
//! [`GameInfo`] holds everything a game secret carries plus the ring box.
//! [`ObservedGameInfo`] layers change notification on top for hosts that
//! bind the record to a UI.

use crate::error::{Result, check_range};
use crate::secret::{MAX_ANIMAL, MAX_BEHAVIOR, MAX_GAME_ID};
use crate::text::{null_pad, trim_name};
use crate::types::{Animal, Game, Region};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameInfo {
    pub(crate) region: Region,
    pub(crate) game_id: u16,
    pub(crate) game: Game,
    pub(crate) hero: String,
    pub(crate) child: String,
    pub(crate) behavior: u8,
    pub(crate) animal: u8,
    pub(crate) is_hero_quest: bool,
    pub(crate) is_linked_game: bool,
    pub(crate) was_given_free_ring: bool,
    pub(crate) rings: u64,
}

impl Default for GameInfo {
    fn default() -> Self {
        Self {
            region: Region::Us,
            game_id: 0,
            game: Game::Seasons,
            hero: null_pad(""),
            child: null_pad(""),
            behavior: 0,
            animal: 0,
            is_hero_quest: false,
            is_linked_game: false,
            was_given_free_ring: false,
            rings: 0,
        }
    }
}

impl GameInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    pub fn game_id(&self) -> u16 {
        self.game_id
    }

    pub fn set_game_id(&mut self, game_id: u16) -> Result<()> {
        check_range("game id", game_id.into(), MAX_GAME_ID.into())?;
        self.game_id = game_id;
        Ok(())
    }

    pub fn game(&self) -> Game {
        self.game
    }

    pub fn set_game(&mut self, game: Game) {
        self.game = game;
    }

    pub fn hero(&self) -> &str {
        trim_name(&self.hero)
    }

    pub fn set_hero(&mut self, hero: &str) {
        self.hero = null_pad(hero);
    }

    pub fn child(&self) -> &str {
        trim_name(&self.child)
    }

    pub fn set_child(&mut self, child: &str) {
        self.child = null_pad(child);
    }

    pub fn behavior(&self) -> u8 {
        self.behavior
    }

    pub fn set_behavior(&mut self, behavior: u8) -> Result<()> {
        check_range("behavior", behavior.into(), MAX_BEHAVIOR.into())?;
        self.behavior = behavior;
        Ok(())
    }

    pub fn animal(&self) -> u8 {
        self.animal
    }

    pub fn companion(&self) -> Option<Animal> {
        Animal::from_value(self.animal)
    }

    pub fn set_animal(&mut self, animal: u8) -> Result<()> {
        check_range("animal", animal.into(), MAX_ANIMAL.into())?;
        self.animal = animal;
        Ok(())
    }

    pub fn is_hero_quest(&self) -> bool {
        self.is_hero_quest
    }

    pub fn set_hero_quest(&mut self, value: bool) {
        self.is_hero_quest = value;
    }

    pub fn is_linked_game(&self) -> bool {
        self.is_linked_game
    }

    pub fn set_linked_game(&mut self, value: bool) {
        self.is_linked_game = value;
    }

    pub fn was_given_free_ring(&self) -> bool {
        self.was_given_free_ring
    }

    pub fn set_given_free_ring(&mut self, value: bool) {
        self.was_given_free_ring = value;
    }

    /// Ring box as a bitmask, one bit per ring
    pub fn rings(&self) -> u64 {
        self.rings
    }

    pub fn set_rings(&mut self, rings: u64) {
        self.rings = rings;
    }

    pub fn has_ring(&self, index: u8) -> bool {
        index < 64 && self.rings & (1u64 << index) != 0
    }
}

/// Names a [`GameInfo`] field in change notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoField {
    Region,
    GameId,
    Game,
    Hero,
    Child,
    Behavior,
    Animal,
    IsHeroQuest,
    IsLinkedGame,
    WasGivenFreeRing,
    Rings,
}

/// Receives a notification after a field actually changed
pub trait InfoObserver {
    fn changed(&mut self, field: InfoField);
}

impl<F: FnMut(InfoField)> InfoObserver for F {
    fn changed(&mut self, field: InfoField) {
        self(field)
    }
}

/// A [`GameInfo`] whose setters notify an observer
pub struct ObservedGameInfo<O> {
    info: GameInfo,
    observer: O,
}

impl<O: InfoObserver> ObservedGameInfo<O> {
    pub fn new(info: GameInfo, observer: O) -> Self {
        Self { info, observer }
    }

    pub fn info(&self) -> &GameInfo {
        &self.info
    }

    pub fn into_inner(self) -> GameInfo {
        self.info
    }

    /// Apply `set`, then notify if `get` reports a new value
    fn update<T: PartialEq>(
        &mut self,
        field: InfoField,
        get: impl Fn(&GameInfo) -> T,
        set: impl FnOnce(&mut GameInfo),
    ) {
        let before = get(&self.info);
        set(&mut self.info);
        if get(&self.info) != before {
            self.observer.changed(field);
        }
    }

    /// Like `update`, for setters that validate their input
    fn try_update<T: PartialEq>(
        &mut self,
        field: InfoField,
        get: impl Fn(&GameInfo) -> T,
        set: impl FnOnce(&mut GameInfo) -> Result<()>,
    ) -> Result<()> {
        let before = get(&self.info);
        set(&mut self.info)?;
        if get(&self.info) != before {
            self.observer.changed(field);
        }
        Ok(())
    }

    pub fn set_region(&mut self, region: Region) {
        self.update(InfoField::Region, GameInfo::region, |i| i.set_region(region));
    }

    pub fn set_game_id(&mut self, game_id: u16) -> Result<()> {
        self.try_update(InfoField::GameId, GameInfo::game_id, |i| {
            i.set_game_id(game_id)
        })
    }

    pub fn set_game(&mut self, game: Game) {
        self.update(InfoField::Game, GameInfo::game, |i| i.set_game(game));
    }

    pub fn set_hero(&mut self, hero: &str) {
        self.update(InfoField::Hero, |i| i.hero.clone(), |i| i.set_hero(hero));
    }

    pub fn set_child(&mut self, child: &str) {
        self.update(InfoField::Child, |i| i.child.clone(), |i| i.set_child(child));
    }

    pub fn set_behavior(&mut self, behavior: u8) -> Result<()> {
        self.try_update(InfoField::Behavior, GameInfo::behavior, |i| {
            i.set_behavior(behavior)
        })
    }

    pub fn set_animal(&mut self, animal: u8) -> Result<()> {
        self.try_update(InfoField::Animal, GameInfo::animal, |i| i.set_animal(animal))
    }

    pub fn set_hero_quest(&mut self, value: bool) {
        self.update(InfoField::IsHeroQuest, GameInfo::is_hero_quest, |i| {
            i.set_hero_quest(value)
        });
    }

    pub fn set_linked_game(&mut self, value: bool) {
        self.update(InfoField::IsLinkedGame, GameInfo::is_linked_game, |i| {
            i.set_linked_game(value)
        });
    }

    pub fn set_given_free_ring(&mut self, value: bool) {
        self.update(
            InfoField::WasGivenFreeRing,
            GameInfo::was_given_free_ring,
            |i| i.set_given_free_ring(value),
        );
    }

    pub fn set_rings(&mut self, rings: u64) {
        self.update(InfoField::Rings, GameInfo::rings, |i| i.set_rings(rings));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SecretError;

    #[test]
    fn test_defaults() {
        let info = GameInfo::new();
        assert_eq!(info.region(), Region::Us);
        assert_eq!(info.game_id(), 0);
        assert_eq!(info.hero(), "");
        assert_eq!(info.companion(), None);
        assert_eq!(info.rings(), 0);
    }

    #[test]
    fn test_setters_validate_before_mutating() {
        let mut info = GameInfo::new();
        info.set_behavior(63).unwrap();
        assert!(matches!(
            info.set_behavior(64),
            Err(SecretError::Range { field: "behavior", .. })
        ));
        assert_eq!(info.behavior(), 63);

        assert!(info.set_game_id(32768).is_err());
        assert_eq!(info.game_id(), 0);
        assert!(info.set_animal(16).is_err());
    }

    #[test]
    fn test_names_and_rings() {
        let mut info = GameInfo::new();
        info.set_hero("Al");
        assert_eq!(info.hero(), "Al");
        assert_eq!(info.hero, "Al\0\0\0");

        info.set_rings((1 << 5) | 1);
        assert!(info.has_ring(0));
        assert!(info.has_ring(5));
        assert!(!info.has_ring(6));
        assert!(!info.has_ring(64));
    }

    #[test]
    fn test_observer_sees_only_real_changes() {
        let mut seen = Vec::new();
        let mut observed = ObservedGameInfo::new(GameInfo::new(), |f: InfoField| seen.push(f));

        observed.set_hero("Link");
        observed.set_hero("Link  ");
        observed.set_game(Game::Seasons);
        observed.set_game(Game::Ages);
        assert!(observed.set_behavior(99).is_err());
        observed.set_behavior(4).unwrap();
        observed.set_linked_game(true);

        let info = observed.into_inner();
        assert_eq!(info.hero(), "Link");
        assert_eq!(
            seen,
            vec![
                InfoField::Hero,
                InfoField::Game,
                InfoField::Behavior,
                InfoField::IsLinkedGame
            ]
        );
    }

    #[test]
    fn test_observer_plain_setters() {
        let mut seen = Vec::new();
        let mut observed = ObservedGameInfo::new(GameInfo::new(), |f: InfoField| seen.push(f));

        observed.set_region(Region::Us);
        observed.set_region(Region::Japan);
        observed.set_rings(1 << 3);
        observed.set_rings(1 << 3);
        observed.set_given_free_ring(true);
        observed.set_hero_quest(false);
        assert!(observed.set_animal(16).is_err());
        observed.set_animal(0x0d).unwrap();

        assert_eq!(observed.info().region(), Region::Japan);
        assert!(observed.info().has_ring(3));
        drop(observed);
        assert_eq!(
            seen,
            vec![
                InfoField::Region,
                InfoField::Rings,
                InfoField::WasGivenFreeRing,
                InfoField::Animal
            ]
        );
    }
}
