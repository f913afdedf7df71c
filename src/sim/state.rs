//! Game state and core simulation types
//!
//! The whole world is one owned value. Entities are addressed by id so that
//! deferred transitions can find them later, or notice they are gone.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ambient::Ambient;
use super::effects::{Particle, StainBuffer};
use super::schedule::Scheduler;
use super::spawner::SpawnTimers;
use super::tick::FrameClock;
use crate::consts::*;
use crate::tuning::Tuning;

/// Overall game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Title screen, nothing spawns
    Start,
    /// Active gameplay
    Playing,
    /// Player ink ran dry
    GameOver,
}

/// Combat state shared by the player and enemies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CombatState {
    #[default]
    Idle,
    /// Winding up a strike
    Charging,
    /// Strike executed, waiting for the deferred follow-up
    Slashing,
    /// Player only: recovering after a slash
    Cooldown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Regular,
    /// Bigger, faster, tougher, swings twice
    Elite,
}

/// Role-specific attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Role {
    Player {
        /// Slash recovery remaining (ms)
        cooldown: f32,
        /// Dash recovery remaining (ms)
        dash_cooldown: f32,
    },
    Enemy {
        kind: EnemyKind,
        score_value: u32,
        /// Swings left in the current combo
        attack_count: u32,
    },
}

/// A combatant: the player or an enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub pos: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub state: CombatState,
    /// Time spent in the current charge (ms)
    pub charge_time: f32,
    /// Direction of the next (or current) strike
    pub target_angle: f32,
    pub role: Role,
}

impl Entity {
    pub fn player(id: u32, pos: Vec2, max_hp: i32) -> Self {
        Self {
            id,
            pos,
            hp: max_hp,
            max_hp,
            state: CombatState::Idle,
            charge_time: 0.0,
            target_angle: 0.0,
            role: Role::Player {
                cooldown: 0.0,
                dash_cooldown: 0.0,
            },
        }
    }

    pub fn enemy(id: u32, pos: Vec2, kind: EnemyKind, tuning: &Tuning) -> Self {
        let (hp, score_value) = match kind {
            EnemyKind::Regular => (tuning.enemy_hp, tuning.enemy_score),
            EnemyKind::Elite => (tuning.elite_hp, tuning.elite_score),
        };
        Self {
            id,
            pos,
            hp,
            max_hp: hp,
            state: CombatState::Idle,
            charge_time: 0.0,
            target_angle: 0.0,
            role: Role::Enemy {
                kind,
                score_value,
                attack_count: default_attack_count(kind, tuning),
            },
        }
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        matches!(self.role, Role::Player { .. })
    }

    #[inline]
    pub fn enemy_kind(&self) -> Option<EnemyKind> {
        match self.role {
            Role::Enemy { kind, .. } => Some(kind),
            Role::Player { .. } => None,
        }
    }

    #[inline]
    pub fn is_elite(&self) -> bool {
        self.enemy_kind() == Some(EnemyKind::Elite)
    }

    /// Slash cooldown (0 for enemies)
    pub fn cooldown(&self) -> f32 {
        match self.role {
            Role::Player { cooldown, .. } => cooldown,
            Role::Enemy { .. } => 0.0,
        }
    }

    /// Dash cooldown (0 for enemies)
    pub fn dash_cooldown(&self) -> f32 {
        match self.role {
            Role::Player { dash_cooldown, .. } => dash_cooldown,
            Role::Enemy { .. } => 0.0,
        }
    }

    pub fn score_value(&self) -> u32 {
        match self.role {
            Role::Enemy { score_value, .. } => score_value,
            Role::Player { .. } => 0,
        }
    }

    pub fn attack_count(&self) -> Option<u32> {
        match self.role {
            Role::Enemy { attack_count, .. } => Some(attack_count),
            Role::Player { .. } => None,
        }
    }

    /// Body radius for this role
    pub fn radius(&self, tuning: &Tuning) -> f32 {
        match self.role {
            Role::Player { .. } => tuning.player_radius,
            Role::Enemy {
                kind: EnemyKind::Regular,
                ..
            } => tuning.enemy_radius,
            Role::Enemy {
                kind: EnemyKind::Elite,
                ..
            } => tuning.elite_radius,
        }
    }

    /// Charge needed before this entity's strike lands (ms)
    pub fn charge_threshold(&self, tuning: &Tuning) -> f32 {
        match self.enemy_kind() {
            None => tuning.charge_time_player,
            Some(EnemyKind::Regular) => tuning.charge_time_enemy,
            Some(EnemyKind::Elite) => tuning.charge_time_elite,
        }
    }

    /// Enter a new combat state, clearing any charge in progress
    pub fn enter(&mut self, state: CombatState) {
        self.state = state;
        self.charge_time = 0.0;
    }

    /// Apply damage, clamped at 0. Returns true when this blow was fatal.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        let was_alive = self.hp > 0;
        self.hp = (self.hp - amount).clamp(0, self.max_hp);
        was_alive && self.hp == 0
    }

    /// Restore health, clamped at max. Returns true if anything was restored.
    pub fn heal(&mut self, amount: i32) -> bool {
        if self.hp >= self.max_hp {
            return false;
        }
        self.hp = (self.hp + amount).min(self.max_hp);
        true
    }

    /// Count down the player's slash and dash recovery timers
    pub fn tick_cooldowns(&mut self, dt: f32) {
        if let Role::Player {
            cooldown,
            dash_cooldown,
        } = &mut self.role
        {
            *cooldown = (*cooldown - dt).max(0.0);
            *dash_cooldown = (*dash_cooldown - dt).max(0.0);
            if *cooldown <= 0.0 && self.state == CombatState::Cooldown {
                self.state = CombatState::Idle;
            }
        }
    }

    pub fn set_cooldown(&mut self, value: f32) {
        if let Role::Player { cooldown, .. } = &mut self.role {
            *cooldown = value.max(0.0);
        }
    }

    pub fn set_dash_cooldown(&mut self, value: f32) {
        if let Role::Player { dash_cooldown, .. } = &mut self.role {
            *dash_cooldown = value.max(0.0);
        }
    }

    /// Set the combo counter (enemies only)
    pub fn set_attack_count(&mut self, value: u32) {
        if let Role::Enemy { attack_count, .. } = &mut self.role {
            *attack_count = value.max(1);
        }
    }
}

/// Swings per combo for an enemy kind
pub fn default_attack_count(kind: EnemyKind, tuning: &Tuning) -> u32 {
    match kind {
        EnemyKind::Regular => 1,
        EnemyKind::Elite => tuning.elite_attack_count.max(1),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Restores one point of health
    Health,
}

/// A pickup lying on the ground
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub pos: Vec2,
    pub kind: ItemKind,
    /// Animation phase only
    pub pulse: f32,
}

/// Visible play area in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Notable things that happened during the most recent step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Slash { from: Vec2, to: Vec2 },
    Dash { from: Vec2, to: Vec2 },
    EnemyHit { id: u32 },
    EnemySlain { id: u32, kind: EnemyKind, score_value: u32 },
    EnemySpawned { id: u32, kind: EnemyKind },
    ItemSpawned { id: u32 },
    ItemCollected { id: u32, healed: bool },
    PlayerHit { hp: i32 },
    GameOver { score: u32 },
}

fn unseeded_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete world state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub status: GameStatus,
    pub score: u32,
    /// Full-screen white flash, 0..=1
    pub flash_opacity: f32,
    pub player: Entity,
    /// Active enemies (spawn order)
    pub enemies: Vec<Entity>,
    pub items: Vec<Item>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub stains: StainBuffer,
    pub ambient: Ambient,
    pub spawn_timers: SpawnTimers,
    /// Timestamp of the most recent step (ms)
    pub time_ms: f64,
    #[serde(skip)]
    pub(crate) clock: FrameClock,
    #[serde(skip)]
    pub(crate) pending: Scheduler,
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
    #[serde(skip, default = "unseeded_rng")]
    pub(crate) rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a world on the title screen
    pub fn new(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ambient = Ambient::scatter(&mut rng, viewport, RAIN_COUNT, LEAF_COUNT);
        Self {
            seed,
            player: Entity::player(1, viewport.center(), tuning.player_max_hp),
            stains: StainBuffer::new(tuning.stain_cap),
            tuning,
            viewport,
            status: GameStatus::Start,
            score: 0,
            flash_opacity: 0.0,
            enemies: Vec::new(),
            items: Vec::new(),
            particles: Vec::new(),
            ambient,
            spawn_timers: SpawnTimers::default(),
            time_ms: 0.0,
            clock: FrameClock::default(),
            pending: Scheduler::default(),
            events: Vec::new(),
            rng,
            next_id: 2,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Begin a fresh run, replacing the whole world.
    ///
    /// Ambient layers, viewport, tuning and the frame clock carry over. Ids keep
    /// counting up and the deferred queue starts empty, so nothing scheduled in
    /// the previous run can touch the new one.
    pub fn start_game(&mut self) {
        let mut next = Self {
            seed: self.seed,
            tuning: self.tuning.clone(),
            viewport: self.viewport,
            status: GameStatus::Playing,
            score: 0,
            flash_opacity: 0.0,
            player: Entity::player(0, self.viewport.center(), self.tuning.player_max_hp),
            enemies: Vec::new(),
            items: Vec::new(),
            particles: Vec::new(),
            stains: StainBuffer::new(self.tuning.stain_cap),
            ambient: std::mem::take(&mut self.ambient),
            spawn_timers: SpawnTimers::default(),
            time_ms: self.time_ms,
            clock: self.clock,
            pending: Scheduler::default(),
            events: Vec::new(),
            rng: self.rng.clone(),
            next_id: self.next_id,
        };
        next.player.id = next.next_entity_id();
        log::info!("New run started (player id {})", next.player.id);
        *self = next;
    }

    /// Change the play area (host window resized)
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Replace the ambient layers with a new density
    pub fn scatter_ambient(&mut self, rain_count: usize, leaf_count: usize) {
        self.ambient = Ambient::scatter(&mut self.rng, self.viewport, rain_count, leaf_count);
    }

    /// Events raised by the most recent step
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Number of deferred transitions still waiting to fire
    pub fn pending_transitions(&self) -> usize {
        self.pending.len()
    }

    pub fn enemy(&self, id: u32) -> Option<&Entity> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_mut(&mut self, id: u32) -> Option<&mut Entity> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Pulse the full-screen flash
    pub(crate) fn flash(&mut self, value: f32) {
        self.flash_opacity = value.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_on_title() {
        let state = GameState::new(7, Viewport::new(800.0, 600.0), Tuning::default());
        assert_eq!(state.status, GameStatus::Start);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.player.hp, 3);
        assert_eq!(state.ambient.rain.len(), RAIN_COUNT);
        assert_eq!(state.ambient.leaves.len(), LEAF_COUNT);
    }

    #[test]
    fn test_start_game_resets_world() {
        let mut state = GameState::new(7, Viewport::new(800.0, 600.0), Tuning::default());
        state.start_game();
        let old_player = state.player.id;
        state.score = 40;
        state.player.pos = Vec2::new(10.0, 10.0);
        state.player.hp = 0;
        state.status = GameStatus::GameOver;
        state.spawn_timers.enemy = 500.0;
        let id = state.next_entity_id();
        state.enemies.push(Entity::enemy(id, Vec2::ZERO, EnemyKind::Elite, &state.tuning));

        state.start_game();
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.hp, 3);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert!(state.enemies.is_empty());
        assert!(state.stains.is_empty());
        assert_eq!(state.spawn_timers, SpawnTimers::default());
        assert!(state.player.id > id && state.player.id != old_player);
    }

    #[test]
    fn test_damage_clamps() {
        let tuning = Tuning::default();
        let mut elite = Entity::enemy(3, Vec2::ZERO, EnemyKind::Elite, &tuning);
        assert_eq!(elite.hp, 3);
        assert!(!elite.take_damage(1));
        assert!(elite.take_damage(5));
        assert_eq!(elite.hp, 0);
        assert!(!elite.take_damage(1));
        assert_eq!(elite.hp, 0);
    }

    #[test]
    fn test_heal_respects_max() {
        let mut player = Entity::player(1, Vec2::ZERO, 3);
        assert!(!player.heal(1));
        player.take_damage(2);
        assert!(player.heal(1));
        assert_eq!(player.hp, 2);
    }

    #[test]
    fn test_role_accessors() {
        let tuning = Tuning::default();
        let player = Entity::player(1, Vec2::ZERO, 3);
        let grunt = Entity::enemy(2, Vec2::ZERO, EnemyKind::Regular, &tuning);
        let elite = Entity::enemy(3, Vec2::ZERO, EnemyKind::Elite, &tuning);
        assert!(player.is_player());
        assert_eq!(player.attack_count(), None);
        assert_eq!(grunt.attack_count(), Some(1));
        assert_eq!(elite.attack_count(), Some(2));
        assert_eq!(grunt.score_value(), 5);
        assert_eq!(elite.score_value(), 25);
        assert_eq!(elite.radius(&tuning), 28.0);
        assert_eq!(grunt.charge_threshold(&tuning), 1200.0);
        assert_eq!(elite.charge_threshold(&tuning), 800.0);
        assert_eq!(player.charge_threshold(&tuning), 400.0);
    }

    #[test]
    fn test_cooldown_releases_state() {
        let mut player = Entity::player(1, Vec2::ZERO, 3);
        player.state = CombatState::Cooldown;
        player.set_cooldown(200.0);
        player.set_dash_cooldown(50.0);
        player.tick_cooldowns(150.0);
        assert_eq!(player.state, CombatState::Cooldown);
        assert_eq!(player.dash_cooldown(), 0.0);
        player.tick_cooldowns(60.0);
        assert_eq!(player.cooldown(), 0.0);
        assert_eq!(player.state, CombatState::Idle);
    }
}
