//! Text overlay model
//!
//! The host draws the score, ink pips and the title / game-over screens with
//! whatever text facility it has; this is what it needs to know.

use crate::epitaph::EpitaphStatus;
use crate::sim::{GameState, GameStatus};

/// Placeholder while the epitaph is being written
pub const EPITAPH_PENDING: &str = "正在撰寫輓歌...";

#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub status: GameStatus,
    pub score: u32,
    pub hp: i32,
    pub max_hp: i32,
    /// Dash recharge, 1 = ready
    pub dash_ready: f32,
    pub title: &'static str,
    pub subtitle: String,
    pub epitaph: Option<String>,
    /// Label for the start / restart button
    pub action: Option<&'static str>,
}

impl Hud {
    pub fn new(state: &GameState, epitaph: &EpitaphStatus) -> Self {
        let player = &state.player;
        let dash_ready = if state.tuning.dash_cooldown > 0.0 {
            1.0 - (player.dash_cooldown() / state.tuning.dash_cooldown).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let (title, subtitle, action) = match state.status {
            GameStatus::Start => (
                "墨劍",
                "WASD 移動 | 长按鼠标左键指向蓄力 | Shift 瞬间爆发斩击".to_string(),
                Some("入 阵"),
            ),
            GameStatus::Playing => ("", format!("積分: {}", state.score), None),
            GameStatus::GameOver => ("墨盡", format!("最終得分: {}", state.score), Some("再 續 前 缘")),
        };

        let epitaph = match (state.status, epitaph) {
            (GameStatus::GameOver, EpitaphStatus::Ready(text)) => Some(text.clone()),
            (GameStatus::GameOver, _) => Some(EPITAPH_PENDING.to_string()),
            _ => None,
        };

        Self {
            status: state.status,
            score: state.score,
            hp: player.hp,
            max_hp: player.max_hp,
            dash_ready,
            title,
            subtitle,
            epitaph,
            action,
        }
    }

    /// Filled and empty ink pips, one per point of max health
    pub fn pips(&self) -> String {
        (0..self.max_hp)
            .map(|i| if i < self.hp { '●' } else { '○' })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Viewport;
    use crate::tuning::Tuning;

    #[test]
    fn test_playing_hud() {
        let mut state = GameState::new(1, Viewport::default(), Tuning::default());
        state.start_game();
        state.score = 30;
        state.player.hp = 2;
        let hud = Hud::new(&state, &EpitaphStatus::Idle);
        assert_eq!(hud.subtitle, "積分: 30");
        assert_eq!(hud.pips(), "●●○");
        assert_eq!(hud.dash_ready, 1.0);
        assert!(hud.epitaph.is_none());
    }

    #[test]
    fn test_game_over_shows_epitaph() {
        let mut state = GameState::new(1, Viewport::default(), Tuning::default());
        state.status = GameStatus::GameOver;
        let pending = Hud::new(&state, &EpitaphStatus::Pending);
        assert_eq!(pending.epitaph.as_deref(), Some(EPITAPH_PENDING));
        let ready = Hud::new(&state, &EpitaphStatus::Ready("verse".into()));
        assert_eq!(ready.epitaph.as_deref(), Some("verse"));
        assert_eq!(ready.action, Some("再 續 前 缘"));
    }
}
