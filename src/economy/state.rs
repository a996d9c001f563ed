use super::logic::streak_multiplier;
use crate::core::constants::DEFAULT_MAX_LIVES;
use crate::loot::types::DrawResult;

/// Everything one player has accumulated in a session.
///
/// Unsigned fields make negative currency and lives unrepresentable; every
/// decrement goes through saturating arithmetic in `economy::logic`.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub session_id: String,
    pub banked_currency: u64,
    pub lives: u32,
    pub max_lives: u32,
    /// Set by purchasing unlimited lives. Hazards stop costing lives.
    pub unlimited_lives: bool,
    pub total_draws: u64,
    /// Consecutive non-dud, non-hazard draws.
    pub streak: u32,
    pub active_run_currency: u64,
    pub in_active_run: bool,
    /// Collectibles in the order they were drawn.
    pub collected_items: Vec<DrawResult>,
    /// Unix seconds of the last successful save.
    pub saved_at: Option<i64>,
}

impl SessionState {
    /// Fresh state with full lives.
    pub fn new(max_lives: u32) -> Self {
        use uuid::Uuid;

        let max_lives = max_lives.max(1);
        Self {
            session_id: Uuid::new_v4().to_string(),
            banked_currency: 0,
            lives: max_lives,
            max_lives,
            unlimited_lives: false,
            total_draws: 0,
            streak: 0,
            active_run_currency: 0,
            in_active_run: false,
            collected_items: Vec::new(),
            saved_at: None,
        }
    }

    /// Multiplier applied to currency on the next draw.
    pub fn multiplier(&self) -> f64 {
        streak_multiplier(self.streak)
    }

    /// True when regeneration has nothing to do.
    pub fn lives_full(&self) -> bool {
        self.unlimited_lives || self.lives >= self.max_lives
    }

    pub fn is_out_of_lives(&self) -> bool {
        !self.unlimited_lives && self.lives == 0
    }

    /// Checks the bounds that the economy rules maintain by construction.
    pub fn is_consistent(&self) -> bool {
        let lives_ok = self.lives <= self.max_lives;
        let run_ok = self.in_active_run || self.active_run_currency == 0;
        let items_ok = self.collected_items.iter().all(|item| item.is_collectible);
        lives_ok && run_ok && items_ok && self.multiplier() >= 1.0
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LIVES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_state() {
        let state = SessionState::new(5);
        assert_eq!(state.banked_currency, 0);
        assert_eq!(state.lives, 5);
        assert_eq!(state.max_lives, 5);
        assert_eq!(state.total_draws, 0);
        assert_eq!(state.streak, 0);
        assert_eq!(state.active_run_currency, 0);
        assert!(!state.in_active_run);
        assert!(state.collected_items.is_empty());
        assert!((state.multiplier() - 1.0).abs() < f64::EPSILON);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_zero_max_lives_is_raised_to_one() {
        let state = SessionState::new(0);
        assert_eq!(state.max_lives, 1);
        assert_eq!(state.lives, 1);
    }

    #[test]
    fn test_session_id_uniqueness() {
        let a = SessionState::default();
        let b = SessionState::default();
        assert_ne!(a.session_id, b.session_id);
        assert_eq!(a.session_id.len(), 36);
    }

    #[test]
    fn test_lives_full_and_out_of_lives() {
        let mut state = SessionState::new(5);
        assert!(state.lives_full());
        state.lives = 0;
        assert!(!state.lives_full());
        assert!(state.is_out_of_lives());
        state.unlimited_lives = true;
        assert!(state.lives_full());
        assert!(!state.is_out_of_lives());
    }

    #[test]
    fn test_run_currency_outside_run_is_inconsistent() {
        let mut state = SessionState::new(5);
        state.active_run_currency = 10;
        assert!(!state.is_consistent());
        state.in_active_run = true;
        assert!(state.is_consistent());
    }
}
