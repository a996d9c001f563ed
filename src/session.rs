//! Session orchestrator.
//!
//! Owns the player state, the validated loot table, the store and both timers,
//! and exposes the actions a front end triggers. Time is explicit: callers
//! advance the session with [`Session::tick`], the shell on a 100ms cadence
//! and the simulator and tests with synthetic time.

use crate::core::config::EngineConfig;
use crate::core::constants::RECENT_RESULTS_CAPACITY;
use crate::economy::logic::{self, ApplyReport};
use crate::economy::offline::process_offline_regen;
use crate::economy::regen::RegenTimer;
use crate::economy::state::SessionState;
use crate::error::{ConfigError, SessionError};
use crate::loot::draw::draw;
use crate::loot::random::RandomSource;
use crate::loot::tables::{LootTable, Variant};
use crate::loot::types::DrawResult;
use crate::persistence::bridge::{clear_state, load_state, save_state};
use crate::persistence::store::KeyValueStore;
use chrono::Utc;
use std::collections::VecDeque;

/// What happened during one call to [`Session::tick`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionTick {
    /// The draw that resolved this tick, if any.
    pub draw: Option<(DrawResult, ApplyReport)>,
    pub lives_regenerated: u32,
}

/// Read-only view of a session for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub variant: Variant,
    pub connected: bool,
    pub banked_currency: u64,
    pub lives: u32,
    pub max_lives: u32,
    pub unlimited_lives: bool,
    pub total_draws: u64,
    pub streak: u32,
    pub multiplier: f64,
    pub active_run_currency: u64,
    pub in_active_run: bool,
    pub collected_items: Vec<DrawResult>,
    /// Seconds left on the pending draw.
    pub draw_remaining: Option<f64>,
    /// Seconds until the next regenerated life.
    pub next_life_in: Option<f64>,
    pub last_result: Option<DrawResult>,
    /// Newest first.
    pub recent_results: Vec<DrawResult>,
}

pub struct Session<S: KeyValueStore> {
    config: EngineConfig,
    table: LootTable,
    state: SessionState,
    store: S,
    connected: bool,
    pending_draw: Option<f64>,
    regen: RegenTimer,
    last_result: Option<DrawResult>,
    recent_results: VecDeque<DrawResult>,
}

impl<S: KeyValueStore> Session<S> {
    /// Open a session against `store`, crediting lives regenerated since the
    /// last save.
    pub fn open(config: EngineConfig, store: S) -> Result<Self, ConfigError> {
        Self::open_at(config, store, Utc::now().timestamp())
    }

    /// As [`Session::open`], with an explicit current time in Unix seconds.
    pub fn open_at(config: EngineConfig, store: S, now: i64) -> Result<Self, ConfigError> {
        let table = config.build_table()?;
        let mut state = load_state(&store, config.max_lives);

        let offline = process_offline_regen(&mut state, now, config.regen_interval_secs);
        if offline.lives_restored > 0 {
            tracing::info!(
                session = %state.session_id,
                elapsed = offline.elapsed_seconds,
                restored = offline.lives_restored,
                "lives regenerated while away"
            );
        }
        let regen = RegenTimer::with_progress(config.regen_interval_secs, offline.carry_seconds);

        tracing::info!(
            session = %state.session_id,
            variant = config.variant.name(),
            banked = state.banked_currency,
            lives = state.lives,
            "session opened"
        );

        Ok(Self {
            config,
            table,
            state,
            store,
            connected: false,
            pending_draw: None,
            regen,
            last_result: None,
            recent_results: VecDeque::with_capacity(RECENT_RESULTS_CAPACITY),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn table(&self) -> &LootTable {
        &self.table
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Close the session and hand back its store.
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_draw_pending(&self) -> bool {
        self.pending_draw.is_some()
    }

    /// Wallet stub. Draws are refused until this is called.
    pub fn connect(&mut self) {
        if !self.connected {
            self.connected = true;
            tracing::info!(session = %self.state.session_id, "wallet connected");
        }
    }

    /// Begin a draw. It resolves once `draw_delay_secs` of ticks have elapsed.
    pub fn start_draw(&mut self) -> Result<(), SessionError> {
        self.check_can_draw()?;
        self.pending_draw = Some(self.config.draw_delay_secs);
        tracing::debug!(
            session = %self.state.session_id,
            delay = self.config.draw_delay_secs,
            "draw started"
        );
        Ok(())
    }

    /// Draw and apply immediately, skipping the delay.
    pub fn draw_now(
        &mut self,
        rng: &mut impl RandomSource,
    ) -> Result<(DrawResult, ApplyReport), SessionError> {
        self.check_can_draw()?;
        Ok(self.resolve_draw(rng))
    }

    /// Advance the pending draw and the regeneration timer by `dt` seconds.
    pub fn tick(&mut self, dt: f64, rng: &mut impl RandomSource) -> SessionTick {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut tick = SessionTick::default();

        tick.lives_regenerated = self.regen.tick(&mut self.state, dt);
        if tick.lives_regenerated > 0 {
            tracing::debug!(
                session = %self.state.session_id,
                restored = tick.lives_regenerated,
                lives = self.state.lives,
                "lives regenerated"
            );
        }

        if let Some(remaining) = self.pending_draw.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                tick.draw = Some(self.resolve_draw(rng));
            }
        }

        if tick.lives_regenerated > 0 && tick.draw.is_none() {
            self.persist();
        }
        tick
    }

    /// Bank the active run. Allowed while a draw is pending.
    pub fn cashout(&mut self) -> Result<u64, SessionError> {
        if !self.config.run_mechanic() {
            return Err(SessionError::RunMechanicDisabled);
        }
        let amount = logic::cashout(&mut self.state);
        if amount > 0 {
            tracing::info!(
                session = %self.state.session_id,
                amount,
                banked = self.state.banked_currency,
                "cashed out"
            );
            self.persist();
        }
        Ok(amount)
    }

    /// Purchase lives. Returns how many were actually added.
    pub fn buy_lives(&mut self, amount: u32) -> u32 {
        let was_unlimited = self.state.unlimited_lives;
        let added = logic::buy_lives(&mut self.state, amount);
        if added > 0 || self.state.unlimited_lives != was_unlimited {
            tracing::info!(
                session = %self.state.session_id,
                amount,
                added,
                unlimited = self.state.unlimited_lives,
                "lives purchased"
            );
            self.persist();
        }
        added
    }

    /// Return to a fresh state and wipe the store. The wallet stays connected.
    pub fn reset(&mut self) {
        let old_session = std::mem::take(&mut self.state.session_id);
        self.state = SessionState::new(self.config.max_lives);
        self.pending_draw = None;
        self.regen.cancel();
        self.last_result = None;
        self.recent_results.clear();
        if let Err(e) = clear_state(&mut self.store) {
            tracing::warn!(error = %e, "failed to clear saved session");
        }
        tracing::info!(
            old_session = %old_session,
            session = %self.state.session_id,
            "session reset"
        );
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            variant: self.config.variant,
            connected: self.connected,
            banked_currency: self.state.banked_currency,
            lives: self.state.lives,
            max_lives: self.state.max_lives,
            unlimited_lives: self.state.unlimited_lives,
            total_draws: self.state.total_draws,
            streak: self.state.streak,
            multiplier: self.state.multiplier(),
            active_run_currency: self.state.active_run_currency,
            in_active_run: self.state.in_active_run,
            collected_items: self.state.collected_items.clone(),
            draw_remaining: self.pending_draw.map(|r| r.max(0.0)),
            next_life_in: self.regen.seconds_until_next(&self.state),
            last_result: self.last_result.clone(),
            recent_results: self.recent_results.iter().cloned().collect(),
        }
    }

    fn check_can_draw(&self) -> Result<(), SessionError> {
        if !self.connected {
            return Err(SessionError::NotConnected);
        }
        if self.pending_draw.is_some() {
            return Err(SessionError::DrawInProgress);
        }
        Ok(())
    }

    fn resolve_draw(&mut self, rng: &mut impl RandomSource) -> (DrawResult, ApplyReport) {
        self.pending_draw = None;
        let result = draw(&self.table, rng);
        let report = logic::apply(&mut self.state, &result, self.config.run_mechanic());

        tracing::info!(
            session = %self.state.session_id,
            tier = result.tier.name(),
            currency = result.currency_awarded,
            collectible = result.collectible_name.as_deref().unwrap_or(""),
            multiplier = report.multiplier_used,
            streak = self.state.streak,
            "draw resolved"
        );
        if report.life_lost || report.run_forfeited > 0 {
            tracing::info!(
                session = %self.state.session_id,
                forfeited = report.run_forfeited,
                lives = self.state.lives,
                "hazard hit"
            );
        }

        if self.recent_results.len() == RECENT_RESULTS_CAPACITY {
            self.recent_results.pop_back();
        }
        self.recent_results.push_front(result.clone());
        self.last_result = Some(result.clone());

        self.persist();
        (result, report)
    }

    fn persist(&mut self) {
        // Anchor at the start of the running countdown so a reopen resumes it.
        let anchor = Utc::now()
            .timestamp()
            .saturating_sub(self.regen.progress().floor() as i64);
        if let Err(e) = save_state(&mut self.store, &mut self.state, anchor) {
            tracing::warn!(
                session = %self.state.session_id,
                error = %e,
                "failed to save session"
            );
        }
    }
}
