// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 100;
pub const DRAW_DELAY_SECONDS: f64 = 3.0;
pub const LIFE_REGEN_INTERVAL_SECONDS: f64 = 30.0;

// Lives
pub const DEFAULT_MAX_LIVES: u32 = 5;
/// Purchasing this many lives switches the session to unlimited lives.
pub const UNLIMITED_LIVES: u32 = 999;
pub const SHOP_SINGLE_LIFE_MAX_QUANTITY: u32 = 10;
pub const SHOP_FULL_REFILL_MAX_QUANTITY: u32 = 5;

// Streak multiplier: 1.0 + floor(streak / BAND) * BONUS_PER_BAND
pub const STREAK_BAND: u32 = 5;
pub const STREAK_BONUS_PER_BAND_TENTHS: u64 = 1;

// Persistence keys, one per persisted SessionState field
pub const KEY_SESSION_ID: &str = "nftuklas-session-id";
pub const KEY_BANKED: &str = "nftuklas-coins";
pub const KEY_LIVES: &str = "nftuklas-lives";
pub const KEY_TOTAL_DRAWS: &str = "nftuklas-prospects";
pub const KEY_STREAK: &str = "nftuklas-streak";
pub const KEY_RUN_CURRENCY: &str = "nftuklas-run-coins";
pub const KEY_IN_RUN: &str = "nftuklas-in-run";
pub const KEY_UNLIMITED: &str = "nftuklas-unlimited";
pub const KEY_COLLECTED: &str = "nftuklas-nfts";
pub const KEY_SAVED_AT: &str = "nftuklas-saved-at";

// Save location under the home directory
pub const SAVE_DIR_NAME: &str = ".nftuklas";
pub const SESSION_FILE_NAME: &str = "session.json";
pub const LOG_DIR_NAME: &str = "logs";
pub const LOG_FILE_NAME: &str = "nftuklas.log";

// Recent results kept for display
pub const RECENT_RESULTS_CAPACITY: usize = 10;
