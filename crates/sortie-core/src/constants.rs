//! Simulation constants and tuning parameters.
//!
//! All times are epoch milliseconds unless noted; durations drawn in
//! simulated minutes are converted with `MINUTE_MS`.

/// Milliseconds per simulated minute.
pub const MINUTE_MS: u64 = 60 * 1000;

// --- Economy ---

/// Points spent to request a new mission from command.
pub const MISSION_GEN_COST: u32 = 2;

/// Points to recruit a new pilot.
pub const RECRUIT_PILOT_COST: u32 = 10;

/// Points to purchase a new aircraft.
pub const BUY_AIRCRAFT_COST: u32 = 18;

/// Hiring costs per crew trade.
pub const HIRE_FUELER_COST: u32 = 12;
pub const HIRE_MECHANIC_COST: u32 = 14;
pub const HIRE_ARMORER_COST: u32 = 12;

// --- Launch minimums ---

/// Minimum fuel to be launch-eligible.
pub const MIN_FUEL_TO_LAUNCH: i32 = 15;

/// Minimum ammunition to be launch-eligible.
pub const MIN_AMMO_TO_LAUNCH: i32 = 10;

/// Minimum airframe condition to be launch-eligible.
pub const MIN_COND_TO_LAUNCH: i32 = 25;

/// A pilot at or above this fatigue cannot launch.
pub const FATIGUE_LAUNCH_LIMIT: f64 = 85.0;

// --- Fatigue recovery (points per simulated minute) ---

/// Recovery rate while on an active mission.
pub const FATIGUE_RECOVERY_MISSION: f64 = 0.25;

/// Recovery rate while idle on the ground.
pub const FATIGUE_RECOVERY_IDLE: f64 = 0.6;

/// Recovery rate while resting. Dominates the other two.
pub const FATIGUE_RECOVERY_RESTING: f64 = 1.8;

/// Flat fatigue added to a pilot rescued from a lost aircraft.
pub const RESCUE_FATIGUE_PENALTY: f64 = 20.0;

// --- Rest ---

/// Rest duration bounds in simulated minutes.
pub const REST_MIN_MINS: u32 = 2;
pub const REST_MAX_MINS: u32 = 10;

// --- Missions ---

/// Squadron ids. Squadron 0 is the unassigned pool.
pub const SQUAD_IDS: [u8; 5] = [0, 1, 2, 3, 4];

/// Possible required aircraft counts, drawn uniformly at generation.
pub const REQUIRED_PLANES_CHOICES: [usize; 3] = [3, 4, 5];

/// Reward multiplier lost per aircraft that fails to return.
pub const LOSS_REWARD_PENALTY: f64 = 0.20;

// --- History / log bounds ---

/// Maximum retained mission reports (newest first).
pub const MISSION_HISTORY_CAP: usize = 50;

/// Maximum retained log entries (newest first).
pub const LOG_CAP: usize = 200;

// --- Persistence ---

/// Autosave boundary: one trigger per this many milliseconds of sim time.
pub const AUTOSAVE_INTERVAL_MS: u64 = 10_000;

/// Save format version. Payloads with a different version are discarded.
pub const SAVE_VERSION: &str = "1.0";
