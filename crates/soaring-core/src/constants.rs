//! Simulation constants and tuning parameters.

// --- Airframe ---

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.81;

/// Reference airspeed for every glider (km/h).
pub const GLIDER_SPEED_KMH: f64 = 90.0;

/// Maximum roll rate of the bank actuator (degrees per second).
pub const MAX_BANK_RATE_DEG_PER_SEC: f64 = 20.0;

/// Largest bank angle the glider will fly (degrees). Keeps tan() finite.
pub const MAX_BANK_ANGLE_DEG: f64 = 89.0;

/// Height every glider starts (and resets) at, in meters.
pub const INITIAL_HEIGHT: f64 = 500.0;

// --- Trace ---

/// Simulated seconds between two trace samples.
pub const TRACE_SAMPLE_INTERVAL_SECS: f64 = 0.2;

/// Maximum number of trace samples kept per glider.
pub const MAX_TRACE_POINTS: usize = 500;

// --- Variometer ---

/// Number of slots in the variometer sample ring.
pub const VARIO_BUFFER_CAPACITY: usize = 200;

/// Samples closer together than this are coalesced into one slot (seconds).
pub const VARIO_COALESCE_INTERVAL_SECS: f64 = 0.1;

// --- Controllers ---

/// Trend window used by the windowed controllers (seconds).
pub const DEFAULT_TREND_WINDOW_SECS: f64 = 1.0;

/// Symmetric dead band on lift change rate (m/s²) separating neutral from a trend.
pub const DEFAULT_TREND_THRESHOLD: f64 = 0.05;

/// Tighter dead band used by the single-direction reactive controllers.
pub const REACTIVE_TREND_THRESHOLD: f64 = 0.025;

/// How long the delay-hold controller keeps banking after the trend reverses.
pub const DELAY_HOLD_SECS: f64 = 2.0;

/// Instrument lag assumed by the lag-compensating controller (seconds).
pub const ASSUMED_VARIO_LAG_SECS: f64 = 3.0;

/// Degrees of turn to hold at the gentle bank once a peak has been passed.
pub const BANK_DURATION_HEADING_DEG: f64 = 45.0;

/// Neutral (steady circling) bank angle in degrees.
pub const NEUTRAL_BANK_DEG: f64 = 45.0;

/// Gentle bank used to widen the circle towards the core.
pub const FALLING_BANK_DEG: f64 = 30.0;

/// Steep bank used by the reactive controllers when turning.
pub const STEEP_BANK_DEG: f64 = 60.0;

/// Moderate bank used by the reactive controllers when not turning.
pub const SHALLOW_BANK_DEG: f64 = 40.0;

// --- Driver ---

/// Largest wall-clock delta a frame clock hands to the simulation (seconds).
pub const MAX_FRAME_DELTA_SECS: f64 = 0.1;

// --- Presets ---

/// Thermal used by the built-in scenarios: center, max lift (m/s), radius (m).
pub const PRESET_THERMAL_X: f64 = 300.0;
pub const PRESET_THERMAL_Y: f64 = 300.0;
pub const PRESET_THERMAL_MAX_LIFT: f64 = 5.0;
pub const PRESET_THERMAL_RADIUS: f64 = 250.0;

/// World extent of the built-in scenarios (meters).
pub const PRESET_WORLD_WIDTH: f64 = 600.0;
pub const PRESET_WORLD_HEIGHT: f64 = 800.0;

/// Time acceleration of the built-in scenarios.
pub const PRESET_TIME_ACCELERATION: f64 = 2.0;
