/// ─── Govclock Constants ─────────────────────────────────────────────────────
///
/// Fixed-point scale, calendar arithmetic and display fallbacks shared by the
/// curve, block-time and referenda crates.

// ── Fixed point ──────────────────────────────────────────────────────────────

/// One whole unit in perbill / FixedI64 representation (1.0 == 1_000_000_000).
pub const PERBILL_SCALE: i128 = 1_000_000_000;

/// `PERBILL_SCALE` as a float, for converting raw values to display fractions.
pub const PERBILL_SCALE_F64: f64 = 1_000_000_000.0;

// ── Calendar ─────────────────────────────────────────────────────────────────

pub const MS_PER_SECOND: u64 = 1_000;
pub const MS_PER_DAY: u64 = 86_400_000;

pub const SECS_PER_MINUTE: u64 = 60;
pub const SECS_PER_HOUR: u64 = 3_600;
pub const SECS_PER_DAY: u64 = 86_400;

pub const MINUTES_PER_HOUR: u64 = 60;
pub const MINUTES_PER_DAY: u64 = 1_440;

// ── Display fallbacks ────────────────────────────────────────────────────────

/// Durations shorter than a minute are displayed as this many minutes.
pub const MIN_DISPLAY_MINUTES: u64 = 1;

/// Block offset returned by `date_to_blocks` when the computed difference is zero.
pub const DEFAULT_FUTURE_BLOCK_OFFSET: u64 = 100;

// ── Caching ──────────────────────────────────────────────────────────────────

/// Default number of entries held by the time-conversion cache.
pub const TIME_CACHE_CAPACITY: usize = 100;

// ── Conviction voting ────────────────────────────────────────────────────────

/// Highest conviction level a voter can select (6x).
pub const MAX_CONVICTION: u8 = 6;
