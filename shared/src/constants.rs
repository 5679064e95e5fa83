/// Basis-point denominator used for the commission rate.
pub const BASIS_POINTS: u32 = 10_000;

/// Upper bound for `Settings::commission_bps`.
pub const MAX_COMMISSION_BPS: u32 = 10_000;
