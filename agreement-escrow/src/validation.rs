use shared::constants::BASIS_POINTS;
use shared::errors::Error;
use shared::types::{Agreement, AgreementState, Amount};

/// Validate that an agreement is in the expected lifecycle state
pub fn require_state(agreement: &Agreement, expected: AgreementState) -> Result<(), Error> {
    if agreement.state == expected {
        Ok(())
    } else {
        Err(Error::InvalidState)
    }
}

/// Timestamp from which a partially funded agreement may be cancelled.
/// Saturates so an extreme hold duration means "never" rather than a trap.
pub fn cancel_deadline(agreement: &Agreement) -> u64 {
    agreement
        .token_deposited_at
        .saturating_add(agreement.hold_duration)
}

/// Split a payment pool into (commission, net) shares. Integer division
/// truncates toward zero; the remainder stays in the net share.
pub fn commission_split(total: Amount, commission_bps: u32) -> Result<(Amount, Amount), Error> {
    let commission = total
        .checked_mul(commission_bps as Amount)
        .ok_or(Error::InvalidParameters)?
        / BASIS_POINTS as Amount;
    Ok((commission, total - commission))
}
