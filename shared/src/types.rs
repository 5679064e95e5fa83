use soroban_sdk::{contracttype, Address};

/// Token quantity, in the token contract's smallest unit.
pub type Amount = i128;

/// Lifecycle state of an agreement. Transitions are monotonic:
/// `Created -> TokensDeposited -> Completed | Cancelled`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AgreementState {
    Created,
    TokensDeposited,
    Completed,
    Cancelled,
}

/// Global platform configuration, created once per deployment.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    /// Administrator and commission receiver.
    pub owner: Address,
    /// Commission rate in basis points, [0, 10000].
    pub commission_bps: u32,
    /// Default hold duration (seconds) for agreements that do not set one.
    pub cancel_timeout: u64,
}

/// Aggregate state for one fundraising deal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Agreement {
    pub id: u64,
    pub state: AgreementState,
    /// Stablecoin asset escrowed from investors.
    pub payment_token: Address,
    /// Project-token asset escrowed from the seller.
    pub project_token: Address,
    pub token_seller: Address,
    pub company_wallet: Address,
    /// Optional payout destination; settlement falls back to
    /// `company_wallet` when unset.
    pub recipient_wallet: Option<Address>,
    pub expected_payment: Amount,
    pub expected_tokens: Amount,
    /// Sum of payment allocations registered so far.
    pub total_allocated: Amount,
    /// Sum of token entitlements registered so far.
    pub total_token_allocation: Amount,
    /// Stablecoins actually received from investors.
    pub total_deposited: Amount,
    /// Seconds after the seller deposit before cancellation is permitted.
    pub hold_duration: u64,
    /// Ledger timestamp of the seller deposit; 0 until it happens.
    pub token_deposited_at: u64,
    /// Set once the seller has reclaimed the token vault after cancellation.
    pub tokens_withdrawn: bool,
    pub investor_count: u32,
}

/// Per-investor bookkeeping record, one per (agreement, wallet) pair.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvestorEntry {
    pub agreement_id: u64,
    pub wallet: Address,
    /// Stablecoin allocation this investor owes.
    pub amount: Amount,
    /// Project-token entitlement claimable on completion.
    pub token_amount: Amount,
    pub paid: bool,
    pub withdrawn: bool,
}

/// One registration request line, as submitted by the platform owner.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvestorAllocation {
    pub wallet: Address,
    pub amount: Amount,
    pub token_amount: Amount,
}
