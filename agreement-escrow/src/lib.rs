#![no_std]

use shared::{
    constants::MAX_COMMISSION_BPS,
    errors::Error,
    events::*,
    types::{Agreement, AgreementState, Amount, InvestorAllocation, InvestorEntry, Settings},
};
use soroban_sdk::{contract, contractimpl, token::TokenClient, Address, Env, Map, Vec};

mod storage;
mod validation;


use storage::*;

#[contract]
pub struct AgreementEscrowContract;

#[contractimpl]
impl AgreementEscrowContract {
    /// Create the platform settings singleton
    ///
    /// # Arguments
    /// * `owner` - Platform administrator and commission receiver
    /// * `commission_bps` - Commission rate in basis points, [0, 10000]
    /// * `cancel_timeout` - Default hold duration (seconds) for agreements
    pub fn init(
        env: Env,
        owner: Address,
        commission_bps: u32,
        cancel_timeout: u64,
    ) -> Result<(), Error> {
        if has_settings(&env) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();

        if commission_bps > MAX_COMMISSION_BPS || cancel_timeout == 0 {
            return Err(Error::InvalidParameters);
        }

        let settings = Settings {
            owner: owner.clone(),
            commission_bps,
            cancel_timeout,
        };
        set_settings(&env, &settings);

        env.events().publish(
            (SETTINGS_INITIALIZED,),
            (owner, commission_bps, cancel_timeout),
        );

        Ok(())
    }

    /// Update the platform settings
    ///
    /// # Arguments
    /// * `caller` - Must be the platform owner
    pub fn update_settings(
        env: Env,
        caller: Address,
        commission_bps: u32,
        cancel_timeout: u64,
    ) -> Result<(), Error> {
        let mut settings = get_settings(&env)?;
        if settings.owner != caller {
            return Err(Error::Unauthorized);
        }
        caller.require_auth();

        if commission_bps > MAX_COMMISSION_BPS || cancel_timeout == 0 {
            return Err(Error::InvalidParameters);
        }

        settings.commission_bps = commission_bps;
        settings.cancel_timeout = cancel_timeout;
        set_settings(&env, &settings);

        env.events()
            .publish((SETTINGS_UPDATED,), (commission_bps, cancel_timeout));

        Ok(())
    }

    /// Create a new agreement in the `Created` state. No value moves.
    ///
    /// # Arguments
    /// * `id` - Caller-chosen unique agreement identifier
    /// * `payment_token` - Stablecoin asset investors deposit
    /// * `project_token` - Asset the seller deposits
    /// * `recipient_wallet` - Optional payout destination; falls back to
    ///   `company_wallet` on settlement
    /// * `hold_duration` - Cancellation grace period in seconds; `None`
    ///   inherits the settings default
    pub fn create_agreement(
        env: Env,
        id: u64,
        payment_token: Address,
        project_token: Address,
        token_seller: Address,
        company_wallet: Address,
        recipient_wallet: Option<Address>,
        expected_payment: Amount,
        expected_tokens: Amount,
        hold_duration: Option<u64>,
    ) -> Result<(), Error> {
        let settings = get_settings(&env)?;
        settings.owner.require_auth();

        if agreement_exists(&env, id) {
            return Err(Error::DuplicateAgreement);
        }
        if expected_payment <= 0 || expected_tokens <= 0 {
            return Err(Error::InvalidParameters);
        }
        let hold_duration = match hold_duration {
            Some(0) => return Err(Error::InvalidParameters),
            Some(secs) => secs,
            None => settings.cancel_timeout,
        };

        let agreement = Agreement {
            id,
            state: AgreementState::Created,
            payment_token,
            project_token,
            token_seller,
            company_wallet,
            recipient_wallet,
            expected_payment,
            expected_tokens,
            total_allocated: 0,
            total_token_allocation: 0,
            total_deposited: 0,
            hold_duration,
            token_deposited_at: 0,
            tokens_withdrawn: false,
            investor_count: 0,
        };
        set_agreement(&env, &agreement);

        env.events().publish(
            (AGREEMENT_CREATED,),
            (id, expected_payment, expected_tokens),
        );

        Ok(())
    }

    /// Register investor allocations for an agreement in `Created` state.
    ///
    /// The batch is atomic: on any failure no entry is created and the
    /// agreement totals are unchanged.
    pub fn register_investors(
        env: Env,
        id: u64,
        allocations: Vec<InvestorAllocation>,
    ) -> Result<(), Error> {
        let settings = get_settings(&env)?;
        settings.owner.require_auth();

        let mut agreement = get_agreement(&env, id)?;
        validation::require_state(&agreement, AgreementState::Created)?;

        if allocations.is_empty() {
            return Err(Error::InvalidParameters);
        }

        let mut seen: Map<Address, bool> = Map::new(&env);
        for allocation in allocations.iter() {
            if allocation.amount <= 0 || allocation.token_amount <= 0 {
                return Err(Error::InvalidParameters);
            }
            // The seller refunds through the token vault, never the
            // payment ledger.
            if allocation.wallet == agreement.token_seller {
                return Err(Error::InvalidParameters);
            }
            if seen.contains_key(allocation.wallet.clone())
                || investor_exists(&env, id, &allocation.wallet)
            {
                return Err(Error::DuplicateInvestor);
            }
            seen.set(allocation.wallet.clone(), true);

            agreement.total_allocated = agreement
                .total_allocated
                .checked_add(allocation.amount)
                .ok_or(Error::InvalidParameters)?;
            agreement.total_token_allocation = agreement
                .total_token_allocation
                .checked_add(allocation.token_amount)
                .ok_or(Error::InvalidParameters)?;

            if agreement.total_allocated > agreement.expected_payment
                || agreement.total_token_allocation > agreement.expected_tokens
            {
                return Err(Error::AllocationOverflow);
            }

            let entry = InvestorEntry {
                agreement_id: id,
                wallet: allocation.wallet.clone(),
                amount: allocation.amount,
                token_amount: allocation.token_amount,
                paid: false,
                withdrawn: false,
            };
            set_investor(&env, &entry);
            agreement.investor_count += 1;
        }

        set_agreement(&env, &agreement);

        env.events()
            .publish((INVESTORS_ADDED,), (id, allocations.len()));

        Ok(())
    }

    /// Seller deposits the full project-token quantity into escrow.
    ///
    /// Requires the investor book to be fully allocated on both sides, so
    /// every escrowed token is spoken for before value moves. Sets the
    /// cancellation clock and transitions the agreement to
    /// `TokensDeposited`.
    pub fn deposit_project_tokens(env: Env, id: u64, seller: Address) -> Result<(), Error> {
        seller.require_auth();

        let mut agreement = get_agreement(&env, id)?;
        if seller != agreement.token_seller {
            return Err(Error::Unauthorized);
        }
        validation::require_state(&agreement, AgreementState::Created)?;

        if agreement.total_allocated != agreement.expected_payment
            || agreement.total_token_allocation != agreement.expected_tokens
        {
            return Err(Error::IncompleteAllocation);
        }

        let token_client = TokenClient::new(&env, &agreement.project_token);
        if token_client.balance(&seller) < agreement.expected_tokens {
            return Err(Error::InsufficientFunds);
        }
        token_client.transfer(
            &seller,
            &env.current_contract_address(),
            &agreement.expected_tokens,
        );

        agreement.token_deposited_at = env.ledger().timestamp();
        agreement.state = AgreementState::TokensDeposited;
        set_agreement(&env, &agreement);

        env.events()
            .publish((TOKENS_DEPOSITED,), (id, agreement.expected_tokens));

        Ok(())
    }

    /// Investor deposits their exact stablecoin allocation.
    ///
    /// When the deposit brings `total_deposited` to `expected_payment`, the
    /// agreement transitions to `Completed` and settlement runs atomically in
    /// the same invocation.
    pub fn deposit_payment(
        env: Env,
        id: u64,
        investor: Address,
        amount: Amount,
    ) -> Result<(), Error> {
        investor.require_auth();

        let mut agreement = get_agreement(&env, id)?;
        validation::require_state(&agreement, AgreementState::TokensDeposited)?;

        let mut entry = get_investor(&env, id, &investor)?;
        if entry.paid {
            return Err(Error::AlreadyPaid);
        }
        if amount != entry.amount {
            return Err(Error::AmountMismatch);
        }

        let token_client = TokenClient::new(&env, &agreement.payment_token);
        if token_client.balance(&investor) < amount {
            return Err(Error::InsufficientFunds);
        }
        token_client.transfer(&investor, &env.current_contract_address(), &amount);

        entry.paid = true;
        set_investor(&env, &entry);

        agreement.total_deposited = agreement
            .total_deposited
            .checked_add(amount)
            .ok_or(Error::InvalidParameters)?;

        env.events()
            .publish((PAYMENT_DEPOSITED,), (id, investor, amount));

        if agreement.total_deposited == agreement.expected_payment {
            settle_completed(&env, &mut agreement)?;
        }

        set_agreement(&env, &agreement);

        Ok(())
    }

    /// Cancel a partially funded agreement once its deadline has elapsed.
    ///
    /// Deadline-gated state transition, callable by any party; no value
    /// moves. Subsequent withdrawals are authorized by the `Cancelled` state.
    pub fn cancel_agreement(env: Env, id: u64) -> Result<(), Error> {
        let mut agreement = get_agreement(&env, id)?;
        validation::require_state(&agreement, AgreementState::TokensDeposited)?;

        if agreement.total_deposited >= agreement.expected_payment {
            return Err(Error::InvalidState);
        }
        if env.ledger().timestamp() < validation::cancel_deadline(&agreement) {
            return Err(Error::TooEarly);
        }

        agreement.state = AgreementState::Cancelled;
        set_agreement(&env, &agreement);

        env.events()
            .publish((AGREEMENT_CANCELLED,), (id, agreement.total_deposited));

        Ok(())
    }

    /// Withdraw escrowed value from a cancelled agreement.
    ///
    /// The seller reclaims the full token vault once; a paid investor
    /// reclaims their deposited amount once. Replays fail with
    /// `NothingToWithdraw`.
    pub fn withdraw_cancelled_funds(env: Env, id: u64, caller: Address) -> Result<(), Error> {
        caller.require_auth();

        let mut agreement = get_agreement(&env, id)?;
        validation::require_state(&agreement, AgreementState::Cancelled)?;

        if caller == agreement.token_seller {
            if agreement.tokens_withdrawn {
                return Err(Error::NothingToWithdraw);
            }

            let token_client = TokenClient::new(&env, &agreement.project_token);
            token_client.transfer(
                &env.current_contract_address(),
                &caller,
                &agreement.expected_tokens,
            );

            agreement.tokens_withdrawn = true;
            set_agreement(&env, &agreement);

            env.events()
                .publish((FUNDS_REFUNDED,), (id, caller, agreement.expected_tokens));
        } else {
            let mut entry = get_investor(&env, id, &caller)?;
            if !entry.paid || entry.withdrawn {
                return Err(Error::NothingToWithdraw);
            }

            let token_client = TokenClient::new(&env, &agreement.payment_token);
            token_client.transfer(&env.current_contract_address(), &caller, &entry.amount);

            entry.withdrawn = true;
            set_investor(&env, &entry);

            env.events()
                .publish((FUNDS_REFUNDED,), (id, caller, entry.amount));
        }

        Ok(())
    }

    /// Refund several paid investors of a cancelled agreement in one call.
    ///
    /// Wallets without a refundable entry (unregistered, unpaid, or already
    /// refunded) are skipped; fails with `NothingToWithdraw` if no entry was
    /// refunded.
    pub fn withdraw_cancelled_funds_batch(
        env: Env,
        id: u64,
        wallets: Vec<Address>,
    ) -> Result<(), Error> {
        let agreement = get_agreement(&env, id)?;
        validation::require_state(&agreement, AgreementState::Cancelled)?;

        let token_client = TokenClient::new(&env, &agreement.payment_token);
        let mut refunded: u32 = 0;

        for wallet in wallets.iter() {
            let mut entry = match get_investor(&env, id, &wallet) {
                Ok(entry) => entry,
                Err(_) => continue,
            };
            if !entry.paid || entry.withdrawn {
                continue;
            }

            token_client.transfer(&env.current_contract_address(), &wallet, &entry.amount);

            entry.withdrawn = true;
            set_investor(&env, &entry);

            env.events()
                .publish((FUNDS_REFUNDED,), (id, wallet, entry.amount));
            refunded += 1;
        }

        if refunded == 0 {
            return Err(Error::NothingToWithdraw);
        }

        Ok(())
    }

    /// Claim the project-token entitlement after successful completion.
    pub fn claim_completion_tokens(env: Env, id: u64, investor: Address) -> Result<(), Error> {
        investor.require_auth();

        let agreement = get_agreement(&env, id)?;
        validation::require_state(&agreement, AgreementState::Completed)?;

        let mut entry = get_investor(&env, id, &investor)?;
        if entry.withdrawn {
            return Err(Error::NothingToWithdraw);
        }

        let token_client = TokenClient::new(&env, &agreement.project_token);
        token_client.transfer(&env.current_contract_address(), &investor, &entry.token_amount);

        entry.withdrawn = true;
        set_investor(&env, &entry);

        env.events()
            .publish((TOKENS_CLAIMED,), (id, investor, entry.token_amount));

        Ok(())
    }

    /// Pay out several investors' token entitlements in one call.
    ///
    /// Wallets without a claimable entry (unregistered or already claimed)
    /// are skipped; fails with `NothingToWithdraw` if no entry was paid out.
    pub fn claim_completion_tokens_batch(
        env: Env,
        id: u64,
        wallets: Vec<Address>,
    ) -> Result<(), Error> {
        let agreement = get_agreement(&env, id)?;
        validation::require_state(&agreement, AgreementState::Completed)?;

        let token_client = TokenClient::new(&env, &agreement.project_token);
        let mut claimed: u32 = 0;

        for wallet in wallets.iter() {
            let mut entry = match get_investor(&env, id, &wallet) {
                Ok(entry) => entry,
                Err(_) => continue,
            };
            if entry.withdrawn {
                continue;
            }

            token_client.transfer(&env.current_contract_address(), &wallet, &entry.token_amount);

            entry.withdrawn = true;
            set_investor(&env, &entry);

            env.events()
                .publish((TOKENS_CLAIMED,), (id, wallet, entry.token_amount));
            claimed += 1;
        }

        if claimed == 0 {
            return Err(Error::NothingToWithdraw);
        }

        Ok(())
    }

    /// Get the platform settings
    pub fn get_settings(env: Env) -> Result<Settings, Error> {
        get_settings(&env)
    }

    /// Get an agreement record
    pub fn get_agreement(env: Env, id: u64) -> Result<Agreement, Error> {
        get_agreement(&env, id)
    }

    /// Get an investor ledger entry
    pub fn get_investor(env: Env, id: u64, wallet: Address) -> Result<InvestorEntry, Error> {
        get_investor(&env, id, &wallet)
    }
}

/// Drain the payment vault on completion: commission to the platform owner,
/// the remainder to the configured payout destination.
fn settle_completed(env: &Env, agreement: &mut Agreement) -> Result<(), Error> {
    let settings = get_settings(env)?;
    let (commission, net) =
        validation::commission_split(agreement.expected_payment, settings.commission_bps)?;

    let token_client = TokenClient::new(env, &agreement.payment_token);
    if commission > 0 {
        token_client.transfer(&env.current_contract_address(), &settings.owner, &commission);
    }
    let payout_to = agreement
        .recipient_wallet
        .clone()
        .unwrap_or_else(|| agreement.company_wallet.clone());
    if net > 0 {
        token_client.transfer(&env.current_contract_address(), &payout_to, &net);
    }

    agreement.state = AgreementState::Completed;

    env.events()
        .publish((AGREEMENT_COMPLETED,), (agreement.id, commission, net));

    Ok(())
}
