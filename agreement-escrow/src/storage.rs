use shared::errors::Error;
use shared::types::{Agreement, InvestorEntry, Settings};
use soroban_sdk::{Address, Env};

/// Storage keys for the escrow data structures
const SETTINGS_KEY: &str = "settings";
const AGREEMENT_PREFIX: &str = "agreement";
const INVESTOR_PREFIX: &str = "investor";

/// Store the platform settings singleton
pub fn set_settings(env: &Env, settings: &Settings) {
    env.storage().instance().set(&SETTINGS_KEY, settings);
}

/// Retrieve the platform settings singleton
pub fn get_settings(env: &Env) -> Result<Settings, Error> {
    env.storage()
        .instance()
        .get::<&str, Settings>(&SETTINGS_KEY)
        .ok_or(Error::NotInitialized)
}

/// Check if the settings singleton has been created
pub fn has_settings(env: &Env) -> bool {
    env.storage().instance().has(&SETTINGS_KEY)
}

/// Store an agreement record
pub fn set_agreement(env: &Env, agreement: &Agreement) {
    let key = (AGREEMENT_PREFIX, agreement.id);
    env.storage().persistent().set(&key, agreement);
}

/// Retrieve an agreement record
pub fn get_agreement(env: &Env, id: u64) -> Result<Agreement, Error> {
    let key = (AGREEMENT_PREFIX, id);
    env.storage()
        .persistent()
        .get::<(&str, u64), Agreement>(&key)
        .ok_or(Error::AgreementNotFound)
}

/// Check if an agreement exists
pub fn agreement_exists(env: &Env, id: u64) -> bool {
    let key = (AGREEMENT_PREFIX, id);
    env.storage().persistent().has(&key)
}

/// Store an investor ledger entry
pub fn set_investor(env: &Env, entry: &InvestorEntry) {
    let key = (INVESTOR_PREFIX, entry.agreement_id, entry.wallet.clone());
    env.storage().persistent().set(&key, entry);
}

/// Retrieve an investor ledger entry
pub fn get_investor(env: &Env, agreement_id: u64, wallet: &Address) -> Result<InvestorEntry, Error> {
    let key = (INVESTOR_PREFIX, agreement_id, wallet.clone());
    env.storage()
        .persistent()
        .get::<(&str, u64, Address), InvestorEntry>(&key)
        .ok_or(Error::InvestorNotFound)
}

/// Check if an investor ledger entry exists
pub fn investor_exists(env: &Env, agreement_id: u64, wallet: &Address) -> bool {
    let key = (INVESTOR_PREFIX, agreement_id, wallet.clone());
    env.storage().persistent().has(&key)
}
