use soroban_sdk::{symbol_short, Symbol};

pub const SETTINGS_INITIALIZED: Symbol = symbol_short!("set_init");
pub const SETTINGS_UPDATED: Symbol = symbol_short!("set_upd");

pub const AGREEMENT_CREATED: Symbol = symbol_short!("agr_new");
pub const INVESTORS_ADDED: Symbol = symbol_short!("inv_added");

pub const TOKENS_DEPOSITED: Symbol = symbol_short!("tok_dep");
pub const PAYMENT_DEPOSITED: Symbol = symbol_short!("pay_dep");

pub const AGREEMENT_COMPLETED: Symbol = symbol_short!("agr_done");
pub const AGREEMENT_CANCELLED: Symbol = symbol_short!("agr_cncl");

pub const FUNDS_REFUNDED: Symbol = symbol_short!("refunded");
pub const TOKENS_CLAIMED: Symbol = symbol_short!("tok_clm");
