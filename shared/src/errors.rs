use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidParameters = 4,

    // Agreement errors
    AgreementNotFound = 5,
    DuplicateAgreement = 6,
    InvalidState = 7,
    TooEarly = 8,

    // Investor ledger errors
    InvestorNotFound = 9,
    DuplicateInvestor = 10,
    AllocationOverflow = 11,
    AmountMismatch = 12,
    AlreadyPaid = 13,
    NothingToWithdraw = 14,

    // Custody errors
    InsufficientFunds = 15,

    // Finalization errors
    IncompleteAllocation = 16,
}
