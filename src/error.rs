use thiserror::Error;

/// Closed set of engine failures. Every fallible operation returns
/// `Result<T, EngineError>`; every variant maps to exactly one condition
/// described in the engine's error handling design. No operation performs
/// local recovery — a caller always sees the precise reason an operation
/// was rejected, and state is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    // ============================================================
    // Access
    // ============================================================
    #[error("caller is not an administrator")]
    NotAdministrator,
    #[error("only the market creator may act during the creator-priority window")]
    CreatorPriorityActive,

    // ============================================================
    // State
    // ============================================================
    #[error("market is not active")]
    MarketNotActive,
    #[error("market is not expired")]
    MarketNotExpired,
    #[error("market already has a proposed outcome")]
    AlreadyProposed,
    #[error("market has no proposed outcome")]
    NotProposed,
    #[error("market is not under dispute")]
    NotDisputed,
    #[error("market is already resolved")]
    AlreadyResolved,
    #[error("market is not resolved")]
    NotResolved,
    #[error("the dispute window has expired")]
    DisputeWindowExpired,
    #[error("the voting window has expired")]
    VotingWindowExpired,
    #[error("the voting window has not ended yet")]
    VotingNotEnded,
    #[error("the proposal cutoff has passed")]
    ProposalWindowClosed,
    #[error("a resolution is already in progress for this market")]
    ResolutionInProgress,
    #[error("market is one-sided and cannot be resolved by vote")]
    OneSidedMarket,
    #[error("market is not yet finalizable")]
    NotFinalizable,

    // ============================================================
    // Validation
    // ============================================================
    #[error("question text must not be empty")]
    EmptyQuestion,
    #[error("expiry must be strictly in the future")]
    InvalidExpiry,
    #[error("account must be nonzero")]
    InvalidAccount,
    #[error("parameter is out of its configured bounds")]
    ParameterOutOfBounds,
    #[error("trade amount is below the configured minimum bet")]
    BelowMinimumBet,
    #[error("posted value is insufficient to cover the required bond")]
    InsufficientBond,
    #[error("posted value is insufficient to cover the creation fee")]
    InsufficientCreationFee,

    // ============================================================
    // Economic
    // ============================================================
    #[error("slippage tolerance exceeded")]
    SlippageExceeded,
    #[error("position does not hold enough shares")]
    InsufficientShares,
    #[error("pool balance is insufficient for this payout")]
    InsufficientPoolBalance,
    #[error("nothing to claim for this position")]
    NothingToClaim,
    #[error("position has already been claimed")]
    AlreadyClaimed,
    #[error("no position exists for this account in this market")]
    NoPosition,
    #[error("position has already been emergency-refunded")]
    AlreadyEmergencyRefunded,

    // ============================================================
    // Voting
    // ============================================================
    #[error("account has already voted in this market")]
    AlreadyVoted,
    #[error("account holds no shares and cannot vote")]
    NoSharesForVoting,
    #[error("account did not vote in this market")]
    DidNotVote,
    #[error("account voted for the losing outcome")]
    VotedForLosingOutcome,
    #[error("jury fees have already been claimed for this position")]
    JuryFeesAlreadyClaimed,
    #[error("there is no jury fee pool to claim from")]
    NoJuryFeesPool,

    // ============================================================
    // Withdrawal
    // ============================================================
    #[error("nothing is pending withdrawal for this account")]
    NothingToWithdraw,

    // ============================================================
    // Administrative
    // ============================================================
    #[error("pending action not found")]
    ActionNotFound,
    #[error("pending action has expired")]
    ActionExpired,
    #[error("pending action has already been executed")]
    ActionAlreadyExecuted,
    #[error("administrator has already confirmed this action")]
    AlreadyConfirmed,
    #[error("not enough confirmations to execute this action")]
    NotEnoughConfirmations,
    #[error("invalid administrator replacement")]
    InvalidSignerReplacement,
    #[error("signer is not a current administrator")]
    SignerNotFound,
    #[error("the engine is paused")]
    EnginePaused,

    // ============================================================
    // Transport (any outbound disbursement refusal from the host)
    // ============================================================
    #[error("external transfer failed")]
    TransferFailed,

    // ============================================================
    // Arithmetic (required by the fixed-point contract in the pricing
    // kernel)
    // ============================================================
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
    #[error("arithmetic underflow")]
    ArithmeticUnderflow,
    #[error("division by zero")]
    DivisionByZero,
}
