//! Transfer result codes shared by the connection state machine and every
//! router strategy.

/// The outcome of a `startTransfer`/`receiveMessage` attempt.
///
/// All variants are always compiled in — router strategies in `dtn-router`
/// match on this exhaustively rather than via per-strategy feature flags.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransferResult {
    /// Accepted: the message begins (or completes) transfer.
    RcvOk,
    /// Receiver has already delivered this message id (idempotent delivery).
    DeniedOld,
    /// Rejected by a router-specific policy (e.g. Spray-and-Wait out of copies).
    DeniedPolicy,
    /// The connection already has an in-flight transfer; try again later.
    TryLaterBusy,
    /// Receiver's buffer has no room and dropping victims still isn't enough.
    DeniedNoSpace,
    /// No viable connection to the peer (used by external-event replay edges).
    DeniedUnreachable,
    /// Message TTL had already expired before the transfer could start.
    DeniedTtlExpired,
}

impl TransferResult {
    /// `true` if the transfer may proceed (the only accepting variant).
    #[inline]
    pub fn is_ok(self) -> bool {
        matches!(self, TransferResult::RcvOk)
    }

    /// `true` for denials that are local to this forwarding attempt and do
    /// not indicate any kind of invariant violation.
    #[inline]
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            TransferResult::DeniedPolicy
                | TransferResult::TryLaterBusy
                | TransferResult::DeniedNoSpace
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransferResult::RcvOk => "RCV_OK",
            TransferResult::DeniedOld => "DENIED_OLD",
            TransferResult::DeniedPolicy => "DENIED_POLICY",
            TransferResult::TryLaterBusy => "TRY_LATER_BUSY",
            TransferResult::DeniedNoSpace => "DENIED_NO_SPACE",
            TransferResult::DeniedUnreachable => "DENIED_UNREACHABLE",
            TransferResult::DeniedTtlExpired => "DENIED_TTL_EXPIRED",
        }
    }
}

impl std::fmt::Display for TransferResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
