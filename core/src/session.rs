// ## 📂 File: `src/session.rs`

//! session.rs
//! Per-session handshake state for the three-message exchange.
//!
//! The orchestrator owns one `HandshakeSession` per peer and drives it;
//! this module only enforces the state invariants:
//!
//! ```text
//! AwaitingMessage1 → AwaitingMessage2 → AwaitingMessage3 → Established
//!        └───────────────┴──────────────────┴──→ Aborted(reason)   (terminal)
//! ```
//!
//! Design notes:
//! - Messages are recorded in order; an out-of-order or oversized message
//!   aborts the session.
//! - `Established` requires message 3 to be recorded and a shared secret.
//! - The shared secret is zeroized on drop and on abort.
//! - Both roles walk the same states: the initiator records the messages it
//!   sends, the responder the messages it receives.

use std::fmt;
use zeroize::Zeroizing;

use crate::constants::{DIGEST_LEN, MAX_MESSAGE_LEN};
use crate::crypto::CryptoProvider;
use crate::types::CoseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Initiator,
    Responder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MessageKind {
    Message1,
    Message2,
    Message3,
}

impl MessageKind {
    fn index(self) -> usize {
        match self {
            MessageKind::Message1 => 0,
            MessageKind::Message2 => 1,
            MessageKind::Message3 => 2,
        }
    }
}

/// Why a session was aborted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    Malformed,
    SignatureInvalid,
    AuthenticationFailed,
    UnexpectedMessage(MessageKind),
    MessageTooLarge,
    Crypto,
    Local(String),
}

impl From<&CoseError> for AbortReason {
    fn from(e: &CoseError) -> Self {
        match e {
            CoseError::DecodingMalformed(_) => AbortReason::Malformed,
            CoseError::SignatureInvalid => AbortReason::SignatureInvalid,
            CoseError::AuthenticationFailed => AbortReason::AuthenticationFailed,
            CoseError::EncodingOverflow { .. } => AbortReason::MessageTooLarge,
            _ => AbortReason::Crypto,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeState {
    AwaitingMessage1,
    AwaitingMessage2,
    AwaitingMessage3,
    Established,
    Aborted(AbortReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Message arrived out of order.
    UnexpectedMessage { expected: MessageKind, got: MessageKind },

    /// Session is already `Established` or `Aborted`.
    Terminal,

    /// Message exceeds the session's size bound.
    MessageTooLarge { len: usize, max: usize },

    /// Operation needs messages that have not been recorded yet.
    NotReady(MessageKind),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::UnexpectedMessage { expected, got } =>
                write!(f, "unexpected {:?}, expected {:?}", got, expected),
            SessionError::Terminal =>
                write!(f, "session is in a terminal state"),
            SessionError::MessageTooLarge { len, max } =>
                write!(f, "message of {} bytes exceeds {}", len, max),
            SessionError::NotReady(kind) =>
                write!(f, "{:?} has not been recorded", kind),
        }
    }
}

impl std::error::Error for SessionError {}

pub struct HandshakeSession {
    role: Role,
    state: HandshakeState,
    messages: [Option<Vec<u8>>; 3],
    shared_secret: Option<Zeroizing<Vec<u8>>>,
    max_message_len: usize,
}

impl HandshakeSession {
    pub fn new(role: Role) -> Self {
        Self::with_limit(role, MAX_MESSAGE_LEN)
    }

    pub fn with_limit(role: Role, max_message_len: usize) -> Self {
        Self {
            role,
            state: HandshakeState::AwaitingMessage1,
            messages: [None, None, None],
            shared_secret: None,
            max_message_len,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> &HandshakeState {
        &self.state
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, HandshakeState::Established | HandshakeState::Aborted(_))
    }

    fn expected(&self) -> Option<MessageKind> {
        match self.state {
            HandshakeState::AwaitingMessage1 => Some(MessageKind::Message1),
            HandshakeState::AwaitingMessage2 => Some(MessageKind::Message2),
            HandshakeState::AwaitingMessage3 if self.messages[2].is_none() => {
                Some(MessageKind::Message3)
            }
            _ => None,
        }
    }

    /// Record the next message of the exchange.
    ///
    /// # Errors
    /// - `Terminal` once established or aborted.
    /// - `UnexpectedMessage` / `MessageTooLarge`; both abort the session.
    pub fn record_message(&mut self, kind: MessageKind, bytes: &[u8]) -> Result<(), SessionError> {
        if self.is_terminal() {
            return Err(SessionError::Terminal);
        }

        let expected = match self.expected() {
            Some(k) => k,
            // Message 3 already recorded, waiting for `establish`.
            None => MessageKind::Message3,
        };
        if kind != expected || self.messages[kind.index()].is_some() {
            self.abort(AbortReason::UnexpectedMessage(kind));
            return Err(SessionError::UnexpectedMessage { expected, got: kind });
        }

        if bytes.len() > self.max_message_len {
            self.abort(AbortReason::MessageTooLarge);
            return Err(SessionError::MessageTooLarge {
                len: bytes.len(),
                max: self.max_message_len,
            });
        }

        self.messages[kind.index()] = Some(bytes.to_vec());
        self.state = match kind {
            MessageKind::Message1 => HandshakeState::AwaitingMessage2,
            MessageKind::Message2 => HandshakeState::AwaitingMessage3,
            MessageKind::Message3 => HandshakeState::AwaitingMessage3,
        };
        Ok(())
    }

    pub fn message(&self, kind: MessageKind) -> Option<&[u8]> {
        self.messages[kind.index()].as_deref()
    }

    /// Chained SHA-256 over messages 1..=`upto`, in order:
    /// `h_0 = 0^32`, `h_i = SHA-256(h_{i-1} || message_i)`.
    /// Message boundaries are part of the hash. Used as the transcript
    /// binding (external AAD) for the Sign1 identity proofs.
    pub fn transcript_hash<P: CryptoProvider>(
        &self,
        provider: &P,
        upto: MessageKind,
    ) -> Result<[u8; DIGEST_LEN], SessionError> {
        let mut h = [0u8; DIGEST_LEN];
        let mut block = Vec::new();
        for kind in [MessageKind::Message1, MessageKind::Message2, MessageKind::Message3] {
            if kind > upto {
                break;
            }
            let msg = self.message(kind).ok_or(SessionError::NotReady(kind))?;
            block.clear();
            block.extend_from_slice(&h);
            block.extend_from_slice(msg);
            h = provider.sha256(&block);
        }
        Ok(h)
    }

    /// Install the derived shared secret and move to `Established`.
    pub fn establish(&mut self, shared_secret: Vec<u8>) -> Result<(), SessionError> {
        if self.is_terminal() {
            return Err(SessionError::Terminal);
        }
        if self.messages[MessageKind::Message3.index()].is_none() {
            return Err(SessionError::NotReady(MessageKind::Message3));
        }
        self.shared_secret = Some(Zeroizing::new(shared_secret));
        self.state = HandshakeState::Established;
        Ok(())
    }

    pub fn shared_secret(&self) -> Option<&[u8]> {
        self.shared_secret.as_ref().map(|s| s.as_slice())
    }

    /// Move to `Aborted(reason)`. No-op once terminal: an aborted session
    /// keeps its first reason and an established one keeps its secret.
    pub fn abort(&mut self, reason: AbortReason) {
        if self.is_terminal() {
            return;
        }
        self.shared_secret = None;
        self.state = HandshakeState::Aborted(reason);
    }

    /// Abort with the reason matching a failed COSE operation.
    pub fn abort_on(&mut self, err: &CoseError) {
        self.abort(AbortReason::from(err));
    }
}
