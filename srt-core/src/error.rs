//! Protocol-boundary error taxonomy
//!
//! The core primitives themselves signal failure in-band, but the protocol
//! machinery around them speaks a major/minor error code pair plus the
//! connection-rejection reasons exchanged during setup. Both enumerations
//! live here so every layer agrees on the numbering.

use std::fmt;
use thiserror::Error;

/// Major error categories; the thousands digit of the numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeMajor {
    Success = 0,
    Setup = 1,
    Connection = 2,
    SystemResource = 3,
    FileSystem = 4,
    NotSupported = 5,
    TryAgain = 6,
    PeerError = 7,
}

/// Errors surfaced at the boundary between the core and the protocol.
///
/// Each variant carries a fixed `(major, minor)` pair; the numeric code is
/// `major * 1000 + minor`. OS-level failures keep the originating
/// `io::Error` as their source.
#[derive(Debug, Error)]
pub enum SrtError {
    #[error("connection setup failure: connection time out")]
    SetupTimeout,

    #[error("connection setup failure: connection rejected")]
    SetupRejected,

    #[error("connection setup failure: unable to create/configure SRT socket")]
    SetupResources,

    #[error("connection was broken")]
    ConnectionLost,

    #[error("connection does not exist")]
    NoConnection,

    #[error("system resource failure: unable to create new threads ({0})")]
    ThreadResource(#[source] std::io::Error),

    #[error("system resource failure: unable to allocate buffers")]
    MemoryResource,

    #[error("operation not supported")]
    NotSupported,

    #[error("non-blocking call failure: no buffer available for sending")]
    SendUnavailable,

    #[error("non-blocking call failure: no data available for reading")]
    RecvUnavailable,

    #[error("non-blocking call failure: transmission timed out")]
    TransmissionTimeout,

    #[error("the peer side has signalled an error")]
    Peer,
}

impl SrtError {
    /// The major category of this error.
    pub fn major(&self) -> CodeMajor {
        use SrtError::*;
        match self {
            SetupTimeout | SetupRejected | SetupResources => CodeMajor::Setup,
            ConnectionLost | NoConnection => CodeMajor::Connection,
            ThreadResource(_) | MemoryResource => CodeMajor::SystemResource,
            NotSupported => CodeMajor::NotSupported,
            SendUnavailable | RecvUnavailable | TransmissionTimeout => CodeMajor::TryAgain,
            Peer => CodeMajor::PeerError,
        }
    }

    /// The minor code within the major category.
    pub fn minor(&self) -> i32 {
        use SrtError::*;
        match self {
            SetupTimeout => 1,
            SetupRejected => 2,
            SetupResources => 3,
            ConnectionLost => 1,
            NoConnection => 2,
            ThreadResource(_) => 1,
            MemoryResource => 2,
            NotSupported => 0,
            SendUnavailable => 1,
            RecvUnavailable => 2,
            TransmissionTimeout => 3,
            Peer => 0,
        }
    }

    /// Numeric error code: `major * 1000 + minor`.
    pub fn code(&self) -> i32 {
        self.major() as i32 * 1000 + self.minor()
    }
}

/// Why a connection attempt was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Unknown = 0,
    System,
    Peer,
    Resource,
    Rogue,
    Backlog,
    Internal,
    Closed,
    Version,
    RdvCookie,
    BadSecret,
    Unsecure,
    MessageApi,
    Congestion,
    Filter,
    Group,
}

impl RejectReason {
    /// Human-readable description of the rejection.
    pub fn message(self) -> &'static str {
        use RejectReason::*;
        match self {
            Unknown => "Unknown or erroneous",
            System => "Error in system calls",
            Peer => "Peer rejected connection",
            Resource => "Resource allocation failure",
            Rogue => "Rogue peer or incorrect parameters",
            Backlog => "Listener's backlog exceeded",
            Internal => "Internal Program Error",
            Closed => "Socket is being closed",
            Version => "Peer version too old",
            RdvCookie => "Rendezvous-mode cookie collision",
            BadSecret => "Incorrect passphrase",
            Unsecure => "Password required or unexpected",
            MessageApi => "MessageAPI/StreamAPI collision",
            Congestion => "Congestion controller type collision",
            Filter => "Packet Filter type collision",
            Group => "Group settings collision",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
