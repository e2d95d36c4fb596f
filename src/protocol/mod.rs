//! Wire protocol subsystem.
//!
//! # Data Flow
//! ```text
//! Raw bytes from a connection
//!     → codec.rs (framing check, JSON decode)
//!     → messages.rs (Offer)
//!     → [routing layer decides the answer]
//!     → messages.rs (Answer)
//!     → codec.rs (JSON encode, REJECT fallback)
//!     → Written back on the same connection
//! ```
//!
//! # Design Decisions
//! - One request and one reply per connection
//! - Requests are self-delimiting JSON values, no length prefix
//! - A rejection carries no value at all, never a zero

pub mod codec;
pub mod messages;

pub use codec::{CodecError, FrameStatus, MAX_REQUEST_BYTES, REJECT_FRAME};
pub use messages::{Answer, AnswerCode, Offer, RequestKind};
