//! HTTP client and session handling for the FM admin console
//!
//! [`ApiClient`] is the single gateway to the remote API; [`Session`] owns the
//! credential token it attaches; [`UnseenBookingsPoller`] keeps a best-effort
//! count of new booking inquiries.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api_client;
pub mod error;
pub mod poller;
pub mod resources;
pub mod session;

pub use api_client::ApiClient;
pub use error::{ClientError, ClientResult};
pub use poller::{PollerHandle, UnseenBookingsPoller};
pub use resources::ImageUpload;
pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionState, Token, TokenStore};
