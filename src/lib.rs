//! Ripple API client
//!
//! A blocking client for the XRP Ledger: read-only lookups against the public
//! data API and rippled node, and a sign → submit pipeline where signing is
//! delegated to a rippled `sign` endpoint.
//!
//! # Example
//!
//! ```rust,no_run
//! use ripple_api::{NodeConfig, Ripple, TransactionType};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut ripple = Ripple::new("rSource...", Some("sSecret..."), NodeConfig::default())?;
//!
//! let response = ripple
//!     .build_transaction(|tx| {
//!         tx.set_amount(0.004)
//!             .set_destination("rDestination...")
//!             .set_destination_tag(1)
//!             .set_transaction_type(TransactionType::Payment)
//!     })?
//!     .submit()?;
//!
//! println!("{}", response["result"]["engine_result"]);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod types;

pub mod client;
pub mod objects;
mod queries;
pub mod signing;
pub mod transaction;
pub mod transport;

pub mod test_utils;

// Re-export main types for convenience
pub use client::Ripple;
pub use error::{Result, RippleError};
pub use objects::{AccountObject, OneOrMany, PaymentObject, TransactionObject};
pub use signing::SigningResult;
pub use transaction::{Amount, SignRequest, TransactionRequest, TransactionType};
pub use transport::{decode_body, Api, HttpTransport, Transport};
pub use types::{Network, NodeConfig, Params};
