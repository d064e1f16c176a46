/// Maskmail Core - alias lifecycle and forwarding-authorization engine
///
/// This crate owns every piece of state in the Maskmail system: alias
/// generation, plan-dependent expiry, the binding store, forwarding
/// authorization and reclamation of expired bindings. The HTTP surface lives
/// in `maskmail-api`.
pub mod alias;
pub mod authorizer;
pub mod clock;
pub mod constants;
pub mod error;
pub mod models;
pub mod policy;
pub mod services;
pub mod store;
pub mod sweeper;
pub mod utils;

// Re-export commonly used types
pub use alias::AliasGenerator;
pub use authorizer::{Authorization, DenyReason, ForwardingAuthorizer};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::MaskmailError;
pub use models::{Binding, ForwardEnvelope, Plan};
pub use policy::ExpiryPolicy;
pub use store::{BindingStore, InMemoryBindingStore, Resolution};
pub use sweeper::{Sweeper, SweeperHandle};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
