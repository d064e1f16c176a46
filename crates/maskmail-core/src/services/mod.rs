/// Application services and mail transports
pub mod aliases;
pub mod config;
pub mod forwarding;
pub mod mailer;
pub mod ses;

// Re-export service types
pub use aliases::AliasService;
pub use config::{MaskmailConfig, TransportKind};
pub use forwarding::{ForwardReceipt, ForwardRequest, ForwardingService};
pub use mailer::{Mailer, MockBehavior, MockMailer, SmtpMailer};
pub use ses::SesMailer;
