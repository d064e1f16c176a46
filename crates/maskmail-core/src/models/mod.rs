/// Domain models
pub mod binding;
pub mod envelope;
pub mod plan;

pub use binding::Binding;
pub use envelope::ForwardEnvelope;
pub use plan::Plan;
