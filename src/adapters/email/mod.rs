//! Customer notification adapters.

mod resend_notifier;

pub use resend_notifier::{NoopNotifier, ResendNotifier};
