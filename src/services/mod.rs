pub mod notifier;
pub mod validation;
