mod contact;
mod health;
mod registration;

pub use contact::contact as contact_endpoint;
pub use health::health as health_endpoint;
pub use registration::registration as registration_endpoint;
