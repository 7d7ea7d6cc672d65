// Async services over the project store
pub mod family_service;

pub use family_service::overview::{CommentView, Dashboard, ProjectOverview};
pub use family_service::payment_link::{PaymentLink, ProviderLink};
pub use family_service::FamilyService;
