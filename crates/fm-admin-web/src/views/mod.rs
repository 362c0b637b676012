//! Server-rendered markup for every screen

pub mod bookings;
pub mod dashboard;
pub mod gallery;
pub mod layout;
pub mod public;
pub mod settings;

pub use bookings::{bookings, bookings_items};
pub use dashboard::{dashboard, dashboard_summary};
pub use gallery::{gallery, gallery_items};
pub use public::{landing, login, not_found};
pub use settings::settings;
