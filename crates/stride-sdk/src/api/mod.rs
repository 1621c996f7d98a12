//! Endpoint groups.
//!
//! Every GET goes through the query cache under a key mirroring its path;
//! every mutation invalidates the key prefixes whose data it changes.

mod analytics;
mod auth;
mod coach;
mod goals;
mod nutrition;
mod profile;
mod segments;
mod strava;

pub use analytics::AnalyticsApi;
pub use auth::{AuthApi, Credentials, Registration};
pub use coach::CoachApi;
pub use goals::GoalsApi;
pub use nutrition::NutritionApi;
pub use profile::ProfileApi;
pub use segments::SegmentsApi;
pub use strava::StravaApi;
