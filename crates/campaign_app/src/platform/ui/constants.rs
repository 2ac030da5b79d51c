//! Option lists the generator form cycles through. These mirror the
//! catalog the backend was trained against; free-form entry is not
//! supported in the terminal shell.

pub(crate) const COURSES: [&str; 4] = ["AI/ML", "Data Science", "Generative AI", "MSc Finance"];

pub(crate) const CITIES: [&str; 8] = [
    "Bangalore",
    "Mumbai",
    "Delhi NCR",
    "Hyderabad",
    "Chennai",
    "Pune",
    "Kolkata",
    "Ahmedabad",
];

pub(crate) const CAMPAIGN_TYPES: [&str; 4] = ["email", "content", "Social Media", "Display Ads"];

/// "basic" skips the localization pass server-side; the other tiers
/// request increasingly regional copy.
pub(crate) const LOCALIZATION_TIERS: [&str; 3] = ["basic", "regional", "hyperlocal"];
