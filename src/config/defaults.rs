//! Service-wide default constants.
//!
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Server
// ============================================================================

/// Default HTTP bind address.
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8000";

/// Maximum accepted request body (bytes). A prediction request is well under 1 KiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024;

// ============================================================================
// Model
// ============================================================================

/// Default location of the model artifact, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "model/premium_model.json";

// ============================================================================
// Static Responses
// ============================================================================

pub const WELCOME_MESSAGE: &str =
    "Welcome to the Insurance Premium Prediction API. Use the /predict endpoint to get predictions.";

pub const HEALTH_MESSAGE: &str = "API is running smoothly";

// ============================================================================
// City Tiers
// ============================================================================

/// Tier-1 cities (title case).
pub const DEFAULT_TIER_1_CITIES: &[&str] = &[
    "Mumbai", "Delhi", "Bangalore", "Chennai", "Kolkata", "Hyderabad", "Pune",
];

/// Tier-2 cities (title case).
pub const DEFAULT_TIER_2_CITIES: &[&str] = &[
    "Jaipur", "Chandigarh", "Indore", "Lucknow", "Patna", "Ranchi", "Visakhapatnam",
    "Coimbatore", "Bhopal", "Nagpur", "Vadodara", "Surat", "Rajkot", "Jodhpur", "Raipur",
    "Amritsar", "Varanasi", "Agra", "Dehradun", "Mysore", "Jabalpur", "Guwahati",
    "Thiruvananthapuram", "Ludhiana", "Nashik", "Allahabad", "Udaipur", "Aurangabad",
    "Hubli", "Belgaum", "Salem", "Vijayawada", "Tiruchirappalli", "Bhavnagar", "Gwalior",
    "Dhanbad", "Bareilly", "Aligarh", "Gaya", "Kozhikode", "Warangal", "Kolhapur",
    "Bilaspur", "Jalandhar", "Noida", "Guntur", "Asansol", "Siliguri",
];
