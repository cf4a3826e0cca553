// Constants module - centralized default values for configuration
//
// Defaults that appear both in configuration and in the signing code live
// here so the two cannot drift apart.

// =============================================================================
// Signing defaults
// =============================================================================

/// Default validity window for webhook notifications (2 hours)
pub const DEFAULT_NOTIFICATION_VALID_FOR_SECS: u64 = 7200;

/// Characters kept from a SHA-1 URL signature
pub const SHORT_URL_SIGNATURE_LEN: usize = 8;

/// Characters kept from a SHA-256 URL signature
pub const LONG_URL_SIGNATURE_LEN: usize = 32;

// =============================================================================
// Delivery defaults
// =============================================================================

/// Version segment forced onto public ids that contain a folder
pub const DEFAULT_FORCED_VERSION: u64 = 1;

/// Default resource type for delivery paths
pub const DEFAULT_RESOURCE_TYPE: &str = "image";

/// Default delivery type for delivery paths
pub const DEFAULT_DELIVERY_TYPE: &str = "upload";

// =============================================================================
// Responsive defaults
// =============================================================================

/// Upper bound on the number of widths generated by auto breakpoints
pub const MAX_AUTO_BREAKPOINT_IMAGES: u32 = 100;
