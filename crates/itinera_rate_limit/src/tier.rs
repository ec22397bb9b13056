//! Tier trait for representing API rate limit constraints.

/// Rate limiting constraints of an API tier.
///
/// All methods return `Option` where `None` means unlimited.
///
/// # Example
///
/// ```
/// use itinera_rate_limit::Tier;
///
/// struct FreeTier;
///
/// impl Tier for FreeTier {
///     fn rpm(&self) -> Option<u32> { Some(3) }
///     fn rpd(&self) -> Option<u32> { Some(200) }
///     fn name(&self) -> &str { "Free" }
/// }
///
/// assert_eq!(FreeTier.rpm(), Some(3));
/// ```
pub trait Tier: Send + Sync {
    /// Requests per minute limit.
    fn rpm(&self) -> Option<u32>;

    /// Requests per day limit.
    fn rpd(&self) -> Option<u32>;

    /// Name of the tier (e.g., "Free", "Tier 1").
    fn name(&self) -> &str;
}
