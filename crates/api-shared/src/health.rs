use crate::wire::HealthRes;

/// Simple health service that can be used by every ASM front end
///
/// A process only starts serving once its reference data has loaded, so being able to
/// answer at all means the service is healthy.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "ASM recommendation service is alive".into(),
        }
    }
}
