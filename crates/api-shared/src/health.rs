use crate::dto::HealthRes;

/// Health check used by monitoring and load balancers.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "PTB is alive".into(),
        }
    }
}
