use std::sync::Arc;

use colcalc_db::CalculationStore;
use colcalc_monday::AccessorFactory;

use crate::calculation::CalculationLog;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (session secret, limits).
    pub config: Arc<ServerConfig>,
    /// Mints platform accessors bound to a caller's short-lived token.
    pub accessors: Arc<dyn AccessorFactory>,
    /// Fail-soft calculation history.
    pub calculation_log: CalculationLog,
}

impl AppState {
    pub fn new(
        config: Arc<ServerConfig>,
        store: Arc<dyn CalculationStore>,
        accessors: Arc<dyn AccessorFactory>,
    ) -> Self {
        Self {
            config,
            accessors,
            calculation_log: CalculationLog::new(store),
        }
    }
}
