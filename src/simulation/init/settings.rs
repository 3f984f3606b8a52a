use crate::domain::{ConfigError, FluidConfig};

use super::perf_stats::PerfStats;
use super::FluidCore;

pub(super) fn enable_perf_metrics(core: &mut FluidCore, enabled: bool) {
    core.perf_enabled = enabled;
    if !enabled {
        core.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(core: &FluidCore) -> PerfStats {
    core.perf_stats.clone()
}

pub(super) fn set_config(core: &mut FluidCore, config: FluidConfig) -> Result<(), ConfigError> {
    if let Err(err) = config.validate() {
        tracing::warn!(%err, "rejected fluid config");
        return Err(err);
    }
    let rescale = config.sim_scale != core.config.sim_scale;
    core.config = config;
    tracing::debug!(rescale, "fluid config applied");

    if rescale {
        let (w, h) = (core.display_width, core.display_height);
        core.resize(w, h);
    }
    Ok(())
}
