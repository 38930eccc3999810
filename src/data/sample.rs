//! Synthetic sample generation from a known model.
//!
//! Points sit on an even x grid; y is the model value plus seeded Gaussian
//! noise, so the same config always yields the same samples.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use tracing::info;

use crate::domain::{SampleConfig, Samples};
use crate::error::AppError;

pub fn generate_samples(config: &SampleConfig) -> Result<Samples, AppError> {
    if config.count == 0 {
        return Err(AppError::new(2, "Sample count must be > 0."));
    }
    if !(config.x_min.is_finite() && config.x_max.is_finite() && config.x_max > config.x_min) {
        return Err(AppError::new(2, "Invalid x range for sample generation."));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(2, "Noise must be finite and >= 0."));
    }
    config.model.check_coefficients(&config.coefficients)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let step = if config.count > 1 {
        (config.x_max - config.x_min) / (config.count as f64 - 1.0)
    } else {
        0.0
    };

    let mut x = Vec::with_capacity(config.count);
    let mut y = Vec::with_capacity(config.count);
    for i in 0..config.count {
        let xi = config.x_min + step * i as f64;
        let yi = config.model.evaluate(&config.coefficients, xi) + normal.sample(&mut rng);
        if !yi.is_finite() {
            return Err(AppError::new(
                3,
                format!("{} is undefined at x={xi}; adjust the x range.", config.model),
            ));
        }
        x.push(xi);
        y.push(yi);
    }

    info!(model = %config.model, n = config.count, seed = config.seed, "generated samples");
    Ok(Samples::new(x, y)?)
}
