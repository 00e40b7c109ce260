//! Vincenty's inverse formula on the WGS-84 ellipsoid.

use std::f64::consts::PI;

use super::Coordinate;

/// WGS-84 semi-major axis in meters
pub const WGS84_A: f64 = 6_378_137.0;

/// WGS-84 flattening
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

pub const METERS_PER_STATUTE_MILE: f64 = 1609.344;

/// Iteration limit and convergence tolerance (radians) for the inverse solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vincenty {
    pub max_iterations: u32,
    pub tolerance: f64,
}

impl Default for Vincenty {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 1e-12,
        }
    }
}

impl Vincenty {
    /// Geodesic distance in meters, or `None` if the iteration does not
    /// converge (nearly antipodal points).
    pub fn distance_meters(&self, from: Coordinate, to: Coordinate) -> Option<f64> {
        let a = WGS84_A;
        let f = WGS84_F;
        let b = (1.0 - f) * a;

        // Longitude difference wrapped into [-π, π)
        let l = ((to.longitude - from.longitude).to_radians() + PI).rem_euclid(2.0 * PI) - PI;
        let u1 = ((1.0 - f) * from.latitude.to_radians().tan()).atan();
        let u2 = ((1.0 - f) * to.latitude.to_radians().tan()).atan();
        let (sin_u1, cos_u1) = u1.sin_cos();
        let (sin_u2, cos_u2) = u2.sin_cos();

        let mut lambda = l;
        for _ in 0..self.max_iterations {
            let (sin_lambda, cos_lambda) = lambda.sin_cos();
            let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
                + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
            .sqrt();
            if sin_sigma == 0.0 {
                // Coincident points
                return Some(0.0);
            }
            let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
            let sigma = sin_sigma.atan2(cos_sigma);
            let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
            let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
            // Equatorial geodesics have cos²α = 0
            let cos_2sigma_m = if cos_sq_alpha != 0.0 {
                cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
            } else {
                0.0
            };
            let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));

            let lambda_prev = lambda;
            lambda = l
                + (1.0 - c)
                    * f
                    * sin_alpha
                    * (sigma
                        + c * sin_sigma
                            * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

            if (lambda - lambda_prev).abs() > self.tolerance {
                continue;
            }

            let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
            let big_a =
                1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let delta_sigma = big_b
                * sin_sigma
                * (cos_2sigma_m
                    + big_b / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                            - big_b / 6.0
                                * cos_2sigma_m
                                * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                                * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));

            return Some(b * big_a * (sigma - delta_sigma));
        }

        None
    }

    pub fn distance_miles(&self, from: Coordinate, to: Coordinate) -> Option<f64> {
        self.distance_meters(from, to)
            .map(|meters| meters / METERS_PER_STATUTE_MILE)
    }
}
