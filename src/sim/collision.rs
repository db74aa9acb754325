//! Closed-form time-of-impact solving and reflection math
//!
//! Every obstacle reduces its contact condition to a scalar equation in `t`
//! (linear for walls, quadratic for circles). The helpers here pick the
//! physically meaningful root and apply the matching velocity response.

use glam::DVec2;

/// Time until contact, in tick units.
///
/// `Some(t)` is always strictly positive; `None` means the body never
/// touches the obstacle on its current trajectory.
pub type CollisionTime = Option<f64>;

/// Source of uniformly distributed floats, used for spawning only
pub trait UniformSource {
    /// A float drawn uniformly from `[min, max]`
    fn uniform(&mut self, min: f64, max: f64) -> f64;
}

impl<R: rand::Rng> UniformSource for R {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        self.random_range(min..=max)
    }
}

/// Pick the smallest candidate root that clears `eps`, then back it off by `eps`.
///
/// Roots at or below `eps` belong to contacts the body is already sitting on
/// (or has already passed) and must not re-trigger.
pub fn earliest_root(candidates: [f64; 2], eps: f64) -> CollisionTime {
    let (lo, hi) = if candidates[0] <= candidates[1] {
        (candidates[0], candidates[1])
    } else {
        (candidates[1], candidates[0])
    };

    let t = if lo > eps {
        lo
    } else if hi > eps {
        hi
    } else {
        return None;
    };

    Some(t - eps)
}

/// Time until two circles in relative motion are `combined_radius` apart.
///
/// `rel_pos` and `rel_vel` are the body's position and velocity relative to
/// the obstacle. Solves `|rel_pos + t * rel_vel| = combined_radius`.
pub fn circle_contact_time(
    rel_pos: DVec2,
    rel_vel: DVec2,
    combined_radius: f64,
    eps: f64,
) -> CollisionTime {
    let vv = rel_vel.length_squared();
    if vv == 0.0 {
        return None;
    }

    // vv * R^2 - cross(p, v)^2; negative means the paths never get within R
    let cross = rel_pos.perp_dot(rel_vel);
    let disc = vv * combined_radius * combined_radius - cross * cross;
    if disc < 0.0 {
        return None;
    }

    let sqrt_disc = disc.sqrt();
    let pv = rel_pos.dot(rel_vel);
    earliest_root([(-pv - sqrt_disc) / vv, (-pv + sqrt_disc) / vv], eps)
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: DVec2, normal: DVec2) -> DVec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Reflect velocity off a surface that is itself moving with `surface_vel`.
///
/// The along-normal component becomes `2 * surface_along - body_along`, the
/// tangential component is untouched. With a resting surface this is plain
/// [`reflect_velocity`].
#[inline]
pub fn reflect_off_moving(velocity: DVec2, surface_vel: DVec2, normal: DVec2) -> DVec2 {
    let body_along = velocity.dot(normal);
    let surface_along = surface_vel.dot(normal);
    velocity + (2.0 * surface_along - 2.0 * body_along) * normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const EPS: f64 = 1e-5;

    #[test]
    fn test_earliest_root_prefers_smaller() {
        let t = earliest_root([3.0, 1.0], EPS).unwrap();
        assert!((t - (1.0 - EPS)).abs() < 1e-12);
    }

    #[test]
    fn test_earliest_root_falls_back_to_larger() {
        let t = earliest_root([-2.0, 0.5], EPS).unwrap();
        assert!((t - (0.5 - EPS)).abs() < 1e-12);
    }

    #[test]
    fn test_earliest_root_rejects_residue() {
        // A root inside the epsilon band is a contact we are already touching
        assert_eq!(earliest_root([EPS * 0.5, -1.0], EPS), None);
        assert_eq!(earliest_root([-3.0, -1.0], EPS), None);
    }

    #[test]
    fn test_circle_contact_head_on() {
        // Body 10 units left of a circle, closing at 2 units/tick, touching at distance 4
        let t = circle_contact_time(DVec2::new(-10.0, 0.0), DVec2::new(2.0, 0.0), 4.0, EPS)
            .unwrap();
        assert!((t - (3.0 - EPS)).abs() < 1e-9);
    }

    #[test]
    fn test_circle_contact_miss() {
        // Passes 5 units above a circle with combined radius 4
        let hit = circle_contact_time(DVec2::new(-10.0, 5.0), DVec2::new(2.0, 0.0), 4.0, EPS);
        assert_eq!(hit, None);
    }

    #[test]
    fn test_circle_contact_zero_velocity() {
        let hit = circle_contact_time(DVec2::new(-10.0, 0.0), DVec2::ZERO, 4.0, EPS);
        assert_eq!(hit, None);
    }

    #[test]
    fn test_circle_contact_from_overlap_uses_exit_root() {
        // Starts at the centre of the combined circle, so the only future root is the exit
        let t = circle_contact_time(DVec2::ZERO, DVec2::new(1.0, 0.0), 4.0, EPS).unwrap();
        assert!((t - (4.0 - EPS)).abs() < 1e-9);
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let velocity = DVec2::new(100.0, 0.0);
        let normal = DVec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_reflect_off_moving_surface() {
        let normal = DVec2::new(1.0, 0.0);
        let v = reflect_off_moving(DVec2::new(-3.0, 7.0), DVec2::new(5.0, -2.0), normal);
        // along: 2*5 - (-3) = 13, tangential keeps 7
        assert!((v.x - 13.0).abs() < 1e-12);
        assert!((v.y - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_uniform_source_stays_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let x = rng.uniform(-25.0, 25.0);
            assert!((-25.0..=25.0).contains(&x));
        }
        assert_eq!(rng.uniform(3.0, 3.0), 3.0);
    }
}
