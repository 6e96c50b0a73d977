//! Lunar node crossing search engine.
//!
//! A node is where the Moon's geocentric ecliptic latitude passes through
//! zero. The search steps through time in fixed increments watching for a
//! sign change in latitude, then bisects the bracketing interval.

use natal_core::{Body, EphemerisProvider};

use crate::error::SearchError;
use crate::node_types::{NodeEvent, NodeKind, NodeSearchConfig, SearchDirection};

/// The Moon's geocentric ecliptic longitude and latitude in degrees.
pub fn moon_ecliptic_lon_lat<P: EphemerisProvider + ?Sized>(
    provider: &P,
    jd_tt: f64,
) -> Result<(f64, f64), SearchError> {
    let pos = provider.ecliptic_position(Body::Moon, jd_tt)?;
    Ok((pos.lon_deg, pos.lat_deg))
}

/// Sign change with zero counted as north, so a sample landing exactly on
/// the node is reported once.
fn is_crossing(f_a: f64, f_b: f64) -> bool {
    (f_a < 0.0) != (f_b < 0.0)
}

/// Bisect the latitude zero between `t_a < t_b`.
fn bisect_refinement<P: EphemerisProvider + ?Sized>(
    provider: &P,
    mut t_a: f64,
    mut f_a: f64,
    mut t_b: f64,
    f_b: f64,
    config: &NodeSearchConfig,
) -> Result<NodeEvent, SearchError> {
    let kind = if f_b > f_a {
        NodeKind::Ascending
    } else {
        NodeKind::Descending
    };

    for _ in 0..config.max_iterations {
        let t_mid = 0.5 * (t_a + t_b);
        let (_, f_mid) = moon_ecliptic_lon_lat(provider, t_mid)?;

        if f_a * f_mid <= 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            f_a = f_mid;
        }

        if (t_b - t_a).abs() < config.convergence_days {
            break;
        }
    }

    let t_final = 0.5 * (t_a + t_b);
    let (lon, _) = moon_ecliptic_lon_lat(provider, t_final)?;

    Ok(NodeEvent {
        jd_tt: t_final,
        kind,
        moon_longitude_deg: lon.rem_euclid(360.0),
    })
}

/// Scan at most `config.window_days` from `jd_start` for a crossing.
fn find_event<P: EphemerisProvider + ?Sized>(
    provider: &P,
    jd_start: f64,
    direction: SearchDirection,
    config: &NodeSearchConfig,
) -> Result<Option<NodeEvent>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;

    let step = match direction {
        SearchDirection::Forward => config.step_days,
        SearchDirection::Backward => -config.step_days,
    };

    let max_steps = (config.window_days / config.step_days).ceil() as usize;

    let (_, mut f_prev) = moon_ecliptic_lon_lat(provider, jd_start)?;
    let mut t_prev = jd_start;

    for _ in 0..max_steps {
        // The last step stops exactly at the window edge.
        let t_curr = match direction {
            SearchDirection::Forward => (t_prev + step).min(jd_start + config.window_days),
            SearchDirection::Backward => (t_prev + step).max(jd_start - config.window_days),
        };
        let (_, f_curr) = moon_ecliptic_lon_lat(provider, t_curr)?;

        if is_crossing(f_prev, f_curr) {
            // Ensure t_a < t_b for bisection
            let (t_a, f_a, t_b, f_b) = if t_prev < t_curr {
                (t_prev, f_prev, t_curr, f_curr)
            } else {
                (t_curr, f_curr, t_prev, f_prev)
            };
            let event = bisect_refinement(provider, t_a, f_a, t_b, f_b, config)?;
            log::debug!(
                "node crossing {} at JD {:.6} (lon {:.4})",
                event.kind.name(),
                event.jd_tt,
                event.moon_longitude_deg
            );
            return Ok(Some(event));
        }

        t_prev = t_curr;
        f_prev = f_curr;
    }

    log::debug!(
        "no node crossing within {} days of JD {jd_start}",
        config.window_days
    );
    Ok(None)
}

/// Find the next node crossing after `jd_tt`.
pub fn next_node_crossing<P: EphemerisProvider + ?Sized>(
    provider: &P,
    jd_tt: f64,
    config: &NodeSearchConfig,
) -> Result<Option<NodeEvent>, SearchError> {
    find_event(provider, jd_tt, SearchDirection::Forward, config)
}

/// Find the most recent node crossing before `jd_tt`.
pub fn prev_node_crossing<P: EphemerisProvider + ?Sized>(
    provider: &P,
    jd_tt: f64,
    config: &NodeSearchConfig,
) -> Result<Option<NodeEvent>, SearchError> {
    find_event(provider, jd_tt, SearchDirection::Backward, config)
}

/// Search for all node crossings in a time range.
pub fn search_node_crossings<P: EphemerisProvider + ?Sized>(
    provider: &P,
    jd_start: f64,
    jd_end: f64,
    config: &NodeSearchConfig,
) -> Result<Vec<NodeEvent>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;

    if jd_end <= jd_start {
        return Err(SearchError::InvalidConfig("jd_end must be after jd_start"));
    }

    let mut events = Vec::new();
    let step = config.step_days;

    let (_, mut f_prev) = moon_ecliptic_lon_lat(provider, jd_start)?;
    let mut t_prev = jd_start;

    loop {
        let t_curr = (t_prev + step).min(jd_end);
        let (_, f_curr) = moon_ecliptic_lon_lat(provider, t_curr)?;

        if is_crossing(f_prev, f_curr) {
            let event = bisect_refinement(provider, t_prev, f_prev, t_curr, f_curr, config)?;
            if event.jd_tt >= jd_start && event.jd_tt <= jd_end {
                events.push(event);
            }
        }

        if t_curr >= jd_end {
            break;
        }

        t_prev = t_curr;
        f_prev = f_curr;
    }

    Ok(events)
}
