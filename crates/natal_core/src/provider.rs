//! The longitude-provider contract and lazy eclipse walks built on it.

use crate::body::Body;
use crate::eclipse::{EclipseEvent, EclipseFamily};
use crate::error::ProviderError;

/// Minimum gap (days) between successive eclipse stepping calls.
///
/// Two eclipses of one family are always a lunation apart, so stepping a
/// day past the previous peak can never skip one.
const ECLIPSE_STEP_GAP_DAYS: f64 = 1.0;

/// Source of geocentric ecliptic longitudes and the few auxiliary
/// quantities the engine needs.
///
/// Implementations must be reentrant pure functions of their arguments:
/// the engine calls them from any thread and relies on identical inputs
/// producing identical outputs. All instants are UT Julian Days.
pub trait LongitudeProvider: Send + Sync {
    /// Geocentric ecliptic longitude of `body` in degrees [0, 360).
    fn longitude(&self, body: Body, jd_ut: f64) -> f64;

    /// Greenwich mean sidereal time in hours [0, 24).
    fn sidereal_time_hours(&self, jd_ut: f64) -> f64;

    /// Mean obliquity of the ecliptic in degrees.
    fn mean_obliquity_deg(&self, jd_ut: f64) -> f64;

    /// First lunar eclipse (any kind) peaking strictly after `after_jd_ut`.
    ///
    /// `Err(OutOfRange)` when the search would leave the supported range.
    /// Providers without an eclipse search report `Ok(None)`.
    fn next_lunar_eclipse(&self, after_jd_ut: f64) -> Result<Option<EclipseEvent>, ProviderError> {
        let _ = after_jd_ut;
        Ok(None)
    }

    /// First global solar eclipse peaking strictly after `after_jd_ut`.
    fn next_solar_eclipse(&self, after_jd_ut: f64) -> Result<Option<EclipseEvent>, ProviderError> {
        let _ = after_jd_ut;
        Ok(None)
    }
}

/// Lazy walk over successive eclipses of one family.
///
/// Yields `Ok(event)` in chronological order. A provider error is yielded
/// once and ends the walk; `Ok(None)` from the provider ends it silently.
/// The walk is unbounded: callers stop consuming when peaks pass their
/// window end.
pub struct EclipseIter<'a, P: ?Sized> {
    provider: &'a P,
    family: EclipseFamily,
    cursor_jd: f64,
    finished: bool,
}

impl<'a, P: LongitudeProvider + ?Sized> EclipseIter<'a, P> {
    pub fn new(provider: &'a P, family: EclipseFamily, from_jd_ut: f64) -> Self {
        Self {
            provider,
            family,
            cursor_jd: from_jd_ut,
            finished: false,
        }
    }
}

impl<P: LongitudeProvider + ?Sized> Iterator for EclipseIter<'_, P> {
    type Item = Result<EclipseEvent, ProviderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let step = match self.family {
            EclipseFamily::Lunar => self.provider.next_lunar_eclipse(self.cursor_jd),
            EclipseFamily::Solar => self.provider.next_solar_eclipse(self.cursor_jd),
        };
        match step {
            Ok(Some(event)) => {
                self.cursor_jd = event.peak_jd_ut.max(self.cursor_jd) + ECLIPSE_STEP_GAP_DAYS;
                Some(Ok(event))
            }
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Lunar eclipses peaking after `from_jd_ut`, lazily.
pub fn lunar_eclipses_from<P: LongitudeProvider + ?Sized>(
    provider: &P,
    from_jd_ut: f64,
) -> EclipseIter<'_, P> {
    EclipseIter::new(provider, EclipseFamily::Lunar, from_jd_ut)
}

/// Global solar eclipses peaking after `from_jd_ut`, lazily.
pub fn solar_eclipses_from<P: LongitudeProvider + ?Sized>(
    provider: &P,
    from_jd_ut: f64,
) -> EclipseIter<'_, P> {
    EclipseIter::new(provider, EclipseFamily::Solar, from_jd_ut)
}
