//! Touch sampler
//!
//! Polled once per control-loop tick. Each tick reads the press line and
//! the clock, then decides between three outcomes:
//!
//! ```text
//! not pressed                        -> Released, pending sample dropped
//! pressed, gap > long_press_us       -> read and snap (fresh contact)
//! pressed, gap > min_flick_us        -> read and filter
//! pressed, otherwise                 -> Holding, nothing read
//! ```
//!
//! The gap is measured from the last accepted read. The first contact
//! after construction is always fresh.

use boxel_hal::Monotonic;

use crate::config::{ConfigError, TouchConfig};
use crate::geometry::Point;
use crate::traits::{RawPoint, TouchInput};

use super::filter::ExpFilter;

#[cfg(feature = "defmt")]
use defmt::{debug, warn};

/// Bits dropped from filter units to get calibration input (raw × 1024)
const CALIBRATION_SHIFT: u32 = 4;

/// Sampler state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchPhase {
    /// Screen not touched
    #[default]
    Idle,
    /// Touched, no sample waiting
    Pressed,
    /// Touched, a sample is waiting for `take_sample`
    Processing,
}

/// Outcome of one `poll` tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchStatus {
    /// A sample was read this tick
    Sampled,
    /// Pressed, but still inside the minimum flick window
    Holding,
    /// Not pressed
    Released,
}

impl TouchStatus {
    /// Numeric status code (0 sampled, 1 holding, 2 released)
    pub const fn code(self) -> i8 {
        match self {
            TouchStatus::Sampled => 0,
            TouchStatus::Holding => 1,
            TouchStatus::Released => 2,
        }
    }
}

/// Touch sampler errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError<E> {
    /// Timing or filter configuration rejected
    InvalidConfig(ConfigError),
    /// Touch controller read failed
    Bus(E),
}

impl<E> TouchError<E> {
    /// Negative status code (-2 configuration, -3 bus)
    pub const fn code(&self) -> i8 {
        match self {
            TouchError::InvalidConfig(_) => -2,
            TouchError::Bus(_) => -3,
        }
    }
}

impl<E> From<ConfigError> for TouchError<E> {
    fn from(err: ConfigError) -> Self {
        TouchError::InvalidConfig(err)
    }
}

/// One accepted touch reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    /// Last unfiltered reading
    pub raw: RawPoint,
    /// Filtered X in filter units (raw × 2^14)
    pub filtered_x: i32,
    /// Filtered Y in filter units (raw × 2^14)
    pub filtered_y: i32,
}

impl TouchSample {
    /// Filtered position in raw × 1024 units, rounded
    ///
    /// This is the input scale expected by `CalibrationMatrix::transform`.
    pub const fn calibration_input(&self) -> Point {
        let half = 1 << (CALIBRATION_SHIFT - 1);
        Point::new(
            (self.filtered_x + half) >> CALIBRATION_SHIFT,
            (self.filtered_y + half) >> CALIBRATION_SHIFT,
        )
    }
}

/// Everything the sampler remembers between ticks
#[derive(Debug, Clone, Copy)]
struct TouchState {
    raw: RawPoint,
    x: ExpFilter,
    y: ExpFilter,
    /// Time of the last accepted read; `None` until the first contact
    last_touch_us: Option<u64>,
    /// A sample was read and not yet taken
    unconsumed: bool,
    phase: TouchPhase,
}

impl TouchState {
    const fn new(beta: u8) -> Self {
        Self {
            raw: RawPoint::new(0, 0),
            x: ExpFilter::new(beta),
            y: ExpFilter::new(beta),
            last_touch_us: None,
            unconsumed: false,
            phase: TouchPhase::Idle,
        }
    }

    fn sample(&self) -> TouchSample {
        TouchSample {
            raw: self.raw,
            filtered_x: self.x.value(),
            filtered_y: self.y.value(),
        }
    }
}

/// Debounce and filter state machine over a touch controller
pub struct TouchSampler<T, C> {
    input: T,
    clock: C,
    config: TouchConfig,
    state: TouchState,
}

impl<T, C> TouchSampler<T, C>
where
    T: TouchInput,
    C: Monotonic,
{
    /// Create a sampler, rejecting an unusable configuration
    pub fn new(input: T, clock: C, config: TouchConfig) -> Result<Self, TouchError<T::Error>> {
        if let Err(err) = config.validate() {
            #[cfg(feature = "defmt")]
            warn!("touch config rejected: {}", err);
            return Err(err.into());
        }

        Ok(Self {
            input,
            clock,
            config,
            state: TouchState::new(config.beta_shift),
        })
    }

    /// Run one tick of the state machine
    pub fn poll(&mut self) -> Result<TouchStatus, TouchError<T::Error>> {
        if !self.input.is_pressed() {
            self.state.unconsumed = false;
            self.state.phase = TouchPhase::Idle;
            return Ok(TouchStatus::Released);
        }

        let now = self.clock.now_us();
        let fresh = match self.state.last_touch_us {
            None => true,
            Some(last) => {
                let elapsed = now.saturating_sub(last);
                if elapsed > u64::from(self.config.long_press_us) {
                    true
                } else if elapsed > u64::from(self.config.min_flick_us) {
                    false
                } else {
                    if !self.state.unconsumed {
                        self.state.phase = TouchPhase::Pressed;
                    }
                    return Ok(TouchStatus::Holding);
                }
            }
        };

        let raw = self.input.read_raw().map_err(TouchError::Bus)?;
        if fresh {
            self.state.x.snap(raw.x);
            self.state.y.snap(raw.y);
            #[cfg(feature = "defmt")]
            debug!("touch contact at raw {}, {}", raw.x, raw.y);
        } else {
            self.state.x.update(raw.x);
            self.state.y.update(raw.y);
        }

        self.state.raw = raw;
        self.state.last_touch_us = Some(now);
        self.state.unconsumed = true;
        self.state.phase = TouchPhase::Processing;
        Ok(TouchStatus::Sampled)
    }

    /// Take the pending sample, if any
    ///
    /// Each sample is handed out once.
    pub fn take_sample(&mut self) -> Option<TouchSample> {
        if !self.state.unconsumed {
            return None;
        }
        self.state.unconsumed = false;
        self.state.phase = TouchPhase::Pressed;
        Some(self.state.sample())
    }

    /// Whether a sample is waiting
    pub fn has_sample(&self) -> bool {
        self.state.unconsumed
    }

    /// Most recent filter state, consumed or not
    pub fn latest(&self) -> TouchSample {
        self.state.sample()
    }

    /// Current phase
    pub fn phase(&self) -> TouchPhase {
        self.state.phase
    }

    /// Active configuration
    pub fn config(&self) -> TouchConfig {
        self.config
    }

    /// Swap the configuration
    ///
    /// Filter state is reset and the next press counts as a fresh contact.
    /// On error the previous configuration stays active.
    pub fn reconfigure(&mut self, config: TouchConfig) -> Result<(), TouchError<T::Error>> {
        config.validate()?;
        self.config = config;
        self.state = TouchState::new(config.beta_shift);
        Ok(())
    }

    /// Mutable access to the touch controller
    pub fn input_mut(&mut self) -> &mut T {
        &mut self.input
    }

    /// Mutable access to the clock
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Give back the controller and clock
    pub fn release(self) -> (T, C) {
        (self.input, self.clock)
    }
}
