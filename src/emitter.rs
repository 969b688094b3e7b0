//! Pulse emission - the hardware-facing step/direction/enable interface.
//!
//! The ramp core only requires [`PulseEmitter::step`] to be synchronous and
//! take bounded, known time (the minimum pulse width). Pulse time is not
//! part of the ramp timing budget.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Capability set consumed by the scheduler.
pub trait PulseEmitter {
    /// Error produced by a failed pin operation.
    ///
    /// Use [`core::convert::Infallible`] if emission can never fail.
    type Error;

    /// Produce one electrical pulse of at least the driver-specified
    /// minimum width on the step line.
    fn step(&mut self) -> Result<(), Self::Error>;

    /// Set the direction line (`true` = forward).
    fn set_direction(&mut self, forward: bool) -> Result<(), Self::Error>;

    /// Energize the driver.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// De-energize the driver.
    fn disable(&mut self) -> Result<(), Self::Error>;
}

/// STEP/DIR/EN emitter over embedded-hal 1.0 pins.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `EN`: optional enable pin type, treated as active-low
/// - `DELAY`: delay provider for the pulse width (must implement `DelayNs`)
pub struct GpioPulseEmitter<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    /// STEP pin (pulse to move one microstep).
    step_pin: STEP,

    /// DIR pin (high = forward, low = reverse, or inverted).
    dir_pin: DIR,

    /// Optional active-low enable pin.
    enable_pin: Option<EN>,

    /// Delay provider for the pulse width.
    delay: DELAY,

    /// Minimum pulse width on the step line, in nanoseconds.
    min_pulse_width_ns: u32,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,
}

/// Error produced by a failed GPIO operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinError;

impl<STEP, DIR, EN, DELAY> GpioPulseEmitter<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    /// Create an emitter from pins and the driver's minimum pulse width.
    ///
    /// Most driver ICs (A4988, DRV8825, TMC2209) need 1-2 µs; check the
    /// datasheet.
    pub fn new(step_pin: STEP, dir_pin: DIR, delay: DELAY, min_pulse_width_ns: u32) -> Self {
        Self {
            step_pin,
            dir_pin,
            enable_pin: None,
            delay,
            min_pulse_width_ns,
            invert_direction: false,
        }
    }

    /// Attach an active-low enable pin.
    #[must_use]
    pub fn with_enable_pin(mut self, pin: EN) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Invert the direction pin logic.
    #[must_use]
    pub fn with_inverted_direction(mut self) -> Self {
        self.invert_direction = true;
        self
    }

    /// The configured minimum pulse width in nanoseconds.
    #[inline]
    pub fn min_pulse_width_ns(&self) -> u32 {
        self.min_pulse_width_ns
    }

    /// Release the pins and delay provider.
    pub fn release(self) -> (STEP, DIR, Option<EN>, DELAY) {
        (self.step_pin, self.dir_pin, self.enable_pin, self.delay)
    }
}

impl<STEP, DIR, EN, DELAY> PulseEmitter for GpioPulseEmitter<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    type Error = PinError;

    fn step(&mut self) -> Result<(), PinError> {
        self.step_pin.set_high().map_err(|_| PinError)?;
        self.delay.delay_ns(self.min_pulse_width_ns);
        self.step_pin.set_low().map_err(|_| PinError)
    }

    fn set_direction(&mut self, forward: bool) -> Result<(), PinError> {
        if forward != self.invert_direction {
            self.dir_pin.set_high().map_err(|_| PinError)
        } else {
            self.dir_pin.set_low().map_err(|_| PinError)
        }
    }

    fn enable(&mut self) -> Result<(), PinError> {
        match self.enable_pin.as_mut() {
            Some(pin) => pin.set_low().map_err(|_| PinError),
            None => Ok(()),
        }
    }

    fn disable(&mut self) -> Result<(), PinError> {
        match self.enable_pin.as_mut() {
            Some(pin) => pin.set_high().map_err(|_| PinError),
            None => Ok(()),
        }
    }
}

/// An infallible emitter which calls a closure for every step.
///
/// Handy for host-side tests and simulation; direction and enable are
/// no-ops.
pub fn func_emitter<F>(step: F) -> impl PulseEmitter<Error = core::convert::Infallible>
where
    F: FnMut(),
{
    FuncEmitter { step }
}

struct FuncEmitter<F> {
    step: F,
}

impl<F> PulseEmitter for FuncEmitter<F>
where
    F: FnMut(),
{
    type Error = core::convert::Infallible;

    #[inline]
    fn step(&mut self) -> Result<(), Self::Error> {
        (self.step)();
        Ok(())
    }

    fn set_direction(&mut self, _forward: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enable(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
