// src/common/conversion.rs

use super::timing::MICROS_PER_CM_X100;

/// Converts an echo duration to a distance in centimeters at 20 degrees celsius.
///
/// `floor(micros * 100 / 5825)`. The intermediate is 64 bit, so every `u32`
/// input is exact.
#[inline]
pub const fn centimeters_from_micros(micros: u32) -> u32 {
    ((micros as u64 * 100) / MICROS_PER_CM_X100 as u64) as u32
}

/// Converts a distance-domain timeout to the echo duration it corresponds to.
///
/// `ceil(cm * 58.25)`, computed as `(cm * 233 + 3) / 4`. 100 cm gives 5825 us.
/// Rounding up keeps the timeout from ever being shorter than the distance it
/// stands for: `centimeters_from_micros(micros_from_centimeters(cm)) >= cm`.
/// (A `+ 2` bias, i.e. round to nearest, falls 1 us short whenever
/// `cm % 4 == 1`.) Saturates at `u32::MAX`.
#[inline]
pub const fn micros_from_centimeters(cm: u32) -> u32 {
    let micros = (cm as u64 * 233 + 3) / 4;
    if micros > u32::MAX as u64 {
        u32::MAX
    } else {
        micros as u32
    }
}

/// Duration of a completed echo pulse in microseconds.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Echo(u32);

impl Echo {
    #[inline]
    pub const fn from_micros(micros: u32) -> Self {
        Echo(micros)
    }

    #[inline]
    pub const fn micros(&self) -> u32 {
        self.0
    }

    /// Distance to the reflecting object, see [`centimeters_from_micros`].
    #[inline]
    pub const fn centimeters(&self) -> u32 {
        centimeters_from_micros(self.0)
    }
}

/// Maps a ranging result back to the classic "0 on any failure" numbers.
///
/// For call sites that only want a distance: timeouts, missing configuration
/// and I/O errors all read as 0, exactly like a zero-length echo.
pub trait Sentinel {
    fn micros_or_zero(&self) -> u32;
    fn centimeters_or_zero(&self) -> u32;
}

impl<E> Sentinel for Result<Echo, E> {
    fn micros_or_zero(&self) -> u32 {
        self.as_ref().map_or(0, Echo::micros)
    }

    fn centimeters_or_zero(&self) -> u32 {
        self.as_ref().map_or(0, Echo::centimeters)
    }
}
