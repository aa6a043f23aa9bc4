//! Zero-offset calibration
//!
//! Drives the device's own offset registers so that, lying flat, it reports
//! `(0, 0, scale)` where `scale` is the one-g reading of the configured
//! sensitivity. The written offsets are not kept by the driver.

use embedded_hal::blocking::delay::DelayMs;

use accelerometer::vector::I16x3;

use crate::bus::TwoWire;
use crate::conf::CalibrationConfig;
use crate::error::Error;
use crate::Mma7455;

/// Outcome of a calibration run. Failures never stop the run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CalibrationReport {
    /// Offset writes attempted
    pub iterations: u8,
    pub read_failures: u8,
    pub write_failures: u8,
    pub last_error: Option<Error>,
}

impl CalibrationReport {
    /// Every read and write of the run succeeded
    pub fn is_clean(&self) -> bool {
        self.read_failures == 0 && self.write_failures == 0
    }
}

/// Offsets that move `sample` to `(0, 0, target_z)`.
/// The device applies written offsets at half the output scale.
pub fn offsets_for(sample: I16x3, target_z: u8) -> (i16, i16, i16) {
    let x = -2 * i32::from(sample.x);
    let y = -2 * i32::from(sample.y);
    let z = -2 * (i32::from(sample.z) - i32::from(target_z));
    (x as i16, y as i16, z as i16)
}

impl<BUS> Mma7455<BUS>
where
    BUS: TwoWire,
{
    /// Runs the calibration with the default three passes, 200 ms apart
    pub fn calibrate<D: DelayMs<u16>>(&mut self, delay: &mut D) -> CalibrationReport {
        self.calibrate_with(CalibrationConfig::default(), delay)
    }

    /// Runs `config.iterations` passes of read orientation, write offsets,
    /// wait. A failed read reuses the last good sample (zero before any).
    pub fn calibrate_with<D: DelayMs<u16>>(
        &mut self,
        config: CalibrationConfig,
        delay: &mut D,
    ) -> CalibrationReport {
        let target = self.get_sensitivity();
        let mut report = CalibrationReport::default();
        let mut sample = I16x3::new(0, 0, 0);

        for pass in 0..config.iterations {
            match self.orientation() {
                Ok(s) => sample = s,
                Err(e) => {
                    log::warn!("calibration pass {}: orientation read failed: {}", pass, e);
                    report.read_failures += 1;
                    report.last_error = Some(e);
                }
            }

            let (x, y, z) = offsets_for(sample, target);
            log::debug!("calibration pass {}: offsets ({}, {}, {})", pass, x, y, z);
            if let Err(e) = self.write_offsets(x, y, z) {
                log::warn!("calibration pass {}: offset write failed: {}", pass, e);
                report.write_failures += 1;
                report.last_error = Some(e);
            }
            report.iterations += 1;

            delay.delay_ms(config.interval_ms);
        }

        log::info!("calibration finished: {:?}", report);
        self.calibration = report;
        report
    }

    /// Report of the most recent calibration run
    pub fn calibration_report(&self) -> CalibrationReport {
        self.calibration
    }
}
