//! Wire format of the SEN0460 data block.
//!
//! The sensor exposes one Plantower-style frame: two start markers, a
//! big-endian length field, thirteen big-endian data words and a trailing
//! 16-bit additive checksum over everything before it.

use crate::types::Measurement;

/// Total size of the data block read from register 0x00.
pub const FRAME_LEN: usize = 32;

/// Fixed sentinel bytes at the start of every frame.
pub(crate) const START_MARKERS: [u8; 2] = [0x42, 0x4D];

/// Value the length field must carry: everything after the markers and the
/// length field itself.
pub(crate) const PAYLOAD_LEN: u16 = (FRAME_LEN - 4) as u16;

const CHECKSUM_OFFSET: usize = FRAME_LEN - 2;

/// A decode failure for one received frame.
///
/// Each variant identifies which validation step rejected the bytes, so a
/// caller can tell corruption apart from a misbehaving bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// The two start markers were not `0x42 0x4D`.
    #[cfg_attr(
        feature = "thiserror",
        error("bad start markers {found:02x?}, expected [42, 4d]")
    )]
    Framing { found: [u8; 2] },
    /// The declared payload length disagrees with the frame size on the wire.
    #[cfg_attr(
        feature = "thiserror",
        error("declared payload length {declared}, expected {actual}")
    )]
    LengthMismatch { declared: u16, actual: u16 },
    /// The transmitted checksum disagrees with the sum of the frame bytes.
    #[cfg_attr(
        feature = "thiserror",
        error("checksum mismatch: received {received:#06x}, computed {computed:#06x}")
    )]
    Checksum { received: u16, computed: u16 },
}

/// Wrapping 16-bit additive sum, as transmitted by the sensor.
pub(crate) fn checksum(data: &[u8]) -> u16 {
    data.iter()
        .fold(0u16, |sum, &byte| sum.wrapping_add(byte as u16))
}

/// Validates and decodes one raw frame into typed register values.
///
/// Pure function of the received bytes: markers, then the length field, then
/// the checksum, and only then the field extraction. A frame that fails any
/// step never yields a [`Measurement`].
pub(crate) fn parse(buf: &[u8; FRAME_LEN]) -> Result<Measurement, FrameError> {
    if buf[0..2] != START_MARKERS {
        return Err(FrameError::Framing {
            found: [buf[0], buf[1]],
        });
    }

    let declared = u16::from_be_bytes([buf[2], buf[3]]);
    if declared != PAYLOAD_LEN {
        return Err(FrameError::LengthMismatch {
            declared,
            actual: PAYLOAD_LEN,
        });
    }

    let computed = checksum(&buf[..CHECKSUM_OFFSET]);
    let received = u16::from_be_bytes([buf[CHECKSUM_OFFSET], buf[CHECKSUM_OFFSET + 1]]);
    if computed != received {
        return Err(FrameError::Checksum { received, computed });
    }

    let word = |offset: usize| u16::from_be_bytes([buf[offset], buf[offset + 1]]);
    Ok(Measurement {
        pm1_0_std: word(4),
        pm2_5_std: word(6),
        pm10_std: word(8),
        pm1_0_atm: word(10),
        pm2_5_atm: word(12),
        pm10_atm: word(14),
        particles_0_3um: word(16),
        particles_0_5um: word(18),
        particles_1_0um: word(20),
        particles_2_5um: word(22),
        particles_5_0um: word(24),
        particles_10um: word(26),
        version: buf[28],
        error_code: buf[29],
    })
}

/// Builds a well-formed frame for a measurement, for use in tests.
#[cfg(test)]
pub(crate) fn encode(m: &Measurement) -> [u8; FRAME_LEN] {
    let mut buf = [0u8; FRAME_LEN];
    buf[0..2].copy_from_slice(&START_MARKERS);
    buf[2..4].copy_from_slice(&PAYLOAD_LEN.to_be_bytes());
    let words = [
        m.pm1_0_std,
        m.pm2_5_std,
        m.pm10_std,
        m.pm1_0_atm,
        m.pm2_5_atm,
        m.pm10_atm,
        m.particles_0_3um,
        m.particles_0_5um,
        m.particles_1_0um,
        m.particles_2_5um,
        m.particles_5_0um,
        m.particles_10um,
    ];
    for (i, w) in words.iter().enumerate() {
        buf[4 + 2 * i..6 + 2 * i].copy_from_slice(&w.to_be_bytes());
    }
    buf[28] = m.version;
    buf[29] = m.error_code;
    let sum = checksum(&buf[..CHECKSUM_OFFSET]);
    buf[CHECKSUM_OFFSET..].copy_from_slice(&sum.to_be_bytes());
    buf
}
