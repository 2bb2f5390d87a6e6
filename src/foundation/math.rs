pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Linear blend of two channel values, rounded and clamped to `0..=255`.
pub(crate) fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
    let af = f64::from(a);
    let bf = f64::from(b);
    (af + t * (bf - af)).round().clamp(0.0, 255.0) as u8
}

pub(crate) fn unit_to_u8(x: f32) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
