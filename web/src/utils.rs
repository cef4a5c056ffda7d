use colortap_core::{Color, Count};

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

pub(crate) fn swatch_style(color: Color) -> String {
    format!("background-color: {}", color.hex())
}

pub(crate) fn format_countdown(time_left: Count) -> String {
    format!("Time Left: {}s", time_left)
}
