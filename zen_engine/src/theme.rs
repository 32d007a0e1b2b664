//! RGB565 palette shared by the zones and the drawing routine.

pub const BG:        u16 = 0x10A2;
pub const TEXT:      u16 = 0xFFFF;
pub const TEXT_DIM:  u16 = 0x8C71;
pub const PRIMARY:   u16 = 0x4C3F;
pub const SECONDARY: u16 = 0x9A7F;
pub const ACCENT:    u16 = 0x2E9A;
pub const WARNING:   u16 = 0xFCA0;
pub const SUCCESS:   u16 = 0x3666;
pub const HEADER_BG: u16 = 0x18E5;

/// Expand an RGB565 color to packed `0xAARRGGBB`.
pub fn rgb565_to_argb(c: u16) -> u32 {
    let r = ((c >> 11) & 0x1F) as u32;
    let g = ((c >>  5) & 0x3F) as u32;
    let b = ( c        & 0x1F) as u32;
    let r8 = (r << 3) | (r >> 2);
    let g8 = (g << 2) | (g >> 4);
    let b8 = (b << 3) | (b >> 2);
    0xFF000000 | (r8 << 16) | (g8 << 8) | b8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes_expand_fully() {
        assert_eq!(rgb565_to_argb(0x0000), 0xFF000000);
        assert_eq!(rgb565_to_argb(0xFFFF), 0xFFFFFFFF);
        assert_eq!(rgb565_to_argb(0xF800), 0xFFFF0000);
        assert_eq!(rgb565_to_argb(0x07E0), 0xFF00FF00);
    }
}
