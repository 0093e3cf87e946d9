//! 颜色模块

/// RGBA 颜色
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// 0xRRGGBB，不透明
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
            a: 255,
        }
    }

    /// 宿主的打包整型颜色 0xAARRGGBB
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            r: ((argb >> 16) & 0xFF) as u8,
            g: ((argb >> 8) & 0xFF) as u8,
            b: (argb & 0xFF) as u8,
            a: ((argb >> 24) & 0xFF) as u8,
        }
    }

    pub const fn to_argb(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// 解析 `#rgb` / `#rrggbb` / `#aarrggbb` 或颜色名
    pub fn parse(value: &str) -> Option<Color> {
        let value = value.trim();
        let Some(hex) = value.strip_prefix('#') else {
            return Self::named(value);
        };
        if !hex.is_ascii() {
            return None;
        }

        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Color::rgb(r, g, b))
            }
            6 => u32::from_str_radix(hex, 16).ok().map(Color::from_hex),
            8 => u32::from_str_radix(hex, 16).ok().map(Color::from_argb),
            _ => None,
        }
    }

    fn named(name: &str) -> Option<Color> {
        let color = match name.to_ascii_lowercase().as_str() {
            "white" => Self::WHITE,
            "black" => Self::BLACK,
            "red" => Self::RED,
            "green" => Self::GREEN,
            "blue" => Self::BLUE,
            "gray" | "grey" => Self::GRAY,
            "transparent" => Self::TRANSPARENT,
            _ => return None,
        };
        Some(color)
    }

    /// 按比例缩放 alpha
    pub fn with_alpha_scaled(&self, factor: u8) -> Self {
        Self {
            a: ((self.a as u32 * factor as u32) / 255) as u8,
            ..*self
        }
    }

    /// Alpha 混合 (使用整数运算优化)
    #[inline]
    pub fn blend(&self, dst: &Color) -> Color {
        if self.a == 0 { return *dst; }

        // 目标不透明（背景）是最常见的情况
        if dst.a == 255 {
            if self.a == 255 { return *self; }

            let alpha = self.a as u32;
            let inv_alpha = 255 - alpha;

            return Color {
                r: ((self.r as u32 * alpha + dst.r as u32 * inv_alpha) / 255) as u8,
                g: ((self.g as u32 * alpha + dst.g as u32 * inv_alpha) / 255) as u8,
                b: ((self.b as u32 * alpha + dst.b as u32 * inv_alpha) / 255) as u8,
                a: 255,
            };
        }

        let src_a = self.a as u32;
        let dst_a = dst.a as u32;
        let inv_src_a = 255 - src_a;

        let out_a = src_a + (dst_a * inv_src_a) / 255;
        if out_a == 0 { return Color::TRANSPARENT; }

        let dst_factor = (dst_a * inv_src_a) / 255;

        Color {
            r: ((self.r as u32 * src_a + dst.r as u32 * dst_factor) / out_a) as u8,
            g: ((self.g as u32 * src_a + dst.g as u32 * dst_factor) / out_a) as u8,
            b: ((self.b as u32 * src_a + dst.b as u32 * dst_factor) / out_a) as u8,
            a: out_a as u8,
        }
    }

    // 预定义颜色
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GRAY: Color = Color::rgb(0x88, 0x88, 0x88);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_forms() {
        assert_eq!(Color::parse("#f00"), Some(Color::RED));
        assert_eq!(Color::parse("#00FF00"), Some(Color::GREEN));
        assert_eq!(Color::parse("#800000ff"), Some(Color::new(0, 0, 255, 0x80)));
        assert_eq!(Color::parse("Blue"), Some(Color::BLUE));
        assert_eq!(Color::parse("#12"), None);
        assert_eq!(Color::parse("chartreuse"), None);
    }

    #[test]
    fn argb_packing() {
        let c = Color::from_argb(0x80FF0000);
        assert_eq!(c, Color::new(255, 0, 0, 0x80));
        assert_eq!(c.to_argb(), 0x80FF0000);
    }

    #[test]
    fn blend_over_opaque() {
        let src = Color::new(255, 0, 0, 128);
        let out = src.blend(&Color::WHITE);
        assert_eq!(out.a, 255);
        assert_eq!(out.r, 255);
        assert!(out.g > 120 && out.g < 130);
    }
}
