//! CSS-style hex colors for banner fills and particles.

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

/// `#` followed by six lowercase hex digits, zero-padded.
///
/// `0x5865F2` → `"#5865f2"`, `0xFF` → `"#0000ff"`.
pub fn packed_to_hex(rgb: u32) -> String {
    format!("#{:06x}", rgb & 0x00FF_FFFF)
}

fn nibble(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`.
pub fn parse_hex_color(s: &str) -> Option<Rgba> {
    let digits = s.trim().strip_prefix('#')?.as_bytes();
    let n: Vec<u8> = digits.iter().map(|&b| nibble(b)).collect::<Option<_>>()?;

    match n.len() {
        3 | 4 => {
            let short = |i: usize| n[i] << 4 | n[i];
            Some(Rgba {
                r: short(0),
                g: short(1),
                b: short(2),
                a: if n.len() == 4 { short(3) } else { 255 },
            })
        }
        6 | 8 => {
            let byte = |i: usize| n[2 * i] << 4 | n[2 * i + 1];
            Some(Rgba {
                r: byte(0),
                g: byte(1),
                b: byte(2),
                a: if n.len() == 8 { byte(3) } else { 255 },
            })
        }
        _ => None,
    }
}
