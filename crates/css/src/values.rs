/// CSS length. Only `px` is understood; the behaviors never write anything else.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
}

impl Length {
    pub fn px(self) -> f32 {
        match self {
            Length::Px(v) => v,
        }
    }

    pub fn to_css(self) -> String {
        match self {
            Length::Px(v) if v.fract() == 0.0 => format!("{}px", v as i64),
            Length::Px(v) => format!("{v}px"),
        }
    }
}

/// CSS `display` value, limited to what page templates use for overlays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    Block,
    Inline,
    InlineBlock,
    Flex,
    Grid,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
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
}

pub fn parse_color(value: &str) -> Option<Rgba> {
    let s = value.trim().to_ascii_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        return match hex.len() {
            3 => Some(Rgba::rgb(
                channel(&hex[0..1].repeat(2))?,
                channel(&hex[1..2].repeat(2))?,
                channel(&hex[2..3].repeat(2))?,
            )),
            6 => Some(Rgba::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => None,
        };
    }

    let named = match s.as_str() {
        "black" => Rgba::rgb(0, 0, 0),
        "white" => Rgba::rgb(255, 255, 255),
        "red" => Rgba::rgb(255, 0, 0),
        "green" => Rgba::rgb(0, 128, 0),
        "blue" => Rgba::rgb(0, 0, 255),
        "gray" | "grey" => Rgba::rgb(128, 128, 128),
        "transparent" => Rgba {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        },
        _ => return None,
    };
    Some(named)
}

/// Parse `<number>px` (zero may omit the unit).
pub fn parse_length(value: &str) -> Option<Length> {
    let v = value.trim();
    if v == "0" {
        return Some(Length::Px(0.0));
    }
    let num = v.strip_suffix("px")?.trim().parse::<f32>().ok()?;
    (num.is_finite() && num >= 0.0).then_some(Length::Px(num))
}

pub fn parse_display(value: &str) -> Option<Display> {
    match value.trim().to_ascii_lowercase().as_str() {
        "block" => Some(Display::Block),
        "inline" => Some(Display::Inline),
        "inline-block" => Some(Display::InlineBlock),
        "flex" => Some(Display::Flex),
        "grid" => Some(Display::Grid),
        "none" => Some(Display::None),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_color("#38a169"), Some(Rgba::rgb(0x38, 0xa1, 0x69)));
        assert_eq!(parse_color(" #FFF "), Some(Rgba::rgb(255, 255, 255)));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#ggg"), None);
        assert_eq!(parse_color("#é"), None);
    }

    #[test]
    fn lengths_round_trip_through_css_text() {
        assert_eq!(parse_length("200px"), Some(Length::Px(200.0)));
        assert_eq!(parse_length("0"), Some(Length::Px(0.0)));
        assert_eq!(parse_length("auto"), None);
        assert_eq!(parse_length("-4px"), None);
        assert_eq!(Length::Px(200.0).to_css(), "200px");
        assert_eq!(Length::Px(212.5).to_css(), "212.5px");
    }

    #[test]
    fn display_keywords() {
        assert_eq!(parse_display("Block"), Some(Display::Block));
        assert_eq!(parse_display("none"), Some(Display::None));
        assert_eq!(parse_display("contents"), None);
    }
}
