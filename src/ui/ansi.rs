// ANSI styling for terminal output.

/// ESC as a byte, for stripping sequences when measuring width.
pub const ESC_BYTE: u8 = 0x1B;

#[macro_export]
macro_rules! csi {
    ($suffix:literal) => {
        concat!("\x1B[", $suffix)
    };
}

pub const STYLE_RESET: &str = crate::csi!("0m");
pub const STYLE_BOLD: &str = crate::csi!("1m");
/// Dimmed text for days that can no longer be booked.
pub const STYLE_DIM: &str = crate::csi!("2m");
pub const FG_RED: &str = crate::csi!("31m");
pub const FG_GREEN: &str = crate::csi!("32m");

/// Wrap `s` in `style` when `enabled`, otherwise return it unchanged.
pub fn paint(s: &str, style: &str, enabled: bool) -> String {
    if enabled {
        format!("{style}{s}{STYLE_RESET}")
    } else {
        s.to_string()
    }
}
