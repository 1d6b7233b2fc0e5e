const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Formats whole seconds as `mm:ss`
pub fn format_time(seconds: u32) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{mins:02}:{secs:02}")
}

/// Spinner glyph for an animation frame counter
pub fn spinner(frame: u64) -> char {
    SPINNER[(frame % SPINNER.len() as u64) as usize]
}

/// Human readable byte size
pub fn format_bytes(bytes: usize) -> String {
    match bytes {
        b if b >= 1024 * 1024 => format!("{:.1} MiB", b as f64 / (1024.0 * 1024.0)),
        b if b >= 1024 => format!("{:.1} KiB", b as f64 / 1024.0),
        b => format!("{b} B"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(50), "00:50");
        assert_eq!(format_time(200), "03:20");
        assert_eq!(format_time(3600), "60:00");
    }

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner(0), '|');
        assert_eq!(spinner(3), '\\');
        assert_eq!(spinner(4), '|');
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(12), "12 B");
        assert_eq!(format_bytes(2048), "2.0 KiB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MiB");
    }
}
