const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human-readable size with one decimal, e.g. `1536` -> `"1.5 KB"`.
pub fn format_size(size_bytes: u64) -> String {
    let mut size = size_bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} PB", size)
}

#[cfg(test)]
mod tests {
    use super::format_size;

    #[test]
    fn formats_each_unit() {
        assert_eq!(format_size(0), "0.0 B");
        assert_eq!(format_size(1023), "1023.0 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(1_073_741_824), "1.0 GB");
        assert_eq!(format_size(1u64 << 40), "1.0 TB");
    }

    #[test]
    fn stops_at_petabytes() {
        assert_eq!(format_size(1u64 << 50), "1.0 PB");
        assert_eq!(format_size(1u64 << 60), "1024.0 PB");
    }
}
