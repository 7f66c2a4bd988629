//! File name and size helpers used when labelling tree entries.

/// Unit base for [`file_size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeBase {
    /// 1 KB = 1000 bytes.
    #[default]
    Decimal,
    /// 1 KB = 1024 bytes.
    Binary,
}

impl SizeBase {
    fn divisor(&self) -> u64 {
        match self {
            SizeBase::Decimal => 1000,
            SizeBase::Binary => 1024,
        }
    }
}

const SIZE_UNITS: &[&str] = &["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Human readable size, rounded to two decimals with trailing zeros dropped.
///
/// `file_size(1024, SizeBase::Decimal)` is `"1.02 KB"`,
/// `file_size(1024, SizeBase::Binary)` is `"1 KB"`.
pub fn file_size(bytes: u64, base: SizeBase) -> String {
    if bytes == 0 {
        return "0 Byte".to_string();
    }

    let divisor = base.divisor();
    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < SIZE_UNITS.len() {
        match scale.checked_mul(divisor) {
            Some(next) if next <= bytes => {
                scale = next;
                unit += 1;
            }
            _ => break,
        }
    }

    let value = format!("{:.2}", bytes as f64 / scale as f64);
    let value = value.trim_end_matches('0').trim_end_matches('.');
    format!("{value} {}", SIZE_UNITS[unit])
}

/// Split a file name into stem and extension at the last dot.
///
/// `"my.file.txt"` gives `("my.file", "txt")`; names without a dot have an
/// empty extension.
pub fn file_name_parts(file_name: &str) -> (&str, &str) {
    file_name.rsplit_once('.').unwrap_or((file_name, ""))
}

/// Shorten `file_name` to about `max_len` characters, eliding the middle
/// of the stem and keeping the extension.
pub fn truncate_file_name(file_name: &str, max_len: usize) -> String {
    if file_name.chars().count() <= max_len {
        return file_name.to_string();
    }

    let (stem, ext) = file_name_parts(file_name);
    if ext.is_empty() {
        let kept: String = file_name.chars().take(max_len.saturating_sub(3)).collect();
        return format!("{kept}...");
    }

    let keep = max_len.saturating_sub(ext.chars().count() + 4);
    let kept: String = stem.chars().take(keep).collect();
    format!("{kept}...{ext}")
}
