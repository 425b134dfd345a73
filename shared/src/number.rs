//! 数字千分位格式化

use crate::Locale;

/// 按语言插入千分位分隔符
///
/// 英语使用 `,`；西班牙语使用 `.`，且与浏览器 `Intl.NumberFormat("es")` 一致，
/// 四位数不分组（`1234`），五位数起才分组（`12.345`）。
pub fn format_count(n: u64, locale: Locale) -> String {
    let digits = n.to_string();
    let (separator, min_len) = match locale {
        Locale::En => (',', 4),
        Locale::Es => ('.', 5),
    };

    if digits.len() < min_len {
        return digits;
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
