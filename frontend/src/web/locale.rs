//! 浏览器语言

/// 浏览器首选语言标签（`navigator.languages[0]`，退回 `navigator.language`）
pub fn browser_language() -> Option<String> {
    let navigator = web_sys::window()?.navigator();

    navigator
        .languages()
        .get(0)
        .as_string()
        .or_else(|| navigator.language())
        .filter(|tag| !tag.is_empty())
}
