//! 可见性观察封装模块
//!
//! 封装 `IntersectionObserver`，用于无限滚动的哨兵元素。
//! 当 `VisibilityObserver` 被 drop 时自动断开观察。

use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

pub struct VisibilityObserver {
    observer: IntersectionObserver,
    #[allow(dead_code)]
    closure: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl VisibilityObserver {
    /// 观察 `target`，可见比例达到 `threshold` 时调用 `on_visible`
    ///
    /// 创建观察者后浏览器会立即回调一次当前状态，因此哨兵初始就可见时也会触发。
    /// 浏览器不支持或创建失败时返回 `None`。
    pub fn new<F>(target: &Element, threshold: f64, on_visible: F) -> Option<Self>
    where
        F: Fn() + 'static,
    {
        let closure = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let visible = entries.iter().any(|entry| {
                    entry
                        .unchecked_into::<IntersectionObserverEntry>()
                        .is_intersecting()
                });
                if visible {
                    on_visible();
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));

        let observer =
            match IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &options) {
                Ok(observer) => observer,
                Err(e) => {
                    log::warn!("[Observer] IntersectionObserver unavailable: {:?}", e);
                    return None;
                }
            };
        observer.observe(target);

        Some(Self { observer, closure })
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.disconnect();
    }
}
