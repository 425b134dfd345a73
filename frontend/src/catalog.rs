//! 目录上下文

use std::rc::Rc;

use leptos::prelude::*;
use tenpo_movies::{CatalogGateway, FeedTask, PageFeed};

use crate::web::WebHttpClient;

pub type AppCatalog = CatalogGateway<WebHttpClient>;
pub type MovieFeed = PageFeed<Rc<AppCatalog>>;

#[derive(Clone, Copy)]
pub struct CatalogContext {
    gateway: StoredValue<Rc<AppCatalog>, LocalStorage>,
}

impl CatalogContext {
    pub fn new(gateway: AppCatalog) -> Self {
        Self {
            gateway: StoredValue::new_local(Rc::new(gateway)),
        }
    }

    /// 新建一个热门电影分页控制器，并返回第 1 页的请求任务
    pub fn popular_feed(&self) -> (MovieFeed, Option<FeedTask>) {
        PageFeed::initialize(self.gateway.get_value())
    }
}

pub fn use_catalog() -> CatalogContext {
    use_context::<CatalogContext>().expect("CatalogContext should be provided")
}
