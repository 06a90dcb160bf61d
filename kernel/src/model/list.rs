use strum::{Display, EnumString};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 2000;
// offset を計算しても i64 に収まるページ番号の上限
pub const MAX_PAGE_NUMBER: i64 = i64::MAX / MAX_PAGE_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// 一覧取得時のページ指定。`page` は 0 始まり。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<S> {
    pub page: i64,
    pub size: i64,
    pub sort: Option<(S, SortDirection)>,
}

impl<S> PageRequest<S> {
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

impl<S> Default for PageRequest<S> {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> i64 {
        if self.size <= 0 {
            return 0;
        }
        (self.total + self.size - 1) / self.size
    }

    // 2 ページ以上にまたがるときだけ first / last へ移動できる
    pub fn is_navigable(&self) -> bool {
        self.total_pages() > 1
    }

    pub fn last_page(&self) -> i64 {
        (self.total_pages() - 1).max(0)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages()
    }
}
