pub mod card;
pub mod transfer;
pub mod user;

pub(crate) fn default_page() -> i32 {
    1
}

pub(crate) fn default_page_size() -> i32 {
    10
}
