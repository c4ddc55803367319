//! Category Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod products;
pub(crate) mod update;

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use catalog_app::domain::categories::models::Category;

    pub(super) fn make_category(id: i64, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            description: None,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: None,
            is_deleted: false,
        }
    }
}
