//! Update Category Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use catalog_app::domain::categories::data::CategoryUpdate;

use crate::{
    categories::{errors::into_status_error, models::CategoryResponse},
    extensions::*,
    state::State,
    validation,
};

/// Update Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

impl UpdateCategoryRequest {
    fn validate(&self) -> Result<(), StatusError> {
        validation::require_name(&self.name, 100)?;
        validation::limit_description(self.description.as_deref(), 500)
    }
}

impl From<UpdateCategoryRequest> for CategoryUpdate {
    fn from(request: UpdateCategoryRequest) -> Self {
        CategoryUpdate {
            name: request.name,
            description: request.description,
        }
    }
}

/// Update Category Handler
#[endpoint(tags("categories"), summary = "Update Category")]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<UpdateCategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    request.validate()?;

    let category = state
        .app
        .categories
        .update_category(id.into_inner(), request.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(category.into()))
}
