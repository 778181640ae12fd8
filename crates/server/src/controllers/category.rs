use axum::Form;
use axum::extract::State;
use axum::response::Html;
use serde_json::{Value, json};
use tracing::info;
use wildseries_core::slug::lookup_key;
use wildseries_db::is_unique_violation;
use wildseries_db::repo::categories;

use crate::auth::AdminUser;
use crate::error::AppError;
use crate::forms::{CategoryForm, validate_category};
use crate::state::AppState;
use crate::views::{self, CategoryAddPage};

pub const CATEGORY_ADDED_MESSAGE: &str = "Votre catégorie a été ajoutée";

/// GET /category
pub async fn add_form(_admin: AdminUser) -> Html<String> {
    views::category_add(&CategoryAddPage {
        form: &CategoryForm::default(),
        errors: None,
        message: "",
    })
}

/// POST /category
///
/// The category is written only when the submitted form is valid.
pub async fn add(
    admin: AdminUser,
    State(state): State<AppState>,
    Form(form): Form<CategoryForm>,
) -> Result<Html<String>, AppError> {
    let form = form.normalized();

    let mut errors = validate_category(&form);
    if errors.is_none()
        && categories::find_by_name_key(&state.db, &lookup_key(&form.name))
            .await?
            .is_some()
    {
        errors = Some(duplicate_name());
    }

    let mut message = "";
    if errors.is_none() {
        match categories::create_category(&state.db, &form.name).await {
            Ok(category_id) => {
                info!(category_id, name = %form.name, admin = %admin.username, "category added");
                message = CATEGORY_ADDED_MESSAGE;
            }
            // Lost a race against a concurrent insert of the same name.
            Err(e) if is_unique_violation(&e) => errors = Some(duplicate_name()),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(views::category_add(&CategoryAddPage {
        form: &form,
        errors: errors.as_ref(),
        message,
    }))
}

fn duplicate_name() -> Value {
    json!({ "name": ["this category already exists"] })
}
