//! Browser form handlers

use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, IntoResponse, Response},
    Form,
};

use super::predict::run_scoring;
use crate::models::VitalsForm;
use crate::{views, AppError, AppState};

/// Input form with default values
pub async fn index(State(state): State<AppState>) -> Response {
    let defaults = VitalsForm::default();

    match state.scorer() {
        Ok(_) => Html(views::form_page(&defaults)).into_response(),
        // Block up front rather than on submit
        Err(e) => error_response(&defaults, e),
    }
}

/// Form submission: score and render the result below the form
pub async fn submit(
    State(state): State<AppState>,
    submission: Result<Form<VitalsForm>, FormRejection>,
) -> Response {
    let form = match submission {
        Ok(Form(form)) => form,
        // Nothing usable came through; show the defaults again
        Err(rejection) => return error_response(&VitalsForm::default(), rejection.into()),
    };

    match run_scoring(&state, form) {
        Ok((_, result)) => Html(views::result_page(&form, &result)).into_response(),
        Err(e) => error_response(&form, e),
    }
}

fn error_response(values: &VitalsForm, err: AppError) -> Response {
    (err.status(), Html(views::error_page(values, &err.user_message()))).into_response()
}
