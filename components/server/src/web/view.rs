use axum::{
    extract::{Query, State},
    response::Html,
    Form,
};
use serde::Deserialize;

use crate::web::{
    error::{Error, HtmlError},
    html, AppState,
};

type PageResult = core::result::Result<Html<String>, HtmlError>;

#[derive(Default, Deserialize)]
pub struct ViewQuery {
    pub password: Option<String>,
}

#[derive(Default, Deserialize)]
pub struct RemoveForm {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub timestamp: String,
}

/// Password form, or the record table once the right password is supplied.
pub async fn view(State(state): State<AppState>, Query(query): Query<ViewQuery>) -> PageResult {
    let Some(password) = query.password else {
        return Ok(Html(html::login_page(None)));
    };
    state.check_password(&password)?;

    let records = state.store.list().await;
    log::debug!("Showing {} record(s)", records.len());
    Ok(Html(html::records_page(&records, &password)))
}

pub async fn remove(State(state): State<AppState>, Form(form): Form<RemoveForm>) -> PageResult {
    state.check_password(&form.password)?;

    let removed =
        state.store.delete_by_timestamp(&form.timestamp).await.map_err(Error::DeleteFailed)?;
    log::info!("Removed {removed} record(s) stamped {}", form.timestamp);

    let records = state.store.list().await;
    Ok(Html(html::records_page(&records, &form.password)))
}
