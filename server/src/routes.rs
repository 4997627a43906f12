//! Named procedures over HTTP.
//!
//! Queries are `GET /<name>`, mutations are `POST /<name>` with a JSON body.
//! Inputs are deserialized and validated here, before any handler runs.

use actix_web::{web, HttpRequest};
use chrono::Utc;
use todo_shared::{
    procedure, CreateTodoInput, DeleteTodoInput, DeleteTodoOutput, HealthStatus, RpcResponse,
    Todo, UpdateTodoStatusInput,
};
use validator::Validate;

use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;

type RpcResult<T> = Result<web::Json<RpcResponse<T>>, ApiError>;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::Validation(err.to_string()).into()
    }))
    .service(
        web::scope("")
            .service(procedure_resource(procedure::HEALTHCHECK, web::get().to(healthcheck)))
            .service(procedure_resource(procedure::GET_TODOS, web::get().to(get_todos)))
            .service(procedure_resource(procedure::CREATE_TODO, web::post().to(create_todo)))
            .service(procedure_resource(
                procedure::UPDATE_TODO_STATUS,
                web::post().to(update_todo_status),
            ))
            .service(procedure_resource(procedure::DELETE_TODO, web::post().to(delete_todo)))
            .default_service(web::to(unknown_procedure)),
    );
}

/// One procedure path; any other method on it is rejected with the envelope.
fn procedure_resource(name: &str, route: actix_web::Route) -> actix_web::Resource {
    web::resource(format!("/{name}"))
        .route(route)
        .default_service(web::to(method_not_supported))
}

fn ok<T>(data: T) -> RpcResult<T> {
    Ok(web::Json(RpcResponse::ok(data)))
}

async fn healthcheck() -> RpcResult<HealthStatus> {
    ok(HealthStatus {
        status: "ok".to_owned(),
        timestamp: Utc::now(),
    })
}

async fn get_todos(state: web::Data<AppState>) -> RpcResult<Vec<Todo>> {
    ok(handlers::get_todos(&state.store).await?)
}

async fn create_todo(
    state: web::Data<AppState>,
    input: web::Json<CreateTodoInput>,
) -> RpcResult<Todo> {
    let input = input.into_inner();
    input.validate()?;
    ok(handlers::create_todo(&state.store, input).await?)
}

async fn update_todo_status(
    state: web::Data<AppState>,
    input: web::Json<UpdateTodoStatusInput>,
) -> RpcResult<Todo> {
    ok(handlers::update_todo_status(&state.store, input.into_inner()).await?)
}

async fn delete_todo(
    state: web::Data<AppState>,
    input: web::Json<DeleteTodoInput>,
) -> RpcResult<DeleteTodoOutput> {
    ok(handlers::delete_todo(&state.store, input.into_inner()).await?)
}

async fn unknown_procedure(req: HttpRequest) -> Result<web::Json<RpcResponse<()>>, ApiError> {
    let name = req.path().trim_start_matches('/');
    Err(ApiError::NotFound(format!("No procedure found on path \"{name}\"")))
}

async fn method_not_supported(req: HttpRequest) -> Result<web::Json<RpcResponse<()>>, ApiError> {
    Err(ApiError::MethodNotSupported(format!(
        "Unsupported {} request to procedure at path \"{}\"",
        req.method(),
        req.path().trim_start_matches('/')
    )))
}
