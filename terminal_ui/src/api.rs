//! Client side of the todo procedures.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use todo_shared::{
    procedure, CreateTodoInput, DeleteTodoInput, DeleteTodoOutput, ErrorCode, HealthStatus,
    RpcError, RpcResponse, Todo, UpdateTodoStatusInput,
};
use url::Url;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid server url: {0}")]
    Url(#[from] url::ParseError),

    #[error("{code:?}: {message}")]
    Rpc { code: ErrorCode, message: String },
}

impl From<RpcError> for ClientError {
    fn from(err: RpcError) -> Self {
        ClientError::Rpc {
            code: err.code,
            message: err.message,
        }
    }
}

/// The procedures the view depends on.
pub trait TodoApi {
    fn healthcheck(&self) -> impl Future<Output = Result<HealthStatus, ClientError>>;
    fn get_todos(&self) -> impl Future<Output = Result<Vec<Todo>, ClientError>>;
    fn create_todo(&self, input: CreateTodoInput) -> impl Future<Output = Result<Todo, ClientError>>;
    fn update_todo_status(
        &self,
        input: UpdateTodoStatusInput,
    ) -> impl Future<Output = Result<Todo, ClientError>>;
    fn delete_todo(
        &self,
        input: DeleteTodoInput,
    ) -> impl Future<Output = Result<DeleteTodoOutput, ClientError>>;
}

pub struct RpcClient {
    http: reqwest::Client,
    base: Url,
}

impl RpcClient {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        let mut base = Url::parse(server_url)?;
        // `Url::join` replaces the last segment unless the path ends in '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    async fn query<T: DeserializeOwned>(&self, name: &str) -> Result<T, ClientError> {
        let url = self.base.join(name)?;
        let envelope: RpcResponse<T> = self.http.get(url).send().await?.json().await?;
        Ok(envelope.into_result()?)
    }

    async fn mutate<I: Serialize, T: DeserializeOwned>(
        &self,
        name: &str,
        input: &I,
    ) -> Result<T, ClientError> {
        let url = self.base.join(name)?;
        let envelope: RpcResponse<T> = self
            .http
            .post(url)
            .json(input)
            .send()
            .await?
            .json()
            .await?;
        Ok(envelope.into_result()?)
    }
}

impl TodoApi for RpcClient {
    async fn healthcheck(&self) -> Result<HealthStatus, ClientError> {
        self.query(procedure::HEALTHCHECK).await
    }

    async fn get_todos(&self) -> Result<Vec<Todo>, ClientError> {
        self.query(procedure::GET_TODOS).await
    }

    async fn create_todo(&self, input: CreateTodoInput) -> Result<Todo, ClientError> {
        self.mutate(procedure::CREATE_TODO, &input).await
    }

    async fn update_todo_status(&self, input: UpdateTodoStatusInput) -> Result<Todo, ClientError> {
        self.mutate(procedure::UPDATE_TODO_STATUS, &input).await
    }

    async fn delete_todo(&self, input: DeleteTodoInput) -> Result<DeleteTodoOutput, ClientError> {
        self.mutate(procedure::DELETE_TODO, &input).await
    }
}
