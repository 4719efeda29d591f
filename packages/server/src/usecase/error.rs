//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::ConnectionId;

/// 参加処理のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectError {
    /// 同じ接続が既に登録されている
    #[error("{0} is already registered")]
    AlreadyRegistered(ConnectionId),
}
