//! UseCase 層
//!
//! - `BroadcastMessageUseCase`: 整形・履歴追加・全員への配信
//! - `ConnectParticipantUseCase`: 登録と参加アナウンス
//! - `DisconnectParticipantUseCase`: 登録解除と退出アナウンス
//! - `ChatHub`: 登録簿と履歴を所有し、上記をまとめる

mod broadcast_message;
mod connect_participant;
mod disconnect_participant;
mod error;
mod hub;

pub use broadcast_message::{BroadcastMessageUseCase, BroadcastReport};
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::ConnectError;
pub use hub::ChatHub;
