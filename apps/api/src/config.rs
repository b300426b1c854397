//! # TodoAPI サーバー設定
//!
//! 環境変数からサーバーの設定を読み込む。
//!
//! 接続情報はソースコードにハードコードせず、起動時に一度だけ読み込んで
//! ストレージアダプタのコンストラクタへ明示的に渡す。

use std::env;

/// TodoAPI サーバーの設定
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// データベース接続 URL
    pub database_url: String,
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    ///
    /// `TODO_HOST` / `TODO_PORT` は未設定時にデフォルト値へフォールバックする。
    /// `DATABASE_URL` は必須。
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host: env::var("TODO_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("TODO_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("TODO_PORT は有効なポート番号である必要があります"),
            database_url: env::var("DATABASE_URL")?,
        })
    }
}
