use thiserror::Error;

use crate::utils::AppError;

/// 启动/运行期错误 (HTTP 请求错误见 [`AppError`])
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("工作目录初始化失败: {0}")]
    WorkDir(#[from] std::io::Error),

    #[error("数据库初始化失败: {0}")]
    Database(AppError),

    #[error("端口绑定失败 {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error("HTTP 服务异常退出: {0}")]
    Serve(std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
