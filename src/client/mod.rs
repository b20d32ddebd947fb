//! 命令行 / 脚本使用的客户端：接口封装、本地会话、展示工具与抽奖流程

pub mod api;
pub mod display;
pub mod lottery;
pub mod session;

pub use api::{ApiClient, ClientError, ClientResult};
pub use display::{format_relative, truncate_text};
pub use lottery::{spin_and_record, wheel_layout};
pub use session::{Session, SessionStore};

pub use crate::utils::normalize_url;
