pub mod announcement;
pub mod common;
pub mod lottery_history;
pub mod url;
pub mod url_category;
pub mod user;
pub mod wheel_config;

pub use announcement::*;
pub use common::*;
pub use lottery_history::*;
pub use url::*;
pub use url_category::*;
pub use user::*;
pub use wheel_config::*;
